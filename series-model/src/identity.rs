use crate::media_type::MediaType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The canonical answer to "what content does this page show".
///
/// Built once per activation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentIdentity {
    pub media_type: Option<MediaType>,
    pub media_id: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub episode_type: Option<String>,
}

impl ContentIdentity {
    /// Whether there is anything to ask the catalog about.
    pub fn is_resolvable(&self) -> bool {
        self.media_type.is_some() || self.media_id.is_some()
    }
}

impl std::fmt::Display for ContentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let media_type =
            self.media_type.as_ref().map(MediaType::as_str).unwrap_or("-");
        let media_id = self.media_id.as_deref().unwrap_or("-");
        write!(f, "{media_type}/{media_id}")?;
        if let Some(season) = self.season {
            write!(f, " s{season}")?;
        }
        if let Some(episode) = self.episode {
            write!(f, " e{episode}")?;
        }
        if let Some(kind) = &self.episode_type {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}

/// Outcome of identity resolution for one page activation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Resolution {
    /// The home route: show no detail content at all.
    Home,
    Content(ContentIdentity),
}

impl Resolution {
    pub fn is_home(&self) -> bool {
        matches!(self, Resolution::Home)
    }

    pub fn identity(&self) -> Option<&ContentIdentity> {
        match self {
            Resolution::Home => None,
            Resolution::Content(identity) => Some(identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolvable_needs_type_or_id() {
        assert!(!ContentIdentity::default().is_resolvable());
        let only_id = ContentIdentity {
            media_id: Some("42".into()),
            ..Default::default()
        };
        assert!(only_id.is_resolvable());
        let only_type = ContentIdentity {
            media_type: Some(MediaType::Movie),
            ..Default::default()
        };
        assert!(only_type.is_resolvable());
    }

    #[test]
    fn display_is_compact() {
        let identity = ContentIdentity {
            media_type: Some(MediaType::Tv),
            media_id: Some("42".into()),
            season: Some(2),
            episode: Some(5),
            episode_type: None,
        };
        assert_eq!(identity.to_string(), "tv/42 s2 e5");
    }
}
