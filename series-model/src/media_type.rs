use std::fmt::{Display, Formatter};

/// Catalog category of a piece of content.
///
/// Values other than `movie` and `tv` are kept verbatim so the fetch
/// collaborator can decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum MediaType {
    /// Feature film
    Movie,
    /// Episodic television
    Tv,
    /// Anything else the page declared
    Other(String),
}

impl MediaType {
    /// Parse a raw attribute value. Blank values carry no media type.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            other => MediaType::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Other(raw) => raw.as_str(),
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown_values() {
        assert_eq!(MediaType::parse("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::parse(" tv "), Some(MediaType::Tv));
        assert_eq!(
            MediaType::parse("anime"),
            Some(MediaType::Other("anime".into()))
        );
        assert_eq!(MediaType::parse(""), None);
        assert_eq!(MediaType::parse("   "), None);
    }

    #[test]
    fn display_round_trips_raw_value() {
        assert_eq!(MediaType::Tv.to_string(), "tv");
        assert_eq!(MediaType::Other("ova".into()).to_string(), "ova");
    }
}
