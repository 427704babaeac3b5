use crate::media_type::MediaType;
use crate::numbers::parse_ordinal;

/// Raw data attributes of the page's `local-media-data` element.
///
/// Values are stored exactly as the page supplied them; the typed accessors
/// treat blank strings as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmbeddedDataset {
    /// `data-media-type`
    pub media_type: Option<String>,
    /// `data-media-id`
    pub media_id: Option<String>,
    /// `data-season-number`
    pub season_number: Option<String>,
    /// `data-episode-number`
    pub episode_number: Option<String>,
    /// `data-episode-type`
    pub episode_type: Option<String>,
}

impl EmbeddedDataset {
    /// Assign a `data-*` attribute by its HTML name (without the `data-`
    /// prefix). Unknown attributes are ignored.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let slot = match name {
            "media-type" => &mut self.media_type,
            "media-id" => &mut self.media_id,
            "season-number" => &mut self.season_number,
            "episode-number" => &mut self.episode_number,
            "episode-type" => &mut self.episode_type,
            _ => return,
        };
        *slot = Some(value.into());
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type.as_deref().and_then(MediaType::parse)
    }

    pub fn media_id(&self) -> Option<String> {
        non_blank(self.media_id.as_deref())
    }

    pub fn season(&self) -> Option<u32> {
        self.season_number.as_deref().and_then(parse_ordinal)
    }

    pub fn episode(&self) -> Option<u32> {
        self.episode_number.as_deref().and_then(parse_ordinal)
    }

    pub fn episode_type(&self) -> Option<String> {
        non_blank(self.episode_type.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_map_to_fields() {
        let mut dataset = EmbeddedDataset::default();
        dataset.set_attribute("media-type", "tv");
        dataset.set_attribute("media-id", "1399");
        dataset.set_attribute("season-number", "3");
        dataset.set_attribute("episode-number", "x");
        dataset.set_attribute("unrelated", "ignored");

        assert_eq!(dataset.media_type(), Some(MediaType::Tv));
        assert_eq!(dataset.media_id().as_deref(), Some("1399"));
        assert_eq!(dataset.season(), Some(3));
        assert_eq!(dataset.episode(), None);
        assert_eq!(dataset.episode_type(), None);
    }

    #[test]
    fn blank_values_are_absent() {
        let dataset = EmbeddedDataset {
            media_type: Some(String::new()),
            media_id: Some("  ".into()),
            episode_type: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(dataset.media_type(), None);
        assert_eq!(dataset.media_id(), None);
        assert_eq!(dataset.episode_type(), None);
    }
}
