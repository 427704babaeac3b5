use series_model::numbers::parse_ordinal;
use series_model::{EmbeddedDataset, MediaType, ROUTE_SENTINEL, RouteContext};

const SEASON_TOKEN: &str = "season";
const EPISODE_TOKEN: &str = "episode";

/// One input to identity resolution. Every field defaults to "no opinion".
pub trait IdentitySource {
    fn media_type(&self) -> Option<MediaType> {
        None
    }

    fn media_id(&self) -> Option<String> {
        None
    }

    fn season(&self) -> Option<u32> {
        None
    }

    fn episode(&self) -> Option<u32> {
        None
    }

    fn episode_type(&self) -> Option<String> {
        None
    }
}

/// The embedded dataset is authoritative for every field.
impl IdentitySource for EmbeddedDataset {
    fn media_type(&self) -> Option<MediaType> {
        EmbeddedDataset::media_type(self)
    }

    fn media_id(&self) -> Option<String> {
        EmbeddedDataset::media_id(self)
    }

    fn season(&self) -> Option<u32> {
        EmbeddedDataset::season(self)
    }

    fn episode(&self) -> Option<u32> {
        EmbeddedDataset::episode(self)
    }

    fn episode_type(&self) -> Option<String> {
        EmbeddedDataset::episode_type(self)
    }
}

/// Legacy `/go/.../season/<n>/episode/<n>` links.
///
/// Only offers season and episode numbers.
#[derive(Debug, Clone, Copy)]
pub struct PathSegments<'a> {
    segments: &'a [String],
}

impl<'a> PathSegments<'a> {
    /// `None` unless the path has at least two segments and starts with the
    /// route sentinel.
    pub fn from_route(route: &'a RouteContext) -> Option<Self> {
        let segments = route.path_segments.as_slice();
        match segments {
            [first, _, ..] if first == ROUTE_SENTINEL => Some(Self { segments }),
            _ => None,
        }
    }

    /// Number following the first occurrence of `token`.
    fn number_after(&self, token: &str) -> Option<u32> {
        let index = self.segments.iter().position(|s| s == token)?;
        self.segments
            .get(index + 1)
            .and_then(|value| parse_ordinal(value))
    }
}

impl IdentitySource for PathSegments<'_> {
    fn season(&self) -> Option<u32> {
        self.number_after(SEASON_TOKEN)
    }

    fn episode(&self) -> Option<u32> {
        self.number_after(EPISODE_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_at_end_of_path_yield_nothing() {
        let route = RouteContext::new("", ["go", "show", "season"]);
        let path = PathSegments::from_route(&route).unwrap();
        assert_eq!(path.season(), None);
        assert_eq!(path.episode(), None);
    }

    #[test]
    fn token_followed_by_token_is_malformed() {
        let route = RouteContext::new("", ["go", "season", "episode", "5"]);
        let path = PathSegments::from_route(&route).unwrap();
        assert_eq!(path.season(), None);
        assert_eq!(path.episode(), Some(5));
    }
}
