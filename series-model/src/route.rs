use std::collections::BTreeMap;

use url::Url;

use crate::error::Result;

/// Fragment that selects the home route.
pub const HOME_HASH: &str = "#home";

/// Leading path segment shared by every page route (`/go/...`).
pub const ROUTE_SENTINEL: &str = "go";

/// Read-only snapshot of the page location taken at activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    /// `""` when there is no fragment, otherwise `#` followed by it.
    pub hash: String,
    /// Non-empty path segments in order, still percent-encoded.
    pub path_segments: Vec<String>,
    /// Decoded query parameters; a repeated key keeps its last value.
    pub query_params: BTreeMap<String, String>,
}

impl RouteContext {
    pub fn new(
        hash: impl Into<String>,
        path_segments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            hash: hash.into(),
            path_segments: path_segments.into_iter().map(Into::into).collect(),
            query_params: BTreeMap::new(),
        }
    }

    pub fn with_query(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn from_url(url: &Url) -> Self {
        let hash = match url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        };

        let path_segments = url
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        let mut query_params = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            query_params.insert(key.into_owned(), value.into_owned());
        }

        Self {
            hash,
            path_segments,
            query_params,
        }
    }

    /// Parse an absolute page URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)?;
        Ok(Self::from_url(&url))
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.path_segments.first().map(String::as_str)
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }
}
