use serde_json::Value;

/// Catalog metadata for the resolved content.
///
/// The catalog's schema is not modelled; only the handful of display fields
/// the detail page needs get accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata(Value);

impl MediaMetadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    /// Movies carry `title`, series and episodes carry `name`.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title").or_else(|| self.str_field("name"))
    }

    pub fn overview(&self) -> Option<&str> {
        self.str_field("overview")
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.str_field("poster_path")
            .or_else(|| self.str_field("still_path"))
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.str_field("backdrop_path")
    }

    pub fn release_date(&self) -> Option<&str> {
        self.str_field("release_date")
            .or_else(|| self.str_field("first_air_date"))
            .or_else(|| self.str_field("air_date"))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl From<Value> for MediaMetadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
