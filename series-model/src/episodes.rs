use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Lookup table of locally hosted episodes, keyed by the page's episode keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalEpisodesDb(BTreeMap<String, Value>);

impl LocalEpisodesDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON payload embedded in the page.
    ///
    /// The payload must be a JSON object; arrays, scalars and malformed text
    /// are all errors.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self(map.into_iter().collect()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
