use std::fmt::{Display, Formatter};

/// Theme used when neither the URL nor the document names one.
pub const DEFAULT_THEME: &str = "orange";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Theme {
    #[default]
    Orange,
    Purple,
    Other(String),
}

impl Theme {
    pub fn is_purple(&self) -> bool {
        matches!(self, Theme::Purple)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Theme::Orange => "orange",
            Theme::Purple => "purple",
            Theme::Other(raw) => raw.as_str(),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Theme {
    fn from(value: &str) -> Self {
        match value {
            "orange" => Theme::Orange,
            "purple" => Theme::Purple,
            other => Theme::Other(other.to_string()),
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::from(value.as_str())
    }
}

impl From<Theme> for String {
    fn from(value: Theme) -> Self {
        value.as_str().to_string()
    }
}
