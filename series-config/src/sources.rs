use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub page: FilePageConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilePageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
}

/// Configuration read from environment variables. Blank values count as
/// unset.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub backdrop_base_url: Option<String>,
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub default_theme: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: var("SERIES_PAGE_CONFIG").map(PathBuf::from),
            api_base_url: var("SERIES_API_BASE_URL"),
            image_base_url: var("SERIES_IMAGE_BASE_URL"),
            backdrop_base_url: var("SERIES_BACKDROP_BASE_URL"),
            api_key: var("TMDB_API_KEY"),
            language: var("SERIES_LANGUAGE"),
            storage_path: var("SERIES_STORAGE_PATH").map(PathBuf::from),
            default_theme: var("SERIES_DEFAULT_THEME"),
        }
    }
}
