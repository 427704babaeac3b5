use std::path::PathBuf;

use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/w780";
pub const DEFAULT_LANGUAGE: &str = "es-ES";

/// Fully resolved host configuration.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub api_base_url: Url,
    pub image_base_url: Url,
    pub backdrop_base_url: Url,
    /// Catalog API key; requests go out unauthenticated without one.
    pub api_key: Option<String>,
    pub language: String,
    /// JSON file backing the persistent preference storage.
    pub storage_path: PathBuf,
    /// Theme used when neither the URL nor the page names one.
    pub default_theme: Option<String>,
    pub metadata: ConfigMetadata,
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

impl PageConfig {
    /// Base URLs as the strings handed to the catalog collaborators, with
    /// any trailing slash removed.
    pub fn api_base(&self) -> String {
        trim_base(&self.api_base_url)
    }

    pub fn image_base(&self) -> String {
        trim_base(&self.image_base_url)
    }

    pub fn backdrop_base(&self) -> String {
        trim_base(&self.backdrop_base_url)
    }
}

fn trim_base(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
