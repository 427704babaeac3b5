//! Configuration for the series page host.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `.env` and process environment variables. See [`ConfigLoader`].

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    ConfigMetadata, DEFAULT_API_BASE_URL, DEFAULT_BACKDROP_BASE_URL,
    DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, PageConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
