use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use thiserror::Error;
use url::Url;

use crate::models::{
    ConfigMetadata, DEFAULT_API_BASE_URL, DEFAULT_BACKDROP_BASE_URL,
    DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, PageConfig,
};
use crate::sources::{EnvConfig, FileConfig};
use crate::validation::ConfigWarnings;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("series-page.toml"),
        PathBuf::from("config/series-page.toml"),
    ]
});

const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env` into the process environment, then compose from the
    /// environment and the config file.
    ///
    /// An explicitly requested env file must exist; the implicit `.env`
    /// lookup is optional.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|source| {
                    ConfigLoadError::EnvFileUnreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                true
            }
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Compose from an already gathered environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(
            file_config.unwrap_or_default(),
            env,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;

        for warning in warnings.iter() {
            tracing::warn!(hint = ?warning.hint, "{}", warning.message);
        }

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<(PageConfig, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();
    let FileConfig {
        catalog,
        storage,
        page,
    } = file;

    let api_base_url = parse_base_url(
        "api_base_url",
        env.api_base_url.or(catalog.api_base_url),
        DEFAULT_API_BASE_URL,
    )?;
    let image_base_url = parse_base_url(
        "image_base_url",
        env.image_base_url.or(catalog.image_base_url),
        DEFAULT_IMAGE_BASE_URL,
    )?;
    let backdrop_base_url = parse_base_url(
        "backdrop_base_url",
        env.backdrop_base_url.or(catalog.backdrop_base_url),
        DEFAULT_BACKDROP_BASE_URL,
    )?;

    let api_key = env
        .api_key
        .or(catalog.api_key)
        .filter(|key| !key.trim().is_empty());
    if api_key.is_none() {
        warnings.push_with_hint(
            "No catalog API key configured; detail requests will be rejected",
            "Set TMDB_API_KEY or catalog.api_key",
        );
    }

    let language = env
        .language
        .or(catalog.language)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let storage_path = match env.storage_path.or(storage.path) {
        Some(path) => path,
        None => default_storage_path().unwrap_or_else(|| {
            warnings.push_with_hint(
                "Unable to determine a data directory; storing preferences in the working directory",
                "Set SERIES_STORAGE_PATH to choose a location",
            );
            PathBuf::from(STORAGE_FILE)
        }),
    };

    let default_theme = env.default_theme.or(page.default_theme);

    let config = PageConfig {
        api_base_url,
        image_base_url,
        backdrop_base_url,
        api_key,
        language,
        storage_path,
        default_theme,
        metadata,
    };

    Ok((config, warnings))
}

fn parse_base_url(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<Url, ConfigLoadError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw).map_err(|source| ConfigLoadError::InvalidUrl {
        field,
        value: raw.clone(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigLoadError::UnsupportedScheme {
            field,
            scheme: scheme.to_string(),
        }),
    }
}

/// `<platform data dir>/storage.json`, when the platform has one.
pub fn default_storage_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "series-page")
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE))
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field} '{value}'")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{field} must use http or https, not '{scheme}'")]
    UnsupportedScheme { field: &'static str, scheme: String },
    #[error("failed to load env file {path}")]
    EnvFileUnreadable {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: PageConfig,
    pub warnings: ConfigWarnings,
}
