use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use series_contracts::MediaFetcher;
use series_model::{MediaMetadata, MediaType};
use tracing::{debug, error};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Missing media id")]
    MissingId,

    #[error("Missing media type")]
    MissingType,

    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Invalid API base URL {base}: {source}")]
    InvalidBaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL cannot carry a path: {0}")]
    CannotBeABase(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Not found")]
    NotFound,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited")]
    RateLimited,

    #[error("Unexpected status {0}")]
    Status(StatusCode),

    #[error("Parse error: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Stable classification for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingId
            | FetchError::MissingType
            | FetchError::UnsupportedType(_) => "identity",
            FetchError::InvalidBaseUrl { .. } | FetchError::CannotBeABase(_) => {
                "config"
            }
            FetchError::Client(_) | FetchError::Network(_) => "network",
            FetchError::NotFound => "not_found",
            FetchError::InvalidApiKey => "auth",
            FetchError::RateLimited => "rate_limited",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }

    fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::UNAUTHORIZED => FetchError::InvalidApiKey,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            other => FetchError::Status(other),
        }
    }
}

/// Fetches movie, series, season and episode details from a TMDB style
/// catalog.
///
/// No request timeout is configured; a slow catalog keeps the detail
/// section waiting.
#[derive(Debug, Clone)]
pub struct TmdbFetcher {
    client: Client,
    api_key: Option<String>,
    language: Option<String>,
}

impl TmdbFetcher {
    pub fn new(
        api_key: Option<String>,
        language: Option<String>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("series-page/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self::with_client(client, api_key, language))
    }

    pub fn with_client(
        client: Client,
        api_key: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            language: language.filter(|lang| !lang.is_empty()),
        }
    }

    /// Catalog URL for an identity, without credentials.
    ///
    /// An episode number without a season addresses the series itself.
    pub fn endpoint(
        api_base: &str,
        media_type: Option<&MediaType>,
        media_id: Option<&str>,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<Url, FetchError> {
        let media_type = media_type.ok_or(FetchError::MissingType)?;
        let media_id = media_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(FetchError::MissingId)?;

        let mut url =
            Url::parse(api_base).map_err(|source| FetchError::InvalidBaseUrl {
                base: api_base.to_string(),
                source,
            })?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FetchError::CannotBeABase(api_base.to_string()))?;
            segments.pop_if_empty();

            match media_type {
                MediaType::Movie => {
                    segments.extend(["movie", media_id]);
                }
                MediaType::Tv => {
                    segments.extend(["tv", media_id]);
                    if let Some(season) = season {
                        let season = season.to_string();
                        segments.extend(["season", season.as_str()]);
                        if let Some(episode) = episode {
                            let episode = episode.to_string();
                            segments.extend(["episode", episode.as_str()]);
                        }
                    }
                }
                MediaType::Other(other) => {
                    return Err(FetchError::UnsupportedType(other.clone()));
                }
            }
        }

        Ok(url)
    }

    async fn fetch(&self, mut url: Url) -> Result<MediaMetadata, FetchError> {
        if self.api_key.is_some() || self.language.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key);
            }
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let body: Value = response.json().await.map_err(FetchError::Decode)?;
        Ok(MediaMetadata::new(body))
    }
}

#[async_trait]
impl MediaFetcher for TmdbFetcher {
    async fn fetch_media_details(
        &self,
        api_base: &str,
        media_type: Option<&MediaType>,
        media_id: Option<&str>,
        season: Option<u32>,
        episode: Option<u32>,
        episode_type: Option<&str>,
    ) -> Option<MediaMetadata> {
        let result = match Self::endpoint(
            api_base, media_type, media_id, season, episode,
        ) {
            Ok(url) => {
                debug!(
                    path = %url.path(),
                    episode_type = ?episode_type,
                    "requesting catalog details"
                );
                self.fetch(url).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                error!(
                    kind = err.kind(),
                    media_type = ?media_type,
                    media_id = ?media_id,
                    "Error fetching media details: {}",
                    err
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.themoviedb.org/3";

    fn path(
        media_type: MediaType,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> String {
        TmdbFetcher::endpoint(BASE, Some(&media_type), Some("42"), season, episode)
            .unwrap()
            .path()
            .to_string()
    }

    #[test]
    fn endpoints_follow_identity_shape() {
        assert_eq!(path(MediaType::Movie, None, None), "/3/movie/42");
        assert_eq!(path(MediaType::Movie, Some(1), Some(2)), "/3/movie/42");
        assert_eq!(path(MediaType::Tv, None, None), "/3/tv/42");
        assert_eq!(path(MediaType::Tv, Some(2), None), "/3/tv/42/season/2");
        assert_eq!(
            path(MediaType::Tv, Some(2), Some(5)),
            "/3/tv/42/season/2/episode/5"
        );
        assert_eq!(path(MediaType::Tv, None, Some(5)), "/3/tv/42");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let url = TmdbFetcher::endpoint(
            "https://catalog.test/3/",
            Some(&MediaType::Movie),
            Some("7"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://catalog.test/3/movie/7");
    }

    #[test]
    fn ids_are_escaped_as_one_segment() {
        let url = TmdbFetcher::endpoint(
            BASE,
            Some(&MediaType::Movie),
            Some("../admin"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(url.path(), "/3/movie/..%2Fadmin");
    }

    #[test]
    fn unaddressable_identities_are_classified() {
        let missing_type =
            TmdbFetcher::endpoint(BASE, None, Some("1"), None, None).unwrap_err();
        assert_eq!(missing_type.kind(), "identity");

        let missing_id =
            TmdbFetcher::endpoint(BASE, Some(&MediaType::Tv), None, None, None)
                .unwrap_err();
        assert!(matches!(missing_id, FetchError::MissingId));

        let other = MediaType::Other("person".into());
        let unsupported =
            TmdbFetcher::endpoint(BASE, Some(&other), Some("1"), None, None)
                .unwrap_err();
        assert!(matches!(unsupported, FetchError::UnsupportedType(t) if t == "person"));

        let bad_base = TmdbFetcher::endpoint(
            "not a url",
            Some(&MediaType::Movie),
            Some("1"),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(bad_base.kind(), "config");
    }

    #[test]
    fn status_codes_are_classified() {
        assert!(matches!(
            FetchError::from_status(StatusCode::NOT_FOUND),
            FetchError::NotFound
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::UNAUTHORIZED),
            FetchError::InvalidApiKey
        ));
        assert_eq!(
            FetchError::from_status(StatusCode::BAD_GATEWAY).kind(),
            "status"
        );
    }

    #[tokio::test]
    async fn unaddressable_identity_collapses_to_none() {
        let fetcher = TmdbFetcher::new(None, None).unwrap();
        let result = fetcher
            .fetch_media_details(BASE, None, None, None, None, None)
            .await;
        assert!(result.is_none());
    }
}
