use std::sync::Arc;

use async_trait::async_trait;
use series_model::{MediaMetadata, MediaType};

/// Catalog lookup used by the content pipeline.
///
/// Every failure mode (unknown content, network trouble, an identity the
/// catalog cannot address) collapses to `None`; classifying failures is the
/// implementation's business.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetch metadata for one piece of content.
    async fn fetch_media_details(
        &self,
        api_base: &str,
        media_type: Option<&MediaType>,
        media_id: Option<&str>,
        season: Option<u32>,
        episode: Option<u32>,
        episode_type: Option<&str>,
    ) -> Option<MediaMetadata>;
}

#[async_trait]
impl<T: MediaFetcher + ?Sized> MediaFetcher for Arc<T> {
    async fn fetch_media_details(
        &self,
        api_base: &str,
        media_type: Option<&MediaType>,
        media_id: Option<&str>,
        season: Option<u32>,
        episode: Option<u32>,
        episode_type: Option<&str>,
    ) -> Option<MediaMetadata> {
        (**self)
            .fetch_media_details(
                api_base,
                media_type,
                media_id,
                season,
                episode,
                episode_type,
            )
            .await
    }
}
