use async_trait::async_trait;
use series_model::{LocalEpisodesDb, MediaMetadata, MediaType};

/// Everything the detail page producer receives, in the order the page
/// script has always passed it.
#[derive(Debug, Clone, Copy)]
pub struct DetailPageRequest<'a> {
    pub api_base: &'a str,
    pub backdrop_base: &'a str,
    pub image_base: &'a str,
    pub metadata: &'a MediaMetadata,
    pub media_type: Option<&'a MediaType>,
    pub media_id: Option<&'a str>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub episode_type: Option<&'a str>,
    pub local_episodes_db: &'a LocalEpisodesDb,
    pub is_purple_theme: bool,
}

/// Opaque node producers for each region of the page.
#[async_trait]
pub trait PageBuilder: Send + Sync {
    /// Node type produced for the hosting document.
    type Node: Send + 'static;

    /// Site header. `user` is the signed-in display name, if any.
    fn build_header(
        &self,
        user: Option<&str>,
        is_purple_theme: bool,
    ) -> Self::Node;

    /// Main content region, which contains the detail section.
    fn build_main_content(&self) -> Self::Node;

    /// Navigation bar. The adult content link is always present and starts
    /// hidden unless `adult_content_enabled`.
    fn build_navigation_bar(
        &self,
        adult_content_enabled: bool,
        is_purple_theme: bool,
    ) -> Self::Node;

    /// Detail view for fetched metadata.
    async fn build_movie_detail_page(
        &self,
        request: DetailPageRequest<'_>,
    ) -> Self::Node;
}
