//! Fetch → render sequencing for the detail section.

use std::fmt;
use std::sync::Arc;

use series_contracts::{
    DetailOutcome, DetailPageRequest, MediaFetcher, PageBuilder, PageDocument,
};
use series_model::{ContentIdentity, Resolution};
use tracing::{debug, error, info, warn};

use crate::embedded::parse_local_episodes;

/// Message shown in the detail section when the catalog has nothing for us.
pub const DETAIL_LOAD_ERROR: &str =
    "No se pudo cargar la información del contenido.";

/// Base URLs handed to the fetch and render collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    pub api_base: String,
    pub image_base: String,
    pub backdrop_base: String,
}

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Cleared,
    Rendered,
    Error,
}

impl RenderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderOutcome::Cleared => "cleared",
            RenderOutcome::Rendered => "rendered",
            RenderOutcome::Error => "error",
        }
    }
}

impl fmt::Display for RenderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs a resolved identity through the catalog and the page builder.
#[derive(Debug)]
pub struct ContentPipeline<F, B> {
    fetcher: F,
    builder: Arc<B>,
    endpoints: CatalogEndpoints,
}

impl<F, B> ContentPipeline<F, B>
where
    F: MediaFetcher,
    B: PageBuilder,
{
    pub fn new(fetcher: F, builder: Arc<B>, endpoints: CatalogEndpoints) -> Self {
        Self {
            fetcher,
            builder,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    /// Run the pipeline once and apply the result to `document`.
    ///
    /// `local_episodes_json` is only parsed when there is something to render.
    pub async fn run<D>(
        &self,
        resolution: &Resolution,
        local_episodes_json: Option<&str>,
        is_purple_theme: bool,
        document: &D,
    ) -> RenderOutcome
    where
        D: PageDocument<Node = B::Node>,
    {
        let outcome = match resolution {
            Resolution::Home => {
                debug!("home route; clearing detail section");
                DetailOutcome::Cleared
            }
            Resolution::Content(identity) if !identity.is_resolvable() => {
                warn!(
                    "no media type or id could be resolved; skipping catalog fetch"
                );
                DetailOutcome::Error(DETAIL_LOAD_ERROR.to_string())
            }
            Resolution::Content(identity) => {
                self.fetch_and_build(identity, local_episodes_json, is_purple_theme)
                    .await
            }
        };

        let result = match &outcome {
            DetailOutcome::Cleared => RenderOutcome::Cleared,
            DetailOutcome::Rendered(_) => RenderOutcome::Rendered,
            DetailOutcome::Error(_) => RenderOutcome::Error,
        };
        document.render_detail(outcome);
        info!(outcome = %result, "detail section updated");
        result
    }

    async fn fetch_and_build(
        &self,
        identity: &ContentIdentity,
        local_episodes_json: Option<&str>,
        is_purple_theme: bool,
    ) -> DetailOutcome<B::Node> {
        debug!(identity = %identity, api_base = %self.endpoints.api_base, "fetching media details");

        let metadata = self
            .fetcher
            .fetch_media_details(
                &self.endpoints.api_base,
                identity.media_type.as_ref(),
                identity.media_id.as_deref(),
                identity.season,
                identity.episode,
                identity.episode_type.as_deref(),
            )
            .await;

        let Some(metadata) = metadata else {
            error!(identity = %identity, "Error loading media details");
            return DetailOutcome::Error(DETAIL_LOAD_ERROR.to_string());
        };

        let local_episodes_db = parse_local_episodes(local_episodes_json);
        let request = DetailPageRequest {
            api_base: &self.endpoints.api_base,
            backdrop_base: &self.endpoints.backdrop_base,
            image_base: &self.endpoints.image_base,
            metadata: &metadata,
            media_type: identity.media_type.as_ref(),
            media_id: identity.media_id.as_deref(),
            season: identity.season,
            episode: identity.episode,
            episode_type: identity.episode_type.as_deref(),
            local_episodes_db: &local_episodes_db,
            is_purple_theme,
        };

        let view = self.builder.build_movie_detail_page(request).await;
        DetailOutcome::Rendered(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingBuilder, RecordingDocument, StubFetcher};
    use series_model::MediaType;
    use serde_json::json;

    fn endpoints() -> CatalogEndpoints {
        CatalogEndpoints {
            api_base: "https://catalog.test/3".into(),
            image_base: "https://img.test/w500".into(),
            backdrop_base: "https://img.test/w780".into(),
        }
    }

    fn tv(id: &str) -> Resolution {
        Resolution::Content(ContentIdentity {
            media_type: Some(MediaType::Tv),
            media_id: Some(id.into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn unresolvable_identity_is_an_error_without_fetch() {
        let fetcher = StubFetcher::returning(Some(json!({"name": "x"})));
        let pipeline = ContentPipeline::new(
            fetcher.clone(),
            Arc::new(RecordingBuilder::default()),
            endpoints(),
        );
        let document = RecordingDocument::default();

        let outcome = pipeline
            .run(
                &Resolution::Content(ContentIdentity::default()),
                None,
                false,
                &document,
            )
            .await;

        assert_eq!(outcome, RenderOutcome::Error);
        assert!(fetcher.calls().is_empty());
        assert_eq!(
            document.detail(),
            Some(DetailOutcome::Error(DETAIL_LOAD_ERROR.to_string()))
        );
    }

    #[tokio::test]
    async fn request_carries_endpoints_and_theme() {
        let builder = Arc::new(RecordingBuilder::default());
        let pipeline = ContentPipeline::new(
            StubFetcher::returning(Some(json!({"name": "Dark"}))),
            builder.clone(),
            endpoints(),
        );
        let document = RecordingDocument::default();

        let outcome = pipeline
            .run(&tv("70523"), Some(r#"{"s1e1": {}}"#), true, &document)
            .await;

        assert_eq!(outcome, RenderOutcome::Rendered);
        let requests = builder.detail_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.api_base, "https://catalog.test/3");
        assert_eq!(request.image_base, "https://img.test/w500");
        assert_eq!(request.backdrop_base, "https://img.test/w780");
        assert_eq!(request.media_id.as_deref(), Some("70523"));
        assert_eq!(request.local_episode_count, 1);
        assert!(request.is_purple_theme);
    }
}
