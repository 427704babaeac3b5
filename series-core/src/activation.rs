//! One page activation, start to finish.

use std::sync::Arc;

use series_contracts::{MediaFetcher, PageBuilder, PageDocument, PreferenceStore};
use series_model::{Resolution, RouteContext, Theme};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::embedded::PageData;
use crate::navigation::{ADULT_CONTENT_LINK_ID, NavPresenceController};
use crate::pipeline::{CatalogEndpoints, ContentPipeline, RenderOutcome};
use crate::resolve::resolve;
use crate::theme::resolve_theme;

/// Everything a page needs to activate: its collaborators, the hosting
/// document and the preference store.
#[derive(Debug)]
pub struct Page<F, B, D, P> {
    pipeline: ContentPipeline<F, B>,
    builder: Arc<B>,
    document: Arc<D>,
    preferences: P,
}

impl<F, B, D, P> Page<F, B, D, P>
where
    F: MediaFetcher,
    B: PageBuilder,
    D: PageDocument<Node = B::Node>,
    P: PreferenceStore + Clone + 'static,
{
    pub fn new(
        fetcher: F,
        builder: Arc<B>,
        document: Arc<D>,
        preferences: P,
        endpoints: CatalogEndpoints,
    ) -> Self {
        Self {
            pipeline: ContentPipeline::new(fetcher, Arc::clone(&builder), endpoints),
            builder,
            document,
            preferences,
        }
    }

    pub fn document(&self) -> &Arc<D> {
        &self.document
    }

    /// Build the page chrome, start the nav presence controller, resolve the
    /// identity and run the content pipeline.
    ///
    /// Must be called from within a tokio runtime; the returned session owns
    /// the controller task.
    pub async fn activate(
        &self,
        route: &RouteContext,
        data: &PageData,
    ) -> PageSession {
        let theme = resolve_theme(route, data.default_theme.as_deref());
        let is_purple_theme = theme.is_purple();
        debug!(theme = %theme.as_str(), "activating page");

        self.document
            .append_to_root(self.builder.build_header(None, is_purple_theme));
        self.document
            .append_to_root(self.builder.build_main_content());

        let adult_content_enabled = self.preferences.get_preference();
        self.document.mount_navigation(
            self.builder
                .build_navigation_bar(adult_content_enabled, is_purple_theme),
        );

        let controller = NavPresenceController::new(
            self.preferences.clone(),
            self.document.nav_link(ADULT_CONTENT_LINK_ID),
        );
        let nav_state = controller.watch();
        let nav_task = controller.spawn();

        let resolution = resolve(route, data.dataset.as_ref());
        let outcome = self
            .pipeline
            .run(
                &resolution,
                data.local_episodes_json.as_deref(),
                is_purple_theme,
                self.document.as_ref(),
            )
            .await;

        info!(outcome = %outcome, home = resolution.is_home(), "page activated");

        PageSession {
            resolution,
            theme,
            outcome,
            nav_state,
            nav_task: Some(nav_task),
        }
    }
}

/// A live page. Dropping it (or calling [`unload`](Self::unload)) stops the
/// nav presence controller.
#[derive(Debug)]
pub struct PageSession {
    resolution: Resolution,
    theme: Theme,
    outcome: RenderOutcome,
    nav_state: watch::Receiver<Option<bool>>,
    nav_task: Option<JoinHandle<()>>,
}

impl PageSession {
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn outcome(&self) -> RenderOutcome {
        self.outcome
    }

    /// Hidden flag of the adult content link as last applied by the
    /// controller.
    pub fn nav_state(&self) -> watch::Receiver<Option<bool>> {
        self.nav_state.clone()
    }

    pub fn is_active(&self) -> bool {
        self.nav_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn unload(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.nav_task.take() {
            task.abort();
            debug!("page unloaded; nav presence controller stopped");
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.stop();
    }
}
