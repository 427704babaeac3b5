use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use series_contracts::{
    DetailOutcome, DetailPageRequest, MediaFetcher, NavLink, PageBuilder,
    PageDocument,
};
use series_model::{MediaMetadata, MediaType};
use tokio::sync::Notify;

use crate::navigation::ADULT_CONTENT_LINK_ID;

/// Arguments of one `fetch_media_details` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub api_base: String,
    pub media_type: Option<MediaType>,
    pub media_id: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub episode_type: Option<String>,
}

/// Fetcher that records its calls and answers with a canned payload.
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
    response: Option<Value>,
    calls: Arc<Mutex<Vec<FetchCall>>>,
    gate: Option<Arc<Notify>>,
}

impl StubFetcher {
    pub fn returning(response: Option<Value>) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    /// A fetcher that holds every call until [`release`](Self::release).
    pub fn gated(response: Option<Value>) -> Self {
        Self {
            response,
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    /// Let one pending (or the next) gated call complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().clone()
    }

    /// Yield until at least one call has been recorded.
    pub async fn wait_for_call(&self) {
        while self.calls.lock().is_empty() {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl MediaFetcher for StubFetcher {
    async fn fetch_media_details(
        &self,
        api_base: &str,
        media_type: Option<&MediaType>,
        media_id: Option<&str>,
        season: Option<u32>,
        episode: Option<u32>,
        episode_type: Option<&str>,
    ) -> Option<MediaMetadata> {
        self.calls.lock().push(FetchCall {
            api_base: api_base.to_string(),
            media_type: media_type.cloned(),
            media_id: media_id.map(str::to_string),
            season,
            episode,
            episode_type: episode_type.map(str::to_string),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.response.clone().map(MediaMetadata::new)
    }
}

/// Node produced by [`RecordingBuilder`]: a short description of what was
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubNode(pub String);

/// Owned copy of a [`DetailPageRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDetailRequest {
    pub api_base: String,
    pub backdrop_base: String,
    pub image_base: String,
    pub title: Option<String>,
    pub media_type: Option<MediaType>,
    pub media_id: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub episode_type: Option<String>,
    pub local_episode_count: usize,
    pub is_purple_theme: bool,
}

#[derive(Debug, Default)]
struct BuilderLog {
    headers: Vec<(Option<String>, bool)>,
    main_content: usize,
    navigation_bars: Vec<(bool, bool)>,
    details: Vec<RecordedDetailRequest>,
}

/// Page builder that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingBuilder {
    log: Arc<Mutex<BuilderLog>>,
}

impl RecordingBuilder {
    pub fn headers(&self) -> Vec<(Option<String>, bool)> {
        self.log.lock().headers.clone()
    }

    pub fn main_content_builds(&self) -> usize {
        self.log.lock().main_content
    }

    /// `(adult_content_enabled, is_purple_theme)` per navigation bar built.
    pub fn navigation_bars(&self) -> Vec<(bool, bool)> {
        self.log.lock().navigation_bars.clone()
    }

    pub fn detail_requests(&self) -> Vec<RecordedDetailRequest> {
        self.log.lock().details.clone()
    }
}

#[async_trait]
impl PageBuilder for RecordingBuilder {
    type Node = StubNode;

    fn build_header(&self, user: Option<&str>, is_purple_theme: bool) -> StubNode {
        self.log
            .lock()
            .headers
            .push((user.map(str::to_string), is_purple_theme));
        StubNode("header".into())
    }

    fn build_main_content(&self) -> StubNode {
        self.log.lock().main_content += 1;
        StubNode("main".into())
    }

    fn build_navigation_bar(
        &self,
        adult_content_enabled: bool,
        is_purple_theme: bool,
    ) -> StubNode {
        self.log
            .lock()
            .navigation_bars
            .push((adult_content_enabled, is_purple_theme));
        StubNode(format!("nav adult={adult_content_enabled}"))
    }

    async fn build_movie_detail_page(
        &self,
        request: DetailPageRequest<'_>,
    ) -> StubNode {
        let recorded = RecordedDetailRequest {
            api_base: request.api_base.to_string(),
            backdrop_base: request.backdrop_base.to_string(),
            image_base: request.image_base.to_string(),
            title: request.metadata.title().map(str::to_string),
            media_type: request.media_type.cloned(),
            media_id: request.media_id.map(str::to_string),
            season: request.season,
            episode: request.episode,
            episode_type: request.episode_type.map(str::to_string),
            local_episode_count: request.local_episodes_db.len(),
            is_purple_theme: request.is_purple_theme,
        };
        let label = format!(
            "detail {}",
            recorded.title.as_deref().unwrap_or("untitled")
        );
        self.log.lock().details.push(recorded);
        StubNode(label)
    }
}

/// Nav link whose hidden flag is shared between clones.
#[derive(Debug, Clone, Default)]
pub struct StubLink {
    hidden: Arc<AtomicBool>,
}

impl NavLink for StubLink {
    fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::SeqCst);
    }

    fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    root: Vec<StubNode>,
    navigation: Option<StubNode>,
    detail: Option<DetailOutcome<StubNode>>,
    detail_renders: usize,
}

/// Document that keeps whatever it is given.
#[derive(Debug, Clone)]
pub struct RecordingDocument {
    state: Arc<Mutex<DocumentState>>,
    link: Option<StubLink>,
}

impl Default for RecordingDocument {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            link: Some(StubLink::default()),
        }
    }
}

impl RecordingDocument {
    /// A document whose navigation has no adult content link.
    pub fn without_nav_link() -> Self {
        Self {
            link: None,
            ..Self::default()
        }
    }

    pub fn link(&self) -> Option<StubLink> {
        self.link.clone()
    }

    pub fn root(&self) -> Vec<StubNode> {
        self.state.lock().root.clone()
    }

    pub fn navigation(&self) -> Option<StubNode> {
        self.state.lock().navigation.clone()
    }

    /// Last outcome applied to the detail section.
    pub fn detail(&self) -> Option<DetailOutcome<StubNode>> {
        self.state.lock().detail.clone()
    }

    pub fn detail_renders(&self) -> usize {
        self.state.lock().detail_renders
    }
}

impl PageDocument for RecordingDocument {
    type Node = StubNode;
    type NavLink = StubLink;

    fn append_to_root(&self, node: StubNode) {
        self.state.lock().root.push(node);
    }

    fn mount_navigation(&self, nav_bar: StubNode) {
        self.state.lock().navigation = Some(nav_bar);
    }

    fn nav_link(&self, id: &str) -> Option<StubLink> {
        let mounted = self.state.lock().navigation.is_some();
        if mounted && id == ADULT_CONTENT_LINK_ID {
            self.link.clone()
        } else {
            None
        }
    }

    fn render_detail(&self, outcome: DetailOutcome<StubNode>) {
        let mut state = self.state.lock();
        state.detail = Some(outcome);
        state.detail_renders += 1;
    }
}
