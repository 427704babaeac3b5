//! End-to-end activation scenarios against recording collaborators.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use series_contracts::{
    DetailOutcome, KeyValueStorage, NavLink, PreferenceStore,
};
use series_core::testing::{
    RecordingBuilder, RecordingDocument, StubFetcher, StubNode,
};
use series_core::{
    ADULT_CONTENT_KEY, CatalogEndpoints, DETAIL_LOAD_ERROR, MemoryStorage,
    Page, PageData, RenderOutcome, StoragePreference,
};
use series_model::{MediaType, Resolution, RouteContext};

type Prefs = Arc<StoragePreference<MemoryStorage>>;
type TestPage = Page<StubFetcher, RecordingBuilder, RecordingDocument, Prefs>;

struct Harness {
    page: TestPage,
    fetcher: StubFetcher,
    builder: Arc<RecordingBuilder>,
    document: Arc<RecordingDocument>,
    storage: MemoryStorage,
    preferences: Prefs,
}

impl Harness {
    fn new(fetcher: StubFetcher) -> Self {
        Self::with_document(fetcher, RecordingDocument::default())
    }

    fn with_document(fetcher: StubFetcher, document: RecordingDocument) -> Self {
        let storage = MemoryStorage::new();
        let preferences = Arc::new(StoragePreference::adult_content(storage.clone()));
        let builder = Arc::new(RecordingBuilder::default());
        let document = Arc::new(document);
        let page = Page::new(
            fetcher.clone(),
            Arc::clone(&builder),
            Arc::clone(&document),
            Arc::clone(&preferences),
            CatalogEndpoints {
                api_base: "https://catalog.test/3".into(),
                image_base: "https://img.test/w500".into(),
                backdrop_base: "https://img.test/w780".into(),
            },
        );

        Self {
            page,
            fetcher,
            builder,
            document,
            storage,
            preferences,
        }
    }

    fn link_hidden(&self) -> bool {
        self.document
            .link()
            .expect("document has a nav link")
            .is_hidden()
    }
}

fn route(url: &str) -> RouteContext {
    RouteContext::parse(url).expect("valid page url")
}

fn tv_page(media_id: &str, extra: &str) -> PageData {
    PageData::from_html(&format!(
        r#"<body data-default-theme="orange">
             <div id="local-media-data" data-media-type="tv" data-media-id="{media_id}"></div>
             {extra}
           </body>"#
    ))
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn home_route_clears_detail_without_fetching() {
    let harness = Harness::new(StubFetcher::returning(Some(json!({"name": "x"}))));

    let session = harness
        .page
        .activate(&route("https://site.test/go#home"), &tv_page("42", ""))
        .await;

    assert_eq!(session.resolution(), &Resolution::Home);
    assert_eq!(session.outcome(), RenderOutcome::Cleared);
    assert!(harness.fetcher.calls().is_empty());
    assert_eq!(harness.document.detail(), Some(DetailOutcome::Cleared));
    assert!(harness.builder.detail_requests().is_empty());
}

#[tokio::test]
async fn missing_metadata_shows_fixed_message_and_no_view() {
    let harness = Harness::new(StubFetcher::returning(None));

    let session = harness
        .page
        .activate(
            &route("https://site.test/go/season/2/episode/5"),
            &tv_page("42", ""),
        )
        .await;

    assert_eq!(session.outcome(), RenderOutcome::Error);
    assert_eq!(
        harness.document.detail(),
        Some(DetailOutcome::Error(DETAIL_LOAD_ERROR.to_string()))
    );
    assert!(harness.builder.detail_requests().is_empty());

    let calls = harness.fetcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].api_base, "https://catalog.test/3");
    assert_eq!(calls[0].media_type, Some(MediaType::Tv));
    assert_eq!(calls[0].media_id.as_deref(), Some("42"));
    assert_eq!(calls[0].season, Some(2));
    assert_eq!(calls[0].episode, Some(5));
    assert_eq!(calls[0].episode_type, None);
}

#[tokio::test]
async fn successful_fetch_renders_detail_view() {
    let harness = Harness::new(StubFetcher::returning(Some(json!({"name": "Dark"}))));
    let episodes = r#"<script id="local-episodes-db">{"s1e1": {}, "s1e2": {}}</script>"#;

    let session = harness
        .page
        .activate(&route("https://site.test/go/dark"), &tv_page("70523", episodes))
        .await;

    assert_eq!(session.outcome(), RenderOutcome::Rendered);
    assert!(!session.theme().is_purple());
    assert_eq!(
        harness.document.detail(),
        Some(DetailOutcome::Rendered(StubNode("detail Dark".into())))
    );
    assert_eq!(
        harness.document.root(),
        vec![StubNode("header".into()), StubNode("main".into())]
    );
    assert_eq!(harness.builder.headers(), vec![(None, false)]);
    assert_eq!(harness.builder.navigation_bars(), vec![(false, false)]);

    let requests = harness.builder.detail_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].title.as_deref(), Some("Dark"));
    assert_eq!(requests[0].local_episode_count, 2);
    assert!(harness.link_hidden());
}

#[tokio::test]
async fn malformed_local_episodes_still_render() {
    let harness = Harness::new(StubFetcher::returning(Some(json!({"title": "Dune"}))));
    let episodes = r#"<script id="local-episodes-db">[1, 2, 3]</script>"#;

    let session = harness
        .page
        .activate(&route("https://site.test/go/dune"), &tv_page("438631", episodes))
        .await;

    assert_eq!(session.outcome(), RenderOutcome::Rendered);
    let requests = harness.builder.detail_requests();
    assert_eq!(requests[0].local_episode_count, 0);
}

#[tokio::test]
async fn theme_query_overrides_document_default() {
    let harness = Harness::new(StubFetcher::returning(None));

    let session = harness
        .page
        .activate(&route("https://site.test/go/x?theme=purple"), &tv_page("1", ""))
        .await;

    assert!(session.theme().is_purple());
    assert_eq!(harness.builder.headers(), vec![(None, true)]);
    assert_eq!(harness.builder.navigation_bars(), vec![(false, true)]);
}

#[tokio::test]
async fn stored_preference_seeds_navigation() {
    let harness = Harness::new(StubFetcher::returning(None));
    harness.preferences.set_preference(true).unwrap();

    let session = harness
        .page
        .activate(&route("https://site.test/go/x"), &tv_page("1", ""))
        .await;

    assert_eq!(harness.builder.navigation_bars(), vec![(true, false)]);
    assert_eq!(*session.nav_state().borrow(), Some(false));
    assert!(!harness.link_hidden());
}

#[tokio::test]
async fn other_tab_toggles_link_for_preference_key_only() {
    let harness = Harness::new(StubFetcher::returning(None));
    let other_tab = harness.storage.fork_context();

    let session = harness
        .page
        .activate(&route("https://site.test/go/x"), &tv_page("1", ""))
        .await;
    assert!(harness.link_hidden());

    other_tab.set_item(ADULT_CONTENT_KEY, "true").unwrap();
    let mut state = session.nav_state();
    tokio::time::timeout(
        Duration::from_secs(1),
        state.wait_for(|hidden| *hidden == Some(false)),
    )
    .await
    .expect("nav link shown after storage event")
    .expect("controller still running");
    assert!(!harness.link_hidden());

    // Written from the page's own context: no storage event reaches it.
    harness.storage.set_item(ADULT_CONTENT_KEY, "false").unwrap();
    other_tab.set_item("volume", "3").unwrap();
    settle().await;
    assert!(!harness.link_hidden(), "unrelated key re-rendered the link");

    harness.preferences.set_preference(false).unwrap();
    tokio::time::timeout(
        Duration::from_secs(1),
        state.wait_for(|hidden| *hidden == Some(true)),
    )
    .await
    .expect("nav link hidden after local change")
    .expect("controller still running");
}

#[tokio::test]
async fn preference_change_during_fetch_is_applied() {
    let harness = Harness::new(StubFetcher::gated(Some(json!({"name": "Dark"}))));

    let dark_route = route("https://site.test/go/dark");
    let dark_page = tv_page("70523", "");
    let activation = harness.page.activate(&dark_route, &dark_page);

    let driver = async {
        harness.fetcher.wait_for_call().await;
        assert!(harness.link_hidden());
        assert_eq!(harness.document.detail_renders(), 0);

        harness.preferences.set_preference(true).unwrap();
        while harness.link_hidden() {
            tokio::task::yield_now().await;
        }
        harness.fetcher.release();
    };

    let (session, ()) = tokio::join!(activation, driver);

    assert_eq!(session.outcome(), RenderOutcome::Rendered);
    assert!(!harness.link_hidden());
}

#[tokio::test]
async fn unload_stops_reacting_to_changes() {
    let harness = Harness::new(StubFetcher::returning(None));
    let other_tab = harness.storage.fork_context();

    let session = harness
        .page
        .activate(&route("https://site.test/go/x"), &tv_page("1", ""))
        .await;
    assert!(session.is_active());
    session.unload();

    other_tab.set_item(ADULT_CONTENT_KEY, "true").unwrap();
    settle().await;
    assert!(harness.link_hidden());
}

#[tokio::test]
async fn page_without_nav_link_still_activates() {
    let harness = Harness::with_document(
        StubFetcher::returning(Some(json!({"name": "Dark"}))),
        RecordingDocument::without_nav_link(),
    );

    let session = harness
        .page
        .activate(&route("https://site.test/go/x"), &tv_page("1", ""))
        .await;

    assert_eq!(session.outcome(), RenderOutcome::Rendered);
    assert_eq!(*session.nav_state().borrow(), None);
    harness.preferences.set_preference(true).unwrap();
    settle().await;
    assert_eq!(*session.nav_state().borrow(), None);
}
