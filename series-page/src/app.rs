//! Wiring between configuration, storage and the page controller.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use series_config::PageConfig;
use series_contracts::{MediaFetcher, PreferenceStore};
use series_core::{
    CatalogEndpoints, FileStorage, Page, PageData, PageSession,
    StoragePreference, TmdbFetcher, global,
};
use series_model::RouteContext;
use tracing::{debug, info};

use crate::dom::HtmlDocument;
use crate::render::HtmlPageBuilder;

pub type FilePreferences = Arc<StoragePreference<FileStorage>>;

/// Open the persistent preference store and register it as the process
/// wide store.
///
/// `watch` installs a filesystem watcher so changes made by other
/// processes are reported; one-shot commands skip it.
pub fn open_preferences(
    config: &PageConfig,
    watch: bool,
) -> anyhow::Result<FilePreferences> {
    let path = &config.storage_path;
    let storage = if watch {
        FileStorage::open(path)
    } else {
        FileStorage::open_unwatched(path)
    }
    .with_context(|| format!("failed to open storage at {}", path.display()))?;

    debug!(path = %path.display(), watching = storage.is_watching(), "preference storage ready");
    let preferences = Arc::new(StoragePreference::adult_content(storage));
    global::install(preferences.clone());
    Ok(preferences)
}

pub fn catalog_fetcher(config: &PageConfig) -> anyhow::Result<TmdbFetcher> {
    TmdbFetcher::new(config.api_key.clone(), Some(config.language.clone()))
        .context("failed to build catalog client")
}

pub fn endpoints(config: &PageConfig) -> CatalogEndpoints {
    CatalogEndpoints {
        api_base: config.api_base(),
        image_base: config.image_base(),
        backdrop_base: config.backdrop_base(),
    }
}

/// Read the server-rendered page whose embedded data drives activation.
pub fn load_page_data(path: Option<&Path>) -> anyhow::Result<PageData> {
    match path {
        Some(path) => PageData::load(path)
            .with_context(|| format!("failed to read page {}", path.display())),
        None => Ok(PageData::default()),
    }
}

/// An activated page and the document it rendered into.
#[derive(Debug)]
pub struct RenderedPage {
    pub document: HtmlDocument,
    pub session: PageSession,
}

/// Activate the page for `url` against a fresh document.
///
/// The document's default theme comes from the page data, falling back to
/// the configured default.
pub async fn render_page<F, P>(
    config: &PageConfig,
    fetcher: F,
    preferences: P,
    url: &str,
    mut data: PageData,
) -> anyhow::Result<RenderedPage>
where
    F: MediaFetcher,
    P: PreferenceStore + Clone + 'static,
{
    let route = RouteContext::parse(url)
        .with_context(|| format!("invalid page URL '{url}'"))?;

    if data.default_theme.is_none() {
        data.default_theme = config.default_theme.clone();
    }

    let document = Arc::new(HtmlDocument::new(data.default_theme.clone()));
    let page = Page::new(
        fetcher,
        Arc::new(HtmlPageBuilder::new()),
        Arc::clone(&document),
        preferences,
        endpoints(config),
    );

    let session = page.activate(&route, &data).await;
    info!(url, outcome = %session.outcome(), "page rendered");

    Ok(RenderedPage {
        document: HtmlDocument::clone(&document),
        session,
    })
}
