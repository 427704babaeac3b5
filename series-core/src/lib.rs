//! # Series Core
//!
//! Page controller for the series detail page. Given a page URL and the data
//! the server embedded in the page, it works out which piece of content the
//! page is about, fetches its metadata from the catalog and hands the result
//! to the host's page builder.
//!
//! ## Overview
//!
//! - [`preferences`]: the persisted adult content preference and its change
//!   signals, over any [`KeyValueStorage`](series_contracts::KeyValueStorage)
//! - [`storage`]: in-memory and file backed storage with cross-context
//!   notifications
//! - [`resolve`]: identity resolution from the hash, the embedded dataset and
//!   the path
//! - [`pipeline`]: the fetch → render sequence and its error branch
//! - [`navigation`]: keeps the adult content nav link in sync with the
//!   preference
//! - [`activation`]: runs all of the above once per page activation
//! - [`providers`]: the TMDB backed fetch collaborator
//!
//! Nothing in here touches a real document; hosts implement
//! [`PageBuilder`](series_contracts::PageBuilder) and
//! [`PageDocument`](series_contracts::PageDocument).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod activation;
pub mod embedded;
pub mod error;
pub mod global;
pub mod navigation;
pub mod pipeline;
pub mod preferences;
pub mod providers;
pub mod resolve;
pub mod storage;
pub mod testing;
pub mod theme;

pub use activation::{Page, PageSession};
pub use embedded::PageData;
pub use error::{PageError, Result};
pub use navigation::{ADULT_CONTENT_LINK_ID, NavPresenceController};
pub use pipeline::{
    CatalogEndpoints, ContentPipeline, DETAIL_LOAD_ERROR, RenderOutcome,
};
pub use preferences::{ADULT_CONTENT_KEY, StoragePreference};
pub use providers::{FetchError, TmdbFetcher};
pub use resolve::{IdentitySource, PathSegments, is_home_route, resolve};
pub use storage::{FileStorage, MemoryStorage};
pub use theme::resolve_theme;
