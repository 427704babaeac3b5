//! Trait surfaces that describe the collaborators of the page controller.
//!
//! The controller in `series-core` only ever talks to storage, the catalog
//! and the page through these traits, which keeps resolution and
//! orchestration testable without a document or a network.

pub mod document;
pub mod fetch;
pub mod preference;
pub mod render;
pub mod storage;

pub use document::{DetailOutcome, NavLink, PageDocument};
pub use fetch::MediaFetcher;
pub use preference::{PreferenceSignal, PreferenceStore};
pub use render::{DetailPageRequest, PageBuilder};
pub use storage::{KeyValueStorage, StorageError};

/// Frequently used traits for orchestration and host crates.
pub mod prelude {
    pub use super::document::{DetailOutcome, NavLink, PageDocument};
    pub use super::fetch::MediaFetcher;
    pub use super::preference::{PreferenceSignal, PreferenceStore};
    pub use super::render::{DetailPageRequest, PageBuilder};
    pub use super::storage::{KeyValueStorage, StorageError};
}
