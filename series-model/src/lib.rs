//! Core data model definitions shared across the series page crates.
#![allow(missing_docs)]

pub mod dataset;
pub mod episodes;
pub mod error;
pub mod identity;
pub mod media_type;
pub mod metadata;
pub mod numbers;
pub mod prelude;
pub mod route;
pub mod storage_event;
pub mod theme;

// Intentionally curated re-exports for downstream consumers.
pub use dataset::EmbeddedDataset;
pub use episodes::LocalEpisodesDb;
pub use error::{ModelError, Result as ModelResult};
pub use identity::{ContentIdentity, Resolution};
pub use media_type::MediaType;
pub use metadata::MediaMetadata;
pub use route::{HOME_HASH, ROUTE_SENTINEL, RouteContext};
pub use storage_event::StorageEvent;
pub use theme::{DEFAULT_THEME, Theme};
