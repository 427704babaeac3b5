//! Snapshot of the types surface for controller and host crates.

pub use super::dataset::EmbeddedDataset;
pub use super::episodes::LocalEpisodesDb;
pub use super::identity::{ContentIdentity, Resolution};
pub use super::media_type::MediaType;
pub use super::metadata::MediaMetadata;
pub use super::route::{HOME_HASH, ROUTE_SENTINEL, RouteContext};
pub use super::storage_event::StorageEvent;
pub use super::theme::Theme;
