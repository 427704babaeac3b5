use std::sync::Arc;

use futures::stream::BoxStream;

use crate::storage::StorageError;

/// Something that happened which may have changed the preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceSignal {
    /// `set_preference` was called in this execution context.
    Local,
    /// Another context changed shared storage. `key` is whatever the storage
    /// layer reported and is not filtered.
    Storage {
        /// Key reported by the storage layer; `None` means "everything".
        key: Option<String>,
    },
}

/// A persisted boolean preference with change notifications.
///
/// Components depend on this interface rather than on a global so tests and
/// hosts can inject their own storage.
pub trait PreferenceStore: Send + Sync {
    /// Storage key the preference lives under.
    fn key(&self) -> &str;

    /// `true` iff the stored value is exactly `"true"`. Absent means `false`.
    fn get_preference(&self) -> bool;

    /// Persist the value and notify in-context subscribers exactly once.
    fn set_preference(&self, enabled: bool) -> Result<(), StorageError>;

    /// Local and cross-context signals, in arrival order.
    fn subscribe(&self) -> BoxStream<'static, PreferenceSignal>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn get_preference(&self) -> bool {
        (**self).get_preference()
    }

    fn set_preference(&self, enabled: bool) -> Result<(), StorageError> {
        (**self).set_preference(enabled)
    }

    fn subscribe(&self) -> BoxStream<'static, PreferenceSignal> {
        (**self).subscribe()
    }
}
