use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::BoxStream;
use series_model::StorageEvent;

/// Failures of a persistent key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Origin-wide string key-value storage with cross-context notifications.
///
/// Reads never fail: a backend that cannot read a value reports it as
/// absent. Writes may fail.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Changes made by *other* execution contexts. A context never observes
    /// its own writes on this stream.
    fn storage_events(&self) -> BoxStream<'static, StorageEvent>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn storage_events(&self) -> BoxStream<'static, StorageEvent> {
        (**self).storage_events()
    }
}
