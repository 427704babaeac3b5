use futures::StreamExt;
use futures::stream::{self, BoxStream};
use series_contracts::{
    KeyValueStorage, PreferenceSignal, PreferenceStore, StorageError,
};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::info;

/// Storage key of the adult content visibility preference.
pub const ADULT_CONTENT_KEY: &str = "adultContentEnabled";

const TRUE: &str = "true";
const FALSE: &str = "false";

/// A boolean preference kept in a [`KeyValueStorage`] as `"true"`/`"false"`.
///
/// The in-page change notification is owned by this value, so every clone
/// of the store that should hear local changes must share it: wrap the store
/// in an `Arc` rather than building a second one over the same storage.
#[derive(Debug)]
pub struct StoragePreference<S> {
    storage: S,
    key: String,
    local: broadcast::Sender<()>,
}

impl<S: KeyValueStorage> StoragePreference<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let (local, _) = broadcast::channel(16);
        Self {
            storage,
            key: key.into(),
            local,
        }
    }

    /// The adult content preference over `storage`.
    pub fn adult_content(storage: S) -> Self {
        Self::new(storage, ADULT_CONTENT_KEY)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> PreferenceStore for StoragePreference<S> {
    fn key(&self) -> &str {
        &self.key
    }

    fn get_preference(&self) -> bool {
        self.storage.get_item(&self.key).as_deref() == Some(TRUE)
    }

    fn set_preference(&self, enabled: bool) -> Result<(), StorageError> {
        let encoded = if enabled { TRUE } else { FALSE };
        self.storage.set_item(&self.key, encoded)?;

        // Nobody subscribed yet is fine; the value is already persisted.
        let _ = self.local.send(());
        info!(key = %self.key, enabled, "preference changed");
        Ok(())
    }

    fn subscribe(&self) -> BoxStream<'static, PreferenceSignal> {
        let local = BroadcastStream::new(self.local.subscribe()).filter_map(
            |received| {
                futures::future::ready(
                    received.ok().map(|()| PreferenceSignal::Local),
                )
            },
        );
        let foreign = self
            .storage
            .storage_events()
            .map(|event| PreferenceSignal::Storage { key: event.key });

        stream::select(local, foreign).boxed()
    }
}
