use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::StreamExt;
use futures::stream::BoxStream;
use parking_lot::RwLock;
use series_contracts::{KeyValueStorage, StorageError};
use series_model::StorageEvent;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use super::EVENT_CAPACITY;

#[derive(Debug, Clone)]
struct Announcement {
    from: u64,
    event: StorageEvent,
}

#[derive(Debug)]
struct Origin {
    items: RwLock<BTreeMap<String, String>>,
    events: broadcast::Sender<Announcement>,
    next_context: AtomicU64,
}

/// In-process storage shared by every context forked from the same origin.
///
/// Clones share the context they were cloned from; [`fork_context`]
/// opens another context on the same origin, the way a second tab would.
///
/// [`fork_context`]: MemoryStorage::fork_context
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    origin: Arc<Origin>,
    context: u64,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// A fresh, empty origin with a single context.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let origin = Arc::new(Origin {
            items: RwLock::new(BTreeMap::new()),
            events,
            next_context: AtomicU64::new(1),
        });
        Self { origin, context: 0 }
    }

    /// Another execution context on the same origin.
    pub fn fork_context(&self) -> Self {
        let context = self.origin.next_context.fetch_add(1, Ordering::Relaxed);
        Self {
            origin: Arc::clone(&self.origin),
            context,
        }
    }

    /// Drop every key, announcing a clear to the other contexts.
    pub fn clear(&self) {
        let had_items = {
            let mut items = self.origin.items.write();
            let had_items = !items.is_empty();
            items.clear();
            had_items
        };
        if had_items {
            self.announce(StorageEvent::cleared());
        }
    }

    fn announce(&self, event: StorageEvent) {
        // No receivers simply means no other context is listening.
        let _ = self.origin.events.send(Announcement {
            from: self.context,
            event,
        });
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.origin.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let old = self
            .origin
            .items
            .write()
            .insert(key.to_string(), value.to_string());

        if old.as_deref() != Some(value) {
            self.announce(StorageEvent::changed(
                key,
                old,
                Some(value.to_string()),
            ));
        }
        Ok(())
    }

    fn storage_events(&self) -> BoxStream<'static, StorageEvent> {
        let own_context = self.context;
        BroadcastStream::new(self.origin.events.subscribe())
            .filter_map(move |received| {
                let event = match received {
                    Ok(announcement) if announcement.from != own_context => {
                        Some(announcement.event)
                    }
                    Ok(_) => None,
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            skipped,
                            "storage event receiver lagged; notifications dropped"
                        );
                        None
                    }
                };
                futures::future::ready(event)
            })
            .boxed()
    }
}
