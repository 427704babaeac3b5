use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use futures::StreamExt;
use futures::stream::BoxStream;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::{Mutex, RwLock};
use series_contracts::{KeyValueStorage, StorageError};
use series_model::StorageEvent;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use super::{EVENT_CAPACITY, diff_snapshots};

#[derive(Debug)]
struct FileInner {
    path: PathBuf,
    snapshot: RwLock<BTreeMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

/// Storage persisted as a JSON object in a single file.
///
/// Every process that opens the same file is a separate execution context.
/// A filesystem watcher notices writes made by other processes, diffs them
/// against the last known snapshot and emits one [`StorageEvent`] per
/// changed key. Writes made through this handle update the snapshot before
/// the file changes, so they never come back as events.
#[derive(Clone)]
pub struct FileStorage {
    inner: Arc<FileInner>,
    watcher: Option<Arc<Mutex<RecommendedWatcher>>>,
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.inner.path)
            .field("watching", &self.watcher.is_some())
            .finish()
    }
}

impl FileStorage {
    /// Open (or lazily create) the store at `path` and watch it for
    /// changes from other processes.
    ///
    /// A watcher that cannot be installed is logged and skipped; the store
    /// still works, it just never reports cross-process changes.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let mut storage = Self::open_unwatched(path)?;
        match install_watcher(&storage.inner) {
            Ok(watcher) => storage.watcher = Some(Arc::new(Mutex::new(watcher))),
            Err(err) => warn!(
                path = %storage.inner.path.display(),
                error = %err,
                "storage watcher unavailable; cross-process changes will not be reported"
            ),
        }
        Ok(storage)
    }

    /// Open the store without a filesystem watcher.
    pub fn open_unwatched(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let snapshot = read_snapshot(&path)?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            inner: Arc::new(FileInner {
                path,
                snapshot: RwLock::new(snapshot),
                events,
            }),
            watcher: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Re-read the file and announce whatever changed since the last
    /// snapshot. Called by the watcher; exposed for hosts that poll.
    pub fn reload(&self) {
        self.inner.reload();
    }

    /// Apply `apply` to the current file contents, not the cached
    /// snapshot: another process may have written since the watcher last
    /// reloaded. Changes picked up that way are announced like a reload.
    fn mutate(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let external = {
            // Holding the write lock across the disk write keeps the watcher
            // from diffing against a snapshot that predates our own change.
            let mut snapshot = self.inner.snapshot.write();
            let fresh = read_snapshot(&self.inner.path)?;
            let external = diff_snapshots(&snapshot, &fresh);

            let mut next = fresh.clone();
            apply(&mut next);
            if next != fresh {
                write_snapshot(&self.inner.path, &next)?;
            }
            *snapshot = next;
            external
        };

        self.inner.announce(external);
        Ok(())
    }
}

impl FileInner {
    fn reload(&self) {
        let fresh = match read_snapshot(&self.path) {
            Ok(fresh) => fresh,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable storage file");
                return;
            }
        };

        let events = {
            let mut snapshot = self.snapshot.write();
            let events = diff_snapshots(&snapshot, &fresh);
            *snapshot = fresh;
            events
        };

        self.announce(events);
    }

    fn announce(&self, events: Vec<StorageEvent>) {
        for event in events {
            debug!(key = ?event.key, "storage changed by another process");
            let _ = self.events.send(event);
        }
    }

    fn is_own_file(&self, candidate: &Path) -> bool {
        candidate.file_name().is_some() && candidate.file_name() == self.path.file_name()
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.snapshot.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn storage_events(&self) -> BoxStream<'static, StorageEvent> {
        BroadcastStream::new(self.inner.events.subscribe())
            .filter_map(|received| futures::future::ready(received.ok()))
            .boxed()
    }
}

fn install_watcher(inner: &Arc<FileInner>) -> notify::Result<RecommendedWatcher> {
    let weak: Weak<FileInner> = Arc::downgrade(inner);
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        match result {
            Ok(event) => {
                if event.paths.iter().any(|path| inner.is_own_file(path)) {
                    inner.reload();
                }
            }
            Err(err) => warn!(error = %err, "storage watcher error"),
        }
    })?;

    // Watch the directory: writes replace the file via rename, which a
    // watch on the file itself would lose track of.
    let directory = inner
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher.watch(directory, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn read_snapshot(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_snapshot(
    path: &Path,
    snapshot: &BTreeMap<String, String>,
) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let contents = serde_json::to_string_pretty(snapshot).map_err(|source| {
        StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)
}
