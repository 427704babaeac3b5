//! Process-wide access to the preference store.
//!
//! External UI (a settings toggle, a CLI command) needs a way to flip the
//! preference without being handed the store. The host installs its store
//! once during startup; everything inside the controller keeps receiving
//! the store explicitly.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use series_contracts::PreferenceStore;

use crate::error::{PageError, Result};

static PREFERENCES: Lazy<RwLock<Option<Arc<dyn PreferenceStore>>>> =
    Lazy::new(|| RwLock::new(None));

/// Register the store behind [`set_adult_content_enabled`].
///
/// Installing again replaces the previous store.
pub fn install(store: Arc<dyn PreferenceStore>) {
    *PREFERENCES.write() = Some(store);
}

/// The installed store, if any.
pub fn installed() -> Option<Arc<dyn PreferenceStore>> {
    PREFERENCES.read().clone()
}

/// Remove the installed store.
pub fn uninstall() {
    *PREFERENCES.write() = None;
}

/// Persist the adult content preference and notify listeners in this
/// process.
pub fn set_adult_content_enabled(enabled: bool) -> Result<()> {
    let store = installed().ok_or(PageError::PreferencesNotInstalled)?;
    store.set_preference(enabled)?;
    tracing::info!("Adult content setting changed to: {}", enabled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::StoragePreference;
    use crate::storage::MemoryStorage;

    // Single test so the shared global is not raced by parallel tests.
    #[test]
    fn setter_requires_installed_store() {
        uninstall();
        assert!(matches!(
            set_adult_content_enabled(true),
            Err(PageError::PreferencesNotInstalled)
        ));

        let store = Arc::new(StoragePreference::adult_content(MemoryStorage::new()));
        install(store.clone());
        set_adult_content_enabled(true).unwrap();
        assert!(store.get_preference());

        set_adult_content_enabled(false).unwrap();
        assert!(!store.get_preference());

        let replacement = Arc::new(StoragePreference::adult_content(MemoryStorage::new()));
        install(replacement.clone());
        set_adult_content_enabled(true).unwrap();
        assert!(replacement.get_preference());
        assert!(!store.get_preference());

        uninstall();
        assert!(installed().is_none());
    }
}
