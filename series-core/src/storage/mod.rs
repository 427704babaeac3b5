//! Storage backends for [`KeyValueStorage`](series_contracts::KeyValueStorage).
//!
//! Both backends follow browser storage semantics: every execution context
//! sees the same values, and a write is announced to every *other* context
//! through [`storage_events`](series_contracts::KeyValueStorage::storage_events).

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::collections::BTreeMap;

use series_model::StorageEvent;

/// Capacity of the per-backend event channels. Storage events are rare and
/// user driven, so a lagging receiver only ever drops stale notifications.
pub(crate) const EVENT_CAPACITY: usize = 64;

/// Events describing how `before` became `after`, one per changed key.
pub(crate) fn diff_snapshots(
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
) -> Vec<StorageEvent> {
    let mut events = Vec::new();

    for (key, old) in before {
        match after.get(key) {
            Some(new) if new == old => {}
            new => events.push(StorageEvent::changed(
                key.clone(),
                Some(old.clone()),
                new.cloned(),
            )),
        }
    }

    for (key, new) in after {
        if !before.contains_key(key) {
            events.push(StorageEvent::changed(
                key.clone(),
                None,
                Some(new.clone()),
            ));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diff_reports_changed_added_and_removed_keys() {
        let before = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let after = map(&[("a", "1"), ("b", "20"), ("d", "4")]);

        let events = diff_snapshots(&before, &after);

        assert_eq!(
            events,
            vec![
                StorageEvent::changed("b", Some("2".into()), Some("20".into())),
                StorageEvent::changed("c", Some("3".into()), None),
                StorageEvent::changed("d", None, Some("4".into())),
            ]
        );
    }

    #[test]
    fn identical_snapshots_produce_nothing() {
        let snapshot = map(&[("adultContentEnabled", "true")]);
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());
    }
}
