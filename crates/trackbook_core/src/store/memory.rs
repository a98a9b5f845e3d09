//! In-process store mirroring the browser local storage semantics.

use super::{DeleteReceipt, KeyListing, KeyValueStore, StoreResult, StoredValue};
use std::cell::RefCell;

/// Insertion-ordered in-memory store.
///
/// Overwriting a key keeps its original position, the same way local
/// storage keeps the slot of an existing item.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys across all prefixes.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .find(|(current, _)| current == key)
            .map(|(current, value)| StoredValue::private(current.as_str(), value.as_str())))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<StoredValue> {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(current, _)| current == key) {
            Some(slot) => slot.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        Ok(StoredValue::private(key, value))
    }

    fn delete(&self, key: &str) -> StoreResult<DeleteReceipt> {
        self.entries
            .borrow_mut()
            .retain(|(current, _)| current != key);
        Ok(DeleteReceipt::for_key(key))
    }

    fn list(&self, prefix: &str) -> StoreResult<KeyListing> {
        let keys = self
            .entries
            .borrow()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        Ok(KeyListing {
            keys,
            prefix: prefix.to_string(),
            shared: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::KeyValueStore;

    #[test]
    fn get_returns_none_for_absent_key() {
        let store = MemoryStore::new();
        assert!(store.get("job:missing").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_in_place() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().unwrap().value, "3");
        assert_eq!(store.list("").unwrap().keys, vec!["a", "b"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemoryStore::new();
        store.set("job:1", "{}").unwrap();

        let first = store.delete("job:1").unwrap();
        let second = store.delete("job:1").unwrap();
        assert!(first.deleted);
        assert!(second.deleted);
        assert!(store.is_empty());
    }

    #[test]
    fn list_matches_prefix_only() {
        let store = MemoryStore::new();
        store.set("job:1", "{}").unwrap();
        store.set("knowledge:1", "{}").unwrap();
        store.set("job:2", "{}").unwrap();

        let listing = store.list("job:").unwrap();
        assert_eq!(listing.keys, vec!["job:1", "job:2"]);
        assert_eq!(listing.prefix, "job:");
        assert!(!listing.shared);
    }
}
