//! List slots with serialized read-modify-write access.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{de::DeserializeOwned, Serialize};

use crate::kv::{FileStore, KeyValueStore, MemoryStore};
use crate::StoreError;

/// Handle to a key-value backend plus the per-slot write locks.
///
/// Cloning is cheap and clones share both the backend and the lock
/// registry, so every [`ListSlot`] opened for the same key through any
/// clone is serialized against the others.
///
/// # Example
///
/// ```rust,ignore
/// let storage = Storage::in_memory();
/// let cart: ListSlot<CartLine> = storage.slot("voguevault_cart");
/// cart.update(|lines| lines.push(line)).await;
/// ```
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl Storage {
    /// Wrap an arbitrary backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Wrap a backend that is already shared.
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Storage backed by a directory of JSON files.
    pub fn open_dir(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(FileStore::open(root)?))
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Open the list slot stored under `key`.
    pub fn slot<T>(&self, key: impl Into<String>) -> ListSlot<T> {
        let key = key.into();
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        ListSlot {
            backend: Arc::clone(&self.backend),
            key,
            lock,
            _phantom: PhantomData,
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

/// A JSON list persisted wholesale under one key.
///
/// `read` and `write` never fail: a missing, unparsable or unreachable slot
/// reads as an empty list, and a failed write is logged and dropped. Use
/// `try_read`/`try_write` to observe the failure instead.
pub struct ListSlot<T> {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    lock: Arc<tokio::sync::Mutex<()>>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for ListSlot<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            lock: Arc::clone(&self.lock),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ListSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSlot").field("key", &self.key).finish()
    }
}

impl<T> ListSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// The key this slot is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the list, falling back to empty on any failure.
    pub fn read(&self) -> Vec<T> {
        match self.try_read() {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(slot = %self.key, error = %e, "Error reading slot from storage");
                Vec::new()
            }
        }
    }

    /// Read the list, reporting failures.
    pub fn try_read(&self) -> Result<Vec<T>, StoreError> {
        match self.backend.get(&self.key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full list, logging and dropping any failure.
    pub fn write(&self, items: &[T]) {
        if let Err(e) = self.try_write(items) {
            tracing::error!(slot = %self.key, error = %e, "Error saving slot to storage");
        }
    }

    /// Persist the full list, reporting failures.
    pub fn try_write(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(items)?;
        self.backend.set(&self.key, &bytes)
    }

    /// Read-modify-write under the slot lock.
    ///
    /// The closure sees the current list and its result is returned after
    /// the list has been written back. Concurrent updates of the same slot
    /// run one at a time. A failed write is logged; the returned value still
    /// reflects the attempted change.
    pub async fn update<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read();
        let result = f(&mut items);
        self.write(&items);
        tracing::debug!(slot = %self.key, len = items.len(), "Slot updated");
        result
    }

    /// Replace the list under the slot lock.
    pub async fn replace(&self, items: Vec<T>) {
        let _guard = self.lock.lock().await;
        self.write(&items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
    }

    /// Backend whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::StoreError("quota exceeded".to_string()))
        }
        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::StoreError("quota exceeded".to_string()))
        }
        fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::StoreError("quota exceeded".to_string()))
        }
        fn keys(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_missing_slot_reads_empty() {
        let storage = Storage::in_memory();
        let slot: ListSlot<Entry> = storage.slot("entries");
        assert!(slot.read().is_empty());
        assert!(slot.try_read().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let storage = Storage::in_memory();
        let slot: ListSlot<Entry> = storage.slot("entries");
        slot.write(&[Entry { id: 1 }, Entry { id: 2 }]);
        assert_eq!(slot.read(), vec![Entry { id: 1 }, Entry { id: 2 }]);
    }

    #[test]
    fn test_corrupt_slot_reads_empty() {
        let storage = Storage::in_memory();
        storage.backend().set("entries", b"{not json").unwrap();

        let slot: ListSlot<Entry> = storage.slot("entries");
        assert!(slot.read().is_empty());
        assert!(matches!(slot.try_read(), Err(StoreError::SerializeError(_))));
    }

    #[test]
    fn test_broken_backend_is_swallowed() {
        let storage = Storage::new(BrokenStore);
        let slot: ListSlot<Entry> = storage.slot("entries");

        slot.write(&[Entry { id: 1 }]);
        assert!(slot.read().is_empty());
        assert!(slot.try_write(&[Entry { id: 1 }]).is_err());
    }

    #[tokio::test]
    async fn test_update_returns_closure_result() {
        let storage = Storage::in_memory();
        let slot: ListSlot<Entry> = storage.slot("entries");

        let len = slot
            .update(|items| {
                items.push(Entry { id: 7 });
                items.len()
            })
            .await;

        assert_eq!(len, 1);
        assert_eq!(slot.read(), vec![Entry { id: 7 }]);
    }

    #[tokio::test]
    async fn test_update_on_broken_backend_still_returns() {
        let storage = Storage::new(BrokenStore);
        let slot: ListSlot<Entry> = storage.slot("entries");

        let items = slot
            .update(|items| {
                items.push(Entry { id: 1 });
                items.clone()
            })
            .await;
        assert_eq!(items, vec![Entry { id: 1 }]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_do_not_lose_writes() {
        let storage = Storage::in_memory();

        let mut handles = Vec::new();
        for i in 0..50 {
            // Each task opens its own handle to the same key.
            let slot: ListSlot<Entry> = storage.clone().slot("entries");
            handles.push(tokio::spawn(async move {
                slot.update(|items| items.push(Entry { id: i })).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let slot: ListSlot<Entry> = storage.slot("entries");
        assert_eq!(slot.read().len(), 50);
    }

    #[tokio::test]
    async fn test_replace() {
        let storage = Storage::in_memory();
        let slot: ListSlot<Entry> = storage.slot("entries");
        slot.write(&[Entry { id: 1 }]);
        slot.replace(Vec::new()).await;
        assert!(slot.read().is_empty());
    }
}
