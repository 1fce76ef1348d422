use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Flat string-keyed persistence used by every durable model.
///
/// Implementations are local and single-writer. Callers treat a failed read
/// as "nothing stored" and a failed write as lost (logged, never retried);
/// see [`read_or_absent`] and [`write_or_log`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// One store instance shared by all models of a running app.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// Read a key, folding any storage failure into "absent".
pub fn read_or_absent(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, falling back to defaults");
            None
        }
    }
}

/// Write a key, logging (not propagating) a failure. Returns whether the write landed.
pub fn write_or_log(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "store write failed");
            false
        }
    }
}

/// Remove a key, logging (not propagating) a failure.
pub fn remove_or_log(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "store remove failed");
            false
        }
    }
}

/// In-process store, used by tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// Store whose reads and writes can be switched off, for failure-path tests.
    #[derive(Default)]
    pub(crate) struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_reads: Cell<bool>,
        pub fail_writes: Cell<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_reads.get() {
                return Err(StoreError::Unavailable("reads disabled".to_string()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Unavailable("writes disabled".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Unavailable("writes disabled".to_string()));
            }
            self.inner.remove(key)
        }

        fn clear(&self) -> Result<(), StoreError> {
            self.inner.clear()
        }
    }

    #[test]
    fn memory_store_get_set_remove_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.len(), 2);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_read_is_treated_as_absent() {
        let store = FlakyStore::default();
        store.inner.set("k", "v").unwrap();
        store.fail_reads.set(true);
        assert_eq!(read_or_absent(&store, "k"), None);
    }

    #[test]
    fn failed_write_is_reported_not_raised() {
        let store = FlakyStore::default();
        store.fail_writes.set(true);
        assert!(!write_or_log(&store, "k", "v"));
        store.fail_writes.set(false);
        assert!(write_or_log(&store, "k", "v"));
        assert_eq!(store.inner.get("k").unwrap().as_deref(), Some("v"));
    }
}
