//! Key-Value Storage Backend
//!
//! The browser's `localStorage` is a synchronous string-to-string map.
//! [`KeyValueStorage`] models exactly that so the store can be backed by the
//! real thing in the UI and by [`MemoryStorage`] in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },
    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },
    #[error("failed to encode '{key}': {message}")]
    Encode { key: String, message: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string map, shaped after `window.localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// In-memory storage for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail, like a full quota
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read a JSON value, falling back to `default` when the key is missing,
/// unreadable or holds something that does not parse.
pub fn load_json_or<T, S>(storage: &S, key: &str, default: impl FnOnce() -> T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default(),
        Err(e) => {
            log::warn!("storage: {}", e);
            return default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("storage: ignoring unreadable '{}': {}", key, e);
            default()
        }
    }
}

pub fn save_json<T, S>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    storage.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert!(storage.raw("k").is_none());
    }

    #[test]
    fn test_failing_writes() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(matches!(storage.set_item("k", "v"), Err(StorageError::Write { .. })));
    }

    #[test]
    fn test_load_json_falls_back_on_garbage() {
        let storage = MemoryStorage::new();
        storage.set_item("nums", "not json").unwrap();
        let nums: Vec<u32> = load_json_or(&storage, "nums", Vec::new);
        assert!(nums.is_empty());

        save_json(&storage, "nums", &vec![1u32, 2]).unwrap();
        let nums: Vec<u32> = load_json_or(&storage, "nums", Vec::new);
        assert_eq!(nums, vec![1, 2]);
    }
}
