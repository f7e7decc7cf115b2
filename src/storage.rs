//! Browser Storage Backend
//!
//! `window.localStorage` behind the core's `KeyValueStorage` trait, plus
//! the couple of UI-only preferences kept outside the store.

use taskirra_core::repository::{KeyValueStorage, StorageError, StorageResult};

/// Key remembering which tab was open last
pub const ACTIVE_TAB_KEY: &str = "taskirra-active-tab";

/// `localStorage`, or nothing when the browser denies access
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            log::warn!("storage: localStorage unavailable, changes will not persist");
        }
        Self { inner }
    }

    fn storage(&self) -> StorageResult<&web_sys::Storage> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.storage()?.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }
}

/// Read a UI preference; missing or unreadable reads as `None`
pub fn load_preference(key: &str) -> Option<String> {
    BrowserStorage::local().get_item(key).ok().flatten()
}

pub fn save_preference(key: &str, value: &str) {
    if let Err(e) = BrowserStorage::local().set_item(key, value) {
        log::warn!("storage: {}", e);
    }
}
