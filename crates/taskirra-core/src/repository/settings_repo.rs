//! Settings Repository
//!
//! A single settings document under one key.

use std::rc::Rc;

use super::storage::{load_json_or, save_json, KeyValueStorage};
use crate::domain::Settings;

pub struct SettingsRepository<S: KeyValueStorage> {
    storage: Rc<S>,
    key: String,
    settings: Settings,
}

impl<S: KeyValueStorage> SettingsRepository<S> {
    /// Load settings, using defaults when the key is missing or unreadable
    pub fn load(storage: Rc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let settings = load_json_or(&*storage, &key, Settings::default);
        Self { storage, key, settings }
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist the settings document
    pub fn set(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = save_json(&*self.storage, &self.key, &self.settings) {
            log::error!("repository: could not persist '{}': {}", self.key, e);
        }
    }

    /// Edit a copy of the settings and persist the result
    pub fn update(&mut self, edit: impl FnOnce(&mut Settings)) -> &Settings {
        let mut next = self.settings.clone();
        edit(&mut next);
        self.set(next);
        &self.settings
    }
}
