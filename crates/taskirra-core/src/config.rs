//! Store Configuration
//!
//! Storage key naming. Analytics window sizes live next to the analytics
//! code as constants.

/// Default prefix for persisted keys
pub const DEFAULT_KEY_PREFIX: &str = "taskirra";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { key_prefix: prefix.into() }
    }

    pub fn tasks_key(&self) -> String {
        self.key("tasks")
    }

    pub fn projects_key(&self) -> String {
        self.key("projects")
    }

    pub fn settings_key(&self) -> String {
        self.key("settings")
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.key_prefix, name)
    }
}
