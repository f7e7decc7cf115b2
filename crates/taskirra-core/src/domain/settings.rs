//! User Settings
//!
//! Small preferences document persisted next to tasks and projects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Persisted preferences; unknown fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub default_view: String,
    pub sort_by: String,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            default_view: "list".to_string(),
            sort_by: "dueDate".to_string(),
            notifications: true,
        }
    }
}
