//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store holds
//! a read-only snapshot of the core `TaskStore`; commands mutate the
//! `TaskStore` and then push a fresh snapshot here.

use leptos::prelude::*;
use reactive_stores::Store;
use taskirra_core::{Project, Settings, Task, TaskStore};

use crate::storage::BrowserStorage;

/// Snapshot of persisted state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All tasks in display order
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub settings: Settings,
}

impl AppState {
    pub fn from_backend(backend: &TaskStore<BrowserStorage>) -> Self {
        Self {
            tasks: backend.tasks().to_vec(),
            projects: backend.projects().to_vec(),
            settings: backend.settings().clone(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// The mutable core store; lives on the UI thread only
pub type Backend = StoredValue<TaskStore<BrowserStorage>, LocalStorage>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

pub fn use_backend() -> Backend {
    expect_context::<Backend>()
}
