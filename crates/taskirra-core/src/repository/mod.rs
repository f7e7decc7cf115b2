//! Repository Layer
//!
//! Data access abstractions and implementations over key-value storage.

mod collection;
mod settings_repo;
mod storage;
mod traits;

#[cfg(test)]
mod tests;

pub use collection::{CollectionRepository, ProjectRepository, TaskRepository};
pub use settings_repo::SettingsRepository;
pub use storage::{load_json_or, save_json, KeyValueStorage, MemoryStorage, StorageError, StorageResult};
pub use traits::Repository;
