//! Taskirra Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Key-value persistence of the task, project and settings documents
//! - filter, recurring, analytics, calendar, projects: pure views over the task list
//! - store: the mutable application state the UI talks to

pub mod analytics;
pub mod backup;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod dates;
pub mod domain;
pub mod filter;
pub mod ordering;
pub mod projects;
pub mod recurring;
pub mod repository;
pub mod sample_data;
pub mod store;

pub use backup::{backup_file_name, ImportError};
pub use clock::{Clock, FixedClock, IdGenerator, SystemClock};
pub use config::StoreConfig;
pub use domain::{
    DomainError, DomainResult, Frequency, Priority, Project, ProjectDraft, Recurring, Settings, Status, Subtask,
    Task, TaskDraft, Theme,
};
pub use filter::{FilterBucket, FilterCounts, TaskFilter};
pub use repository::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::TaskStore;
