//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (only serde, chrono and thiserror).

mod entity;
mod project;
mod settings;
mod task;

pub use entity::{DomainError, DomainResult, Entity};
pub use project::{Project, ProjectDraft, MAX_NAME_LEN};
pub use settings::{Settings, Theme};
pub use task::{parse_tags, Frequency, Priority, Recurring, Status, Subtask, Task, TaskDraft, MAX_TITLE_LEN};

pub(crate) use task::percent;
