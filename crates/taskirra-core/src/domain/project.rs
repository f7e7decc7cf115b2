//! Project Entity
//!
//! Projects group tasks by reference. A task points at a project through
//! `projectId`; the project does not own its tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum project name length in characters
pub const MAX_NAME_LEN: usize = 50;

pub const DEFAULT_COLOR: &str = "#6366f1";
pub const DEFAULT_ICON: &str = "bi-folder";

/// A named, colored grouping label for tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier (`proj-<millis>`)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            color: default_color(),
            icon: default_icon(),
            created_at: None,
            archived: false,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)
    }

    pub fn apply_draft(&mut self, draft: ProjectDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.color = draft.color;
        self.icon = draft.icon;
    }
}

impl Entity for Project {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// User-editable project fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            color: default_color(),
            icon: default_icon(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("Project name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidInput(format!(
            "Project name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("proj-1", "Work");
        assert_eq!(project.id(), "proj-1");
        assert_eq!(project.color, DEFAULT_COLOR);
        assert!(!project.archived);
    }

    #[test]
    fn test_name_validation() {
        assert!(ProjectDraft::new("").validate().is_err());
        assert!(ProjectDraft::new("x".repeat(50)).validate().is_ok());
        assert!(ProjectDraft::new("x".repeat(51)).validate().is_err());
    }

    #[test]
    fn test_defaults_on_sparse_json() {
        let project: Project = serde_json::from_str(r#"{"id":"proj-9","name":"Home"}"#).unwrap();
        assert_eq!(project.icon, DEFAULT_ICON);
        assert!(project.description.is_empty());
    }
}
