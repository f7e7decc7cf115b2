//! Task Entity
//!
//! A single actionable item with status, priority and schedule metadata.
//! Field names serialize in camelCase so persisted and exported documents
//! keep the shape the browser app has always written.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 100;

/// Task priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All tiers, highest first (display order of the sidebar)
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DomainError::InvalidInput(format!("unknown priority '{}'", other))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(DomainError::InvalidInput(format!("unknown status '{}'", other))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a recurring task repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(DomainError::InvalidInput(format!("unknown frequency '{}'", other))),
        }
    }
}

/// Recurrence rule attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurring {
    pub freq: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, deserialize_with = "date_or_empty")]
    pub next_date: Option<NaiveDate>,
}

fn default_interval() -> u32 {
    1
}

impl Recurring {
    pub fn new(freq: Frequency, interval: u32) -> Self {
        Self {
            freq,
            interval,
            next_date: None,
        }
    }

    /// Interval with 0 treated as 1
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }
}

/// Checklist entry inside a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// A task record as stored and exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (decimal milliseconds at creation)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "date_or_empty")]
    pub due_date: Option<NaiveDate>,
    /// Insertion order is kept for display
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub recurring: Option<Recurring>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Display sequence, dense 1..N after a reorder
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// Create a todo task with default metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: Status::Todo,
            due_date: None,
            tags: Vec::new(),
            project_id: None,
            subtasks: Vec::new(),
            recurring: None,
            created_at: None,
            updated_at: None,
            order: 0,
            archived: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Not done and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date.is_some_and(|due| due < today)
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)
    }

    /// (done, total) subtask counts
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.done).count();
        (done, self.subtasks.len())
    }

    pub fn subtask_percent(&self) -> u32 {
        let (done, total) = self.subtask_progress();
        percent(done, total)
    }

    /// Append a subtask; blank titles are ignored
    pub fn add_subtask(&mut self, id: impl Into<String>, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.subtasks.push(Subtask {
            id: id.into(),
            title: title.to_string(),
            done: false,
        });
        true
    }

    pub fn toggle_subtask(&mut self, subtask_id: &str) -> DomainResult<bool> {
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| DomainError::NotFound(format!("subtask {}", subtask_id)))?;
        subtask.done = !subtask.done;
        Ok(subtask.done)
    }

    pub fn remove_subtask(&mut self, subtask_id: &str) -> DomainResult<Subtask> {
        let pos = self
            .subtasks
            .iter()
            .position(|s| s.id == subtask_id)
            .ok_or_else(|| DomainError::NotFound(format!("subtask {}", subtask_id)))?;
        Ok(self.subtasks.remove(pos))
    }

    /// Overwrite the user-editable fields from a draft
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description.filter(|d| !d.is_empty());
        self.priority = draft.priority;
        self.status = draft.status;
        self.due_date = draft.due_date;
        self.tags = draft.tags;
        self.project_id = draft.project_id.filter(|p| !p.is_empty());
        self.subtasks = draft.subtasks;
        self.recurring = draft.recurring;
    }
}

impl Entity for Task {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// User-editable task fields, as collected by the task form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub project_id: Option<String>,
    pub subtasks: Vec<Subtask>,
    pub recurring: Option<Recurring>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Draft pre-filled from an existing task (edit form)
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            tags: task.tags.clone(),
            project_id: task.project_id.clone(),
            subtasks: task.subtasks.clone(),
            recurring: task.recurring.clone(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)
    }
}

/// Split comma separated tag input, trimming and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("Title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidInput(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

/// Rounded percentage, 0 when `total` is 0
pub(crate) fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

// ========================
// Serde helpers
// ========================

/// Dates persisted by older builds may be "" or carry a time suffix.
pub(crate) fn date_or_empty<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let day = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_creation() {
        let task = Task::new("1", "Write report");
        assert_eq!(task.id(), "1");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.archived);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(Status::InProgress).unwrap(), json!("in-progress"));
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
        assert!("finished".parse::<Status>().is_err());
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_deserialize_browser_shape() {
        let value = json!({
            "id": "1",
            "title": "Complete Q4 Sales Report",
            "description": "Prepare analysis",
            "priority": "high",
            "status": "in-progress",
            "dueDate": "2024-03-20",
            "tags": ["work", "urgent"],
            "projectId": "proj-1",
            "subtasks": [{ "id": "s1", "title": "Gather data", "done": true }],
            "createdAt": "2024-03-15T00:00:00.000Z",
            "updatedAt": "2024-03-16T10:30:00.000Z",
            "order": 1,
            "archived": false,
            "recurring": null
        });
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 3, 20));
        assert_eq!(task.project_id.as_deref(), Some("proj-1"));
        assert_eq!(task.subtask_progress(), (1, 1));
        assert!(task.recurring.is_none());
    }

    #[test]
    fn test_empty_strings_read_as_absent() {
        let value = json!({ "id": "2", "title": "Loose", "dueDate": "", "projectId": "" });
        let task: Task = serde_json::from_value(value).unwrap();
        assert!(task.due_date.is_none());
        assert!(task.project_id.is_none());
        assert!(task.tags.is_empty());
        assert_eq!(task.order, 0);
    }

    #[test]
    fn test_recurring_interval_defaults_to_one() {
        let value = json!({ "freq": "weekly" });
        let rule: Recurring = serde_json::from_value(value).unwrap();
        assert_eq!(rule.interval, 1);

        let zero = Recurring::new(Frequency::Daily, 0);
        assert_eq!(zero.effective_interval(), 1);
    }

    #[test]
    fn test_title_validation() {
        assert!(TaskDraft::new("   ").validate().is_err());
        assert!(TaskDraft::new("a".repeat(100)).validate().is_ok());
        assert!(TaskDraft::new("a".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("work, urgent,,  home "), vec!["work", "urgent", "home"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_subtasks() {
        let mut task = Task::new("1", "Parent");
        assert!(task.add_subtask("s1", "First"));
        assert!(!task.add_subtask("s2", "  "));
        assert!(task.add_subtask("s3", "Second"));
        assert_eq!(task.toggle_subtask("s1"), Ok(true));
        assert_eq!(task.subtask_progress(), (1, 2));
        assert_eq!(task.subtask_percent(), 50);

        let removed = task.remove_subtask("s3").unwrap();
        assert_eq!(removed.title, "Second");
        assert!(task.toggle_subtask("missing").is_err());
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut task = Task::new("1", "Late");
        assert!(!task.is_overdue(today));

        task.due_date = Some(today);
        assert!(!task.is_overdue(today));

        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 9);
        assert!(task.is_overdue(today));

        task.status = Status::Done;
        assert!(!task.is_overdue(today));
    }
}
