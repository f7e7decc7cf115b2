//! Filter/Search Pipeline
//!
//! Maps (tasks, filter state) to the subset shown in the task list. All
//! active criteria are combined with AND; input order is preserved.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::dates::{is_this_week, is_today};
use crate::domain::{DomainError, Priority, Task};

/// Mutually exclusive date/status bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterBucket {
    /// Non-archived tasks
    #[default]
    All,
    Today,
    /// Sunday..Saturday of the current week
    Week,
    Overdue,
    /// High priority
    Important,
    Completed,
}

impl FilterBucket {
    /// Sidebar order
    pub const ALL: [FilterBucket; 6] = [
        FilterBucket::All,
        FilterBucket::Today,
        FilterBucket::Week,
        FilterBucket::Overdue,
        FilterBucket::Important,
        FilterBucket::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterBucket::All => "all",
            FilterBucket::Today => "today",
            FilterBucket::Week => "week",
            FilterBucket::Overdue => "overdue",
            FilterBucket::Important => "important",
            FilterBucket::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterBucket::All => "All Tasks",
            FilterBucket::Today => "Today",
            FilterBucket::Week => "This Week",
            FilterBucket::Overdue => "Overdue",
            FilterBucket::Important => "Important",
            FilterBucket::Completed => "Completed",
        }
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            FilterBucket::All => !task.archived,
            FilterBucket::Today => is_today(task.due_date, today),
            FilterBucket::Week => is_this_week(task.due_date, today),
            FilterBucket::Overdue => task.is_overdue(today),
            FilterBucket::Important => task.priority == Priority::High,
            FilterBucket::Completed => task.is_done(),
        }
    }
}

impl FromStr for FilterBucket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown filter '{}'", s)))
    }
}

impl fmt::Display for FilterBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current sidebar/search state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilter {
    pub bucket: FilterBucket,
    pub priority: Option<Priority>,
    pub tag: Option<String>,
    pub query: String,
    pub project_id: Option<String>,
}

impl TaskFilter {
    pub fn new(bucket: FilterBucket) -> Self {
        Self {
            bucket,
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.bucket.matches(task, today) {
            return false;
        }
        if self.priority.is_some_and(|p| task.priority != p) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !task.has_tag(tag) {
                return false;
            }
        }
        if !matches_query(task, &self.query) {
            return false;
        }
        if let Some(project_id) = &self.project_id {
            if task.project_id.as_ref() != Some(project_id) {
                return false;
            }
        }
        true
    }

    /// Apply the pipeline, keeping input order
    pub fn apply<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t, today)).collect()
    }

    /// Owned variant of [`TaskFilter::apply`] for reactive views
    pub fn apply_cloned(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t, today)).cloned().collect()
    }
}

/// Case-insensitive substring search over title, description and tags.
/// A blank query matches everything.
pub fn matches_query(task: &Task, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || task.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Number of tasks in each bucket, ignoring the other criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCounts {
    pub all: usize,
    pub today: usize,
    pub week: usize,
    pub overdue: usize,
    pub important: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let count = |bucket: FilterBucket| tasks.iter().filter(|t| bucket.matches(t, today)).count();
        Self {
            all: count(FilterBucket::All),
            today: count(FilterBucket::Today),
            week: count(FilterBucket::Week),
            overdue: count(FilterBucket::Overdue),
            important: count(FilterBucket::Important),
            completed: count(FilterBucket::Completed),
        }
    }

    pub fn get(&self, bucket: FilterBucket) -> usize {
        match bucket {
            FilterBucket::All => self.all,
            FilterBucket::Today => self.today,
            FilterBucket::Week => self.week,
            FilterBucket::Overdue => self.overdue,
            FilterBucket::Important => self.important,
            FilterBucket::Completed => self.completed,
        }
    }
}

/// Distinct tags across all tasks, in first-seen order
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in tasks.iter().flat_map(|t| &t.tags) {
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}
