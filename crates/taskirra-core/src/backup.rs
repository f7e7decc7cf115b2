//! Backup Export and Import
//!
//! The export document bundles every persisted collection with a timestamp.
//! Imports are parsed into typed records and validated in full before the
//! store applies anything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Project, Settings, Task};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("invalid backup file: {0}")]
    Malformed(String),
    #[error("invalid record in backup: {0}")]
    InvalidRecord(String),
}

/// Everything written by an export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub tasks: &'a [Task],
    pub projects: &'a [Project],
    pub settings: &'a Settings,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parsed import; absent top-level fields leave that collection untouched
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

/// Parse and validate a backup file's text
pub fn parse_import(json: &str) -> Result<ImportDocument, ImportError> {
    let doc: ImportDocument = serde_json::from_str(json).map_err(|e| ImportError::Malformed(e.to_string()))?;

    for task in doc.tasks.iter().flatten() {
        task.validate()
            .map_err(|e| ImportError::InvalidRecord(format!("task {}: {}", task.id, e)))?;
    }
    for project in doc.projects.iter().flatten() {
        project
            .validate()
            .map_err(|e| ImportError::InvalidRecord(format!("project {}: {}", project.id, e)))?;
    }
    Ok(doc)
}

/// Suggested download name, e.g. `taskirra-backup-2024-03-05.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("taskirra-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_shape() {
        let tasks = vec![Task::new("1", "Ship it")];
        let settings = Settings::default();
        let doc = ExportDocument {
            tasks: &tasks,
            projects: &[],
            settings: &settings,
            export_date: Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap(),
        };
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tasks"][0]["title"], "Ship it");
        assert_eq!(value["projects"], serde_json::json!([]));
        assert_eq!(value["settings"]["sortBy"], "dueDate");
        assert!(value["exportDate"].as_str().unwrap().starts_with("2024-03-05T08:00:00"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_parse_partial_document() {
        let doc = parse_import(r#"{"projects":[{"id":"proj-1","name":"Home"}]}"#).unwrap();
        assert!(doc.tasks.is_none());
        assert!(doc.settings.is_none());
        assert_eq!(doc.projects.unwrap()[0].color, "#6366f1");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_import("not json"), Err(ImportError::Malformed(_))));
        assert!(matches!(parse_import(r#"{"tasks":[{"id":"1"}]}"#), Err(ImportError::Malformed(_))));
        assert!(matches!(parse_import(r#"{"tasks":{"id":"1"}}"#), Err(ImportError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_record() {
        let err = parse_import(r#"{"tasks":[{"id":"1","title":"ok"},{"id":"2","title":"  "}]}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord(ref m) if m.starts_with("task 2")));
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(backup_file_name(date), "taskirra-backup-2024-03-05.json");
    }
}
