//! Task Store
//!
//! The single owner of application state. Wraps the task, project and
//! settings repositories, stamps ids and timestamps from an injected
//! [`Clock`], and persists every change through the repositories.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::backup::{parse_import, ExportDocument, ImportError};
use crate::clock::{Clock, IdGenerator};
use crate::config::StoreConfig;
use crate::domain::{
    DomainError, DomainResult, Project, ProjectDraft, Settings, Status, Subtask, Task, TaskDraft,
};
use crate::ordering::OrderedList;
use crate::recurring::collect_due_occurrences;
use crate::repository::{
    KeyValueStorage, ProjectRepository, Repository, SettingsRepository, TaskRepository,
};
use crate::sample_data::{default_settings, sample_projects, sample_tasks};

pub struct TaskStore<S: KeyValueStorage> {
    tasks: TaskRepository<S>,
    projects: ProjectRepository<S>,
    settings: SettingsRepository<S>,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Load all persisted state from `storage`
    pub fn open(storage: Rc<S>, config: &StoreConfig, clock: Box<dyn Clock>) -> Self {
        let store = Self {
            tasks: TaskRepository::load(Rc::clone(&storage), config.tasks_key()),
            projects: ProjectRepository::load(Rc::clone(&storage), config.projects_key()),
            settings: SettingsRepository::load(storage, config.settings_key()),
            clock,
            ids: IdGenerator::new(),
        };
        log::info!(
            "store: opened with {} tasks and {} projects",
            store.tasks.len(),
            store.projects.len()
        );
        store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.list()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.find_by_id(&id.to_string())
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.list()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.find_by_id(&id.to_string())
    }

    pub fn settings(&self) -> &Settings {
        self.settings.get()
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Create a task from form input, appended at the end of the list
    pub fn create_task(&mut self, draft: TaskDraft) -> DomainResult<Task> {
        draft.validate()?;
        let now = self.now();

        let mut task = Task::new(self.ids.next_id(now), "");
        task.apply_draft(draft);
        task.subtasks = Vec::new();
        task.order = self.tasks.len() as i64 + 1;
        task.created_at = Some(now);
        task.updated_at = Some(now);

        log::debug!("store: create task {} '{}'", task.id, task.title);
        self.tasks.create(task)
    }

    /// Replace a task's editable fields, keeping id, order and creation time
    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> DomainResult<Task> {
        draft.validate()?;
        let mut task = self.require_task(id)?.clone();
        task.apply_draft(draft);
        task.updated_at = Some(self.now());

        log::debug!("store: update task {}", id);
        self.tasks.update(task)
    }

    /// Flip between done and todo, returning the new status
    pub fn toggle_complete(&mut self, id: &str) -> DomainResult<Status> {
        let next = if self.require_task(id)?.is_done() {
            Status::Todo
        } else {
            Status::Done
        };
        self.set_status(id, next)?;
        log::debug!("store: task {} -> {}", id, next);
        Ok(next)
    }

    /// Reverse a completion from the toast's undo action
    pub fn undo_complete(&mut self, id: &str) -> DomainResult<()> {
        self.set_status(id, Status::Todo)?;
        log::debug!("store: undo completion of {}", id);
        Ok(())
    }

    pub fn delete_task(&mut self, id: &str) -> DomainResult<Task> {
        let removed = self.tasks.delete(&id.to_string())?;
        log::debug!("store: deleted task {}", id);
        Ok(removed)
    }

    /// Remove every task named in `ids`; unknown ids are skipped
    pub fn delete_tasks(&mut self, ids: &[String]) -> Vec<Task> {
        let removed = self.tasks.remove_where(|t| ids.contains(&t.id));
        log::debug!("store: deleted {} tasks", removed.len());
        removed
    }

    /// Put deleted tasks back at their previous relative positions
    pub fn restore_tasks(&mut self, removed: Vec<Task>) {
        let count = removed.len();
        let mut list = OrderedList::new(self.tasks.list().to_vec());
        list.restore(removed);
        self.tasks.replace_all(list.into_vec());
        log::debug!("store: restored {} tasks", count);
    }

    /// Mark every task named in `ids` as done; returns how many matched
    pub fn complete_tasks(&mut self, ids: &[String]) -> usize {
        let now = self.now();
        let touched = self.tasks.update_where(
            |t| ids.contains(&t.id),
            |t| {
                t.status = Status::Done;
                t.updated_at = Some(now);
            },
        );
        log::debug!("store: completed {} tasks", touched);
        touched
    }

    /// Rearrange the whole list to follow `ids` and renumber it 1..N
    pub fn reorder(&mut self, ids: &[String]) -> DomainResult<()> {
        let mut list = OrderedList::new(self.tasks.list().to_vec());
        list.reorder_by_ids(ids)?;
        self.tasks.replace_all(list.into_vec());
        log::debug!("store: reordered {} tasks", ids.len());
        Ok(())
    }

    /// Move one task by list position and renumber 1..N
    pub fn move_task(&mut self, from: usize, to: usize) -> DomainResult<()> {
        let mut list = OrderedList::new(self.tasks.list().to_vec());
        list.move_item(from, to)?;
        self.tasks.replace_all(list.into_vec());
        Ok(())
    }

    /// Append the next occurrence of every completed recurring task that
    /// does not have one yet; returns how many were created.
    pub fn generate_recurring(&mut self) -> usize {
        let created = collect_due_occurrences(self.tasks.list(), &self.ids, self.now());
        let count = created.len();
        if count > 0 {
            self.tasks.extend(created);
            log::info!("store: {} recurring task(s) created", count);
        }
        count
    }

    // ========================================================================
    // Subtasks
    // ========================================================================

    /// Append a subtask; a blank title adds nothing and returns `None`
    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> DomainResult<Option<Subtask>> {
        let now = self.now();
        let mut task = self.require_task(task_id)?.clone();
        if !task.add_subtask(self.ids.next_id(now), title) {
            return Ok(None);
        }
        let added = task.subtasks.last().cloned();
        task.updated_at = Some(now);
        self.tasks.update(task)?;
        Ok(added)
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> DomainResult<bool> {
        let mut task = self.require_task(task_id)?.clone();
        let done = task.toggle_subtask(subtask_id)?;
        task.updated_at = Some(self.now());
        self.tasks.update(task)?;
        Ok(done)
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> DomainResult<Subtask> {
        let mut task = self.require_task(task_id)?.clone();
        let removed = task.remove_subtask(subtask_id)?;
        task.updated_at = Some(self.now());
        self.tasks.update(task)?;
        Ok(removed)
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub fn create_project(&mut self, draft: ProjectDraft) -> DomainResult<Project> {
        draft.validate()?;
        let now = self.now();
        let mut project = Project::new(self.ids.next_prefixed("proj", now), "");
        project.apply_draft(draft);
        project.created_at = Some(now);

        log::debug!("store: create project {} '{}'", project.id, project.name);
        self.projects.create(project)
    }

    pub fn update_project(&mut self, id: &str, draft: ProjectDraft) -> DomainResult<Project> {
        draft.validate()?;
        let mut project = self.require_project(id)?.clone();
        project.apply_draft(draft);
        self.projects.update(project)
    }

    pub fn set_project_archived(&mut self, id: &str, archived: bool) -> DomainResult<Project> {
        let mut project = self.require_project(id)?.clone();
        project.archived = archived;
        self.projects.update(project)
    }

    /// Delete a project; its tasks stay and become unassigned
    pub fn delete_project(&mut self, id: &str) -> DomainResult<Project> {
        let removed = self.projects.delete(&id.to_string())?;
        let now = self.now();
        let released = self.tasks.update_where(
            |t| t.project_id.as_deref() == Some(id),
            |t| {
                t.project_id = None;
                t.updated_at = Some(now);
            },
        );
        log::debug!("store: deleted project {}, released {} tasks", id, released);
        Ok(removed)
    }

    // ========================================================================
    // Settings, backup and bulk state
    // ========================================================================

    pub fn update_settings(&mut self, edit: impl FnOnce(&mut Settings)) -> &Settings {
        self.settings.update(edit)
    }

    /// Pretty-printed backup document stamped with `now`
    pub fn export(&self, now: DateTime<Utc>) -> DomainResult<String> {
        let doc = ExportDocument {
            tasks: self.tasks.list(),
            projects: self.projects.list(),
            settings: self.settings.get(),
            export_date: now,
        };
        let json = doc.to_json().map_err(|e| DomainError::Internal(e.to_string()))?;
        log::info!("store: exported {} tasks", self.tasks.len());
        Ok(json)
    }

    /// Replace each collection present in the backup.
    ///
    /// The whole document is parsed and validated first; on error nothing
    /// changes.
    pub fn import(&mut self, json: &str) -> Result<(), ImportError> {
        let doc = parse_import(json).inspect_err(|e| log::warn!("store: import rejected: {}", e))?;

        if let Some(tasks) = doc.tasks {
            log::info!("store: importing {} tasks", tasks.len());
            self.tasks.replace_all(tasks);
        }
        if let Some(projects) = doc.projects {
            log::info!("store: importing {} projects", projects.len());
            self.projects.replace_all(projects);
        }
        if let Some(settings) = doc.settings {
            self.settings.set(settings);
        }
        Ok(())
    }

    /// Clear all tasks; projects and settings are kept
    pub fn reset(&mut self) {
        self.tasks.replace_all(Vec::new());
        log::info!("store: all tasks cleared");
    }

    /// Replace everything with the demo data set
    pub fn load_demo_data(&mut self) {
        let (today, now) = (self.today(), self.now());
        self.tasks.replace_all(sample_tasks(today, now));
        self.projects.replace_all(sample_projects());
        self.settings.set(default_settings());
        log::info!("store: demo data loaded");
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn require_task(&self, id: &str) -> DomainResult<&Task> {
        self.task(id)
            .ok_or_else(|| DomainError::NotFound(format!("task {}", id)))
    }

    fn require_project(&self, id: &str) -> DomainResult<&Project> {
        self.project(id)
            .ok_or_else(|| DomainError::NotFound(format!("project {}", id)))
    }

    fn set_status(&mut self, id: &str, status: Status) -> DomainResult<()> {
        let now = self.now();
        let touched = self.tasks.update_where(
            |t| t.id == id,
            |t| {
                t.status = status;
                t.updated_at = Some(now);
            },
        );
        if touched == 0 {
            return Err(DomainError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::{Frequency, Priority, Recurring, Theme};
    use crate::repository::MemoryStorage;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 9, 30, 0).unwrap()
    }

    fn setup() -> (Rc<MemoryStorage>, TaskStore<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let store = TaskStore::open(
            Rc::clone(&storage),
            &StoreConfig::default(),
            Box::new(FixedClock::new(start())),
        );
        (storage, store)
    }

    fn add(store: &mut TaskStore<MemoryStorage>, title: &str) -> Task {
        store.create_task(TaskDraft::new(title)).unwrap()
    }

    fn titles(store: &TaskStore<MemoryStorage>) -> Vec<String> {
        store.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_create_task_defaults() {
        let (storage, mut store) = setup();
        let mut draft = TaskDraft::new("Write docs");
        draft.priority = Priority::High;
        draft.subtasks = vec![Subtask {
            id: "x".to_string(),
            title: "ignored".to_string(),
            done: false,
        }];

        let first = store.create_task(draft).unwrap();
        let second = add(&mut store, "Second");

        assert_eq!(first.id, start().timestamp_millis().to_string());
        assert_ne!(first.id, second.id);
        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
        assert!(first.subtasks.is_empty());
        assert!(!first.archived);
        assert_eq!(first.created_at, Some(start()));
        assert!(storage.raw("taskirra:tasks").unwrap().contains("Write docs"));
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let (_, mut store) = setup();
        let result = store.create_task(TaskDraft::new("   "));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_update_task_keeps_identity() {
        let (_, mut store) = setup();
        let task = add(&mut store, "Draft");

        let mut draft = TaskDraft::from_task(&task);
        draft.title = "Final".to_string();
        draft.tags = vec!["docs".to_string()];
        let updated = store.update_task(&task.id, draft).unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.order, task.order);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(store.task(&task.id).unwrap().title, "Final");
        assert!(store.update_task("nope", TaskDraft::new("x")).is_err());
    }

    #[test]
    fn test_toggle_and_undo() {
        let (_, mut store) = setup();
        let task = add(&mut store, "Toggle me");

        assert_eq!(store.toggle_complete(&task.id).unwrap(), Status::Done);
        store.undo_complete(&task.id).unwrap();
        assert_eq!(store.task(&task.id).unwrap().status, Status::Todo);

        store.toggle_complete(&task.id).unwrap();
        assert_eq!(store.toggle_complete(&task.id).unwrap(), Status::Todo);
        assert!(matches!(store.toggle_complete("missing"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_in_progress_toggles_to_done() {
        let (_, mut store) = setup();
        let mut draft = TaskDraft::new("Half way");
        draft.status = Status::InProgress;
        let task = store.create_task(draft).unwrap();
        assert_eq!(store.toggle_complete(&task.id).unwrap(), Status::Done);
    }

    #[test]
    fn test_delete_then_undo_restores_position() {
        let (_, mut store) = setup();
        for title in ["a", "b", "c", "d"] {
            add(&mut store, title);
        }
        let b = store.tasks()[1].id.clone();

        let removed = store.delete_task(&b).unwrap();
        assert_eq!(titles(&store), vec!["a", "c", "d"]);

        store.restore_tasks(vec![removed]);
        assert_eq!(titles(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_bulk_delete_and_restore() {
        let (_, mut store) = setup();
        for title in ["a", "b", "c", "d"] {
            add(&mut store, title);
        }
        let ids = vec![store.tasks()[0].id.clone(), store.tasks()[2].id.clone(), "ghost".to_string()];

        let removed = store.delete_tasks(&ids);
        assert_eq!(removed.len(), 2);
        assert_eq!(titles(&store), vec!["b", "d"]);

        store.restore_tasks(removed);
        assert_eq!(titles(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_complete_tasks() {
        let (_, mut store) = setup();
        let a = add(&mut store, "a");
        add(&mut store, "b");

        assert_eq!(store.complete_tasks(&[a.id.clone()]), 1);
        assert!(store.task(&a.id).unwrap().is_done());
        assert_eq!(store.tasks().iter().filter(|t| t.is_done()).count(), 1);
    }

    #[test]
    fn test_reorder_renumbers() {
        let (_, mut store) = setup();
        for title in ["a", "b", "c"] {
            add(&mut store, title);
        }
        let mut ids: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();
        ids.reverse();

        store.reorder(&ids).unwrap();
        assert_eq!(titles(&store), vec!["c", "b", "a"]);
        let orders: Vec<i64> = store.tasks().iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        store.move_task(0, 2).unwrap();
        assert_eq!(titles(&store), vec!["b", "a", "c"]);
        assert!(store.move_task(0, 9).is_err());
        assert!(store.reorder(&ids[..2]).is_err());
    }

    #[test]
    fn test_generate_recurring() {
        let (_, mut store) = setup();
        let mut draft = TaskDraft::new("Water plants");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 5, 15);
        draft.recurring = Some(Recurring::new(Frequency::Daily, 1));
        let task = store.create_task(draft).unwrap();

        assert_eq!(store.generate_recurring(), 0);
        store.toggle_complete(&task.id).unwrap();
        assert_eq!(store.generate_recurring(), 1);
        assert_eq!(store.generate_recurring(), 0);

        let next = store.tasks().last().unwrap();
        assert_eq!(next.status, Status::Todo);
        assert_eq!(next.due_date, NaiveDate::from_ymd_opt(2024, 5, 16));
        assert_ne!(next.id, task.id);
    }

    #[test]
    fn test_subtasks() {
        let (_, mut store) = setup();
        let task = add(&mut store, "Parent");

        assert!(store.add_subtask(&task.id, "  ").unwrap().is_none());
        let sub = store.add_subtask(&task.id, "Child").unwrap().unwrap();
        assert!(store.toggle_subtask(&task.id, &sub.id).unwrap());
        assert_eq!(store.task(&task.id).unwrap().subtask_progress(), (1, 1));

        store.delete_subtask(&task.id, &sub.id).unwrap();
        assert!(store.task(&task.id).unwrap().subtasks.is_empty());
        assert!(store.delete_subtask(&task.id, &sub.id).is_err());
    }

    #[test]
    fn test_delete_project_unassigns_tasks() {
        let (_, mut store) = setup();
        let project = store.create_project(ProjectDraft::new("Home")).unwrap();
        assert!(project.id.starts_with("proj-"));

        let mut draft = TaskDraft::new("Fix sink");
        draft.project_id = Some(project.id.clone());
        let task = store.create_task(draft).unwrap();

        store.delete_project(&project.id).unwrap();
        assert!(store.projects().is_empty());
        assert_eq!(store.task(&task.id).unwrap().project_id, None);
    }

    #[test]
    fn test_update_and_archive_project() {
        let (_, mut store) = setup();
        let project = store.create_project(ProjectDraft::new("Home")).unwrap();

        let mut draft = ProjectDraft::new("House");
        draft.color = "#f59e0b".to_string();
        let updated = store.update_project(&project.id, draft).unwrap();
        assert_eq!(updated.name, "House");
        assert_eq!(updated.created_at, project.created_at);

        assert!(store.set_project_archived(&project.id, true).unwrap().archived);
        assert!(store.create_project(ProjectDraft::new("")).is_err());
    }

    #[test]
    fn test_export_import_roundtrip() {
        let (_, mut store) = setup();
        store.load_demo_data();
        store.update_settings(|s| s.theme = Theme::Dark);
        let json = store.export(start()).unwrap();

        let (_, mut other) = setup();
        other.import(&json).unwrap();
        assert_eq!(other.tasks(), store.tasks());
        assert_eq!(other.projects(), store.projects());
        assert_eq!(other.settings().theme, Theme::Dark);
    }

    #[test]
    fn test_import_partial_and_invalid() {
        let (_, mut store) = setup();
        add(&mut store, "keep me");
        store.create_project(ProjectDraft::new("Home")).unwrap();

        assert!(store.import("{").is_err());
        assert!(store.import(r#"{"tasks":[{"id":"1","title":""}]}"#).is_err());
        assert_eq!(titles(&store), vec!["keep me"]);

        store.import(r#"{"tasks":[{"id":"1","title":"Imported","status":"in-progress"}]}"#).unwrap();
        assert_eq!(titles(&store), vec!["Imported"]);
        assert_eq!(store.projects().len(), 1);
    }

    #[test]
    fn test_reset_keeps_projects_and_settings() {
        let (storage, mut store) = setup();
        store.load_demo_data();
        store.update_settings(|s| s.notifications = false);

        store.reset();
        assert!(store.tasks().is_empty());
        assert_eq!(store.projects().len(), 5);
        assert!(!store.settings().notifications);
        assert_eq!(storage.raw("taskirra:tasks").as_deref(), Some("[]"));
    }

    #[test]
    fn test_state_survives_reopen() {
        let (storage, mut store) = setup();
        add(&mut store, "persisted");
        store.update_settings(|s| s.default_view = "calendar".to_string());

        let reopened = TaskStore::open(storage, &StoreConfig::default(), Box::new(FixedClock::new(start())));
        assert_eq!(titles(&reopened), vec!["persisted"]);
        assert_eq!(reopened.settings().default_view, "calendar");
    }

    #[test]
    fn test_demo_data_recurring_sweep() {
        let (_, mut store) = setup();
        store.load_demo_data();
        assert_eq!(store.generate_recurring(), 2);
        assert_eq!(store.tasks().len(), 10);
    }
}
