//! Repository Integration Tests
//!
//! Tests for the collection and settings repositories over in-memory storage.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::domain::{DomainError, Project, Settings, Status, Task, Theme};
    use crate::repository::{
        KeyValueStorage, MemoryStorage, ProjectRepository, Repository, SettingsRepository, TaskRepository,
    };

    fn setup_task_repo() -> (Rc<MemoryStorage>, TaskRepository<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let repo = TaskRepository::load(Rc::clone(&storage), "test:tasks");
        (storage, repo)
    }

    #[test]
    fn test_create_task() {
        let (storage, mut repo) = setup_task_repo();

        let created = repo.create(Task::new("1", "Test task")).expect("Failed to create");

        assert_eq!(created.title, "Test task");
        assert_eq!(created.status, Status::Todo);
        assert!(storage.raw("test:tasks").unwrap().contains("Test task"));
    }

    #[test]
    fn test_create_duplicate_id_conflicts() {
        let (_, mut repo) = setup_task_repo();
        repo.create(Task::new("1", "First")).unwrap();

        let result = repo.create(Task::new("1", "Second"));
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_find_by_id() {
        let (_, mut repo) = setup_task_repo();
        repo.create(Task::new("7", "Find me")).unwrap();

        let found = repo.find_by_id(&"7".to_string());
        assert!(found.is_some());
        assert_eq!(found.unwrap().title, "Find me");
        assert!(repo.find_by_id(&"8".to_string()).is_none());
    }

    #[test]
    fn test_list_tasks_in_stored_order() {
        let (_, mut repo) = setup_task_repo();
        repo.create(Task::new("2", "Task 1")).unwrap();
        repo.create(Task::new("1", "Task 2")).unwrap();

        let titles: Vec<&str> = repo.list().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Task 1", "Task 2"]);
    }

    #[test]
    fn test_update_task() {
        let (_, mut repo) = setup_task_repo();
        let mut created = repo.create(Task::new("1", "Original")).unwrap();

        created.title = "Updated".to_string();
        created.status = Status::Done;

        let updated = repo.update(created).expect("Update failed");
        assert_eq!(updated.title, "Updated");
        assert!(repo.list()[0].is_done());
    }

    #[test]
    fn test_update_missing_task() {
        let (_, mut repo) = setup_task_repo();
        let result = repo.update(Task::new("404", "Ghost"));
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_delete_task() {
        let (_, mut repo) = setup_task_repo();
        repo.create(Task::new("1", "To delete")).unwrap();

        let removed = repo.delete(&"1".to_string()).expect("Delete failed");
        assert_eq!(removed.title, "To delete");
        assert!(repo.is_empty());
        assert!(repo.delete(&"1".to_string()).is_err());
    }

    #[test]
    fn test_reload_from_storage() {
        let (storage, mut repo) = setup_task_repo();
        repo.create(Task::new("1", "Persisted")).unwrap();

        let reloaded = TaskRepository::load(storage, "test:tasks");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list()[0].title, "Persisted");
    }

    #[test]
    fn test_bulk_update_and_remove() {
        let (_, mut repo) = setup_task_repo();
        repo.extend(vec![Task::new("1", "a"), Task::new("2", "b"), Task::new("3", "c")]);

        let touched = repo.update_where(|t| t.id != "2", |t| t.status = Status::Done);
        assert_eq!(touched, 2);

        let removed = repo.remove_where(|t| t.is_done());
        let ids: Vec<&str> = removed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let (storage, mut repo) = setup_task_repo();
        storage.set_fail_writes(true);

        repo.create(Task::new("1", "Unsaved")).expect("memory state still updates");
        assert_eq!(repo.len(), 1);
        assert!(storage.raw("test:tasks").is_none());
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item("test:tasks", "{oops").unwrap();

        let repo = TaskRepository::load(storage, "test:tasks");
        assert!(repo.is_empty());
    }

    #[test]
    fn test_project_repository_roundtrip() {
        let storage = Rc::new(MemoryStorage::new());
        let mut repo = ProjectRepository::load(Rc::clone(&storage), "test:projects");
        let mut home = Project::new("proj-1", "Home");
        home.description = "Chores and errands".to_string();
        repo.create(home).unwrap();
        repo.create(Project::new("proj-2", "Work")).unwrap();

        let reloaded = ProjectRepository::load(storage, "test:projects");
        let found = reloaded.find_by_id(&"proj-1".to_string()).unwrap();
        assert_eq!(found.description, "Chores and errands");
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_settings_default_and_update() {
        let storage = Rc::new(MemoryStorage::new());
        let mut repo = SettingsRepository::load(Rc::clone(&storage), "test:settings");
        assert_eq!(repo.get(), &Settings::default());

        repo.update(|s| s.theme = Theme::Dark);

        let reloaded = SettingsRepository::load(storage, "test:settings");
        assert_eq!(reloaded.get().theme, Theme::Dark);
    }

    #[test]
    fn test_settings_non_object_reads_default() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item("test:settings", "[1,2,3]").unwrap();

        let repo = SettingsRepository::load(storage, "test:settings");
        assert_eq!(repo.get(), &Settings::default());
    }
}
