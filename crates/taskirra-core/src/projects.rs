//! Project Summaries
//!
//! Progress figures for the projects tab.

use chrono::NaiveDate;

use crate::domain::{percent, Project, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl ProjectStats {
    pub fn compute(project_id: &str, tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = Self::default();
        for task in tasks.iter().filter(|t| t.project_id.as_deref() == Some(project_id)) {
            stats.total += 1;
            if task.is_done() {
                stats.completed += 1;
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }
        stats
    }

    pub fn progress(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

/// (active, archived) projects, each in list order
pub fn split_projects(projects: &[Project]) -> (Vec<&Project>, Vec<&Project>) {
    projects.iter().partition(|p| !p.archived)
}

/// Owned copies of the non-archived projects, for pickers and filters
pub fn active_projects(projects: &[Project]) -> Vec<Project> {
    projects.iter().filter(|p| !p.archived).cloned().collect()
}

/// Non-archived tasks that belong to no project
pub fn unassigned_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.project_id.is_none() && !t.archived)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;

    #[test]
    fn test_project_stats() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let mut a = Task::new("1", "a");
        a.project_id = Some("proj-1".to_string());
        a.status = Status::Done;
        let mut b = Task::new("2", "b");
        b.project_id = Some("proj-1".to_string());
        b.due_date = NaiveDate::from_ymd_opt(2024, 4, 1);
        let mut c = Task::new("3", "c");
        c.project_id = Some("proj-2".to_string());

        let tasks = vec![a, b, c, Task::new("4", "loose")];
        let stats = ProjectStats::compute("proj-1", &tasks, today);
        assert_eq!(stats, ProjectStats { total: 2, completed: 1, overdue: 1 });
        assert_eq!(stats.progress(), 50);
        assert_eq!(ProjectStats::compute("proj-9", &tasks, today).progress(), 0);

        let loose: Vec<&str> = unassigned_tasks(&tasks).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(loose, vec!["4"]);
    }

    #[test]
    fn test_split_projects() {
        let mut old = Project::new("proj-2", "Old");
        old.archived = true;
        let projects = vec![Project::new("proj-1", "Work"), old];
        let (active, archived) = split_projects(&projects);
        assert_eq!(active.len(), 1);
        assert_eq!(archived[0].id, "proj-2");
    }

    #[test]
    fn test_active_projects_keep_list_order() {
        let mut old = Project::new("proj-2", "Old");
        old.archived = true;
        let projects = vec![Project::new("proj-3", "Home"), old, Project::new("proj-1", "Work")];

        let ids: Vec<String> = active_projects(&projects).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["proj-3", "proj-1"]);
        assert!(active_projects(&[]).is_empty());
    }
}
