//! Demo Data
//!
//! A small set of projects and tasks for trying the app out. Due dates are
//! laid out around `today` so every filter bucket has something in it.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

use crate::domain::{Frequency, Priority, Project, Recurring, Settings, Status, Subtask, Task};

fn created(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
}

fn offset(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn project(id: &str, name: &str, description: &str, color: &str, icon: &str, month: u32, day: u32) -> Project {
    let mut p = Project::new(id, name);
    p.description = description.to_string();
    p.color = color.to_string();
    p.icon = icon.to_string();
    p.created_at = created(2024, month, day);
    p
}

pub fn sample_projects() -> Vec<Project> {
    vec![
        project("proj-1", "Work Projects", "Professional work-related tasks", "#6366f1", "bi-briefcase", 1, 1),
        project("proj-2", "Home Renovation", "House improvement and maintenance", "#f59e0b", "bi-house", 1, 15),
        project("proj-3", "Learning Goals", "Educational and skill development", "#10b981", "bi-book", 2, 1),
        project("proj-4", "Fitness Journey", "Health and fitness tracking", "#ef4444", "bi-heart-pulse", 2, 15),
        project("proj-5", "Creative Projects", "Art, design, and creative work", "#ec4899", "bi-palette", 3, 1),
    ]
}

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: Status,
    due_in: i64,
    tags: &'static [&'static str],
    project: &'static str,
    created_day: u32,
    touched_now: bool,
}

impl Seed {
    fn build(&self, order: i64, today: NaiveDate, now: DateTime<Utc>) -> Task {
        let mut task = Task::new(self.id, self.title);
        task.description = Some(self.description.to_string());
        task.priority = self.priority;
        task.status = self.status;
        task.due_date = offset(today, self.due_in);
        task.tags = self.tags.iter().map(|t| t.to_string()).collect();
        task.project_id = Some(self.project.to_string());
        task.created_at = created(2024, 3, self.created_day);
        task.updated_at = if self.touched_now { Some(now) } else { task.created_at };
        task.order = order;
        task
    }
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: "1",
        title: "Complete Q4 Sales Report",
        description: "Prepare comprehensive sales analysis for the quarter",
        priority: Priority::High,
        status: Status::InProgress,
        due_in: 2,
        tags: &["work", "urgent", "reports"],
        project: "proj-1",
        created_day: 15,
        touched_now: true,
    },
    Seed {
        id: "2",
        title: "Paint Living Room",
        description: "Choose color and paint the main living area",
        priority: Priority::Medium,
        status: Status::Todo,
        due_in: 7,
        tags: &["home", "diy"],
        project: "proj-2",
        created_day: 10,
        touched_now: false,
    },
    Seed {
        id: "3",
        title: "Learn React Hooks",
        description: "Complete online course on advanced React patterns",
        priority: Priority::Medium,
        status: Status::InProgress,
        due_in: 14,
        tags: &["learning", "coding"],
        project: "proj-3",
        created_day: 1,
        touched_now: true,
    },
    Seed {
        id: "4",
        title: "Morning Workout Routine",
        description: "30 minutes cardio + stretching",
        priority: Priority::High,
        status: Status::Done,
        due_in: 0,
        tags: &["fitness", "health"],
        project: "proj-4",
        created_day: 20,
        touched_now: true,
    },
    Seed {
        id: "5",
        title: "Design Portfolio Website",
        description: "Create mockups for personal portfolio redesign",
        priority: Priority::Low,
        status: Status::Todo,
        due_in: 30,
        tags: &["design", "portfolio"],
        project: "proj-5",
        created_day: 18,
        touched_now: false,
    },
    Seed {
        id: "6",
        title: "Fix Kitchen Sink",
        description: "Repair leaking faucet",
        priority: Priority::High,
        status: Status::Todo,
        due_in: -1,
        tags: &["home", "urgent"],
        project: "proj-2",
        created_day: 19,
        touched_now: false,
    },
    Seed {
        id: "7",
        title: "Team Meeting Preparation",
        description: "Prepare agenda and presentation slides",
        priority: Priority::Medium,
        status: Status::Todo,
        due_in: 1,
        tags: &["work", "meetings"],
        project: "proj-1",
        created_day: 21,
        touched_now: false,
    },
    Seed {
        id: "8",
        title: "Practice Guitar",
        description: "45 minutes practice session",
        priority: Priority::Low,
        status: Status::Done,
        due_in: 0,
        tags: &["hobby", "music"],
        project: "proj-5",
        created_day: 22,
        touched_now: true,
    },
];

/// Demo tasks: one overdue, two completed recurring tasks, the rest upcoming
pub fn sample_tasks(today: NaiveDate, now: DateTime<Utc>) -> Vec<Task> {
    let mut tasks: Vec<Task> = SEEDS
        .iter()
        .zip(1..)
        .map(|(seed, order)| seed.build(order, today, now))
        .collect();

    tasks[0].subtasks = vec![
        subtask("s1", "Gather sales data", true),
        subtask("s2", "Create charts", true),
        subtask("s3", "Write analysis", false),
    ];
    tasks[2].subtasks = vec![
        subtask("s4", "Watch tutorial videos", true),
        subtask("s5", "Complete exercises", false),
    ];
    tasks[3].recurring = Some(Recurring {
        freq: Frequency::Daily,
        interval: 1,
        next_date: offset(today, 1),
    });
    tasks[7].recurring = Some(Recurring {
        freq: Frequency::Weekly,
        interval: 1,
        next_date: offset(today, 7),
    });
    tasks
}

fn subtask(id: &str, title: &str, done: bool) -> Subtask {
    Subtask {
        id: id.to_string(),
        title: title.to_string(),
        done,
    }
}

pub fn default_settings() -> Settings {
    Settings::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterBucket, FilterCounts};
    use crate::recurring::should_generate_next;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    #[test]
    fn test_sample_tasks_cover_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).unwrap();
        let tasks = sample_tasks(today(), now);
        assert_eq!(tasks.len(), 8);

        let counts = FilterCounts::compute(&tasks, today());
        assert_eq!(counts.get(FilterBucket::Overdue), 1);
        assert_eq!(counts.get(FilterBucket::Completed), 2);
        assert_eq!(counts.get(FilterBucket::Important), 3);
        assert_eq!(counts.get(FilterBucket::Today), 2);

        let orders: Vec<i64> = tasks.iter().map(|t| t.order).collect();
        assert_eq!(orders, (1..=8).collect::<Vec<_>>());
        assert_eq!(tasks.iter().filter(|t| should_generate_next(t)).count(), 2);
    }

    #[test]
    fn test_sample_projects_referenced() {
        let projects = sample_projects();
        let tasks = sample_tasks(today(), Utc::now());
        for task in &tasks {
            let pid = task.project_id.as_deref().unwrap();
            assert!(projects.iter().any(|p| p.id == pid), "{} has no project", task.id);
        }
        assert_eq!(tasks[0].subtask_progress(), (2, 3));
    }
}
