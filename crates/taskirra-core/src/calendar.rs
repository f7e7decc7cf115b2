//! Calendar Summaries
//!
//! Per-day and per-month figures for the calendar tab.

use chrono::NaiveDate;

use crate::dates::month_bounds;
use crate::domain::{Priority, Task};

/// Tasks due on `date`, in list order
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.due_date == Some(date)).collect()
}

/// Indicators drawn on one calendar tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    pub total: usize,
    pub completed: usize,
    pub high_priority_pending: usize,
    /// Some task due that day is still open and the day is in the past
    pub has_overdue: bool,
}

impl DaySummary {
    pub fn compute(tasks: &[Task], date: NaiveDate, today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for task in tasks_for_date(tasks, date) {
            summary.total += 1;
            if task.is_done() {
                summary.completed += 1;
            } else if task.priority == Priority::High {
                summary.high_priority_pending += 1;
            }
            if task.is_overdue(today) {
                summary.has_overdue = true;
            }
        }
        summary
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    pub fn all_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Totals for the month containing a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl MonthSummary {
    pub fn compute(tasks: &[Task], any_day: NaiveDate, today: NaiveDate) -> Self {
        let Some((first, last)) = month_bounds(any_day) else {
            return Self::default();
        };
        let mut summary = Self::default();
        for task in tasks {
            let Some(due) = task.due_date else { continue };
            if due < first || due > last {
                continue;
            }
            summary.total += 1;
            if task.is_done() {
                summary.completed += 1;
            } else {
                summary.pending += 1;
            }
            if task.is_overdue(today) {
                summary.overdue += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn due(id: &str, date: NaiveDate, status: Status, priority: Priority) -> Task {
        let mut t = Task::new(id, id);
        t.due_date = Some(date);
        t.status = status;
        t.priority = priority;
        t
    }

    fn sample() -> Vec<Task> {
        vec![
            due("1", d(2024, 2, 10), Status::Done, Priority::Low),
            due("2", d(2024, 2, 10), Status::Todo, Priority::High),
            due("3", d(2024, 2, 20), Status::Done, Priority::Medium),
            due("4", d(2024, 3, 1), Status::Todo, Priority::Medium),
            Task::new("5", "undated"),
        ]
    }

    #[test]
    fn test_tasks_for_date() {
        let tasks = sample();
        let ids: Vec<&str> = tasks_for_date(&tasks, d(2024, 2, 10)).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_day_summary() {
        let tasks = sample();
        let today = d(2024, 2, 15);

        let busy = DaySummary::compute(&tasks, d(2024, 2, 10), today);
        assert_eq!(busy.total, 2);
        assert_eq!(busy.pending(), 1);
        assert_eq!(busy.high_priority_pending, 1);
        assert!(busy.has_overdue);
        assert!(!busy.all_done());

        let finished = DaySummary::compute(&tasks, d(2024, 2, 20), today);
        assert!(finished.all_done());
        assert!(!finished.has_overdue);

        assert!(!DaySummary::compute(&tasks, d(2024, 2, 11), today).all_done());
    }

    #[test]
    fn test_month_summary() {
        let summary = MonthSummary::compute(&sample(), d(2024, 2, 3), d(2024, 2, 15));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.overdue, 1);
    }
}
