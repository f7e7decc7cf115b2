//! Counts and rates shown on the dashboard and analytics tabs.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use super::{TOP_TAG_LIMIT, TREND_WEEKS};
use crate::dates::{is_this_week, is_today};
use crate::domain::{percent, Priority, Status, Task};

/// Most frequent tags across all tasks, descending, at most 10.
/// Ties keep first-seen order.
pub fn tag_frequency(tasks: &[Task]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in tasks.iter().flat_map(|t| &t.tags) {
        let count = counts.entry(tag.as_str()).or_insert(0);
        if *count == 0 {
            order.push(tag.clone());
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|tag| {
            let count = counts[tag.as_str()];
            (tag, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_TAG_LIMIT);
    ranked
}

/// Completion rate for one priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityRate {
    pub priority: Priority,
    pub completed: usize,
    pub total: usize,
}

impl PriorityRate {
    pub fn percent(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

/// Rates for high, medium and low, in that order
pub fn priority_completion(tasks: &[Task]) -> Vec<PriorityRate> {
    Priority::ALL
        .iter()
        .map(|&priority| {
            let tier = tasks.iter().filter(|t| t.priority == priority);
            let (completed, total) = tier.fold((0, 0), |(done, all), t| (done + usize::from(t.is_done()), all + 1));
            PriorityRate {
                priority,
                completed,
                total,
            }
        })
        .collect()
}

/// Task counts per status (pie chart)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBreakdown {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusBreakdown {
    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

pub fn status_breakdown(tasks: &[Task]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for task in tasks {
        match task.status {
            Status::Todo => breakdown.todo += 1,
            Status::InProgress => breakdown.in_progress += 1,
            Status::Done => breakdown.done += 1,
        }
    }
    breakdown
}

/// One trailing 7-day window of the completion trend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTrend {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub completed: usize,
    pub total: usize,
}

impl WeekTrend {
    pub fn percent(&self) -> u32 {
        percent(self.completed, self.total)
    }

    /// "May 1 - May 7"
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%b %-d"), self.end.format("%b %-d"))
    }
}

/// Completion of tasks created in each of the last 4 weeks, oldest first.
///
/// Each window spans 7 calendar days; the newest one ends today.
pub fn weekly_trend<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Vec<WeekTrend> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..TREND_WEEKS)
        .rev()
        .filter_map(|week| {
            let end = today.checked_sub_days(Days::new(week * 7))?;
            let start = end.checked_sub_days(Days::new(6))?;
            let created: Vec<&Task> = tasks
                .iter()
                .filter(|t| {
                    t.created_at
                        .map(|ts| ts.with_timezone(&tz).date_naive())
                        .is_some_and(|day| day >= start && day <= end)
                })
                .collect();
            Some(WeekTrend {
                start,
                end,
                completed: created.iter().filter(|t| t.is_done()).count(),
                total: created.len(),
            })
        })
        .collect()
}

/// Percent of done tasks in a (usually filtered) list
pub fn progress_percent<'a, I>(tasks: I) -> u32
where
    I: IntoIterator<Item = &'a Task>,
{
    let (done, total) = tasks
        .into_iter()
        .fold((0, 0), |(done, all), t| (done + usize::from(t.is_done()), all + 1));
    percent(done, total)
}

/// Headline numbers of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// Non-archived
    pub total: usize,
    pub completed: usize,
    /// Not done and not archived
    pub pending: usize,
    /// Due today, not done
    pub today: usize,
    /// Due this week, not done
    pub this_week: usize,
    pub overdue: usize,
    /// High priority, not done
    pub high_priority: usize,
}

impl DashboardStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            let done = task.is_done();
            if !task.archived {
                stats.total += 1;
                if !done {
                    stats.pending += 1;
                }
            }
            if done {
                stats.completed += 1;
                continue;
            }
            if is_today(task.due_date, today) {
                stats.today += 1;
            }
            if is_this_week(task.due_date, today) {
                stats.this_week += 1;
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
            if task.priority == Priority::High {
                stats.high_priority += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn tagged(id: &str, tags: &[&str]) -> Task {
        let mut t = Task::new(id, id);
        t.tags = tags.iter().map(|s| s.to_string()).collect();
        t
    }

    #[test]
    fn test_tag_frequency_order_and_limit() {
        let tasks = vec![
            tagged("1", &["work", "home"]),
            tagged("2", &["home", "urgent"]),
            tagged("3", &["urgent", "home"]),
        ];
        let ranked = tag_frequency(&tasks);
        assert_eq!(
            ranked,
            vec![("home".to_string(), 3), ("urgent".to_string(), 2), ("work".to_string(), 1)]
        );

        let many: Vec<Task> = (0..15).map(|i| tagged(&i.to_string(), &[&format!("t{}", i)])).collect();
        let ranked = tag_frequency(&many);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].0, "t0");
    }

    #[test]
    fn test_priority_completion() {
        let mut a = Task::new("1", "a");
        a.priority = Priority::High;
        a.status = Status::Done;
        let mut b = Task::new("2", "b");
        b.priority = Priority::High;
        let mut c = Task::new("3", "c");
        c.priority = Priority::High;
        c.status = Status::Done;

        let rates = priority_completion(&[a, b, c]);
        assert_eq!(rates[0].priority, Priority::High);
        assert_eq!((rates[0].completed, rates[0].total), (2, 3));
        assert_eq!(rates[0].percent(), 67);
        assert_eq!(rates[1].total, 0);
        assert_eq!(rates[1].percent(), 0);
    }

    #[test]
    fn test_status_breakdown() {
        let mut done = Task::new("1", "d");
        done.status = Status::Done;
        let mut wip = Task::new("2", "w");
        wip.status = Status::InProgress;
        let b = status_breakdown(&[done, wip, Task::new("3", "t")]);
        assert_eq!((b.todo, b.in_progress, b.done), (1, 1, 1));
        assert_eq!(b.total(), 3);
    }

    #[test]
    fn test_weekly_trend_windows() {
        let now = Utc.with_ymd_and_hms(2024, 5, 28, 12, 0, 0).unwrap();
        let created = |days_ago: i64, done: bool| {
            let mut t = Task::new(days_ago.to_string(), "t");
            t.created_at = Some(now - Duration::days(days_ago));
            if done {
                t.status = Status::Done;
            }
            t
        };
        let tasks = vec![created(0, true), created(6, false), created(7, true), created(27, true), created(40, true)];
        let trend = weekly_trend(&tasks, &now);

        assert_eq!(trend.len(), 4);
        assert_eq!(trend[3].end, now.date_naive());
        assert_eq!((trend[3].completed, trend[3].total), (1, 2));
        assert_eq!(trend[3].percent(), 50);
        assert_eq!((trend[2].completed, trend[2].total), (1, 1));
        assert_eq!((trend[0].completed, trend[0].total), (1, 1));
        assert_eq!(trend[3].label(), "May 22 - May 28");
    }

    #[test]
    fn test_dashboard_stats() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let mut due_today = Task::new("1", "a");
        due_today.due_date = Some(today);
        due_today.priority = Priority::High;
        let mut late = Task::new("2", "b");
        late.due_date = Some(today - Days::new(3));
        let mut done = Task::new("3", "c");
        done.status = Status::Done;
        done.due_date = Some(today);
        let mut archived = Task::new("4", "d");
        archived.archived = true;

        let stats = DashboardStats::compute(&[due_today, late, done, archived], today);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.high_priority, 1);
    }

    #[test]
    fn test_progress_percent() {
        let mut done = Task::new("1", "a");
        done.status = Status::Done;
        let tasks = vec![done, Task::new("2", "b"), Task::new("3", "c")];
        assert_eq!(progress_percent(&tasks), 33);
        assert_eq!(progress_percent(Vec::<&Task>::new()), 0);
    }
}
