//! Completion activity over trailing days: heatmap, streaks, weekly chart.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use super::{completed_at, HEATMAP_DAYS};
use crate::domain::Task;

/// Completions on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

impl DayCount {
    /// Heatmap shade 0..=4
    pub fn intensity(&self) -> u8 {
        match self.count {
            0 => 0,
            1..=2 => 1,
            3..=4 => 2,
            5..=6 => 3,
            _ => 4,
        }
    }

    /// "Mar 5"
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    /// "Tue"
    pub fn day_name(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Current and best run of days with at least one completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streak {
    pub current: usize,
    pub best: usize,
}

/// Trailing `days` calendar days ending today, oldest first
fn trailing_days(today: NaiveDate, days: u64) -> impl Iterator<Item = NaiveDate> {
    (0..days).rev().filter_map(move |back| today.checked_sub_days(Days::new(back)))
}

/// Tasks completed per day over the last 90 days, oldest first.
///
/// Always returns exactly 90 entries, the last one being today.
pub fn heatmap<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Vec<DayCount> {
    let tz = now.timezone();
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for task in tasks {
        if let Some(at) = completed_at(task, &tz) {
            *per_day.entry(at.date_naive()).or_default() += 1;
        }
    }

    trailing_days(now.date_naive(), HEATMAP_DAYS)
        .map(|date| DayCount {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Streaks over an oldest-first day series.
///
/// The current streak walks back from the most recent day and stops at the
/// first day without completions; today itself having none yet does not end
/// it. The best streak is the longest run anywhere in the series.
pub fn streaks(days: &[DayCount]) -> Streak {
    let mut current = 0;
    for (i, day) in days.iter().rev().enumerate() {
        if day.count > 0 {
            current += 1;
        } else if i > 0 {
            break;
        }
    }

    let mut best = 0;
    let mut run = 0;
    for day in days {
        if day.count > 0 {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }

    Streak { current, best }
}

/// Done tasks per day for the last 7 days, oldest first.
///
/// Bucketed by last update, falling back to creation time.
pub fn last_seven_days<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Vec<DayCount> {
    let tz = now.timezone();
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for task in tasks.iter().filter(|t| t.is_done()) {
        if let Some(at) = task.updated_at.or(task.created_at) {
            *per_day.entry(at.with_timezone(&tz).date_naive()).or_default() += 1;
        }
    }

    trailing_days(now.date_naive(), 7)
        .map(|date| DayCount {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
