//! Analytics Aggregator
//!
//! Pure functions over the full task list, recomputed on every render.
//! Nothing here is cached or persisted. Calendar days are taken in the
//! timezone of the `now` (or timezone) argument, so the browser passes
//! `Local` and tests pass `Utc`.

mod activity;
mod breakdown;
mod productivity;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::Task;

pub use activity::{heatmap, last_seven_days, streaks, DayCount, Streak};
pub use breakdown::{
    priority_completion, progress_percent, status_breakdown, tag_frequency, weekly_trend, DashboardStats,
    PriorityRate, StatusBreakdown, WeekTrend,
};
pub use productivity::{
    average_completion_days, productivity_by_time, productivity_by_weekday, weekday_name, TimeOfDay, TimeOfDayStats,
    WeekdayStats,
};

/// Trailing window of the heatmap, in days
pub const HEATMAP_DAYS: u64 = 90;
/// Number of tags reported by [`tag_frequency`]
pub const TOP_TAG_LIMIT: usize = 10;
/// Number of 7-day windows reported by [`weekly_trend`]
pub const TREND_WEEKS: u64 = 4;

/// Completion moment of a done task, in the caller's timezone.
/// The last update of a done task is taken as its completion.
fn completed_at<Tz: TimeZone>(task: &Task, tz: &Tz) -> Option<DateTime<Tz>> {
    if !task.is_done() {
        return None;
    }
    task.updated_at.map(|ts: DateTime<Utc>| ts.with_timezone(tz))
}
