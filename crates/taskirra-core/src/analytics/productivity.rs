//! When work gets done: weekday and time-of-day tallies.

use chrono::{Datelike, TimeZone, Timelike, Weekday};

use super::completed_at;
use crate::domain::Task;

/// Display order of the weekday chart
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Completions per weekday, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdayStats {
    pub counts: [usize; 7],
}

impl WeekdayStats {
    pub fn count(&self, day: Weekday) -> usize {
        self.counts[day.num_days_from_monday() as usize]
    }

    /// Busiest weekday; on a tie the later day in the week wins
    pub fn most_productive(&self) -> (Weekday, usize) {
        WEEK.iter()
            .map(|&day| (day, self.count(day)))
            .fold((Weekday::Mon, 0), |best, cur| if cur.1 >= best.1 { cur } else { best })
    }

    pub fn entries(&self) -> impl Iterator<Item = (Weekday, usize)> + '_ {
        WEEK.iter().map(move |&day| (day, self.count(day)))
    }
}

/// Full English weekday name ("Monday")
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Fixed hour-of-day buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    /// 06:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// everything else
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening, TimeOfDay::Night];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "6 AM - 12 PM",
            TimeOfDay::Afternoon => "12 PM - 5 PM",
            TimeOfDay::Evening => "5 PM - 10 PM",
            TimeOfDay::Night => "10 PM - 6 AM",
        }
    }

    fn index(&self) -> usize {
        match self {
            TimeOfDay::Morning => 0,
            TimeOfDay::Afternoon => 1,
            TimeOfDay::Evening => 2,
            TimeOfDay::Night => 3,
        }
    }
}

/// Completions per time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDayStats {
    pub counts: [usize; 4],
}

impl TimeOfDayStats {
    pub fn count(&self, bucket: TimeOfDay) -> usize {
        self.counts[bucket.index()]
    }

    /// Busiest bucket; on a tie the later bucket wins
    pub fn most_productive(&self) -> (TimeOfDay, usize) {
        TimeOfDay::ALL
            .iter()
            .map(|&b| (b, self.count(b)))
            .fold((TimeOfDay::Morning, 0), |best, cur| if cur.1 >= best.1 { cur } else { best })
    }
}

pub fn productivity_by_weekday<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> WeekdayStats {
    let mut stats = WeekdayStats::default();
    for at in tasks.iter().filter_map(|t| completed_at(t, tz)) {
        stats.counts[at.weekday().num_days_from_monday() as usize] += 1;
    }
    stats
}

pub fn productivity_by_time<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> TimeOfDayStats {
    let mut stats = TimeOfDayStats::default();
    for at in tasks.iter().filter_map(|t| completed_at(t, tz)) {
        stats.counts[TimeOfDay::from_hour(at.hour()).index()] += 1;
    }
    stats
}

/// Mean days from creation to completion over done tasks, rounded.
/// Partial days count as a whole day.
pub fn average_completion_days(tasks: &[Task]) -> u32 {
    let spans: Vec<i64> = tasks
        .iter()
        .filter(|t| t.is_done())
        .filter_map(|t| Some((t.updated_at? - t.created_at?).num_milliseconds()))
        .map(|ms| (ms as f64 / 86_400_000.0).ceil() as i64)
        .collect();

    if spans.is_empty() {
        return 0;
    }
    let total: i64 = spans.iter().sum();
    (total as f64 / spans.len() as f64).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use chrono::{DateTime, Duration, Utc};

    fn done_at(id: &str, at: DateTime<Utc>) -> Task {
        let mut t = Task::new(id, "done");
        t.status = Status::Done;
        t.updated_at = Some(at);
        t
    }

    #[test]
    fn test_weekday_tally() {
        // 2024-05-13 is a Monday
        let tasks = vec![
            done_at("1", Utc.with_ymd_and_hms(2024, 5, 13, 9, 0, 0).unwrap()),
            done_at("2", Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap()),
            done_at("3", Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap()),
        ];
        let stats = productivity_by_weekday(&tasks, &Utc);
        assert_eq!(stats.count(Weekday::Mon), 2);
        assert_eq!(stats.count(Weekday::Fri), 1);
        assert_eq!(stats.most_productive(), (Weekday::Mon, 2));
        assert_eq!(weekday_name(stats.most_productive().0), "Monday");
    }

    #[test]
    fn test_ties_pick_later_entry() {
        assert_eq!(WeekdayStats::default().most_productive(), (Weekday::Sun, 0));
        assert_eq!(TimeOfDayStats::default().most_productive(), (TimeOfDay::Night, 0));

        let stats = TimeOfDayStats { counts: [2, 0, 2, 1] };
        assert_eq!(stats.most_productive(), (TimeOfDay::Evening, 2));
    }

    #[test]
    fn test_time_buckets() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);

        let day = |h| Utc.with_ymd_and_hms(2024, 5, 13, h, 30, 0).unwrap();
        let tasks = vec![done_at("1", day(7)), done_at("2", day(8)), done_at("3", day(23))];
        let stats = productivity_by_time(&tasks, &Utc);
        assert_eq!(stats.count(TimeOfDay::Morning), 2);
        assert_eq!(stats.count(TimeOfDay::Night), 1);
        assert_eq!(stats.most_productive().0.label(), "6 AM - 12 PM");
    }

    #[test]
    fn test_average_completion_days() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut quick = done_at("1", created + Duration::hours(5));
        quick.created_at = Some(created);
        let mut slow = done_at("2", created + Duration::days(4));
        slow.created_at = Some(created);
        let mut open = Task::new("3", "open");
        open.created_at = Some(created);

        // ceil(5h) = 1 day, 4 days -> mean 2.5 rounds to 3
        assert_eq!(average_completion_days(&[quick, slow, open]), 3);
        assert_eq!(average_completion_days(&[]), 0);
    }
}
