//! Time Source and Id Generation
//!
//! The store never reads the system clock directly; it asks a [`Clock`], so
//! tests can pin "now".

use std::cell::Cell;

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day used by date filters
    fn today(&self) -> NaiveDate;
}

/// Wall clock; "today" is the local calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned clock for tests; "today" is the UTC day of `now`
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Timestamp-based ids, bumped by one millisecond on collision so ids stay
/// unique when several records are created within the same tick.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Cell<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last.get() + 1);
        self.last.set(millis);
        millis.to_string()
    }

    pub fn next_prefixed(&self, prefix: &str, now: DateTime<Utc>) -> String {
        format!("{}-{}", prefix, self.next_id(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let ids = IdGenerator::new();
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        assert_ne!(a, b);
        assert_eq!(b.parse::<i64>().unwrap(), a.parse::<i64>().unwrap() + 1);
        assert!(ids.next_prefixed("proj", now).starts_with("proj-"));
    }

    #[test]
    fn test_fixed_clock_today_is_utc_day() {
        let late = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 31, 23, 0, 0).unwrap());
        assert_eq!(late.today(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let early = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 1, 0, 0).unwrap());
        assert_eq!(early.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
