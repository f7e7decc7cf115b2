//! Calendar Date Helpers
//!
//! Due dates are plain calendar days. "Today" is always passed in by the
//! caller so every helper stays deterministic.

use chrono::{Datelike, Days, NaiveDate};

/// Sunday of the week containing `day`
pub fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_sunday() as u64;
    day - Days::new(offset)
}

pub fn is_today(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due == Some(today)
}

/// Due within the Sunday..Saturday week containing `today`, inclusive
pub fn is_this_week(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    let Some(due) = due else { return false };
    let start = week_start(today);
    let end = start + Days::new(6);
    due >= start && due <= end
}

/// Add months the way a JS `Date.setMonth` does: the day of month is kept
/// and spills into the following month when it does not exist, so
/// `2024-01-31 + 1 month` is `2024-03-02`.
pub fn add_months_overflowing(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(date.day() as u64 - 1))
}

/// First and last day of the month containing `day`
pub fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let next_first = add_months_overflowing(first, 1)?;
    Some((first, next_first.pred_opt()?))
}

/// "Mar 5, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-05-15 is a Wednesday
        assert_eq!(week_start(d(2024, 5, 15)), d(2024, 5, 12));
        assert_eq!(week_start(d(2024, 5, 12)), d(2024, 5, 12));
        assert_eq!(week_start(d(2024, 5, 18)), d(2024, 5, 12));
    }

    #[test]
    fn test_is_this_week() {
        let today = d(2024, 5, 15);
        assert!(is_this_week(Some(d(2024, 5, 12)), today));
        assert!(is_this_week(Some(d(2024, 5, 18)), today));
        assert!(!is_this_week(Some(d(2024, 5, 19)), today));
        assert!(!is_this_week(Some(d(2024, 5, 11)), today));
        assert!(!is_this_week(None, today));
    }

    #[test]
    fn test_is_today() {
        let today = d(2024, 5, 15);
        assert!(is_today(Some(today), today));
        assert!(!is_today(Some(d(2024, 5, 14)), today));
        assert!(!is_today(None, today));
    }

    #[test]
    fn test_month_overflow_matches_js_dates() {
        assert_eq!(add_months_overflowing(d(2024, 1, 31), 1), Some(d(2024, 3, 2)));
        assert_eq!(add_months_overflowing(d(2023, 1, 31), 1), Some(d(2023, 3, 3)));
        assert_eq!(add_months_overflowing(d(2024, 11, 15), 3), Some(d(2025, 2, 15)));
        assert_eq!(add_months_overflowing(d(2024, 3, 31), 1), Some(d(2024, 5, 1)));
    }

    #[test]
    fn test_month_bounds_and_format() {
        assert_eq!(month_bounds(d(2024, 2, 10)), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(format_date(d(2024, 3, 5)), "Mar 5, 2024");
    }
}
