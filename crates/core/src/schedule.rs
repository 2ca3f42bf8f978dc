//! Schedule helpers: durations, times, progress.

use chrono::{NaiveDate, NaiveTime};

/// Placeholder stored in `schedules.time` when no time of day was given.
pub const NO_TIME: &str = "-";

/// Message for a malformed `HH:mm` time.
pub const INVALID_TIME_MESSAGE: &str = "올바른 시간 형식이 아닙니다 (HH:mm)";

/// Progress at which a schedule counts as completed.
pub const COMPLETE_PROGRESS: i64 = 100;

/// Whole days between start and end. Never negative.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// Whether `time` is a zero-padded 24-hour `HH:mm` value (or the `-`
/// placeholder).
pub fn is_valid_time(time: &str) -> bool {
    time == NO_TIME || (time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok())
}

/// Progress 100 marks a schedule completed.
pub fn is_complete(progress: i64) -> bool {
    progress >= COMPLETE_PROGRESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(duration_days(d("2024-03-01"), d("2024-03-01")), 0);
    }

    #[test]
    fn crosses_month_end() {
        assert_eq!(duration_days(d("2024-03-01"), d("2024-03-05")), 4);
        assert_eq!(duration_days(d("2024-02-28"), d("2024-03-01")), 2);
    }

    #[test]
    fn reversed_range_is_zero() {
        assert_eq!(duration_days(d("2024-03-05"), d("2024-03-01")), 0);
    }

    #[test]
    fn time_format() {
        assert!(is_valid_time("09:30"));
        assert!(is_valid_time("23:59"));
        assert!(is_valid_time("-"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("9:30"));
        assert!(!is_valid_time("09-30"));
        assert!(!is_valid_time("09:60"));
    }
}
