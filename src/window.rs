//! Search window computation from the configured period.

use crate::config::SearchPeriod;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

/// Inclusive `[start, end]` range of note modification times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SearchWindow {
    /// Build the window anchored on today's date.
    pub fn from_period(period: &SearchPeriod) -> Self {
        Self::from_period_at(period, Local::now().date_naive())
    }

    /// Build the window anchored on an explicit date.
    ///
    /// Invalid configuration values are replaced by defaults (one day,
    /// `00:00` to `23:59`) with a logged warning; construction never fails.
    pub fn from_period_at(period: &SearchPeriod, today: NaiveDate) -> Self {
        let days = if period.days < 1 {
            warn!("invalid search_period.days {}; using 1", period.days);
            1
        } else {
            period.days
        };

        let start_time = parse_time(&period.start_time, NaiveTime::MIN);
        let end_time = parse_time(&period.end_time, default_end_time());

        let end = today.and_time(end_time);
        let start = (today - Duration::days(days - 1)).and_time(start_time);

        if start > end {
            warn!(
                "search window start {} is after end {}; using default times",
                start, end
            );
            return Self {
                start: (today - Duration::days(days - 1)).and_time(NaiveTime::MIN),
                end: today.and_time(default_end_time()),
            };
        }

        Self { start, end }
    }

    /// Whether a timestamp falls in the window, inclusive on both ends.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap()
}

fn parse_time(value: &str, default: NaiveTime) -> NaiveTime {
    match NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(t) => t,
        Err(e) => {
            warn!("invalid time {:?}: {}; using {}", value, e, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(days: i64, start: &str, end: &str) -> SearchPeriod {
        SearchPeriod {
            days,
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_window() {
        let window = SearchWindow::from_period_at(&period(1, "00:00", "23:59"), day(2026, 8, 6));
        assert_eq!(window.start, day(2026, 8, 6).and_time(NaiveTime::MIN));
        assert_eq!(
            window.end,
            day(2026, 8, 6).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
        );
        assert!(window.is_single_day());
    }

    #[test]
    fn test_multi_day_window_starts_in_the_past() {
        let window = SearchWindow::from_period_at(&period(3, "06:30", "18:00"), day(2026, 8, 6));
        assert_eq!(
            window.start,
            day(2026, 8, 4).and_time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())
        );
        assert_eq!(
            window.end,
            day(2026, 8, 6).and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap())
        );
        assert!(!window.is_single_day());
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_invalid_days_falls_back_to_one() {
        let window = SearchWindow::from_period_at(&period(0, "00:00", "23:59"), day(2026, 8, 6));
        assert_eq!(window.start.date(), day(2026, 8, 6));

        let window = SearchWindow::from_period_at(&period(-4, "00:00", "23:59"), day(2026, 8, 6));
        assert_eq!(window.start.date(), day(2026, 8, 6));
    }

    #[test]
    fn test_invalid_times_fall_back_to_defaults() {
        let window = SearchWindow::from_period_at(&period(1, "nonsense", "25:99"), day(2026, 8, 6));
        assert_eq!(window.start.time(), NaiveTime::MIN);
        assert_eq!(
            window.end.time(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_inverted_times_fall_back_to_defaults() {
        let window = SearchWindow::from_period_at(&period(1, "23:00", "01:00"), day(2026, 8, 6));
        assert_eq!(window.start.time(), NaiveTime::MIN);
        assert_eq!(
            window.end.time(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_contains_is_inclusive_at_both_ends() {
        let window = SearchWindow::from_period_at(&period(1, "08:00", "17:00"), day(2026, 8, 6));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::seconds(1)));
        assert!(!window.contains(window.end + Duration::seconds(1)));
    }
}
