//! Date windows for filtering transactions by calendar date

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date bounds; a missing side is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// The last `days` days up to and including `today`
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today.checked_sub_days(Days::new(u64::from(days))),
            end: Some(today),
        }
    }

    /// Check if a date is within the window
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match (self.start, self.end) {
            (None, None) => true,
            (Some(s), None) => *date >= s,
            (None, Some(e)) => *date <= e,
            (Some(s), Some(e)) => *date >= s && *date <= e,
        }
    }

    /// Get a human-readable description of the window
    pub fn description(&self) -> String {
        match (self.start, self.end) {
            (None, None) => "All Time".to_string(),
            (Some(s), None) => format!("Since {}", s),
            (None, Some(e)) => format!("Until {}", e),
            (Some(s), Some(e)) => format!("{} to {}", s, e),
        }
    }
}

/// Whether two instants fall in the same calendar month and year (UTC)
pub fn same_month(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_contains_inclusive() {
        let window = DateWindow::new(Some(date(2024, 1, 6)), Some(date(2024, 1, 31)));
        assert!(window.contains(&date(2024, 1, 6)));
        assert!(window.contains(&date(2024, 1, 31)));
        assert!(!window.contains(&date(2024, 1, 5)));
        assert!(!window.contains(&date(2024, 2, 1)));
    }

    #[test]
    fn test_window_open_sides() {
        let from_only = DateWindow::new(Some(date(2024, 1, 1)), None);
        assert!(from_only.contains(&date(2030, 1, 1)));
        assert!(!from_only.contains(&date(2023, 12, 31)));

        let to_only = DateWindow::new(None, Some(date(2024, 1, 1)));
        assert!(to_only.contains(&date(1999, 1, 1)));
        assert!(!to_only.contains(&date(2024, 1, 2)));

        assert!(DateWindow::default().contains(&date(2024, 6, 15)));
    }

    #[test]
    fn test_last_days() {
        let window = DateWindow::last_days(date(2024, 3, 1), 30);
        assert_eq!(window.start, Some(date(2024, 1, 31)));
        assert_eq!(window.end, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_description() {
        assert_eq!(DateWindow::default().description(), "All Time");
        let window = DateWindow::new(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)));
        assert_eq!(window.description(), "2024-01-01 to 2024-12-31");
    }

    #[test]
    fn test_same_month() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let c = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert!(same_month(&a, &b));
        assert!(!same_month(&a, &c));
    }
}
