use chrono::{Duration, NaiveDate};

/// First day of the trailing window ending at `today`.
pub fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}
