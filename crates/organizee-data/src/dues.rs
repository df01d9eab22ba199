use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Role;

/// Indonesian month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        12 => "Desember",
        _ => "",
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MonthlyDuesFilter {
    pub id: Option<i64>,
    pub member_id: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub paid_after: Option<NaiveDate>,
}

/// Monthly dues payment. One row per member, month and year.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct MonthlyDuesPayment {
    pub id: i64,
    pub member_id: String,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month: u32,
    pub year: i32,
}

impl MonthlyDuesPayment {

    /// Display label for the paid period, e.g. "Agustus 2024"
    pub fn period_label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DuesRosterFilter {
    pub month: u32,
    pub year: i32,
    pub member_id: Option<String>,
}

/// A member joined against their dues payment for one period.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct DuesRosterRow {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "Januari");
        assert_eq!(month_name(8), "Agustus");
        assert_eq!(month_name(12), "Desember");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_period_label() {
        let payment = MonthlyDuesPayment{
            month: 3,
            year: 2024,
            ..Default::default()
        };
        assert_eq!(payment.period_label(), "Maret 2024");
    }
}
