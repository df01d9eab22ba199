use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IncomeFilter {
    pub id: Option<i64>,
    pub after: Option<NaiveDate>,
}

/// Miscellaneous income not tied to any member.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: i64,
    pub description: String,
    pub amount: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub id: Option<i64>,
    pub after: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub description: String,
    pub amount: i64,
    pub date: NaiveDate,
}
