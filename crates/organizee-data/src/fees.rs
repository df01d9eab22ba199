use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Role;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OneTimeFeeFilter {
    pub id: Option<i64>,
    pub member_id: Option<String>,
    pub paid_after: Option<NaiveDate>,
}

/// One time joining fee payment. At most one row exists per member.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct OneTimeFeePayment {
    pub id: i64,
    pub member_id: String,
    pub amount: i64,
    pub payment_date: NaiveDate,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FeeRosterFilter {
    pub member_id: Option<String>,
}

/// A member joined against their one time fee payment, if any.
/// Members without a payment row carry null amount and date.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct FeeRosterRow {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
}
