use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use organizee_data::{
    DuesRosterFilter,
    DuesRosterRow,
    FeeRosterFilter,
    FeeRosterRow,
    MonthlyDuesFilter,
    MonthlyDuesPayment,
    OneTimeFeeFilter,
    OneTimeFeePayment,
    PaymentStatus,
    Query,
    Role,
    Settings,
};

/// The joining fee counts as settled once the recorded amount
/// reaches the configured figure.
pub fn fee_paid(amount: Option<i64>, required: i64) -> PaymentStatus {
    match amount {
        Some(paid) if paid >= required => PaymentStatus::Paid,
        _ => PaymentStatus::Unpaid,
    }
}

/// Dues count as settled whenever a row exists for the period.
/// The amount is not compared against the configured dues figure,
/// only the joining fee check does that.
pub fn dues_paid(amount: Option<i64>) -> PaymentStatus {
    match amount {
        Some(_) => PaymentStatus::Paid,
        None => PaymentStatus::Unpaid,
    }
}

/// A single member's standing in one payment program.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberPaymentStatus {
    pub status: PaymentStatus,
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
}

/// A roster line: member identity plus payment standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterStatusRow {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    pub status: PaymentStatus,
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
}

pub async fn one_time_fee_status<DB>(
    db: &DB,
    settings: &Settings,
    member_id: &str,
) -> Result<MemberPaymentStatus>
where
    DB: Query<OneTimeFeePayment, Filter = OneTimeFeeFilter> + Sync,
{
    let mut payments = db.query(&OneTimeFeeFilter {
        member_id: Some(member_id.to_string()),
        ..Default::default()
    }).await?;
    let payment = payments.pop();

    let amount = payment.as_ref().map(|p| p.amount);
    Ok(MemberPaymentStatus {
        status: fee_paid(amount, settings.one_time_fee_amount),
        amount,
        payment_date: payment.map(|p| p.payment_date),
    })
}

pub async fn monthly_dues_status<DB>(
    db: &DB,
    member_id: &str,
    month: u32,
    year: i32,
) -> Result<MemberPaymentStatus>
where
    DB: Query<MonthlyDuesPayment, Filter = MonthlyDuesFilter> + Sync,
{
    let mut payments = db.query(&MonthlyDuesFilter {
        member_id: Some(member_id.to_string()),
        month: Some(month),
        year: Some(year),
        ..Default::default()
    }).await?;
    let payment = payments.pop();

    let amount = payment.as_ref().map(|p| p.amount);
    Ok(MemberPaymentStatus {
        status: dues_paid(amount),
        amount,
        payment_date: payment.map(|p| p.payment_date),
    })
}

/// Every member with their joining fee standing, alphabetical
/// by name. Members without a payment row appear as unpaid.
pub async fn fee_roster<DB>(db: &DB, settings: &Settings) -> Result<Vec<RosterStatusRow>>
where
    DB: Query<FeeRosterRow, Filter = FeeRosterFilter> + Sync,
{
    let rows: Vec<FeeRosterRow> = db.query(&FeeRosterFilter::default()).await?;
    Ok(rows
        .into_iter()
        .map(|row| RosterStatusRow {
            status: fee_paid(row.amount, settings.one_time_fee_amount),
            member_id: row.member_id,
            name: row.name,
            email: row.email,
            role: row.role,
            avatar: row.avatar,
            amount: row.amount,
            payment_date: row.payment_date,
        })
        .collect())
}

/// Every member with their dues standing for one period.
pub async fn dues_roster<DB>(db: &DB, month: u32, year: i32) -> Result<Vec<RosterStatusRow>>
where
    DB: Query<DuesRosterRow, Filter = DuesRosterFilter> + Sync,
{
    let rows: Vec<DuesRosterRow> = db.query(&DuesRosterFilter {
        month,
        year,
        ..Default::default()
    }).await?;
    Ok(rows
        .into_iter()
        .map(|row| RosterStatusRow {
            status: dues_paid(row.amount),
            member_id: row.member_id,
            name: row.name,
            email: row.email,
            role: row.role,
            avatar: row.avatar,
            amount: row.amount,
            payment_date: row.payment_date,
        })
        .collect())
}
