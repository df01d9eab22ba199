use serde::{Deserialize, Serialize};

use organizee_data::{
    Actor,
    Member,
    MonthlyDuesPayment,
    OneTimeFeePayment,
    Retrieve,
    Settings,
    Upsert,
};
use organizee_db::Connection;

use crate::{
    auth::require_treasurer,
    validate::FieldErrors,
    views::{Applied, View},
    ServiceError,
    ServiceResult,
};

const ONE_TIME_FEE_VIEWS: &[View] = &[View::OneTimeFee, View::Wallet, View::Dashboard];
const MONTHLY_DUES_VIEWS: &[View] = &[View::MonthlyDues, View::Wallet, View::Dashboard];

/// Dues form input for one member and period
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DuesInput {
    pub member_id: String,
    pub payment_date: String,
    pub month: u32,
    pub year: i32,
    pub amount: i64,
}

/// Mark a member's one time joining fee as paid on a date. The
/// amount is always the configured fee, and repeating the call
/// rewrites the same single row.
pub async fn record_one_time_fee(
    db: &Connection,
    settings: &Settings,
    actor: &Actor,
    member_id: &str,
    payment_date: &str,
) -> ServiceResult<Applied<OneTimeFeePayment>> {
    let mut errors = FieldErrors::new();
    let date = errors.date("payment_date", payment_date);
    errors.check()?;

    require_treasurer(actor)?;

    let member: Member = db
        .retrieve(member_id.to_string())
        .await
        .map_err(ServiceError::from_store)?;

    let payment = OneTimeFeePayment {
        member_id: member.id,
        amount: settings.one_time_fee_amount,
        payment_date: date.unwrap_or_default(),
        ..Default::default()
    };
    let payment = db.upsert(payment).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(payment, ONE_TIME_FEE_VIEWS))
}

/// Record a member's dues for one month. Last write wins for the
/// same member and period.
pub async fn record_monthly_dues(
    db: &Connection,
    actor: &Actor,
    input: DuesInput,
) -> ServiceResult<Applied<MonthlyDuesPayment>> {
    let mut errors = FieldErrors::new();
    let date = errors.date("payment_date", &input.payment_date);
    errors.month("month", input.month);
    errors.amount("amount", input.amount);
    errors.check()?;

    require_treasurer(actor)?;

    let member: Member = db
        .retrieve(input.member_id.clone())
        .await
        .map_err(ServiceError::from_store)?;

    let payment = MonthlyDuesPayment {
        member_id: member.id,
        amount: input.amount,
        payment_date: date.unwrap_or_default(),
        month: input.month,
        year: input.year,
        ..Default::default()
    };
    let payment = db.upsert(payment).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(payment, MONTHLY_DUES_VIEWS))
}
