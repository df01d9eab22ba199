use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use organizee_data::{Actor, Delete, ExpenseEntry, IncomeEntry, Insert, Retrieve, Update};
use organizee_db::Connection;

use crate::{
    auth::require_treasurer,
    validate::FieldErrors,
    views::{Applied, View},
    ServiceError,
    ServiceResult,
};

const INCOME_VIEWS: &[View] = &[View::Income, View::Wallet, View::Dashboard];
const EXPENSE_VIEWS: &[View] = &[View::Expenses, View::Wallet, View::Dashboard];

/// Cash book form input, shared by income and expense entries
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CashEntryInput {
    pub description: String,
    pub amount: i64,
    pub date: String,
}

fn checked_entry_input(input: &CashEntryInput) -> ServiceResult<NaiveDate> {
    let mut errors = FieldErrors::new();
    errors.require("description", &input.description, "Description is required.");
    errors.amount("amount", input.amount);
    let date = errors.date("date", &input.date);
    errors.check()?;
    Ok(date.unwrap_or_default())
}

/// Record a miscellaneous income entry
pub async fn add_income(
    db: &Connection,
    actor: &Actor,
    input: CashEntryInput,
) -> ServiceResult<Applied<IncomeEntry>> {
    let date = checked_entry_input(&input)?;
    require_treasurer(actor)?;

    let entry = IncomeEntry {
        description: input.description,
        amount: input.amount,
        date,
        ..Default::default()
    };
    let entry = db.insert(entry).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, INCOME_VIEWS))
}

/// Correct an income entry in place
pub async fn update_income(
    db: &Connection,
    actor: &Actor,
    entry_id: i64,
    input: CashEntryInput,
) -> ServiceResult<Applied<IncomeEntry>> {
    let date = checked_entry_input(&input)?;
    require_treasurer(actor)?;

    let mut entry: IncomeEntry = db
        .retrieve(entry_id)
        .await
        .map_err(ServiceError::from_store)?;
    entry.description = input.description;
    entry.amount = input.amount;
    entry.date = date;

    let entry = db.update(entry).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, INCOME_VIEWS))
}

/// Drop an income entry from the cash book
pub async fn delete_income(
    db: &Connection,
    actor: &Actor,
    entry_id: i64,
) -> ServiceResult<Applied<IncomeEntry>> {
    require_treasurer(actor)?;

    let entry: IncomeEntry = db
        .retrieve(entry_id)
        .await
        .map_err(ServiceError::from_store)?;
    db.delete(entry.clone())
        .await
        .map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, INCOME_VIEWS))
}

/// Record an expense entry
pub async fn add_expense(
    db: &Connection,
    actor: &Actor,
    input: CashEntryInput,
) -> ServiceResult<Applied<ExpenseEntry>> {
    let date = checked_entry_input(&input)?;
    require_treasurer(actor)?;

    let entry = ExpenseEntry {
        description: input.description,
        amount: input.amount,
        date,
        ..Default::default()
    };
    let entry = db.insert(entry).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, EXPENSE_VIEWS))
}

/// Correct an expense entry in place
pub async fn update_expense(
    db: &Connection,
    actor: &Actor,
    entry_id: i64,
    input: CashEntryInput,
) -> ServiceResult<Applied<ExpenseEntry>> {
    let date = checked_entry_input(&input)?;
    require_treasurer(actor)?;

    let mut entry: ExpenseEntry = db
        .retrieve(entry_id)
        .await
        .map_err(ServiceError::from_store)?;
    entry.description = input.description;
    entry.amount = input.amount;
    entry.date = date;

    let entry = db.update(entry).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, EXPENSE_VIEWS))
}

/// Drop an expense entry from the cash book
pub async fn delete_expense(
    db: &Connection,
    actor: &Actor,
    entry_id: i64,
) -> ServiceResult<Applied<ExpenseEntry>> {
    require_treasurer(actor)?;

    let entry: ExpenseEntry = db
        .retrieve(entry_id)
        .await
        .map_err(ServiceError::from_store)?;
    db.delete(entry.clone())
        .await
        .map_err(ServiceError::from_store)?;
    Ok(Applied::new(entry, EXPENSE_VIEWS))
}
