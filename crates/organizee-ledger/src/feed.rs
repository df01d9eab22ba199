use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use organizee_data::{
    ExpenseEntry,
    ExpenseFilter,
    IncomeEntry,
    IncomeFilter,
    Member,
    MemberFilter,
    MonthlyDuesFilter,
    MonthlyDuesPayment,
    OneTimeFeeFilter,
    OneTimeFeePayment,
    Query,
};

use crate::datetime::window_start;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Which side of the ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "pemasukan")]
    Income,
    #[serde(rename = "pengeluaran")]
    Expense,
}

/// One line of merged ledger activity. Payment rows carry a
/// synthetic description naming the paying member, so their
/// origin stays distinct from freeform entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub description: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub kind: EntryKind,
}

impl From<IncomeEntry> for CashFlowEntry {
    fn from(entry: IncomeEntry) -> Self {
        Self {
            description: entry.description,
            amount: entry.amount,
            date: entry.date,
            kind: EntryKind::Income,
        }
    }
}

impl From<ExpenseEntry> for CashFlowEntry {
    fn from(entry: ExpenseEntry) -> Self {
        Self {
            description: entry.description,
            amount: entry.amount,
            date: entry.date,
            kind: EntryKind::Expense,
        }
    }
}

async fn member_names<DB>(db: &DB) -> Result<HashMap<String, String>>
where
    DB: Query<Member, Filter = MemberFilter> + Sync,
{
    let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
    Ok(members.into_iter().map(|m| (m.id, m.name)).collect())
}

fn fee_entry(payment: OneTimeFeePayment, names: &HashMap<String, String>) -> CashFlowEntry {
    let name = names
        .get(&payment.member_id)
        .map(String::as_str)
        .unwrap_or(payment.member_id.as_str());
    CashFlowEntry {
        description: format!("Uang Pangkal - {}", name),
        amount: payment.amount,
        date: payment.payment_date,
        kind: EntryKind::Income,
    }
}

fn dues_entry(payment: MonthlyDuesPayment, names: &HashMap<String, String>) -> CashFlowEntry {
    let name = names
        .get(&payment.member_id)
        .map(String::as_str)
        .unwrap_or(payment.member_id.as_str());
    CashFlowEntry {
        description: format!("Iuran Bulanan {} - {}", payment.period_label(), name),
        amount: payment.amount,
        date: payment.payment_date,
        kind: EntryKind::Income,
    }
}

/// All income in one sequence, newest first: joining fee
/// payments relabelled per member, merged with the freeform
/// income entries.
pub async fn unified_income_feed<DB>(db: &DB) -> Result<Vec<CashFlowEntry>>
where
    DB: Query<OneTimeFeePayment, Filter = OneTimeFeeFilter>
        + Query<IncomeEntry, Filter = IncomeFilter>
        + Query<Member, Filter = MemberFilter>
        + Sync,
{
    let names = member_names(db).await?;
    let fees: Vec<OneTimeFeePayment> = db.query(&OneTimeFeeFilter::default()).await?;
    let income: Vec<IncomeEntry> = db.query(&IncomeFilter::default()).await?;

    let mut entries: Vec<CashFlowEntry> = fees
        .into_iter()
        .map(|payment| fee_entry(payment, &names))
        .collect();
    entries.extend(income.into_iter().map(CashFlowEntry::from));
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}

/// Ledger activity from all sources inside a trailing window,
/// newest first.
pub async fn recent_transactions<DB>(
    db: &DB,
    today: NaiveDate,
    window_days: i64,
) -> Result<Vec<CashFlowEntry>>
where
    DB: Query<OneTimeFeePayment, Filter = OneTimeFeeFilter>
        + Query<MonthlyDuesPayment, Filter = MonthlyDuesFilter>
        + Query<IncomeEntry, Filter = IncomeFilter>
        + Query<ExpenseEntry, Filter = ExpenseFilter>
        + Query<Member, Filter = MemberFilter>
        + Sync,
{
    let start = window_start(today, window_days);
    let names = member_names(db).await?;

    let fees: Vec<OneTimeFeePayment> = db.query(&OneTimeFeeFilter {
        paid_after: Some(start),
        ..Default::default()
    }).await?;
    let dues: Vec<MonthlyDuesPayment> = db.query(&MonthlyDuesFilter {
        paid_after: Some(start),
        ..Default::default()
    }).await?;
    let income: Vec<IncomeEntry> = db.query(&IncomeFilter {
        after: Some(start),
        ..Default::default()
    }).await?;
    let expenses: Vec<ExpenseEntry> = db.query(&ExpenseFilter {
        after: Some(start),
        ..Default::default()
    }).await?;

    let mut entries: Vec<CashFlowEntry> = fees
        .into_iter()
        .map(|payment| fee_entry(payment, &names))
        .collect();
    entries.extend(dues.into_iter().map(|payment| dues_entry(payment, &names)));
    entries.extend(income.into_iter().map(CashFlowEntry::from));
    entries.extend(expenses.into_iter().map(CashFlowEntry::from));
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}
