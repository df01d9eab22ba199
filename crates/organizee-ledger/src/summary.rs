use anyhow::Result;
use serde::{Deserialize, Serialize};

use organizee_data::{
    ExpenseEntry,
    IncomeEntry,
    MonthlyDuesPayment,
    OneTimeFeePayment,
    SumAmount,
};

/// All-time totals over the whole ledger. The three income
/// figures always add up to the income total.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub one_time_fee_total: i64,
    pub monthly_dues_total: i64,
    pub other_income_total: i64,
    pub income_total: i64,
    pub expense_total: i64,
    pub balance: i64,
}

/// Dashboard figures. Income and expense are scoped to one
/// calendar year, the balance is always all-time. A running
/// balance never resets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub balance: i64,
    pub income_total: i64,
    pub expense_total: i64,
}

pub async fn financial_summary<DB>(db: &DB) -> Result<FinancialSummary>
where
    DB: SumAmount<OneTimeFeePayment>
        + SumAmount<MonthlyDuesPayment>
        + SumAmount<IncomeEntry>
        + SumAmount<ExpenseEntry>
        + Sync,
{
    let one_time_fee_total = SumAmount::<OneTimeFeePayment>::sum_amount(db, None).await?;
    let monthly_dues_total = SumAmount::<MonthlyDuesPayment>::sum_amount(db, None).await?;
    let other_income_total = SumAmount::<IncomeEntry>::sum_amount(db, None).await?;
    let expense_total = SumAmount::<ExpenseEntry>::sum_amount(db, None).await?;

    let income_total = one_time_fee_total + monthly_dues_total + other_income_total;

    Ok(FinancialSummary {
        one_time_fee_total,
        monthly_dues_total,
        other_income_total,
        income_total,
        expense_total,
        balance: income_total - expense_total,
    })
}

pub async fn dashboard_summary<DB>(db: &DB, year: i32) -> Result<DashboardSummary>
where
    DB: SumAmount<OneTimeFeePayment>
        + SumAmount<MonthlyDuesPayment>
        + SumAmount<IncomeEntry>
        + SumAmount<ExpenseEntry>
        + Sync,
{
    let all_time = financial_summary(db).await?;

    let income_total = SumAmount::<OneTimeFeePayment>::sum_amount(db, Some(year)).await?
        + SumAmount::<MonthlyDuesPayment>::sum_amount(db, Some(year)).await?
        + SumAmount::<IncomeEntry>::sum_amount(db, Some(year)).await?;
    let expense_total = SumAmount::<ExpenseEntry>::sum_amount(db, Some(year)).await?;

    Ok(DashboardSummary {
        balance: all_time.balance,
        income_total,
        expense_total,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use organizee_data::{Insert, Member, Upsert};
    use organizee_db::Connection;

    async fn test_member(db: &Connection, id: &str, name: &str) -> Member {
        db.insert(Member {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            ..Member::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_financial_summary_empty() {
        let db = Connection::open_test().await;
        let summary = financial_summary(&db).await.unwrap();
        assert_eq!(summary, FinancialSummary::default());
    }

    #[tokio::test]
    async fn test_financial_summary_balance() {
        let db = Connection::open_test().await;

        db.insert(IncomeEntry {
            description: "Donation".to_string(),
            amount: 250000,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            ..Default::default()
        }).await.unwrap();
        db.insert(ExpenseEntry {
            description: "Projector repair".to_string(),
            amount: 200000,
            date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            ..Default::default()
        }).await.unwrap();

        let summary = financial_summary(&db).await.unwrap();
        assert_eq!(summary.income_total, 250000);
        assert_eq!(summary.expense_total, 200000);
        assert_eq!(summary.balance, 50000);
    }

    #[tokio::test]
    async fn test_income_subtotals_add_up() {
        let db = Connection::open_test().await;
        test_member(&db, "m-1", "Budi Doremi").await;
        test_member(&db, "m-2", "Citra Kirana").await;

        db.upsert(OneTimeFeePayment {
            member_id: "m-1".to_string(),
            amount: 50000,
            payment_date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            ..Default::default()
        }).await.unwrap();
        db.upsert(MonthlyDuesPayment {
            member_id: "m-2".to_string(),
            amount: 20000,
            payment_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            month: 3,
            year: 2024,
            ..Default::default()
        }).await.unwrap();
        db.insert(IncomeEntry {
            description: "Sisa dana dari acara tahun lalu".to_string(),
            amount: 150000,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            ..Default::default()
        }).await.unwrap();

        let summary = financial_summary(&db).await.unwrap();
        assert_eq!(summary.one_time_fee_total, 50000);
        assert_eq!(summary.monthly_dues_total, 20000);
        assert_eq!(summary.other_income_total, 150000);
        assert_eq!(
            summary.income_total,
            summary.one_time_fee_total
                + summary.monthly_dues_total
                + summary.other_income_total,
        );
        assert_eq!(summary.balance, summary.income_total);
    }

    #[tokio::test]
    async fn test_dashboard_summary_scoping() {
        let db = Connection::open_test().await;
        test_member(&db, "m-1", "Budi Doremi").await;

        // Last year
        db.upsert(OneTimeFeePayment {
            member_id: "m-1".to_string(),
            amount: 50000,
            payment_date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            ..Default::default()
        }).await.unwrap();
        db.insert(ExpenseEntry {
            description: "ATK".to_string(),
            amount: 75000,
            date: NaiveDate::from_ymd_opt(2023, 2, 10).unwrap(),
            ..Default::default()
        }).await.unwrap();

        // This year
        db.insert(IncomeEntry {
            description: "Donasi".to_string(),
            amount: 150000,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            ..Default::default()
        }).await.unwrap();
        db.insert(ExpenseEntry {
            description: "Konsumsi rapat".to_string(),
            amount: 125000,
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            ..Default::default()
        }).await.unwrap();

        let summary = dashboard_summary(&db, 2024).await.unwrap();
        // Year figures exclude last year's rows
        assert_eq!(summary.income_total, 150000);
        assert_eq!(summary.expense_total, 125000);
        // The balance stays all-time
        assert_eq!(summary.balance, 50000 + 150000 - 75000 - 125000);
    }
}
