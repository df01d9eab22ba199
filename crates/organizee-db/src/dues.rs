use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    DuesRosterFilter,
    DuesRosterRow,
    MonthlyDuesFilter,
    MonthlyDuesPayment,
    Query,
    Retrieve,
    SumAmount,
    Upsert,
};

use crate::{
    results::{Id, QueryError, Total},
    Connection,
};

#[async_trait]
impl Query<MonthlyDuesPayment> for Connection {
    type Filter = MonthlyDuesFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<MonthlyDuesPayment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                user_id AS member_id,
                amount,
                payment_date,
                month,
                year
            FROM iuran_bulanan
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id.clone() {
            qry.push(" AND user_id = ").push_bind(member_id);
        }
        if let Some(month) = filter.month {
            qry.push(" AND month = ").push_bind(month);
        }
        if let Some(year) = filter.year {
            qry.push(" AND year = ").push_bind(year);
        }
        if let Some(paid_after) = filter.paid_after {
            qry.push(" AND payment_date >= ").push_bind(paid_after);
        }
        qry.push(" ORDER BY payment_date DESC ");

        let payments: Vec<MonthlyDuesPayment> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<MonthlyDuesPayment> for Connection {
    type Key = i64;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<MonthlyDuesPayment> {
        let filter = MonthlyDuesFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Upsert<MonthlyDuesPayment> for Connection {
    /// Insert the payment or overwrite amount and date of the
    /// existing row. The unique key is (member, month, year).
    async fn upsert(&self, payment: MonthlyDuesPayment) -> Result<MonthlyDuesPayment> {
        let insert: Id<i64> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO iuran_bulanan (
                    user_id,
                    amount,
                    payment_date,
                    month,
                    year
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.payment_date)
                .push_bind(payment.month)
                .push_bind(payment.year);

            qry.push(
                r#") ON CONFLICT(user_id, month, year) DO UPDATE SET
                    amount = excluded.amount,
                    payment_date = excluded.payment_date
                RETURNING id
                "#,
            )
            .build_query_as()
            .fetch_one(&mut *conn)
            .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl SumAmount<MonthlyDuesPayment> for Connection {
    async fn sum_amount(&self, year: Option<i32>) -> Result<i64> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            "SELECT COALESCE(SUM(amount), 0) AS total FROM iuran_bulanan WHERE 1",
        );
        if let Some(year) = year {
            qry.push(" AND CAST(strftime('%Y', payment_date) AS INTEGER) = ")
                .push_bind(year);
        }
        let total: Total = qry.build_query_as().fetch_one(&mut *conn).await?;
        Ok(total.total)
    }
}

#[async_trait]
impl Query<DuesRosterRow> for Connection {
    type Filter = DuesRosterFilter;
    /// Every member joined against their dues payment for one
    /// period. The period lives in the join condition, so members
    /// who have not paid still appear with null amount and date.
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<DuesRosterRow>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                u.id AS member_id,
                u.name,
                u.email,
                u.role,
                u.avatar,
                p.amount,
                p.payment_date
            FROM users u
            LEFT JOIN iuran_bulanan p
                ON p.user_id = u.id
                AND p.month =
            "#,
        );
        qry.push_bind(filter.month);
        qry.push(" AND p.year = ").push_bind(filter.year);
        qry.push(" WHERE 1 ");

        if let Some(member_id) = filter.member_id.clone() {
            qry.push(" AND u.id = ").push_bind(member_id);
        }
        qry.push(" ORDER BY u.name ");

        let roster: Vec<DuesRosterRow> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(roster)
    }
}
