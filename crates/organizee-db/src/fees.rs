use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    FeeRosterFilter,
    FeeRosterRow,
    OneTimeFeeFilter,
    OneTimeFeePayment,
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
impl Query<OneTimeFeePayment> for Connection {
    type Filter = OneTimeFeeFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<OneTimeFeePayment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                user_id AS member_id,
                amount,
                payment_date
            FROM uang_pangkal
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id.clone() {
            qry.push(" AND user_id = ").push_bind(member_id);
        }
        if let Some(paid_after) = filter.paid_after {
            qry.push(" AND payment_date >= ").push_bind(paid_after);
        }
        qry.push(" ORDER BY payment_date DESC ");

        let payments: Vec<OneTimeFeePayment> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<OneTimeFeePayment> for Connection {
    type Key = i64;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<OneTimeFeePayment> {
        let filter = OneTimeFeeFilter {
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
impl Upsert<OneTimeFeePayment> for Connection {
    /// Insert the payment or overwrite amount and date of the
    /// member's existing row. The unique key is the member.
    async fn upsert(&self, payment: OneTimeFeePayment) -> Result<OneTimeFeePayment> {
        let insert: Id<i64> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO uang_pangkal (
                    user_id,
                    amount,
                    payment_date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.payment_date);

            qry.push(
                r#") ON CONFLICT(user_id) DO UPDATE SET
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
impl SumAmount<OneTimeFeePayment> for Connection {
    async fn sum_amount(&self, year: Option<i32>) -> Result<i64> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            "SELECT COALESCE(SUM(amount), 0) AS total FROM uang_pangkal WHERE 1",
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
impl Query<FeeRosterRow> for Connection {
    type Filter = FeeRosterFilter;
    /// Every member joined against their fee payment.
    /// Members without a payment row appear with null amount and date.
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<FeeRosterRow>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
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
            LEFT JOIN uang_pangkal p ON p.user_id = u.id
            WHERE 1
            "#,
        );

        if let Some(member_id) = filter.member_id.clone() {
            qry.push(" AND u.id = ").push_bind(member_id);
        }
        qry.push(" ORDER BY u.name ");

        let roster: Vec<FeeRosterRow> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(roster)
    }
}
