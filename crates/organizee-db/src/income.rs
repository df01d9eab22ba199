use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    Delete,
    IncomeEntry,
    IncomeFilter,
    Insert,
    Query,
    Retrieve,
    SumAmount,
    Update,
};

use crate::{
    results::{Id, QueryError, Total},
    Connection,
};

#[async_trait]
impl Query<IncomeEntry> for Connection {
    type Filter = IncomeFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<IncomeEntry>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                description,
                amount,
                date
            FROM pemasukan
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(after) = filter.after {
            qry.push(" AND date >= ").push_bind(after);
        }
        qry.push(" ORDER BY date DESC ");

        let entries: Vec<IncomeEntry> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(entries)
    }
}

#[async_trait]
impl Retrieve<IncomeEntry> for Connection {
    type Key = i64;
    async fn retrieve(&self, entry_id: Self::Key) -> Result<IncomeEntry> {
        let filter = IncomeFilter {
            id: Some(entry_id),
            ..Default::default()
        };
        let entry = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| QueryError::NotFound)?;
        Ok(entry)
    }
}

#[async_trait]
impl Insert<IncomeEntry> for Connection {
    async fn insert(&self, entry: IncomeEntry) -> Result<IncomeEntry> {
        let insert: Id<i64> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO pemasukan (
                    description,
                    amount,
                    date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&entry.description)
                .push_bind(entry.amount)
                .push_bind(entry.date);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<IncomeEntry> for Connection {
    async fn update(&self, entry: IncomeEntry) -> Result<IncomeEntry> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE pemasukan SET")
                .push(" description = ")
                .push_bind(&entry.description)
                .push(", amount = ")
                .push_bind(entry.amount)
                .push(", date = ")
                .push_bind(entry.date)
                .push(" WHERE id = ")
                .push_bind(entry.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(entry.id).await
    }
}

#[async_trait]
impl Delete<IncomeEntry> for Connection {
    async fn delete(&self, entry: IncomeEntry) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM pemasukan WHERE id = ")
            .push_bind(entry.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SumAmount<IncomeEntry> for Connection {
    async fn sum_amount(&self, year: Option<i32>) -> Result<i64> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            "SELECT COALESCE(SUM(amount), 0) AS total FROM pemasukan WHERE 1",
        );
        if let Some(year) = year {
            qry.push(" AND CAST(strftime('%Y', date) AS INTEGER) = ")
                .push_bind(year);
        }
        let total: Total = qry.build_query_as().fetch_one(&mut *conn).await?;
        Ok(total.total)
    }
}
