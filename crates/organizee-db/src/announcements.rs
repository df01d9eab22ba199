use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    Announcement,
    AnnouncementFilter,
    Insert,
    Query,
    Retrieve,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Announcement> for Connection {
    type Filter = AnnouncementFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Announcement>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                title,
                content,
                date,
                author
            FROM announcements
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id.clone() {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(author) = filter.author.clone() {
            qry.push(" AND author = ").push_bind(author);
        }
        if let Some(after) = filter.after {
            qry.push(" AND date >= ").push_bind(after);
        }
        // Newest first
        qry.push(" ORDER BY date DESC ");

        let announcements: Vec<Announcement> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(announcements)
    }
}

#[async_trait]
impl Retrieve<Announcement> for Connection {
    type Key = String;
    async fn retrieve(&self, announcement_id: Self::Key) -> Result<Announcement> {
        let filter = AnnouncementFilter {
            id: Some(announcement_id),
            ..Default::default()
        };
        let announcement = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| QueryError::NotFound)?;
        Ok(announcement)
    }
}

#[async_trait]
impl Insert<Announcement> for Connection {
    async fn insert(&self, announcement: Announcement) -> Result<Announcement> {
        let insert: Id<String> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO announcements (
                    id,
                    title,
                    content,
                    date,
                    author
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&announcement.id)
                .push_bind(&announcement.title)
                .push_bind(&announcement.content)
                .push_bind(announcement.date)
                .push_bind(&announcement.author);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}
