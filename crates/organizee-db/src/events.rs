use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    Event,
    EventFilter,
    Insert,
    Query,
    Retrieve,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Event> for Connection {
    type Filter = EventFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Event>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                title,
                date,
                description,
                author
            FROM events
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
        qry.push(" ORDER BY date ");

        let events: Vec<Event> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(events)
    }
}

#[async_trait]
impl Retrieve<Event> for Connection {
    type Key = String;
    async fn retrieve(&self, event_id: Self::Key) -> Result<Event> {
        let filter = EventFilter {
            id: Some(event_id),
            ..Default::default()
        };
        let event = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| QueryError::NotFound)?;
        Ok(event)
    }
}

#[async_trait]
impl Insert<Event> for Connection {
    async fn insert(&self, event: Event) -> Result<Event> {
        let insert: Id<String> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO events (
                    id,
                    title,
                    date,
                    description,
                    author
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&event.id)
                .push_bind(&event.title)
                .push_bind(event.date)
                .push_bind(&event.description)
                .push_bind(&event.author);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[tokio::test]
    async fn test_event_insert() {
        let db = Connection::open_test().await;
        let event = Event {
            id: "e-1".to_string(),
            title: "Monthly General Meeting".to_string(),
            date: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
            description: "Discussion of quarterly progress.".to_string(),
            author: "Administrator".to_string(),
        };
        let event = db.insert(event).await.unwrap();

        assert_eq!(event.id, "e-1");
        assert_eq!(event.title, "Monthly General Meeting");
        assert_eq!(event.date, Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap());
        assert_eq!(event.author, "Administrator");
    }

    #[tokio::test]
    async fn test_event_query_upcoming() {
        let db = Connection::open_test().await;
        for (id, day) in [("e-1", 1), ("e-2", 10), ("e-3", 20)] {
            db.insert(Event {
                id: id.to_string(),
                title: "Event".to_string(),
                date: Utc.with_ymd_and_hms(2024, 7, day, 9, 0, 0).unwrap(),
                ..Event::default()
            }).await.unwrap();
        }

        let cutoff = Utc.with_ymd_and_hms(2024, 7, 5, 0, 0, 0).unwrap();
        let filter = EventFilter {
            after: Some(cutoff),
            ..EventFilter::default()
        };
        let events: Vec<Event> = db.query(&filter).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.is_upcoming(cutoff)));
        // Soonest event comes first
        assert_eq!(events[0].id, "e-2");
        assert_eq!(events[1].id, "e-3");
    }
}
