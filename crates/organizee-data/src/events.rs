use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventFilter {
    pub id: Option<String>,
    pub author: Option<String>,
    pub after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub author: String,
}

impl Event {

    // Check if the event lies in the future
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date >= now
    }
}
