use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnnouncementFilter {
    pub id: Option<String>,
    pub author: Option<String>,
    pub after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub author: String,
}
