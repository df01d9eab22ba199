use serde::{Deserialize, Serialize};
use uuid::Uuid;

use organizee_data::{Actor, Event, Insert, Member, Retrieve};
use organizee_db::Connection;

use crate::{
    auth::require_admin,
    validate::FieldErrors,
    views::{Applied, View},
    ServiceError,
    ServiceResult,
};

const EVENT_VIEWS: &[View] = &[View::Events, View::Dashboard];

/// Event form input. The date is a datetime-local or RFC 3339 string.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub date: String,
    pub description: String,
}

/// Post an event. The author field is a snapshot of the acting
/// member's name at posting time, not a reference.
pub async fn add_event(
    db: &Connection,
    actor: &Actor,
    input: EventInput,
) -> ServiceResult<Applied<Event>> {
    let mut errors = FieldErrors::new();
    errors.require("title", &input.title, "Title is required.");
    errors.require("description", &input.description, "Description is required.");
    let date = errors.datetime("date", &input.date);
    errors.check()?;

    require_admin(actor)?;

    let author: Member = db
        .retrieve(actor.id.clone())
        .await
        .map_err(ServiceError::from_store)?;

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        date: date.unwrap_or_default(),
        description: input.description,
        author: author.name,
    };
    let event = db.insert(event).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(event, EVENT_VIEWS))
}
