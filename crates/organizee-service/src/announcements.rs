use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use organizee_data::{Actor, Announcement, Insert, Member, Retrieve};
use organizee_db::Connection;

use crate::{
    auth::require_admin,
    validate::FieldErrors,
    views::{Applied, View},
    ServiceError,
    ServiceResult,
};

const ANNOUNCEMENT_VIEWS: &[View] = &[View::Announcements, View::Dashboard];

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnnouncementInput {
    pub title: String,
    pub content: String,
}

/// Post an announcement, dated now, authored by the acting member.
pub async fn add_announcement(
    db: &Connection,
    actor: &Actor,
    input: AnnouncementInput,
) -> ServiceResult<Applied<Announcement>> {
    let mut errors = FieldErrors::new();
    errors.require("title", &input.title, "Title is required.");
    errors.require("content", &input.content, "Content is required.");
    errors.check()?;

    require_admin(actor)?;

    let author: Member = db
        .retrieve(actor.id.clone())
        .await
        .map_err(ServiceError::from_store)?;

    let announcement = Announcement {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        content: input.content,
        date: Utc::now(),
        author: author.name,
    };
    let announcement = db
        .insert(announcement)
        .await
        .map_err(ServiceError::from_store)?;
    Ok(Applied::new(announcement, ANNOUNCEMENT_VIEWS))
}

#[cfg(test)]
mod tests {
    use organizee_data::{AnnouncementFilter, Query, Role};

    use super::*;

    async fn seed_admin(db: &Connection) -> Actor {
        let member = db
            .insert(Member {
                id: "admin-1".to_string(),
                name: "Administrator".to_string(),
                email: "admin@organizee.com".to_string(),
                role: Role::Admin,
                ..Member::default()
            })
            .await
            .unwrap();
        Actor::from(&member)
    }

    #[tokio::test]
    async fn test_add_announcement() {
        let db = Connection::open_test().await;
        let actor = seed_admin(&db).await;

        let applied = add_announcement(
            &db,
            &actor,
            AnnouncementInput {
                title: "Keputusan Rapat".to_string(),
                content: "Iuran bulanan tetap Rp 20.000.".to_string(),
            },
        )
        .await
        .unwrap();

        let announcement = applied.record;
        assert_eq!(announcement.title, "Keputusan Rapat");
        assert_eq!(announcement.author, "Administrator");
        // Dated now, give or take the store round trip
        assert!(Utc::now() - announcement.date < chrono::Duration::minutes(1));
        assert!(applied.refresh.contains(&View::Announcements));
    }

    #[tokio::test]
    async fn test_add_announcement_requires_admin() {
        let db = Connection::open_test().await;
        seed_admin(&db).await;
        let actor = Actor {
            id: "m-2".to_string(),
            role: Role::Bendahara,
        };

        let result = add_announcement(
            &db,
            &actor,
            AnnouncementInput {
                title: "Keputusan".to_string(),
                content: "Isi".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let announcements: Vec<Announcement> =
            db.query(&AnnouncementFilter::default()).await.unwrap();
        assert!(announcements.is_empty());
    }

    #[tokio::test]
    async fn test_add_announcement_field_errors() {
        let db = Connection::open_test().await;
        let actor = seed_admin(&db).await;

        let result = add_announcement(
            &db,
            &actor,
            AnnouncementInput {
                title: "".to_string(),
                content: "".to_string(),
            },
        )
        .await;

        match result {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(errors.message("title"), Some("Title is required."));
                assert_eq!(errors.message("content"), Some("Content is required."));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
