use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use organizee_data::{
    Actor,
    Delete,
    Insert,
    Member,
    MemberFilter,
    Query,
    Retrieve,
    Role,
    Settings,
    Update,
    AVATAR_PLACEHOLDER,
};
use organizee_db::Connection;

use crate::{
    auth::require_admin,
    password,
    validate::FieldErrors,
    views::{Applied, View},
    ServiceError,
    ServiceResult,
};

const MEMBER_VIEWS: &[View] = &[View::Members, View::Birthdays];

// A deleted member takes their payment history with them.
const MEMBER_DELETE_VIEWS: &[View] = &[
    View::Members,
    View::Birthdays,
    View::OneTimeFee,
    View::MonthlyDues,
    View::Wallet,
    View::Dashboard,
];

const PROFILE_VIEWS: &[View] = &[
    View::Profile,
    View::Members,
    View::Birthdays,
    View::Dashboard,
];

/// Roster form input, for create and update alike
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub birth_date: Option<String>,
}

/// Self service profile form input
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub birth_date: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Sign up form input. New accounts always start as plain members.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn checked_member_input(input: &MemberInput) -> ServiceResult<(Role, Option<NaiveDate>)> {
    let mut errors = FieldErrors::new();
    errors.require("name", &input.name, "Full Name is required.");
    errors.email("email", &input.email);
    let role = errors.role("role", &input.role);
    let birth_date = errors.date_opt("birth_date", input.birth_date.as_deref());
    errors.check()?;
    Ok((role.unwrap_or_default(), birth_date))
}

/// Is an email address already held by some other member?
async fn email_taken(db: &Connection, email: &str, own_id: Option<&str>) -> ServiceResult<bool> {
    let members: Vec<Member> = db
        .query(&MemberFilter {
            email: Some(email.to_string()),
            ..Default::default()
        })
        .await
        .map_err(ServiceError::from_store)?;
    Ok(members.iter().any(|member| Some(member.id.as_str()) != own_id))
}

/// Add a member to the roster
pub async fn add_member(
    db: &Connection,
    actor: &Actor,
    input: MemberInput,
) -> ServiceResult<Applied<Member>> {
    let (role, birth_date) = checked_member_input(&input)?;

    require_admin(actor)?;

    if email_taken(db, &input.email, None).await? {
        return Err(ServiceError::EmailTaken);
    }

    let member = Member {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        role,
        avatar: AVATAR_PLACEHOLDER.to_string(),
        birth_date,
        password_hash: None,
    };
    let member = db.insert(member).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(member, MEMBER_VIEWS))
}

/// Update a roster entry. A blank birth date clears the stored one.
pub async fn update_member(
    db: &Connection,
    actor: &Actor,
    member_id: &str,
    input: MemberInput,
) -> ServiceResult<Applied<Member>> {
    let (role, birth_date) = checked_member_input(&input)?;

    require_admin(actor)?;

    let mut member: Member = db
        .retrieve(member_id.to_string())
        .await
        .map_err(ServiceError::from_store)?;

    if input.email != member.email && email_taken(db, &input.email, Some(member_id)).await? {
        return Err(ServiceError::EmailTaken);
    }

    member.name = input.name;
    member.email = input.email;
    member.role = role;
    member.birth_date = birth_date;

    let member = db.update(member).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(member, MEMBER_VIEWS))
}

/// Remove a member. The bootstrap admin account is refused before
/// anything else is looked at, whoever asks.
pub async fn delete_member(
    db: &Connection,
    settings: &Settings,
    actor: &Actor,
    member_id: &str,
) -> ServiceResult<Applied<Member>> {
    if settings.is_bootstrap_admin(member_id) {
        log::error!("refusing to delete the bootstrap admin account");
        return Err(ServiceError::ProtectedMember);
    }

    require_admin(actor)?;

    let member: Member = db
        .retrieve(member_id.to_string())
        .await
        .map_err(ServiceError::from_store)?;
    db.delete(member.clone())
        .await
        .map_err(ServiceError::from_store)?;
    Ok(Applied::new(member, MEMBER_DELETE_VIEWS))
}

/// Update the acting member's own profile, with an optional
/// password change.
pub async fn update_profile(
    db: &Connection,
    actor: &Actor,
    input: ProfileInput,
) -> ServiceResult<Applied<Member>> {
    let mut errors = FieldErrors::new();
    errors.require("name", &input.name, "Full Name is required.");
    errors.email("email", &input.email);
    let birth_date = errors.date_opt("birth_date", input.birth_date.as_deref());
    let new_password =
        errors.password_change(input.password.as_deref(), input.confirm_password.as_deref());
    errors.check()?;

    let mut member: Member = db
        .retrieve(actor.id.clone())
        .await
        .map_err(ServiceError::from_store)?;

    if input.email != member.email && email_taken(db, &input.email, Some(&actor.id)).await? {
        return Err(ServiceError::EmailTaken);
    }

    member.name = input.name;
    member.email = input.email;
    member.birth_date = birth_date;
    if let Some(new_password) = new_password {
        member.password_hash = Some(password::hash_password(&new_password));
    }

    // Profile fields and credential change in one UPDATE statement.
    let member = db.update(member).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(member, PROFILE_VIEWS))
}

/// Self registration from the sign up screen
pub async fn register(db: &Connection, input: RegisterInput) -> ServiceResult<Applied<Member>> {
    let mut errors = FieldErrors::new();
    errors.require("name", &input.name, "Full Name is required.");
    errors.email("email", &input.email);
    errors.required_password("password", &input.password);
    errors.check()?;

    if email_taken(db, &input.email, None).await? {
        return Err(ServiceError::EmailTaken);
    }

    let member = Member {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        role: Role::Member,
        avatar: AVATAR_PLACEHOLDER.to_string(),
        birth_date: None,
        password_hash: Some(password::hash_password(&input.password)),
    };
    let member = db.insert(member).await.map_err(ServiceError::from_store)?;
    Ok(Applied::new(member, MEMBER_VIEWS))
}

#[cfg(test)]
mod tests {
    use crate::auth::authenticate;

    use super::*;

    fn admin() -> Actor {
        Actor {
            id: "admin-1".to_string(),
            role: Role::Admin,
        }
    }

    fn plain_member() -> Actor {
        Actor {
            id: "m-9".to_string(),
            role: Role::Member,
        }
    }

    async fn seed_member(db: &Connection, id: &str, name: &str, email: &str) -> Member {
        db.insert(Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: AVATAR_PLACEHOLDER.to_string(),
            ..Member::default()
        })
        .await
        .unwrap()
    }

    fn input(name: &str, email: &str, role: &str) -> MemberInput {
        MemberInput {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_member() {
        let db = Connection::open_test().await;
        let applied = add_member(
            &db,
            &admin(),
            MemberInput {
                birth_date: Some("1992-08-22".to_string()),
                ..input("Citra Kirana", "citra@example.com", "bendahara")
            },
        )
        .await
        .unwrap();

        let member = applied.record;
        assert_eq!(member.id.len(), 36);
        assert_eq!(member.name, "Citra Kirana");
        assert_eq!(member.role, Role::Bendahara);
        assert_eq!(member.avatar, AVATAR_PLACEHOLDER);
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1992, 8, 22));
        assert_eq!(member.password_hash, None);
        assert!(applied.refresh.contains(&View::Members));
        assert!(applied.refresh.contains(&View::Birthdays));
    }

    #[tokio::test]
    async fn test_add_member_requires_admin() {
        let db = Connection::open_test().await;
        let result = add_member(
            &db,
            &plain_member(),
            input("Citra Kirana", "citra@example.com", "member"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_add_member_field_errors() {
        let db = Connection::open_test().await;
        let result = add_member(
            &db,
            &admin(),
            MemberInput {
                birth_date: Some("22-08-1992".to_string()),
                ..input("", "not-an-address", "chairman")
            },
        )
        .await;

        match result {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(errors.message("name"), Some("Full Name is required."));
                assert_eq!(errors.message("email"), Some("Invalid email address."));
                assert_eq!(errors.message("role"), Some("Invalid role."));
                assert_eq!(errors.message("birth_date"), Some("Invalid date."));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_member_duplicate_email() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let result = add_member(&db, &admin(), input("Budi Baru", "budi@example.com", "member")).await;
        assert!(matches!(result, Err(ServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_unique_backstop_classifies_as_email_taken() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let err = db
            .insert(Member {
                id: "m-2".to_string(),
                name: "Budi Kedua".to_string(),
                email: "budi@example.com".to_string(),
                ..Member::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            ServiceError::from_store(err),
            ServiceError::EmailTaken,
        ));
    }

    #[tokio::test]
    async fn test_update_member() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let applied = update_member(
            &db,
            &admin(),
            "m-1",
            MemberInput {
                birth_date: Some("1990-05-15".to_string()),
                ..input("Budi D", "budi.d@example.com", "sekretaris")
            },
        )
        .await
        .unwrap();

        let member = applied.record;
        assert_eq!(member.name, "Budi D");
        assert_eq!(member.email, "budi.d@example.com");
        assert_eq!(member.role, Role::Sekretaris);
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1990, 5, 15));
    }

    #[tokio::test]
    async fn test_update_member_requires_admin() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let result = update_member(
            &db,
            &plain_member(),
            "m-1",
            input("Budi Diubah", "budi@example.com", "admin"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let member: Member = db.retrieve("m-1".to_string()).await.unwrap();
        assert_eq!(member.name, "Budi Doremi");
        assert_eq!(member.role, Role::Member);
    }

    #[tokio::test]
    async fn test_update_member_keeps_own_email() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        // Unchanged email must not trip the conflict check
        let applied = update_member(&db, &admin(), "m-1", input("Budi D", "budi@example.com", "member"))
            .await
            .unwrap();
        assert_eq!(applied.record.name, "Budi D");
    }

    #[tokio::test]
    async fn test_update_member_email_conflict() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;
        seed_member(&db, "m-2", "Citra Kirana", "citra@example.com").await;

        let result =
            update_member(&db, &admin(), "m-2", input("Citra Kirana", "budi@example.com", "member")).await;
        assert!(matches!(result, Err(ServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_missing_member() {
        let db = Connection::open_test().await;
        let result = update_member(&db, &admin(), "nope", input("X", "x@example.com", "member")).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_member() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let applied = delete_member(&db, &Settings::default(), &admin(), "m-1")
            .await
            .unwrap();
        assert_eq!(applied.record.id, "m-1");
        assert!(applied.refresh.contains(&View::OneTimeFee));

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_delete_member_requires_admin() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let result = delete_member(&db, &Settings::default(), &plain_member(), "m-1").await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_bootstrap_admin_always_refused() {
        let db = Connection::open_test().await;
        seed_member(&db, "1", "Administrator", "admin@organizee.com").await;

        // Refused regardless of who asks, admin included
        for actor in [admin(), plain_member()] {
            let result = delete_member(&db, &Settings::default(), &actor, "1").await;
            assert!(matches!(result, Err(ServiceError::ProtectedMember)));
        }

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;
        let actor = Actor {
            id: "m-1".to_string(),
            role: Role::Member,
        };

        let applied = update_profile(
            &db,
            &actor,
            ProfileInput {
                name: "Budi D".to_string(),
                email: "budi.d@example.com".to_string(),
                birth_date: Some("1990-05-15".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let member = applied.record;
        assert_eq!(member.name, "Budi D");
        assert_eq!(member.email, "budi.d@example.com");
        // No password supplied, credential untouched
        assert_eq!(member.password_hash, None);
        assert!(applied.refresh.contains(&View::Profile));
        assert!(applied.refresh.contains(&View::Dashboard));
    }

    #[tokio::test]
    async fn test_update_profile_sets_password() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;
        let actor = Actor {
            id: "m-1".to_string(),
            role: Role::Member,
        };

        update_profile(
            &db,
            &actor,
            ProfileInput {
                name: "Budi Doremi".to_string(),
                email: "budi@example.com".to_string(),
                password: Some("rahasia".to_string()),
                confirm_password: Some("rahasia".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let member = authenticate(&db, "budi@example.com", "rahasia").await.unwrap();
        assert_eq!(member.id, "m-1");
    }

    #[tokio::test]
    async fn test_update_profile_password_rules() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;
        let actor = Actor {
            id: "m-1".to_string(),
            role: Role::Member,
        };

        let result = update_profile(
            &db,
            &actor,
            ProfileInput {
                name: "Budi Doremi".to_string(),
                email: "budi@example.com".to_string(),
                password: Some("rahasia".to_string()),
                confirm_password: Some("rahasaia".to_string()),
                ..Default::default()
            },
        )
        .await;
        match result {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(
                    errors.message("confirm_password"),
                    Some("Passwords do not match."),
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }

        let result = update_profile(
            &db,
            &actor,
            ProfileInput {
                name: "Budi Doremi".to_string(),
                email: "budi@example.com".to_string(),
                password: Some("abc".to_string()),
                confirm_password: Some("abc".to_string()),
                ..Default::default()
            },
        )
        .await;
        match result {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(
                    errors.message("password"),
                    Some("Password must be at least 5 characters."),
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register() {
        let db = Connection::open_test().await;
        let applied = register(
            &db,
            RegisterInput {
                name: "Dewi Lestari".to_string(),
                email: "dewi@example.com".to_string(),
                password: "rahasia".to_string(),
            },
        )
        .await
        .unwrap();

        // Registration never grants anything beyond plain membership
        assert_eq!(applied.record.role, Role::Member);

        let member = authenticate(&db, "dewi@example.com", "rahasia").await.unwrap();
        assert_eq!(member.name, "Dewi Lestari");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Connection::open_test().await;
        seed_member(&db, "m-1", "Budi Doremi", "budi@example.com").await;

        let result = register(
            &db,
            RegisterInput {
                name: "Budi Kedua".to_string(),
                email: "budi@example.com".to_string(),
                password: "rahasia".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_requires_password() {
        let db = Connection::open_test().await;
        let result = register(
            &db,
            RegisterInput {
                name: "Dewi Lestari".to_string(),
                email: "dewi@example.com".to_string(),
                password: "123".to_string(),
            },
        )
        .await;
        match result {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(
                    errors.message("password"),
                    Some("Password must be at least 5 characters."),
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
