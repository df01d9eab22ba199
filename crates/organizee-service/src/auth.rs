use organizee_data::{Actor, Member, MemberFilter, Query, Role};
use organizee_db::Connection;

use crate::{password, ServiceError, ServiceResult};

/// Roster management and postings are reserved for the admin
pub fn require_admin(actor: &Actor) -> ServiceResult<()> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Money handling is open to the admin and the treasurer
pub fn require_treasurer(actor: &Actor) -> ServiceResult<()> {
    if matches!(actor.role, Role::Admin | Role::Bendahara) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Resolve a login. An unknown address, a member without a
/// credential and a wrong password all fail the same way.
pub async fn authenticate(db: &Connection, email: &str, password: &str) -> ServiceResult<Member> {
    let members: Vec<Member> = db
        .query(&MemberFilter {
            email: Some(email.to_string()),
            ..Default::default()
        })
        .await
        .map_err(ServiceError::from_store)?;

    let member = match members.into_iter().next() {
        Some(member) => member,
        None => return Err(ServiceError::BadCredentials),
    };
    let hash = match member.password_hash.as_deref() {
        Some(hash) => hash,
        None => return Err(ServiceError::BadCredentials),
    };
    if !password::verify_password(password, hash) {
        return Err(ServiceError::BadCredentials);
    }
    Ok(member)
}
