use thiserror::Error as ThisError;

use organizee_db::results::QueryError;

use crate::validate::FieldErrors;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Handler errors. Display strings are the user facing messages,
/// so no internal detail may leak into them.
#[derive(Debug, ThisError)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),
    #[error("You are not allowed to perform this action.")]
    Unauthorized,
    #[error("Email already in use.")]
    EmailTaken,
    #[error("Record not found.")]
    NotFound,
    #[error("Cannot delete the administrator account.")]
    ProtectedMember,
    #[error("Invalid credentials.")]
    BadCredentials,
    #[error("Failed to generate summary. Please try again.")]
    Summarization(anyhow::Error),
    #[error("Something went wrong. Please try again.")]
    Storage(anyhow::Error),
}

impl ServiceError {

    /// Classify a storage failure before it reaches a caller.
    /// The only unique index reachable through a plain insert or
    /// update is users.email, so a unique violation means the
    /// address is taken.
    pub fn from_store(err: anyhow::Error) -> Self {
        if let Some(QueryError::NotFound) = err.downcast_ref::<QueryError>() {
            return Self::NotFound;
        }
        let unique = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|err| err.as_database_error())
            .map(|err| matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation))
            .unwrap_or(false);
        if unique {
            return Self::EmailTaken;
        }
        log::error!("storage failure: {:?}", err);
        Self::Storage(err)
    }
}
