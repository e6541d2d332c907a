//! Errors surfaced by the service layer.
//!
//! Locked content is not an error: access checks report it through
//! [`models::access::Access`] instead.

use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The acting user lacks the required role or module assignment.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Returns `true` if the caller caused this error, as opposed to the storage layer.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = ServiceError::not_found("lesson", id);
        assert_eq!(err.to_string(), format!("lesson {id} not found"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_db_error_is_not_client_error() {
        let err = ServiceError::from(DbErr::Custom("connection reset".to_owned()));
        assert!(!err.is_client_error());
    }
}
