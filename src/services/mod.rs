use thiserror::Error;

use crate::repository::RepositoryError;

pub mod cash_sessions;
pub mod catalog;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod tables;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business outcome of a service call, mapped one to one onto HTTP statuses
/// by the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidStatus(String),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("no open cash session: a sale cannot be recorded without an open register")]
    NoOpenSession,
    #[error("cash session {0} was closed before the sale could be recorded")]
    SessionNotOpen(i32),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::NoOpenSession => ServiceError::NoOpenSession,
            RepositoryError::SessionNotOpen(session_id) => ServiceError::SessionNotOpen(session_id),
            RepositoryError::OutOfRange(what) => {
                ServiceError::Validation(format!("{what} is out of range"))
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
