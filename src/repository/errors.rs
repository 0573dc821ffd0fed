use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::UnknownVariant;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures raised by the Diesel repository.
///
/// Business rejections detected inside a unit of work are variants of their
/// own so callers never inspect storage error codes.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("no open cash session")]
    NoOpenSession,
    #[error("cash session {0} is not open")]
    SessionNotOpen(i32),
    /// A total or stock level would leave the `i64` range.
    #[error("{0} is out of range")]
    OutOfRange(String),
    #[error("invalid stored value: {0}")]
    InvalidData(#[from] UnknownVariant),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl RepositoryError {
    /// Replaces the storage message of a `Conflict` with a presentable one.
    pub fn conflict_as(self, message: &str) -> Self {
        match self {
            RepositoryError::Conflict(_) => RepositoryError::Conflict(message.to_string()),
            other => other,
        }
    }
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict(info.message().to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}
