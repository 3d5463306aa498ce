//! Error types for the database layer

use thiserror::Error;

/// Failures surfaced by the store and the repositories on top of it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("{0}")]
    NotFound(String),
}

impl DatabaseError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// The underlying store message without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::ConnectionError(message)
            | Self::QueryError(message)
            | Self::MigrationError(message)
            | Self::NotFound(message) => message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError(error.to_string())
            }
            other => Self::QueryError(other.to_string()),
        }
    }
}
