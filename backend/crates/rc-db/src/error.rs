use rc_core::{ErrorLocation, RepositoryError};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Inconsistent data: {message} {location}")]
    Inconsistent {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx {
                source: sqlx::Error::Database(db_error),
                ..
            } => db_error.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for RepositoryError {
    #[track_caller]
    fn from(error: DbError) -> Self {
        if error.is_unique_violation() {
            RepositoryError::Conflict {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            RepositoryError::Storage {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
