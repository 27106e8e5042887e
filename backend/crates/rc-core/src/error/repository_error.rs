use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure reported by a [`UserRepository`](crate::UserRepository).
///
/// `NotFound` is the only variant callers are expected to branch on; the
/// others are infrastructure faults and are passed through untouched.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("User not found {location}")]
    NotFound { location: ErrorLocation },

    /// Identifier collision or an already-bound external identity.
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage error: {message} {location}")]
    Storage {
        message: String,
        location: ErrorLocation,
    },
}

impl RepositoryError {
    #[track_caller]
    pub fn not_found() -> Self {
        RepositoryError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        RepositoryError::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        RepositoryError::Storage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}
