use crate::{AllocationError, ErrorKind, RepositoryError};

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Error returned by [`UserService`](crate::UserService).
///
/// Each variant names the operation that failed together with the user id or
/// email involved, and keeps the collaborator error as its source.
#[derive(Error, Debug)]
pub enum UserServiceError {
    #[error("Failed to allocate user id: {source} {location}")]
    Allocation {
        #[source]
        source: AllocationError,
        location: ErrorLocation,
    },

    #[error("Failed to create user {user_id}: {source} {location}")]
    CreateUser {
        user_id: u64,
        #[source]
        source: RepositoryError,
        location: ErrorLocation,
    },

    #[error("Failed to get user {user_id}: {source} {location}")]
    GetUser {
        user_id: u64,
        #[source]
        source: RepositoryError,
        location: ErrorLocation,
    },

    #[error("Failed to get google user {email}: {source} {location}")]
    GetGoogleUser {
        email: String,
        #[source]
        source: RepositoryError,
        location: ErrorLocation,
    },

    #[error("Failed to create google user {email}: {source} {location}")]
    CreateGoogleUser {
        email: String,
        #[source]
        source: RepositoryError,
        location: ErrorLocation,
    },
}

impl UserServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserServiceError::Allocation { .. } => ErrorKind::Allocation,
            UserServiceError::CreateUser { source, .. }
            | UserServiceError::GetUser { source, .. }
            | UserServiceError::GetGoogleUser { source, .. }
            | UserServiceError::CreateGoogleUser { source, .. } => match source {
                RepositoryError::NotFound { .. } => ErrorKind::NotFound,
                RepositoryError::Conflict { .. } | RepositoryError::Storage { .. } => {
                    ErrorKind::Persistence
                }
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = StdResult<T, UserServiceError>;
