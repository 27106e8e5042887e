use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure reported by an [`IdGenerator`](crate::IdGenerator).
#[derive(Error, Debug)]
pub enum AllocationError {
    /// The identifier space is used up (e.g. the time component overflowed).
    #[error("Identifier space exhausted: {message} {location}")]
    Exhausted {
        message: String,
        location: ErrorLocation,
    },

    /// The allocator could not hand out an identifier right now.
    #[error("Identifier allocator unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl AllocationError {
    #[track_caller]
    pub fn exhausted<S: Into<String>>(message: S) -> Self {
        AllocationError::Exhausted {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        AllocationError::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
