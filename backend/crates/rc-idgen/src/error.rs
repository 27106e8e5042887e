use rc_core::AllocationError;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdGenError {
    #[error("Start time {start_time} is ahead of the current time {location}")]
    StartTimeAhead {
        start_time: DateTime<Utc>,
        location: ErrorLocation,
    },

    #[error("Elapsed time no longer fits in the id time bits {location}")]
    OverTimeLimit { location: ErrorLocation },

    #[error("Id generator internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl From<IdGenError> for AllocationError {
    #[track_caller]
    fn from(error: IdGenError) -> Self {
        match error {
            IdGenError::OverTimeLimit { .. } => AllocationError::Exhausted {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            IdGenError::StartTimeAhead { .. } | IdGenError::Internal { .. } => {
                AllocationError::Unavailable {
                    message: error.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IdGenError>;
