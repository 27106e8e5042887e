//! User service - coordinates id allocation with user persistence.
//!
//! The service keeps no state of its own. Uniqueness of the Google email
//! binding under concurrent first-time logins is enforced by the repository,
//! not here.

use crate::{
    ErrorKind, IdGenerator, RepositoryError, Result, User, UserRepository, UserServiceError,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            repository,
            id_generator,
        }
    }

    /// Allocate a new id and persist a user with the given display name.
    ///
    /// If persisting fails the allocated id is abandoned.
    pub async fn create_user(&self, name: &str) -> Result<User> {
        debug!("create_user: name={name}");

        let user_id = self.allocate_id().await?;
        let user = self
            .repository
            .create_user(&User::new(user_id, name))
            .await
            .map_err(|source| UserServiceError::CreateUser {
                user_id,
                source,
                location: ErrorLocation::from(Location::caller()),
            })
            .inspect_err(log_failure)?;

        info!("Created user {} ({})", user.id, user.name);
        Ok(user)
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User> {
        debug!("get_user: id={user_id}");

        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|source| UserServiceError::GetUser {
                user_id,
                source,
                location: ErrorLocation::from(Location::caller()),
            })
            .inspect_err(log_failure)
    }

    /// Return the user bound to `email`, creating one named `name` if the
    /// email has never been seen.
    ///
    /// An existing user is returned unchanged; `name` is only used on creation.
    pub async fn get_or_create_google_user(&self, email: &str, name: &str) -> Result<User> {
        debug!("get_or_create_google_user: email={email}");

        match self.repository.get_google_user_by_email(email).await {
            Ok(user) => return Ok(user),
            Err(RepositoryError::NotFound { .. }) => {}
            Err(source) => {
                let error = UserServiceError::GetGoogleUser {
                    email: email.to_string(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                };
                log_failure(&error);
                return Err(error);
            }
        }

        let user_id = self.allocate_id().await?;
        let user = self
            .repository
            .create_google_user(email, &User::new(user_id, name))
            .await
            .map_err(|source| UserServiceError::CreateGoogleUser {
                email: email.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })
            .inspect_err(log_failure)?;

        if user.id == user_id {
            info!("Created google user {} ({}) for {email}", user.id, user.name);
        } else {
            debug!("google user {email} was created concurrently as {}", user.id);
        }
        Ok(user)
    }

    async fn allocate_id(&self) -> Result<u64> {
        self.id_generator
            .next_id()
            .await
            .map_err(|source| UserServiceError::Allocation {
                source,
                location: ErrorLocation::from(Location::caller()),
            })
            .inspect_err(log_failure)
    }
}

fn log_failure(error: &UserServiceError) {
    match error.kind() {
        ErrorKind::NotFound => debug!("{error}"),
        ErrorKind::Allocation | ErrorKind::Persistence => warn!("{error}"),
    }
}
