use crate::{RepositoryError, User};

use async_trait::async_trait;

/// Durable storage for users and their Google email bindings.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user keyed by `user.id`. An id collision is an error.
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError>;

    /// Returns [`RepositoryError::NotFound`] when no user has this id.
    async fn get_user_by_id(&self, id: u64) -> Result<User, RepositoryError>;

    /// Returns [`RepositoryError::NotFound`] when the email is not bound.
    async fn get_google_user_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    /// Insert a new user together with its email binding.
    ///
    /// Implementations must keep at most one user per email even when called
    /// concurrently for the same email. When the binding already exists the
    /// user it points to is returned and `user` is not stored.
    async fn create_google_user(&self, email: &str, user: &User) -> Result<User, RepositoryError>;
}
