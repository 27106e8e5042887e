//! Process-local user store.
//!
//! Holds users and Google email bindings in maps behind a single
//! `tokio::sync::RwLock`. Creating a Google user checks and writes the binding
//! under the same write guard, so concurrent first-time logins for one email
//! end up with a single user.

use crate::{RepositoryError, User, UserRepository};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    users: HashMap<u64, User>,
    google_users: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn google_user_count(&self) -> usize {
        self.store.read().await.google_users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;

        if store.users.contains_key(&user.id) {
            return Err(RepositoryError::conflict(format!(
                "user id {} already exists",
                user.id
            )));
        }

        store.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn get_user_by_id(&self, id: u64) -> Result<User, RepositoryError> {
        self.store
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found())
    }

    async fn get_google_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let store = self.store.read().await;

        let user_id = store
            .google_users
            .get(email)
            .ok_or_else(|| RepositoryError::not_found())?;

        store.users.get(user_id).cloned().ok_or_else(|| {
            RepositoryError::storage(format!(
                "google user {email} is bound to missing user {user_id}"
            ))
        })
    }

    async fn create_google_user(&self, email: &str, user: &User) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;

        if let Some(existing_id) = store.google_users.get(email) {
            return store.users.get(existing_id).cloned().ok_or_else(|| {
                RepositoryError::storage(format!(
                    "google user {email} is bound to missing user {existing_id}"
                ))
            });
        }

        if store.users.contains_key(&user.id) {
            return Err(RepositoryError::conflict(format!(
                "user id {} already exists",
                user.id
            )));
        }

        store.users.insert(user.id, user.clone());
        store.google_users.insert(email.to_string(), user.id);
        Ok(user.clone())
    }
}
