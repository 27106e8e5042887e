//! SQLite-backed user repository.
//!
//! ## Ids
//!
//! User ids are `u64` in the domain and `INTEGER` (i64) in SQLite. Values are
//! stored with a bit-preserving cast, so every u64 round-trips even though
//! large ids read back negative from a raw SQL shell.
//!
//! ## Google bindings under concurrency
//!
//! `create_with_google_email` writes the user row first and then the binding
//! with `ON CONFLICT(email) DO NOTHING`. The first write takes SQLite's write
//! lock, so concurrent callers queue on `busy_timeout` instead of failing. A
//! caller that finds the binding already present rolls back its user row and
//! returns the user that won.

use crate::{DbError, Result as DbErrorResult};

use rc_core::{ErrorLocation, RepositoryError, User, UserRepository};

use std::panic::Location;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id as u64, row.name)
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let id = user.id as i64;
        let created_at = Utc::now().timestamp();

        sqlx::query(
            r#"
                INSERT INTO users (id, name, created_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: u64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_google_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT u.id, u.name
                FROM google_users g
                INNER JOIN users u ON u.id = g.user_id
                WHERE g.email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Insert `user` bound to `email`, or return the user already bound to it.
    pub async fn create_with_google_email(&self, email: &str, user: &User) -> DbErrorResult<User> {
        let id = user.id as i64;
        let created_at = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
                INSERT INTO users (id, name, created_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let bound = sqlx::query(
            r#"
                INSERT INTO google_users (email, user_id, created_at)
                VALUES (?, ?, ?)
                ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(id)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        if bound.rows_affected() == 0 {
            tx.rollback().await?;
            debug!("google user {email} already bound, discarding user {}", user.id);

            return self
                .find_by_google_email(email)
                .await?
                .ok_or_else(|| DbError::Inconsistent {
                    message: format!("google user {email} conflicted but is not bound"),
                    location: ErrorLocation::from(Location::caller()),
                });
        }

        tx.commit().await?;

        Ok(user.clone())
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        self.create(user).await?;
        Ok(user.clone())
    }

    async fn get_user_by_id(&self, id: u64) -> Result<User, RepositoryError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found())
    }

    async fn get_google_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        self.find_by_google_email(email)
            .await?
            .ok_or_else(|| RepositoryError::not_found())
    }

    async fn create_google_user(&self, email: &str, user: &User) -> Result<User, RepositoryError> {
        Ok(self.create_with_google_email(email, user).await?)
    }
}
