pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::sqlite_pool::{PoolSettings, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::user_repository::SqliteUserRepository;
