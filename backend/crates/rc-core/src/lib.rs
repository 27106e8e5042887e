pub mod error;
pub mod models;
pub mod ports;
pub mod repositories;
pub mod services;


pub use error::allocation_error::AllocationError;
pub use error::error_kind::ErrorKind;
pub use error::repository_error::RepositoryError;
pub use error::user_service_error::{Result, UserServiceError};
pub use error_location::ErrorLocation;
pub use models::user::User;
pub use ports::id_generator::IdGenerator;
pub use ports::user_repository::UserRepository;
pub use repositories::in_memory_user_repository::InMemoryUserRepository;
pub use services::user_service::UserService;
