pub mod allocation_error;
pub mod error_kind;
pub mod repository_error;
pub mod user_service_error;
