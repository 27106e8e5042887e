//! Collaborator interfaces consumed by the user service.

pub mod id_generator;
pub mod user_repository;
