pub mod in_memory_user_repository;
