// Infrastructure layer - External dependencies and adapters
pub mod config;
#[cfg(test)]
pub mod memory_repository;
pub mod postgres_repository;
