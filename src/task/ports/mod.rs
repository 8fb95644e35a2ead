//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the state store.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use repository::MockTaskRepository;
