//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The column reference is empty after trimming.
    #[error("task column must not be empty")]
    BlankColumn,
}
