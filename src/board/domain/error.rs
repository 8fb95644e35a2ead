//! Error types for board domain validation and parsing.

use super::ColumnId;
use thiserror::Error;

/// Errors returned while constructing board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board title is empty after trimming.
    #[error("board title must not be empty")]
    EmptyTitle,

    /// The board has no columns.
    #[error("a board must have at least one column")]
    NoColumns,

    /// A column identifier is empty after trimming.
    #[error("column identifiers must not be blank")]
    BlankColumnId,

    /// Two columns share an identifier.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),
}

/// Error returned while parsing member roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown board role: {0}")]
pub struct ParseRoleError(pub String);
