//! Errors returned by state store entry points.

use crate::board::{
    domain::{BoardDomainError, BoardId, ColumnId},
    ports::BoardRepositoryError,
};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Result type for state store operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of a state store entry point.
///
/// Every failure that reaches a slice is also recorded there as error text;
/// the variant is returned to the caller for programmatic handling.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// No user is signed in.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The destination column is not a column of the task's board.
    #[error("column {column_id} does not belong to board {board_id}")]
    UnknownColumn {
        /// Board the task is filed on.
        board_id: BoardId,
        /// Rejected destination.
        column_id: ColumnId,
    },

    /// The task to move is not in the loaded task list.
    #[error("task {0} is not loaded")]
    TaskNotLoaded(TaskId),

    /// The task's board is not loaded, so its columns cannot be checked.
    #[error("board {0} is not loaded")]
    BoardNotLoaded(BoardId),

    /// Board validation failed.
    #[error(transparent)]
    BoardDomain(#[from] BoardDomainError),

    /// Task validation failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),

    /// The board repository failed.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),

    /// The task repository failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),

    /// The store actor has stopped.
    #[error("state store has stopped")]
    Closed,
}
