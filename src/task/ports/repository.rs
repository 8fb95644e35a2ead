//! Repository port for task persistence, board listing, and column moves.

use crate::board::domain::{BoardId, ColumnId};
use crate::document::{domain::DocumentId, ports::DocumentStoreError};
use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every call is a fresh round trip; implementations keep no cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Writes a new task and returns it.
    ///
    /// The returned task echoes the draft with the store-assigned identifier
    /// and caller-stamped timestamps; it is not read back.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Merges the patch into a stored task and stamps its update time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Lists the tasks of a board, most recently created first.
    ///
    /// Filtering and ordering are requested from the store; the result is
    /// returned in the order the store produced it.
    async fn list_for_board(&self, board_id: &BoardId) -> TaskRepositoryResult<Vec<Task>>;

    /// Files a task in another column.
    ///
    /// Writes only the column reference and the update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn move_to_column(
        &self,
        id: &TaskId,
        column_id: &ColumnId,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A stored task document does not match the task model.
    #[error("task document {id} is malformed: {reason}")]
    Decode {
        /// Identifier of the malformed document.
        id: TaskId,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    pub(crate) fn decode(id: DocumentId, err: &serde_json::Error) -> Self {
        Self::Decode {
            id: TaskId::from(id),
            reason: err.to_string(),
        }
    }
}

impl From<DocumentStoreError> for TaskRepositoryError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::NotFound { id, .. } => Self::NotFound(TaskId::from(id)),
            other => Self::persistence(other),
        }
    }
}
