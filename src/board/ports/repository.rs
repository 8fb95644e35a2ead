//! Repository port for board persistence and membership-scoped listing.

use crate::board::domain::{Board, BoardDraft, BoardId, BoardPatch, BoardVisibility};
use crate::document::{domain::DocumentId, ports::DocumentStoreError};
use crate::identity::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// Every call is a fresh round trip; implementations keep no cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Writes a new board and returns it.
    ///
    /// The returned board echoes the draft with the store-assigned
    /// identifier and caller-stamped timestamps; it is not read back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the write fails.
    async fn create(&self, draft: BoardDraft) -> BoardRepositoryResult<Board>;

    /// Merges the patch into a stored board and stamps its update time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the board does not
    /// exist.
    async fn update(&self, id: &BoardId, patch: &BoardPatch) -> BoardRepositoryResult<()>;

    /// Deletes a board. Tasks filed on it are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the board does not
    /// exist.
    async fn delete(&self, id: &BoardId) -> BoardRepositoryResult<()>;

    /// Reads a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_by_id(&self, id: &BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Lists the boards visible to a user, most recently updated first.
    ///
    /// Filtering and ordering are requested from the store; the result is
    /// returned in the order the store produced it.
    async fn list_for_user(
        &self,
        user: &UserId,
        visibility: BoardVisibility,
    ) -> BoardRepositoryResult<Vec<Board>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The board was not found.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// A stored board document does not match the board model.
    #[error("board document {id} is malformed: {reason}")]
    Decode {
        /// Identifier of the malformed document.
        id: BoardId,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    pub(crate) fn decode(id: DocumentId, err: &serde_json::Error) -> Self {
        Self::Decode {
            id: BoardId::from(id),
            reason: err.to_string(),
        }
    }
}

impl From<DocumentStoreError> for BoardRepositoryError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::NotFound { id, .. } => Self::NotFound(BoardId::from(id)),
            other => Self::persistence(other),
        }
    }
}
