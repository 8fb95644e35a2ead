//! Document store port: durable CRUD plus filtered, ordered queries.

use crate::document::domain::{
    Collection, CreatedDocument, Document, DocumentId, DocumentQuery, Fields,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Remote document store contract.
///
/// Implementations own their consistency; callers get no transactions
/// spanning more than one document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document and returns its store-assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Unavailable`] or
    /// [`DocumentStoreError::Persistence`] when the write fails.
    async fn create(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DocumentStoreResult<CreatedDocument>;

    /// Merges the given top-level fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> DocumentStoreResult<()>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn delete(&self, collection: Collection, id: &DocumentId) -> DocumentStoreResult<()>;

    /// Reads a document.
    ///
    /// Returns `None` when the document does not exist.
    async fn get(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Runs a filtered, ordered query over a collection.
    async fn query(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> DocumentStoreResult<Vec<Document>>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The addressed document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound {
        /// Collection that was addressed.
        collection: Collection,
        /// Identifier that was addressed.
        id: DocumentId,
    },

    /// The store could not be reached or refused the request.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// Any other persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
