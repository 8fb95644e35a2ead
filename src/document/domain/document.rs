//! Stored document representation.

use super::DocumentId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

/// A document as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// Top-level document fields.
    pub fields: Fields,
    /// Commit time of the first write, assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Commit time of the latest write, assigned by the store.
    pub updated_at: DateTime<Utc>,
}

/// Acknowledgement returned by a successful `create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDocument {
    /// Store-assigned identifier of the new document.
    pub id: DocumentId,
    /// Commit time assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Commit time assigned by the store; equal to `created_at` on creation.
    pub updated_at: DateTime<Utc>,
}
