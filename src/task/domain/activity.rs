//! Values embedded in a task document: labels, comments, and history.

use super::{CommentId, LabelId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coloured tag attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label identity.
    pub id: LabelId,
    /// Display text.
    pub text: String,
    /// Display colour, as supplied by the caller.
    pub color: String,
}

impl Label {
    /// Creates a label with a fresh identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: LabelId::generate(),
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identity.
    pub id: CommentId,
    /// Author.
    pub user_id: UserId,
    /// Comment body.
    pub text: String,
    /// Time the comment was written.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with a fresh identifier.
    #[must_use]
    pub fn new(user_id: UserId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::generate(),
            user_id,
            text: text.into(),
            created_at,
        }
    }
}

/// Audit entry recording an action taken on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Free-form action tag, for example `created` or `moved`.
    pub action: String,
    /// Actor.
    pub user_id: UserId,
    /// Time of the action.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates a history entry.
    #[must_use]
    pub fn new(action: impl Into<String>, user_id: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            action: action.into(),
            user_id,
            timestamp,
        }
    }
}
