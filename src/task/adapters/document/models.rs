//! Serde document models for task persistence.

use crate::board::domain::{BoardId, ColumnId};
use crate::task::domain::{
    Comment, HistoryEntry, Label, PersistedTaskData, Task, TaskDraft, TaskId, TaskPatch,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full task document as written on create and read on fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct TaskDocument {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl TaskDocument {
    pub(super) fn from_draft(draft: &TaskDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            board_id: draft.board_id().clone(),
            column_id: draft.column_id().clone(),
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            labels: draft.labels().to_vec(),
            deadline: draft.deadline(),
            comments: draft.comments().to_vec(),
            history: draft.history().to_vec(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub(super) fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            board_id: self.board_id,
            column_id: self.column_id,
            title: self.title,
            description: self.description,
            labels: self.labels,
            deadline: self.deadline,
            comments: self.comments,
            history: self.history,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Partial task document sent on update; only set fields are written.
///
/// A cleared deadline is written as an explicit `null`.
#[derive(Debug, Clone, Serialize)]
pub(super) struct TaskPatchDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<&'a [Label]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<&'a [Comment]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<&'a [HistoryEntry]>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl<'a> TaskPatchDocument<'a> {
    pub(super) fn new(patch: &'a TaskPatch, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: patch.title(),
            description: patch.description(),
            labels: patch.labels(),
            deadline: patch
                .deadline()
                .map(|deadline| deadline.map(|at| at.timestamp_millis())),
            comments: patch.comments(),
            history: patch.history(),
            updated_at: timestamp,
        }
    }
}

/// Column reassignment written by a move.
#[derive(Debug, Clone, Serialize)]
pub(super) struct TaskMoveDocument<'a> {
    pub column_id: &'a ColumnId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}
