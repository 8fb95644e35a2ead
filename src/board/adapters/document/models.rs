//! Serde document models for board persistence.

use crate::board::domain::{
    Board, BoardDraft, BoardId, BoardPatch, Column, Member, PersistedBoardData,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full board document as written on create and read on fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct BoardDocument {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl BoardDocument {
    pub(super) fn from_draft(draft: &BoardDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            columns: draft.columns().to_vec(),
            members: draft.members().to_vec(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub(super) fn into_board(self, id: BoardId) -> Board {
        Board::from_persisted(PersistedBoardData {
            id,
            title: self.title,
            description: self.description,
            columns: self.columns,
            members: self.members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Partial board document sent on update; only set fields are written.
#[derive(Debug, Clone, Serialize)]
pub(super) struct BoardPatchDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<&'a [Column]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<&'a [Member]>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl<'a> BoardPatchDocument<'a> {
    pub(super) fn new(patch: &'a BoardPatch, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: patch.title(),
            description: patch.description(),
            columns: patch.columns(),
            members: patch.members(),
            updated_at: timestamp,
        }
    }
}
