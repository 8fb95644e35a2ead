//! Board columns.

use super::ColumnId;
use serde::{Deserialize, Serialize};

/// A named bucket within a board that tasks are filed into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Identifier, unique within the board.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Position of the column on the board, ascending left to right.
    pub order: u32,
}

impl Column {
    /// Creates a column.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.into(),
            order,
        }
    }

    /// Returns the conventional three-column layout for a new board.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("todo", "To Do", 0),
            Self::new("in-progress", "In Progress", 1),
            Self::new("done", "Done", 2),
        ]
    }
}
