//! Read-only views of the state owned by the store.

use super::Slice;
use crate::board::domain::{Board, BoardId};
use crate::task::domain::{Task, TaskId};

/// Board list, current board, and the board slice's request status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSlice {
    pub(super) boards: Vec<Board>,
    pub(super) current_board: Option<Board>,
    pub(super) loading: bool,
    pub(super) error: Option<String>,
}

impl BoardSlice {
    /// Returns the loaded boards, in the order last produced by the store.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Returns a loaded board by identifier.
    #[must_use]
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id() == id)
    }

    /// Returns the current board, if one is selected.
    #[must_use]
    pub const fn current_board(&self) -> Option<&Board> {
        self.current_board.as_ref()
    }

    /// Returns `true` while a board request is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the error text of the last rejected board request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Task list of the current board and the task slice's request status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSlice {
    pub(super) tasks: Vec<Task>,
    pub(super) loading: bool,
    pub(super) error: Option<String>,
}

impl TaskSlice {
    /// Returns the loaded tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns a loaded task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns `true` while a task request is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the error text of the last rejected task request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Complete read-only state, published after every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub(super) boards: BoardSlice,
    pub(super) tasks: TaskSlice,
}

impl Snapshot {
    /// Returns the board slice.
    #[must_use]
    pub const fn boards(&self) -> &BoardSlice {
        &self.boards
    }

    /// Returns the task slice.
    #[must_use]
    pub const fn tasks(&self) -> &TaskSlice {
        &self.tasks
    }

    /// Returns the error text recorded on a slice.
    #[must_use]
    pub fn error(&self, slice: Slice) -> Option<&str> {
        match slice {
            Slice::Boards => self.boards.error(),
            Slice::Tasks => self.tasks.error(),
        }
    }

    /// Returns `true` while a request of the slice is in flight.
    #[must_use]
    pub const fn loading(&self, slice: Slice) -> bool {
        match slice {
            Slice::Boards => self.boards.loading,
            Slice::Tasks => self.tasks.loading,
        }
    }
}
