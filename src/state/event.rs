//! Mutation intents, confirmed results, and completion outcomes.

use crate::board::domain::{Board, BoardId, BoardPatch, ColumnId};
use crate::task::domain::{Task, TaskId, TaskPatch};
use std::fmt;

/// State slice a mutation belongs to; loading and error are tracked per
/// slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Board list and current board.
    Boards,
    /// Task list of the current board.
    Tasks,
}

/// Kind of asynchronous mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `createBoard`
    CreateBoard,
    /// `updateBoard`
    UpdateBoard,
    /// `deleteBoard`
    DeleteBoard,
    /// `fetchUserBoards`
    FetchUserBoards,
    /// `fetchBoard`
    FetchBoard,
    /// `createTask`
    CreateTask,
    /// `updateTask`
    UpdateTask,
    /// `deleteTask`
    DeleteTask,
    /// `fetchBoardTasks`
    FetchBoardTasks,
    /// `moveTask`
    MoveTask,
}

impl MutationKind {
    /// Returns the slice whose loading and error state the mutation drives.
    #[must_use]
    pub const fn slice(self) -> Slice {
        match self {
            Self::CreateBoard
            | Self::UpdateBoard
            | Self::DeleteBoard
            | Self::FetchUserBoards
            | Self::FetchBoard => Slice::Boards,
            Self::CreateTask
            | Self::UpdateTask
            | Self::DeleteTask
            | Self::FetchBoardTasks
            | Self::MoveTask => Slice::Tasks,
        }
    }

    /// Returns the operation name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateBoard => "create_board",
            Self::UpdateBoard => "update_board",
            Self::DeleteBoard => "delete_board",
            Self::FetchUserBoards => "fetch_user_boards",
            Self::FetchBoard => "fetch_board",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::FetchBoardTasks => "fetch_board_tasks",
            Self::MoveTask => "move_task",
        }
    }

    /// Returns the prefix of the error text recorded on rejection.
    #[must_use]
    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::CreateBoard => "Failed to create board",
            Self::UpdateBoard => "Failed to update board",
            Self::DeleteBoard => "Failed to delete board",
            Self::FetchUserBoards => "Failed to fetch boards",
            Self::FetchBoard => "Failed to fetch board",
            Self::CreateTask => "Failed to create task",
            Self::UpdateTask => "Failed to update task",
            Self::DeleteTask => "Failed to delete task",
            Self::FetchBoardTasks => "Failed to fetch tasks",
            Self::MoveTask => "Failed to move task",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an issued request, increasing in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub(super) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the issue sequence number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity whose completions are sequenced under
/// [`ResponseOrdering::LatestIssued`](super::ResponseOrdering::LatestIssued).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// The board list as a whole.
    BoardList,
    /// One board, in the list and as current board.
    Board(BoardId),
    /// The task list as a whole.
    TaskList,
    /// One task.
    Task(TaskId),
}

/// Mutation being issued, as seen by the pending phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A board is being created.
    CreateBoard,
    /// A board is being updated.
    UpdateBoard(BoardId),
    /// A board is being deleted.
    DeleteBoard(BoardId),
    /// The board list is being fetched.
    FetchUserBoards,
    /// One board is being fetched.
    FetchBoard(BoardId),
    /// A task is being created.
    CreateTask,
    /// A task is being updated.
    UpdateTask(TaskId),
    /// A task is being deleted.
    DeleteTask(TaskId),
    /// The task list of a board is being fetched.
    FetchBoardTasks(BoardId),
    /// A task is being moved to a column.
    MoveTask {
        /// Task being moved.
        task_id: TaskId,
        /// Destination column.
        column_id: ColumnId,
    },
}

impl Intent {
    /// Returns the mutation kind.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::CreateBoard => MutationKind::CreateBoard,
            Self::UpdateBoard(_) => MutationKind::UpdateBoard,
            Self::DeleteBoard(_) => MutationKind::DeleteBoard,
            Self::FetchUserBoards => MutationKind::FetchUserBoards,
            Self::FetchBoard(_) => MutationKind::FetchBoard,
            Self::CreateTask => MutationKind::CreateTask,
            Self::UpdateTask(_) => MutationKind::UpdateTask,
            Self::DeleteTask(_) => MutationKind::DeleteTask,
            Self::FetchBoardTasks(_) => MutationKind::FetchBoardTasks,
            Self::MoveTask { .. } => MutationKind::MoveTask,
        }
    }

    /// Returns the entity the mutation targets, if it targets an existing
    /// one.
    #[must_use]
    pub fn entity(&self) -> Option<EntityKey> {
        match self {
            Self::CreateBoard | Self::CreateTask => None,
            Self::UpdateBoard(id) | Self::DeleteBoard(id) | Self::FetchBoard(id) => {
                Some(EntityKey::Board(id.clone()))
            }
            Self::FetchUserBoards => Some(EntityKey::BoardList),
            Self::UpdateTask(id) | Self::DeleteTask(id) => Some(EntityKey::Task(id.clone())),
            Self::MoveTask { task_id, .. } => Some(EntityKey::Task(task_id.clone())),
            Self::FetchBoardTasks(_) => Some(EntityKey::TaskList),
        }
    }
}

/// Result confirmed by a repository, applied in the fulfilled phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    /// The created board, as echoed by the repository.
    BoardCreated(Board),
    /// A board patch was written.
    BoardUpdated {
        /// Updated board.
        id: BoardId,
        /// Fields written.
        patch: BoardPatch,
    },
    /// A board was deleted.
    BoardDeleted(BoardId),
    /// The board list returned by the store, in store order.
    BoardsFetched(Vec<Board>),
    /// The board returned by a lookup, if it exists.
    BoardFetched(Option<Board>),
    /// The created task, as echoed by the repository.
    TaskCreated(Task),
    /// A task patch was written.
    TaskUpdated {
        /// Updated task.
        id: TaskId,
        /// Fields written.
        patch: TaskPatch,
    },
    /// A task was deleted.
    TaskDeleted(TaskId),
    /// The task list returned by the store, in store order.
    TasksFetched(Vec<Task>),
    /// A task was filed in another column.
    TaskMoved {
        /// Moved task.
        id: TaskId,
        /// Destination column.
        column_id: ColumnId,
    },
}

/// Completion of an issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The repository confirmed the mutation.
    Fulfilled(Confirmed),
    /// The repository failed; carries the failure's display text.
    Rejected(String),
}

/// What the reducer did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The confirmed result was merged into state.
    Fulfilled,
    /// The failure was recorded on the slice.
    Rejected,
    /// A newer completion for the same entity was already applied; state
    /// was left unchanged.
    Stale,
    /// The request was not in flight.
    Unknown,
}
