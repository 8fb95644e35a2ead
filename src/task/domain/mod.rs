//! Domain model for tasks filed on board columns.
//!
//! A task belongs to exactly one board and one column at a time. Field edits
//! go through [`TaskPatch`]; the column is only ever reassigned by a move.

mod activity;
mod error;
mod ids;
mod task;

pub use activity::{Comment, HistoryEntry, Label};
pub use error::TaskDomainError;
pub use ids::{CommentId, LabelId, TaskId};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
