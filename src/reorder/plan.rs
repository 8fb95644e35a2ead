//! Pure planning of drop events.

use crate::board::domain::ColumnId;
use crate::task::domain::TaskId;

/// Position of a card on the board: a column and an index within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    /// Column holding the card.
    pub column_id: ColumnId,
    /// Index of the card within the column.
    pub index: usize,
}

impl DragLocation {
    /// Creates a location.
    #[must_use]
    pub const fn new(column_id: ColumnId, index: usize) -> Self {
        Self { column_id, index }
    }
}

/// Completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Dragged task.
    pub task_id: TaskId,
    /// Where the card was picked up.
    pub source: DragLocation,
    /// Where the card was dropped; `None` when the drop target was invalid.
    pub destination: Option<DragLocation>,
}

impl DropEvent {
    /// Creates a drop onto `destination`.
    #[must_use]
    pub const fn new(task_id: TaskId, source: DragLocation, destination: DragLocation) -> Self {
        Self {
            task_id,
            source,
            destination: Some(destination),
        }
    }

    /// Creates a drop outside any valid target.
    #[must_use]
    pub const fn cancelled(task_id: TaskId, source: DragLocation) -> Self {
        Self {
            task_id,
            source,
            destination: None,
        }
    }
}

/// Why a drop results in no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The card was dropped outside any column.
    NoDestination,
    /// The card was dropped where it was picked up.
    Unchanged,
}

/// What a drop should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Nothing changes and nothing is written.
    Ignore(IgnoreReason),
    /// The task is filed in `column_id`.
    Move {
        /// Dragged task.
        task_id: TaskId,
        /// Destination column, possibly the source column.
        column_id: ColumnId,
    },
}

/// Plans a drop.
///
/// A drop at a different index of the same column is still planned as a
/// move.
#[must_use]
pub fn plan_drop(event: &DropEvent) -> DropPlan {
    let Some(destination) = &event.destination else {
        return DropPlan::Ignore(IgnoreReason::NoDestination);
    };
    if *destination == event.source {
        return DropPlan::Ignore(IgnoreReason::Unchanged);
    }
    DropPlan::Move {
        task_id: event.task_id.clone(),
        column_id: destination.column_id.clone(),
    }
}
