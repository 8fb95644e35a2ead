//! Drag-and-drop reordering.
//!
//! A completed drag gesture is planned by [`plan_drop`] and carried out by
//! [`ReorderEngine`], which issues at most one move per gesture. Only the
//! destination column is persisted; a card's position within a column is
//! not stored.

mod engine;
mod plan;

pub use engine::{DropOutcome, ReorderEngine, TaskMover};
pub use plan::{DragLocation, DropEvent, DropPlan, IgnoreReason, plan_drop};

#[cfg(test)]
pub use engine::MockTaskMover;

#[cfg(test)]
mod tests;
