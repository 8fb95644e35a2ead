//! Taskboard: Kanban board and task state kept in step with a remote
//! document store.
//!
//! Boards hold ordered columns and member roles; tasks are filed into
//! exactly one column of one board. The crate keeps an in-memory view of
//! the user's boards and the current board's tasks consistent with the
//! store under overlapping mutations, and turns drag-and-drop gestures into
//! column moves.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`document`]: Remote document store capability and an in-memory store
//! - [`identity`]: Signed-in user capability
//! - [`board`]: Boards, columns, and memberships
//! - [`task`]: Tasks, labels, comments, and history
//! - [`state`]: Single-owner board and task state with three-phase
//!   mutations
//! - [`reorder`]: Drag-and-drop planning and execution
//! - [`view`]: Column-by-column board projection
//! - [`config`]: Synchronisation settings

pub mod board;
pub mod config;
pub mod document;
pub mod identity;
pub mod reorder;
pub mod state;
pub mod task;
pub mod view;

#[cfg(test)]
mod test_support;
