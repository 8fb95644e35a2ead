//! Executes drop plans against a [`TaskMover`].

use super::{DropEvent, DropPlan, IgnoreReason, plan_drop};
use crate::board::domain::ColumnId;
use crate::board::ports::BoardRepository;
use crate::identity::IdentityProvider;
use crate::state::{Applied, StateStore, SyncResult};
use crate::task::{domain::TaskId, ports::TaskRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Something that can file a task in a column.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskMover: Send + Sync {
    /// Files the task in the column.
    ///
    /// # Errors
    ///
    /// Returns the failure of the move.
    async fn move_task(&self, task_id: &TaskId, column_id: &ColumnId) -> SyncResult<Applied>;
}

#[async_trait]
impl<B, T, I> TaskMover for StateStore<B, T, I>
where
    B: BoardRepository,
    T: TaskRepository,
    I: IdentityProvider,
{
    async fn move_task(&self, task_id: &TaskId, column_id: &ColumnId) -> SyncResult<Applied> {
        Self::move_task(self, task_id, column_id).await
    }
}

/// Result of handling a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No move was issued.
    Ignored(IgnoreReason),
    /// One move was issued and completed.
    Moved(Applied),
}

/// Turns drop events into task moves.
#[derive(Debug)]
pub struct ReorderEngine<M> {
    mover: Arc<M>,
}

impl<M> Clone for ReorderEngine<M> {
    fn clone(&self) -> Self {
        Self {
            mover: Arc::clone(&self.mover),
        }
    }
}

impl<M: TaskMover> ReorderEngine<M> {
    /// Creates an engine issuing moves through `mover`.
    #[must_use]
    pub const fn new(mover: Arc<M>) -> Self {
        Self { mover }
    }

    /// Handles a completed drag gesture.
    ///
    /// Awaits exactly one move for a planned move and none otherwise.
    ///
    /// # Errors
    ///
    /// Returns the failure of the move.
    pub async fn handle_drop(&self, event: &DropEvent) -> SyncResult<DropOutcome> {
        match plan_drop(event) {
            DropPlan::Ignore(reason) => {
                debug!(task_id = %event.task_id, ?reason, "drop ignored");
                Ok(DropOutcome::Ignored(reason))
            }
            DropPlan::Move { task_id, column_id } => {
                debug!(%task_id, %column_id, "drop moves task");
                let applied = self.mover.move_task(&task_id, &column_id).await?;
                Ok(DropOutcome::Moved(applied))
            }
        }
    }
}
