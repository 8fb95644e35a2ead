//! Pure three-phase state machine applied by the store actor.
//!
//! Every mutation passes through `begin` (pending) and then `complete`
//! (fulfilled or rejected). The reducer never performs I/O and never rolls
//! back: a rejection records error text and leaves state as it was.

use super::{
    Applied, BoardSlice, Confirmed, EntityKey, Intent, MutationKind, Outcome, RequestId, Slice,
    Snapshot, TaskSlice,
};
use crate::board::domain::{BoardId, ColumnId};
use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Policy for completions that arrive out of issue order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Completions are applied in the order they arrive; the last one to
    /// complete determines the final state.
    #[default]
    LastCompleted,
    /// A completion is discarded when a later-issued request for the same
    /// entity has already been applied.
    LatestIssued,
}

#[derive(Debug, Clone)]
struct InFlight {
    kind: MutationKind,
    entity: Option<EntityKey>,
}

/// Single-owner board and task state.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    snapshot: Snapshot,
    ordering: ResponseOrdering,
    optimistic_moves: bool,
    next_request: u64,
    in_flight: HashMap<RequestId, InFlight>,
    latest_applied: HashMap<EntityKey, RequestId>,
}

impl Reducer {
    /// Creates an empty reducer.
    #[must_use]
    pub fn new(ordering: ResponseOrdering, optimistic_moves: bool) -> Self {
        Self {
            ordering,
            optimistic_moves,
            ..Self::default()
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the number of requests awaiting completion.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    #[cfg(test)]
    #[must_use]
    pub(super) fn sequenced_entities(&self) -> usize {
        self.latest_applied.len()
    }

    /// Enters the pending phase of a mutation.
    ///
    /// Marks the mutation's slice as loading and clears its error. With
    /// optimistic moves enabled, a move is applied immediately.
    pub fn begin(&mut self, intent: &Intent) -> RequestId {
        self.next_request += 1;
        let request = RequestId::new(self.next_request);
        let kind = intent.kind();
        self.in_flight.insert(
            request,
            InFlight {
                kind,
                entity: intent.entity(),
            },
        );
        self.set_error(kind.slice(), None);
        self.refresh_loading();

        if let Intent::MoveTask { task_id, column_id } = intent
            && self.optimistic_moves
        {
            self.apply_optimistic_move(request, task_id, column_id);
        }

        debug!(mutation = %kind, %request, "mutation pending");
        request
    }

    /// Completes an in-flight mutation.
    pub fn complete(&mut self, request: RequestId, outcome: Outcome) -> Applied {
        let Some(in_flight) = self.in_flight.remove(&request) else {
            warn!(%request, "completion for unknown request ignored");
            return Applied::Unknown;
        };
        self.refresh_loading();
        let kind = in_flight.kind;

        if self.is_stale(request, in_flight.entity.as_ref()) {
            warn!(mutation = %kind, %request, "stale completion discarded");
            return Applied::Stale;
        }
        if let Some(entity) = in_flight.entity {
            self.latest_applied.insert(entity, request);
        }

        match outcome {
            Outcome::Fulfilled(confirmed) => {
                self.apply(confirmed);
                info!(mutation = %kind, %request, "mutation fulfilled");
                Applied::Fulfilled
            }
            Outcome::Rejected(reason) => {
                let message = format!("{}: {reason}", kind.failure_label());
                warn!(mutation = %kind, %request, error = %message, "mutation rejected");
                self.set_error(kind.slice(), Some(message));
                Applied::Rejected
            }
        }
    }

    /// Drops an in-flight request whose caller stopped waiting for it.
    ///
    /// State, errors and response sequencing are left as they were; only the
    /// loading flags are refreshed. Returns `false` when the request was not
    /// in flight.
    pub fn abandon(&mut self, request: RequestId) -> bool {
        let Some(in_flight) = self.in_flight.remove(&request) else {
            return false;
        };
        self.refresh_loading();
        debug!(mutation = %in_flight.kind, %request, "mutation abandoned");
        true
    }

    /// Makes a loaded board current.
    ///
    /// Returns `false` and clears the selection when the board is not in the
    /// loaded list; no fetch is made.
    pub fn select_board(&mut self, id: &BoardId) -> bool {
        let found = self.snapshot.boards.board(id).cloned();
        let selected = found.is_some();
        if !selected {
            warn!(board_id = %id, "selected board is not loaded");
        }
        self.snapshot.boards.current_board = found;
        selected
    }

    /// Clears the current board.
    pub fn clear_selection(&mut self) {
        self.snapshot.boards.current_board = None;
    }

    /// Dismisses the error recorded on a slice.
    pub fn clear_error(&mut self, slice: Slice) {
        self.set_error(slice, None);
    }

    fn is_stale(&self, request: RequestId, entity: Option<&EntityKey>) -> bool {
        match (self.ordering, entity) {
            (ResponseOrdering::LatestIssued, Some(key)) => self
                .latest_applied
                .get(key)
                .is_some_and(|latest| *latest > request),
            _ => false,
        }
    }

    fn apply(&mut self, confirmed: Confirmed) {
        let BoardSlice {
            boards,
            current_board,
            ..
        } = &mut self.snapshot.boards;
        let TaskSlice { tasks, .. } = &mut self.snapshot.tasks;
        match confirmed {
            Confirmed::BoardCreated(board) => {
                boards.insert(0, board.clone());
                *current_board = Some(board);
            }
            Confirmed::BoardUpdated { id, patch } => {
                boards
                    .iter_mut()
                    .filter(|board| *board.id() == id)
                    .for_each(|board| board.apply_patch(&patch));
                if let Some(current) = current_board.as_mut().filter(|board| *board.id() == id) {
                    current.apply_patch(&patch);
                }
            }
            Confirmed::BoardDeleted(id) => {
                boards.retain(|board| *board.id() != id);
                if current_board.as_ref().is_some_and(|board| *board.id() == id) {
                    *current_board = None;
                }
                self.latest_applied.remove(&EntityKey::Board(id));
            }
            Confirmed::BoardsFetched(fetched) => *boards = fetched,
            Confirmed::BoardFetched(found) => *current_board = found,
            Confirmed::TaskCreated(task) => tasks.insert(0, task),
            Confirmed::TaskUpdated { id, patch } => tasks
                .iter_mut()
                .filter(|task| *task.id() == id)
                .for_each(|task| task.apply_patch(&patch)),
            Confirmed::TaskDeleted(id) => {
                tasks.retain(|task| *task.id() != id);
                self.latest_applied.remove(&EntityKey::Task(id));
            }
            Confirmed::TasksFetched(fetched) => *tasks = fetched,
            Confirmed::TaskMoved { id, column_id } => tasks
                .iter_mut()
                .filter(|task| *task.id() == id)
                .for_each(|task| task.move_to(column_id.clone())),
        }
    }

    fn apply_optimistic_move(
        &mut self,
        request: RequestId,
        task_id: &TaskId,
        column_id: &ColumnId,
    ) {
        let Some(task) = self
            .snapshot
            .tasks
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
        else {
            return;
        };
        task.move_to(column_id.clone());
        debug!(%request, %task_id, %column_id, "move applied optimistically");
    }

    fn set_error(&mut self, slice: Slice, error: Option<String>) {
        match slice {
            Slice::Boards => self.snapshot.boards.error = error,
            Slice::Tasks => self.snapshot.tasks.error = error,
        }
    }

    fn refresh_loading(&mut self) {
        let pending = |slice: Slice| {
            self.in_flight
                .values()
                .any(|in_flight| in_flight.kind.slice() == slice)
        };
        let boards_loading = pending(Slice::Boards);
        let tasks_loading = pending(Slice::Tasks);
        self.snapshot.boards.loading = boards_loading;
        self.snapshot.tasks.loading = tasks_loading;
    }
}
