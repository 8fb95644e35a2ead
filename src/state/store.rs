//! Handle through which callers drive the state store.

use super::{
    Applied, Confirmed, Intent, Outcome, Reducer, RequestId, Slice, Snapshot, SyncError,
    SyncResult,
    actor::{Actor, Command},
};
use crate::board::{
    domain::{BoardDraft, BoardId, BoardPatch, BoardVisibility, ColumnId, Member},
    ports::BoardRepository,
};
use crate::config::SyncConfig;
use crate::identity::{IdentityProvider, UserId};
use crate::task::{
    domain::{TaskDraft, TaskId, TaskPatch},
    ports::TaskRepository,
};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// Board and task state kept in step with the remote store.
///
/// Every mutation entry point runs the pending phase, awaits exactly one
/// repository call, and then runs the fulfilled or rejected phase. Entry
/// points may be called concurrently; their completions are applied in the
/// order they arrive, subject to [`SyncConfig::response_ordering`].
///
/// Clones share the same state.
pub struct StateStore<B, T, I> {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    boards: Arc<B>,
    tasks: Arc<T>,
    identity: Arc<I>,
    validate_column_moves: bool,
    board_visibility: BoardVisibility,
}

impl<B, T, I> Clone for StateStore<B, T, I> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            snapshots: self.snapshots.clone(),
            boards: Arc::clone(&self.boards),
            tasks: Arc::clone(&self.tasks),
            identity: Arc::clone(&self.identity),
            validate_column_moves: self.validate_column_moves,
            board_visibility: self.board_visibility,
        }
    }
}

impl<B, T, I> std::fmt::Debug for StateStore<B, T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("validate_column_moves", &self.validate_column_moves)
            .field("board_visibility", &self.board_visibility)
            .finish_non_exhaustive()
    }
}

impl<B, T, I> StateStore<B, T, I>
where
    B: BoardRepository,
    T: TaskRepository,
    I: IdentityProvider,
{
    /// Starts the store actor and returns a handle to it.
    ///
    /// Must be called from within a Tokio runtime. The actor stops once the
    /// last handle is dropped.
    #[must_use]
    pub fn new(boards: Arc<B>, tasks: Arc<T>, identity: Arc<I>, config: &SyncConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
        let reducer = Reducer::new(config.response_ordering, config.optimistic_moves);
        tokio::spawn(Actor::new(reducer, command_rx, snapshot_tx).run());
        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            boards,
            tasks,
            identity,
            validate_column_moves: config.validate_column_moves,
            board_visibility: config.board_visibility,
        }
    }

    /// Returns the latest published state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Returns a receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Makes a loaded board current without fetching it.
    ///
    /// Returns `false`, leaving no board selected, when the board is not in
    /// the loaded list.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] when the actor has stopped.
    pub async fn select_board(&self, id: &BoardId) -> SyncResult<bool> {
        self.request(|reply| Command::SelectBoard {
            id: id.clone(),
            reply,
        })
        .await
    }

    /// Clears the current board.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] when the actor has stopped.
    pub async fn clear_selection(&self) -> SyncResult<()> {
        self.send(Command::ClearSelection).await
    }

    /// Dismisses the error recorded on a slice.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] when the actor has stopped.
    pub async fn clear_error(&self, slice: Slice) -> SyncResult<()> {
        self.send(Command::ClearError(slice)).await
    }

    /// Creates a board, prepends it to the list, and makes it current.
    ///
    /// A draft without members is stamped with the signed-in user as owner.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the board
    /// slice.
    pub async fn create_board(&self, draft: BoardDraft) -> SyncResult<Applied> {
        let stamped = self.stamp_owner(draft).await;
        self.execute(Intent::CreateBoard, async {
            let board = self.boards.create(stamped).await?;
            Ok::<_, SyncError>(Confirmed::BoardCreated(board))
        })
        .await
    }

    /// Updates a board and merges the patch into the list and current board.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the board
    /// slice.
    pub async fn update_board(&self, id: &BoardId, patch: BoardPatch) -> SyncResult<Applied> {
        self.execute(Intent::UpdateBoard(id.clone()), async {
            self.boards.update(id, &patch).await?;
            Ok::<_, SyncError>(Confirmed::BoardUpdated {
                id: id.clone(),
                patch,
            })
        })
        .await
    }

    /// Deletes a board; clears the selection when it was current.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the board
    /// slice.
    pub async fn delete_board(&self, id: &BoardId) -> SyncResult<Applied> {
        self.execute(Intent::DeleteBoard(id.clone()), async {
            self.boards.delete(id).await?;
            Ok::<_, SyncError>(Confirmed::BoardDeleted(id.clone()))
        })
        .await
    }

    /// Replaces the board list with the boards of `user`, most recently
    /// updated first.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the board
    /// slice.
    pub async fn fetch_user_boards(&self, user: &UserId) -> SyncResult<Applied> {
        self.execute(Intent::FetchUserBoards, async {
            let boards = self.boards.list_for_user(user, self.board_visibility).await?;
            Ok::<_, SyncError>(Confirmed::BoardsFetched(boards))
        })
        .await
    }

    /// Replaces the board list with the boards of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotSignedIn`] when nobody is signed in, or the
    /// repository failure; either is recorded on the board slice.
    pub async fn fetch_current_user_boards(&self) -> SyncResult<Applied> {
        match self.identity.current_user().await {
            Some(user) => self.fetch_user_boards(&user).await,
            None => self.reject(Intent::FetchUserBoards, SyncError::NotSignedIn).await,
        }
    }

    /// Reads one board and makes it current; none when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the board
    /// slice.
    pub async fn fetch_board(&self, id: &BoardId) -> SyncResult<Applied> {
        self.execute(Intent::FetchBoard(id.clone()), async {
            let board = self.boards.find_by_id(id).await?;
            Ok::<_, SyncError>(Confirmed::BoardFetched(board))
        })
        .await
    }

    /// Creates a task and prepends it to the task list.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the task
    /// slice.
    pub async fn create_task(&self, draft: TaskDraft) -> SyncResult<Applied> {
        self.execute(Intent::CreateTask, async {
            let task = self.tasks.create(draft).await?;
            Ok::<_, SyncError>(Confirmed::TaskCreated(task))
        })
        .await
    }

    /// Updates a task and merges the patch into the task list.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the task
    /// slice; the task's fields are left as they were.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> SyncResult<Applied> {
        self.execute(Intent::UpdateTask(id.clone()), async {
            self.tasks.update(id, &patch).await?;
            Ok::<_, SyncError>(Confirmed::TaskUpdated {
                id: id.clone(),
                patch,
            })
        })
        .await
    }

    /// Deletes a task and removes it from the task list.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the task
    /// slice.
    pub async fn delete_task(&self, id: &TaskId) -> SyncResult<Applied> {
        self.execute(Intent::DeleteTask(id.clone()), async {
            self.tasks.delete(id).await?;
            Ok::<_, SyncError>(Confirmed::TaskDeleted(id.clone()))
        })
        .await
    }

    /// Replaces the task list with the tasks of a board, most recently
    /// created first.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, which is also recorded on the task
    /// slice.
    pub async fn fetch_board_tasks(&self, board_id: &BoardId) -> SyncResult<Applied> {
        self.execute(Intent::FetchBoardTasks(board_id.clone()), async {
            let tasks = self.tasks.list_for_board(board_id).await?;
            Ok::<_, SyncError>(Confirmed::TasksFetched(tasks))
        })
        .await
    }

    /// Files a task in another column. This is the only way a task changes
    /// column.
    ///
    /// With column validation on, the destination is checked against the
    /// loaded board before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnknownColumn`], [`SyncError::TaskNotLoaded`] or
    /// [`SyncError::BoardNotLoaded`] when validation fails, or the
    /// repository failure; each is recorded on the task slice. A move
    /// already applied optimistically is not rolled back.
    pub async fn move_task(&self, id: &TaskId, column_id: &ColumnId) -> SyncResult<Applied> {
        let intent = Intent::MoveTask {
            task_id: id.clone(),
            column_id: column_id.clone(),
        };
        if self.validate_column_moves
            && let Err(err) = self.check_destination(id, column_id)
        {
            return self.reject(intent, err).await;
        }
        self.execute(intent, async {
            self.tasks.move_to_column(id, column_id).await?;
            Ok::<_, SyncError>(Confirmed::TaskMoved {
                id: id.clone(),
                column_id: column_id.clone(),
            })
        })
        .await
    }

    fn check_destination(&self, id: &TaskId, column_id: &ColumnId) -> SyncResult<()> {
        let snapshot = self.snapshots.borrow();
        let task = snapshot
            .tasks()
            .task(id)
            .ok_or_else(|| SyncError::TaskNotLoaded(id.clone()))?;
        let board_id = task.board_id();
        let board = snapshot
            .boards()
            .current_board()
            .filter(|board| board.id() == board_id)
            .or_else(|| snapshot.boards().board(board_id))
            .ok_or_else(|| SyncError::BoardNotLoaded(board_id.clone()))?;
        if board.has_column(column_id) {
            Ok(())
        } else {
            Err(SyncError::UnknownColumn {
                board_id: board_id.clone(),
                column_id: column_id.clone(),
            })
        }
    }

    async fn stamp_owner(&self, draft: BoardDraft) -> BoardDraft {
        if !draft.members().is_empty() {
            return draft;
        }
        match self.identity.current_user().await {
            Some(user) => draft.with_member(Member::owner(user)),
            None => {
                debug!("no signed-in user to stamp as board owner");
                draft
            }
        }
    }

    async fn execute<F>(&self, intent: Intent, call: F) -> SyncResult<Applied>
    where
        F: Future<Output = SyncResult<Confirmed>>,
    {
        let pending = self.begin(intent).await?;
        match call.await {
            Ok(confirmed) => self.complete(pending, Outcome::Fulfilled(confirmed)).await,
            Err(err) => {
                self.complete(pending, Outcome::Rejected(err.to_string()))
                    .await?;
                Err(err)
            }
        }
    }

    async fn reject(&self, intent: Intent, err: SyncError) -> SyncResult<Applied> {
        debug!(mutation = %intent.kind(), error = %err, "mutation rejected before any write");
        let pending = self.begin(intent).await?;
        self.complete(pending, Outcome::Rejected(err.to_string()))
            .await?;
        Err(err)
    }

    async fn begin(&self, intent: Intent) -> SyncResult<PendingRequest> {
        let request = self
            .request(|reply| Command::Begin { intent, reply })
            .await?;
        Ok(PendingRequest::new(self.commands.clone(), request))
    }

    async fn complete(&self, pending: PendingRequest, outcome: Outcome) -> SyncResult<Applied> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Complete {
            request: pending.request,
            outcome,
            reply: reply_tx,
        })
        .await?;
        pending.settle();
        reply_rx.await.map_err(|_| SyncError::Closed)
    }

    async fn request<R>(
        &self,
        make_command: impl FnOnce(oneshot::Sender<R>) -> Command,
    ) -> SyncResult<R> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make_command(reply_tx)).await?;
        reply_rx.await.map_err(|_| SyncError::Closed)
    }

    async fn send(&self, command: Command) -> SyncResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SyncError::Closed)
    }
}

/// A begun request that must reach the actor as a completion.
///
/// Dropping it unsettled, as happens when the caller's future is cancelled
/// while the repository call is in flight, tells the actor to abandon the
/// request so the slice stops loading.
struct PendingRequest {
    commands: mpsc::Sender<Command>,
    request: RequestId,
    settled: bool,
}

impl PendingRequest {
    const fn new(commands: mpsc::Sender<Command>, request: RequestId) -> Self {
        Self {
            commands,
            request,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let request = self.request;
        debug!(%request, "caller stopped waiting; abandoning request");
        match self.commands.try_send(Command::Abandon(request)) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(command)) => match Handle::try_current() {
                Ok(runtime) => {
                    let commands = self.commands.clone();
                    runtime.spawn(async move {
                        if commands.send(command).await.is_err() {
                            debug!(%request, "state store stopped before abandoning request");
                        }
                    });
                }
                Err(_) => warn!(%request, "no runtime to abandon request; slice stays loading"),
            },
        }
    }
}
