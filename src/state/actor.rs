//! Actor that owns the [`Reducer`] and serialises every state change.

use super::{Applied, Intent, Outcome, Reducer, RequestId, Slice, Snapshot};
use crate::board::domain::BoardId;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

/// Message accepted by the store actor.
#[derive(Debug)]
pub(super) enum Command {
    Begin {
        intent: Intent,
        reply: oneshot::Sender<RequestId>,
    },
    Complete {
        request: RequestId,
        outcome: Outcome,
        reply: oneshot::Sender<Applied>,
    },
    SelectBoard {
        id: BoardId,
        reply: oneshot::Sender<bool>,
    },
    Abandon(RequestId),
    ClearSelection,
    ClearError(Slice),
}

/// Sole owner of the reducer.
#[derive(Debug)]
pub(super) struct Actor {
    reducer: Reducer,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
}

impl Actor {
    pub(super) const fn new(
        reducer: Reducer,
        commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<Snapshot>,
    ) -> Self {
        Self {
            reducer,
            commands,
            snapshots,
        }
    }

    /// Drains commands until every sender is dropped, publishing the
    /// snapshot after each one.
    pub(super) async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            let reply = handle(&mut self.reducer, command);
            self.snapshots.send_replace(self.reducer.snapshot().clone());
            if let Some(request) = reply.send() {
                self.reducer.abandon(request);
                self.snapshots.send_replace(self.reducer.snapshot().clone());
            }
        }
        debug!(
            in_flight = self.reducer.in_flight(),
            "state store actor stopped"
        );
    }
}

fn handle(reducer: &mut Reducer, command: Command) -> Reply {
    match command {
        Command::Begin { intent, reply } => Reply::Begun(reply, reducer.begin(&intent)),
        Command::Complete {
            request,
            outcome,
            reply,
        } => Reply::Completed(reply, reducer.complete(request, outcome)),
        Command::SelectBoard { id, reply } => Reply::Selected(reply, reducer.select_board(&id)),
        Command::Abandon(request) => {
            reducer.abandon(request);
            Reply::Nothing
        }
        Command::ClearSelection => {
            reducer.clear_selection();
            Reply::Nothing
        }
        Command::ClearError(slice) => {
            reducer.clear_error(slice);
            Reply::Nothing
        }
    }
}

/// Reply held back until the snapshot reflecting it has been published.
enum Reply {
    Begun(oneshot::Sender<RequestId>, RequestId),
    Completed(oneshot::Sender<Applied>, Applied),
    Selected(oneshot::Sender<bool>, bool),
    Nothing,
}

impl Reply {
    /// Delivers the reply.
    ///
    /// Returns the request of a pending phase whose caller is gone; nobody
    /// will complete it.
    fn send(self) -> Option<RequestId> {
        let (delivered, orphaned) = match self {
            Self::Begun(reply, request) => {
                let delivered = reply.send(request).is_ok();
                (delivered, (!delivered).then_some(request))
            }
            Self::Completed(reply, applied) => (reply.send(applied).is_ok(), None),
            Self::Selected(reply, selected) => (reply.send(selected).is_ok(), None),
            Self::Nothing => (true, None),
        };
        // Any other state change stands even when the caller stopped waiting.
        if !delivered {
            debug!("caller dropped before the reply was sent");
        }
        orphaned
    }
}
