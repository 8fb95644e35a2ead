//! Board and task state store.
//!
//! A single actor task owns the [`Reducer`] and applies every state change
//! in the order its commands arrive; there are no locks around state.
//! Callers hold a cloneable [`StateStore`] handle, issue mutations through
//! it, and read published [`Snapshot`]s.
//!
//! Each mutation runs three phases:
//!
//! - pending: the slice is marked loading and its error cleared
//! - fulfilled: the confirmed result is merged into state
//! - rejected: the error text is recorded and state is left as it was

mod actor;
mod error;
mod event;
mod reducer;
mod snapshot;
mod store;

pub use error::{SyncError, SyncResult};
pub use event::{Applied, Confirmed, EntityKey, Intent, MutationKind, Outcome, RequestId, Slice};
pub use reducer::{Reducer, ResponseOrdering};
pub use snapshot::{BoardSlice, Snapshot, TaskSlice};
pub use store::StateStore;

#[cfg(test)]
mod tests;
