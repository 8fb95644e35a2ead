//! Domain model for boards.
//!
//! Board drafts and patches validate the column invariants (at least one
//! column, unique column identities) before anything reaches the store.

mod board;
mod column;
mod error;
mod ids;
mod member;
mod visibility;

pub use board::{Board, BoardDraft, BoardPatch, PersistedBoardData, validate_columns};
pub use column::Column;
pub use error::{BoardDomainError, ParseRoleError};
pub use ids::{BoardId, ColumnId};
pub use member::{Member, Role};
pub use visibility::BoardVisibility;
