//! Which boards a user's listing includes.

use serde::{Deserialize, Serialize};

/// Membership scope applied when listing a user's boards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardVisibility {
    /// Boards the user owns.
    #[default]
    Owned,
    /// Boards the user belongs to under any role.
    Member,
}
