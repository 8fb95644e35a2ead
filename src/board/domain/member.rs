//! Board membership and roles.

use super::ParseRoleError;
use crate::identity::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a member holds on a board.
///
/// Roles are carried as tags only; nothing in this crate enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Created the board.
    Owner,
    /// May edit the board and its tasks.
    Editor,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Self; 3] = [Self::Owner, Self::Editor, Self::Viewer];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's membership of a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Member identity.
    pub user_id: UserId,
    /// Role held on the board.
    pub role: Role,
}

impl Member {
    /// Creates a membership.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates an owner membership.
    #[must_use]
    pub const fn owner(user_id: UserId) -> Self {
        Self::new(user_id, Role::Owner)
    }
}
