//! Board aggregate, creation drafts, and partial updates.

use super::{BoardDomainError, BoardId, Column, ColumnId, Member, Role};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    title: String,
    description: String,
    columns: Vec<Column>,
    members: Vec<Member>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted columns, in stored order.
    pub columns: Vec<Column>,
    /// Persisted memberships.
    pub members: Vec<Member>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            columns: data.columns,
            members: data.members,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> &BoardId {
        &self.id
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the board description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the columns in stored order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the columns sorted by their order index.
    #[must_use]
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|column| column.order);
        columns
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    /// Returns `true` when the column belongs to this board.
    #[must_use]
    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Returns the board memberships.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the role held by a user, if they are a member.
    #[must_use]
    pub fn role_of(&self, user_id: &UserId) -> Option<Role> {
        self.members
            .iter()
            .find(|member| &member.user_id == user_id)
            .map(|member| member.role)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merges the fields set in `patch` into this board.
    ///
    /// Timestamps are left alone; the store owns the committed update time.
    pub fn apply_patch(&mut self, patch: &BoardPatch) {
        if let Some(title) = &patch.title {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = &patch.description {
            description.clone_into(&mut self.description);
        }
        if let Some(columns) = &patch.columns {
            columns.clone_into(&mut self.columns);
        }
        if let Some(members) = &patch.members {
            members.clone_into(&mut self.members);
        }
    }
}

/// Fields supplied by the caller when creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    title: String,
    description: String,
    columns: Vec<Column>,
    members: Vec<Member>,
}

impl BoardDraft {
    /// Creates a validated draft.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for a blank title and the
    /// column errors of [`validate_columns`] for an invalid column set.
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Result<Self, BoardDomainError> {
        let validated_title = validate_title(title.into())?;
        validate_columns(&columns)?;
        Ok(Self {
            title: validated_title,
            description: String::new(),
            columns,
            members: Vec::new(),
        })
    }

    /// Creates a draft with the conventional to-do / in-progress / done columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for a blank title.
    pub fn with_default_columns(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        Self::new(title, Column::defaults())
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a membership.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Replaces the memberships.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the memberships.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Builds the board the store will hold once the draft is written.
    #[must_use]
    pub fn into_board(self, id: BoardId, timestamp: DateTime<Utc>) -> Board {
        Board {
            id,
            title: self.title,
            description: self.description,
            columns: self.columns,
            members: self.members,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

/// Partial board update; unset fields are left untouched.
///
/// Fields are only set through the validating builders, so a patch never
/// carries a blank title or an invalid column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    title: Option<String>,
    description: Option<String>,
    columns: Option<Vec<Column>>,
    members: Option<Vec<Member>>,
}

impl BoardPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for a blank title.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        self.title = Some(validate_title(title.into())?);
        Ok(self)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the column set.
    ///
    /// # Errors
    ///
    /// Returns the column errors of [`validate_columns`].
    pub fn with_columns(mut self, columns: Vec<Column>) -> Result<Self, BoardDomainError> {
        validate_columns(&columns)?;
        self.columns = Some(columns);
        Ok(self)
    }

    /// Sets the memberships.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members = Some(members.into_iter().collect());
        self
    }

    /// Returns the replacement title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the replacement description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement column set.
    #[must_use]
    pub fn columns(&self) -> Option<&[Column]> {
        self.columns.as_deref()
    }

    /// Returns the replacement memberships.
    #[must_use]
    pub fn members(&self) -> Option<&[Member]> {
        self.members.as_deref()
    }

    /// Returns `true` when the patch sets no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.columns.is_none()
            && self.members.is_none()
    }
}

fn validate_title(title: String) -> Result<String, BoardDomainError> {
    if title.trim().is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(title)
}

/// Checks the column-set invariants: non-empty, no blank or repeated ids.
///
/// # Errors
///
/// Returns [`BoardDomainError::NoColumns`], [`BoardDomainError::BlankColumnId`]
/// or [`BoardDomainError::DuplicateColumn`].
pub fn validate_columns(columns: &[Column]) -> Result<(), BoardDomainError> {
    if columns.is_empty() {
        return Err(BoardDomainError::NoColumns);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.id.is_blank() {
            return Err(BoardDomainError::BlankColumnId);
        }
        if !seen.insert(&column.id) {
            return Err(BoardDomainError::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}
