//! Task aggregate root, creation drafts, and partial updates.

use super::{Comment, HistoryEntry, Label, TaskDomainError, TaskId};
use crate::board::domain::{BoardId, ColumnId};
use chrono::{DateTime, Utc};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: String,
    labels: Vec<Label>,
    deadline: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    history: Vec<HistoryEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning board.
    pub board_id: BoardId,
    /// Column the task is filed in.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted labels.
    pub labels: Vec<Label>,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted comments, oldest first.
    pub comments: Vec<Comment>,
    /// Persisted history, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            labels: data.labels,
            deadline: data.deadline,
            comments: data.comments,
            history: data.history,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// Returns the column the task is filed in.
    #[must_use]
    pub const fn column_id(&self) -> &ColumnId {
        &self.column_id
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

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
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

    /// Merges the fields set on the patch into this task.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = &patch.description {
            description.clone_into(&mut self.description);
        }
        if let Some(labels) = &patch.labels {
            labels.clone_into(&mut self.labels);
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(comments) = &patch.comments {
            comments.clone_into(&mut self.comments);
        }
        if let Some(history) = &patch.history {
            history.clone_into(&mut self.history);
        }
    }

    /// Files the task in another column.
    pub fn move_to(&mut self, column_id: ColumnId) {
        self.column_id = column_id;
    }
}

/// Fields supplied by the caller when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: String,
    labels: Vec<Label>,
    deadline: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    history: Vec<HistoryEntry>,
}

impl TaskDraft {
    /// Creates a validated draft filed in `column_id` of `board_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::BlankColumn`] for a blank column reference.
    pub fn new(
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        if column_id.is_blank() {
            return Err(TaskDomainError::BlankColumn);
        }
        Ok(Self {
            board_id,
            column_id,
            title: validate_title(title.into())?,
            description: String::new(),
            labels: Vec::new(),
            deadline: None,
            comments: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Adds a history entry.
    #[must_use]
    pub fn with_history_entry(mut self, entry: HistoryEntry) -> Self {
        self.history.push(entry);
        self
    }

    /// Adds a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// Returns the column the task will be filed in.
    #[must_use]
    pub const fn column_id(&self) -> &ColumnId {
        &self.column_id
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

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the comments.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the history.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Builds the task the store will hold once the draft is written.
    #[must_use]
    pub fn into_task(self, id: TaskId, timestamp: DateTime<Utc>) -> Task {
        Task {
            id,
            board_id: self.board_id,
            column_id: self.column_id,
            title: self.title,
            description: self.description,
            labels: self.labels,
            deadline: self.deadline,
            comments: self.comments,
            history: self.history,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

/// Partial task update; unset fields are left untouched.
///
/// There is no column field: a task changes column only through a move.
/// Fields are only set through the builders, so a patch never carries a
/// blank title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    labels: Option<Vec<Label>>,
    deadline: Option<Option<DateTime<Utc>>>,
    comments: Option<Vec<Comment>>,
    history: Option<Vec<HistoryEntry>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.title = Some(validate_title(title.into())?);
        Ok(self)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    /// Sets or clears the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments = Some(comments.into_iter().collect());
        self
    }

    /// Sets the history.
    #[must_use]
    pub fn with_history(mut self, history: impl IntoIterator<Item = HistoryEntry>) -> Self {
        self.history = Some(history.into_iter().collect());
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

    /// Returns the replacement labels.
    #[must_use]
    pub fn labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    /// Returns the replacement deadline; `Some(None)` clears it.
    #[must_use]
    pub const fn deadline(&self) -> Option<Option<DateTime<Utc>>> {
        self.deadline
    }

    /// Returns the replacement comments.
    #[must_use]
    pub fn comments(&self) -> Option<&[Comment]> {
        self.comments.as_deref()
    }

    /// Returns the replacement history.
    #[must_use]
    pub fn history(&self) -> Option<&[HistoryEntry]> {
        self.history.as_deref()
    }

    /// Returns `true` when the patch sets no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.deadline.is_none()
            && self.comments.is_none()
            && self.history.is_none()
    }
}

fn validate_title(title: String) -> Result<String, TaskDomainError> {
    if title.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(title)
}
