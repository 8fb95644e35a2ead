//! Task repository backed by a [`DocumentStore`].

use super::{
    models::{TaskDocument, TaskMoveDocument, TaskPatchDocument},
    schema,
};
use crate::board::domain::{BoardId, ColumnId};
use crate::document::{
    domain::{Collection, Document, DocumentQuery, Filter, OrderBy, from_fields, to_fields},
    ports::DocumentStore,
};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Task repository that maps tasks onto documents in the `tasks` collection.
#[derive(Debug)]
pub struct DocumentTaskRepository<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for DocumentTaskRepository<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> DocumentTaskRepository<S, C>
where
    S: DocumentStore,
    C: Clock,
{
    /// Creates a repository over the given store, stamping times from
    /// `clock`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    fn decode(document: Document) -> TaskRepositoryResult<Task> {
        let id = document.id;
        let model: TaskDocument = from_fields(document.fields)
            .map_err(|err| TaskRepositoryError::decode(id.clone(), &err))?;
        Ok(model.into_task(TaskId::from(id)))
    }
}

#[async_trait]
impl<S, C> TaskRepository for DocumentTaskRepository<S, C>
where
    S: DocumentStore,
    C: Clock,
{
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let timestamp = self.clock.utc();
        let fields = to_fields(&TaskDocument::from_draft(&draft, timestamp))
            .map_err(TaskRepositoryError::persistence)?;
        let created = self.store.create(Collection::Tasks, fields).await?;
        let id = TaskId::from(created.id);
        debug!(
            task_id = %id,
            board_id = %draft.board_id(),
            column_id = %draft.column_id(),
            "task created"
        );
        Ok(draft.into_task(id, timestamp))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskRepositoryResult<()> {
        let fields = to_fields(&TaskPatchDocument::new(patch, self.clock.utc()))
            .map_err(TaskRepositoryError::persistence)?;
        self.store
            .update(Collection::Tasks, &id.to_document_id(), fields)
            .await?;
        debug!(task_id = %id, "task updated");
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.store
            .delete(Collection::Tasks, &id.to_document_id())
            .await?;
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn list_for_board(&self, board_id: &BoardId) -> TaskRepositoryResult<Vec<Task>> {
        let query = DocumentQuery::new()
            .with_filter(Filter::eq(schema::BOARD_ID, board_id.as_str()))
            .ordered_by(OrderBy::descending(schema::CREATED_AT));
        let documents = self.store.query(Collection::Tasks, &query).await?;
        debug!(board_id = %board_id, count = documents.len(), "tasks listed");
        documents.into_iter().map(Self::decode).collect()
    }

    async fn move_to_column(
        &self,
        id: &TaskId,
        column_id: &ColumnId,
    ) -> TaskRepositoryResult<()> {
        let fields = to_fields(&TaskMoveDocument {
            column_id,
            updated_at: self.clock.utc(),
        })
        .map_err(TaskRepositoryError::persistence)?;
        self.store
            .update(Collection::Tasks, &id.to_document_id(), fields)
            .await?;
        debug!(task_id = %id, column_id = %column_id, "task moved");
        Ok(())
    }
}
