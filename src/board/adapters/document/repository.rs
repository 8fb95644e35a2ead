//! Board repository backed by a [`DocumentStore`].

use super::{
    models::{BoardDocument, BoardPatchDocument},
    schema,
};
use crate::board::{
    domain::{Board, BoardDraft, BoardId, BoardPatch, BoardVisibility, Member, Role},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::document::{
    domain::{Collection, Document, DocumentQuery, Filter, OrderBy, from_fields, to_fields},
    ports::DocumentStore,
};
use crate::identity::UserId;
use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Board repository that maps boards onto documents in the `boards`
/// collection.
#[derive(Debug)]
pub struct DocumentBoardRepository<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for DocumentBoardRepository<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> DocumentBoardRepository<S, C>
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

    fn membership_filter(
        user: &UserId,
        visibility: BoardVisibility,
    ) -> BoardRepositoryResult<Filter> {
        let encode =
            |member: Member| serde_json::to_value(member).map_err(BoardRepositoryError::persistence);
        match visibility {
            BoardVisibility::Owned => Ok(Filter::array_contains(
                schema::MEMBERS,
                encode(Member::owner(user.clone()))?,
            )),
            BoardVisibility::Member => {
                let candidates = Role::ALL
                    .into_iter()
                    .map(|role| encode(Member::new(user.clone(), role)))
                    .collect::<BoardRepositoryResult<Vec<Value>>>()?;
                Ok(Filter::array_contains_any(schema::MEMBERS, candidates))
            }
        }
    }

    fn decode(document: Document) -> BoardRepositoryResult<Board> {
        let id = document.id;
        let model: BoardDocument = from_fields(document.fields)
            .map_err(|err| BoardRepositoryError::decode(id.clone(), &err))?;
        Ok(model.into_board(BoardId::from(id)))
    }
}

#[async_trait]
impl<S, C> BoardRepository for DocumentBoardRepository<S, C>
where
    S: DocumentStore,
    C: Clock,
{
    async fn create(&self, draft: BoardDraft) -> BoardRepositoryResult<Board> {
        let timestamp = self.clock.utc();
        let fields = to_fields(&BoardDocument::from_draft(&draft, timestamp))
            .map_err(BoardRepositoryError::persistence)?;
        let created = self.store.create(Collection::Boards, fields).await?;
        let id = BoardId::from(created.id);
        debug!(board_id = %id, title = draft.title(), "board created");
        Ok(draft.into_board(id, timestamp))
    }

    async fn update(&self, id: &BoardId, patch: &BoardPatch) -> BoardRepositoryResult<()> {
        let fields = to_fields(&BoardPatchDocument::new(patch, self.clock.utc()))
            .map_err(BoardRepositoryError::persistence)?;
        self.store
            .update(Collection::Boards, &id.to_document_id(), fields)
            .await?;
        debug!(board_id = %id, "board updated");
        Ok(())
    }

    async fn delete(&self, id: &BoardId) -> BoardRepositoryResult<()> {
        self.store
            .delete(Collection::Boards, &id.to_document_id())
            .await?;
        debug!(board_id = %id, "board deleted");
        Ok(())
    }

    async fn find_by_id(&self, id: &BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.store
            .get(Collection::Boards, &id.to_document_id())
            .await?
            .map(Self::decode)
            .transpose()
    }

    async fn list_for_user(
        &self,
        user: &UserId,
        visibility: BoardVisibility,
    ) -> BoardRepositoryResult<Vec<Board>> {
        let query = DocumentQuery::new()
            .with_filter(Self::membership_filter(user, visibility)?)
            .ordered_by(OrderBy::descending(schema::UPDATED_AT));
        let documents = self.store.query(Collection::Boards, &query).await?;
        debug!(user_id = %user, ?visibility, count = documents.len(), "boards listed");
        documents.into_iter().map(Self::decode).collect()
    }
}
