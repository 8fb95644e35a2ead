//! In-memory document store.
//!
//! Plays the server role for tests and local runs: it assigns identifiers
//! and commit timestamps, evaluates filters and ordering, and can be told
//! to fail upcoming operations to exercise store-failure paths.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::document::{
    domain::{Collection, CreatedDocument, Document, DocumentId, DocumentQuery, Fields},
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};

/// Store operations, used to target injected failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// `get`
    Get,
    /// `query`
    Query,
}

/// Thread-safe in-memory document store.
///
/// Clones share the same underlying collections.
pub struct InMemoryDocumentStore<C = DefaultClock> {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryDocumentStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryDocumentStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<Collection, Vec<Document>>,
    pending_failures: VecDeque<(StoreOperation, DocumentStoreError)>,
    calls: HashMap<StoreOperation, usize>,
}

impl InMemoryDocumentStore<DefaultClock> {
    /// Creates an empty store stamping commit times from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryDocumentStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryDocumentStore<C>
where
    C: Clock,
{
    /// Creates an empty store stamping commit times from the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// Failures queue up and are consumed in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn fail_next(
        &self,
        operation: StoreOperation,
        error: DocumentStoreError,
    ) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        state.pending_failures.push_back((operation, error));
        Ok(())
    }

    /// Returns how many times `operation` has been invoked.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn call_count(&self, operation: StoreOperation) -> DocumentStoreResult<usize> {
        let state = self.read_state()?;
        Ok(state.calls.get(&operation).copied().unwrap_or_default())
    }

    /// Returns the number of documents held in a collection.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn document_count(&self, collection: Collection) -> DocumentStoreResult<usize> {
        let state = self.read_state()?;
        Ok(state.collections.get(&collection).map_or(0, Vec::len))
    }

    fn read_state(
        &self,
    ) -> DocumentStoreResult<std::sync::RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| DocumentStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(
        &self,
    ) -> DocumentStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| DocumentStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    /// Records the call and pops an injected failure for it, if any.
    fn begin_operation(&self, operation: StoreOperation) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        *state.calls.entry(operation).or_default() += 1;
        let position = state
            .pending_failures
            .iter()
            .position(|(pending, _)| *pending == operation);
        if let Some(index) = position
            && let Some((_, error)) = state.pending_failures.remove(index)
        {
            return Err(error);
        }
        Ok(())
    }
}

fn not_found(collection: Collection, id: &DocumentId) -> DocumentStoreError {
    DocumentStoreError::NotFound {
        collection,
        id: id.clone(),
    }
}

#[async_trait]
impl<C> DocumentStore for InMemoryDocumentStore<C>
where
    C: Clock,
{
    async fn create(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DocumentStoreResult<CreatedDocument> {
        self.begin_operation(StoreOperation::Create)?;
        let timestamp = self.clock.utc();
        let id = DocumentId::new(Uuid::new_v4().to_string());
        let mut state = self.write_state()?;
        state.collections.entry(collection).or_default().push(Document {
            id: id.clone(),
            fields,
            created_at: timestamp,
            updated_at: timestamp,
        });
        Ok(CreatedDocument {
            id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> DocumentStoreResult<()> {
        self.begin_operation(StoreOperation::Update)?;
        let timestamp = self.clock.utc();
        let mut state = self.write_state()?;
        let document = state
            .collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|document| &document.id == id))
            .ok_or_else(|| not_found(collection, id))?;
        document.fields.extend(fields);
        document.updated_at = timestamp;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> DocumentStoreResult<()> {
        self.begin_operation(StoreOperation::Delete)?;
        let mut state = self.write_state()?;
        let documents = state
            .collections
            .get_mut(&collection)
            .ok_or_else(|| not_found(collection, id))?;
        let index = documents
            .iter()
            .position(|document| &document.id == id)
            .ok_or_else(|| not_found(collection, id))?;
        documents.remove(index);
        Ok(())
    }

    async fn get(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> DocumentStoreResult<Option<Document>> {
        self.begin_operation(StoreOperation::Get)?;
        let state = self.read_state()?;
        Ok(state
            .collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|document| &document.id == id))
            .cloned())
    }

    async fn query(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> DocumentStoreResult<Vec<Document>> {
        self.begin_operation(StoreOperation::Query)?;
        let state = self.read_state()?;
        let mut documents: Vec<Document> = state
            .collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| {
                        query
                            .filter
                            .as_ref()
                            .is_none_or(|filter| filter.matches(&document.fields))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order_by) = &query.order_by {
            documents.sort_by(|left, right| order_by.compare(&left.fields, &right.fields));
        }
        Ok(documents)
    }
}
