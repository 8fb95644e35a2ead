//! Shared helpers for in-memory state store integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, Once};
use taskboard::board::adapters::document::DocumentBoardRepository;
use taskboard::board::domain::{Board, BoardDraft, ColumnId};
use taskboard::config::SyncConfig;
use taskboard::document::adapters::memory::InMemoryDocumentStore;
use taskboard::document::domain::{
    Collection, CreatedDocument, Document, DocumentId, DocumentQuery, Fields,
};
use taskboard::document::ports::{DocumentStore, DocumentStoreResult};
use taskboard::identity::{StaticIdentityProvider, UserId};
use taskboard::state::{Applied, StateStore};
use taskboard::task::adapters::document::DocumentTaskRepository;
use taskboard::task::domain::{Task, TaskDraft};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        assert!(installed.is_ok(), "tracing subscriber already installed");
    });
}

/// Clock that advances by one second on every reading.
#[derive(Debug, Default)]
pub struct TickingClock {
    ticks: AtomicI64,
}

impl TickingClock {
    fn origin() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
            .single()
            .expect("valid origin")
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::origin() + TimeDelta::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// Handles of an update held back by [`GatedDocumentStore`].
pub struct HeldUpdate {
    /// Resolves once the update has reached the store.
    pub reached: oneshot::Receiver<()>,
    /// Lets the update through when sent.
    pub release: oneshot::Sender<()>,
}

impl HeldUpdate {
    /// Waits until the held update has reached the store.
    pub async fn wait_reached(&mut self) {
        (&mut self.reached)
            .await
            .expect("gated update should reach the store");
    }

    /// Lets the held update complete.
    pub fn release(self) {
        self.release
            .send(())
            .expect("gated update should still be waiting");
    }
}

struct Gate {
    field: String,
    value: serde_json::Value,
    reached: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Document store whose updates can be held back to control completion
/// order.
///
/// An update whose fields carry a held `field = value` pair waits until the
/// matching [`HeldUpdate`] is released; every other call passes straight
/// through to the wrapped in-memory store.
#[derive(Clone)]
pub struct GatedDocumentStore {
    inner: InMemoryDocumentStore<TickingClock>,
    gates: Arc<Mutex<Vec<Gate>>>,
}

impl Default for GatedDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GatedDocumentStore {
    /// Wraps a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: InMemoryDocumentStore::with_clock(Arc::new(TickingClock::default())),
            gates: Arc::default(),
        }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &InMemoryDocumentStore<TickingClock> {
        &self.inner
    }

    /// Holds back the next update that writes `value` into `field`.
    #[must_use]
    pub fn hold(&self, field: &str, value: impl Into<serde_json::Value>) -> HeldUpdate {
        let (reached_tx, reached_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates.lock().expect("gate lock").push(Gate {
            field: field.to_owned(),
            value: value.into(),
            reached: reached_tx,
            release: release_rx,
        });
        HeldUpdate {
            reached: reached_rx,
            release: release_tx,
        }
    }

    fn take_gate(&self, fields: &Fields) -> Option<Gate> {
        let mut gates = self.gates.lock().expect("gate lock");
        let index = gates
            .iter()
            .position(|gate| fields.get(&gate.field) == Some(&gate.value))?;
        Some(gates.remove(index))
    }
}

#[async_trait]
impl DocumentStore for GatedDocumentStore {
    async fn create(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DocumentStoreResult<CreatedDocument> {
        self.inner.create(collection, fields).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> DocumentStoreResult<()> {
        if let Some(gate) = self.take_gate(&fields) {
            gate.reached.send(()).expect("test should await the gate");
            gate.release.await.expect("test should release the gate");
        }
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> DocumentStoreResult<()> {
        self.inner.delete(collection, id).await
    }

    async fn get(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> DocumentStoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn query(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> DocumentStoreResult<Vec<Document>> {
        self.inner.query(collection, query).await
    }
}

/// Board repository over the gated store.
pub type Boards = DocumentBoardRepository<GatedDocumentStore, TickingClock>;
/// Task repository over the gated store.
pub type Tasks = DocumentTaskRepository<GatedDocumentStore, TickingClock>;
/// State store wired to the in-memory adapters.
pub type Store = StateStore<Boards, Tasks, StaticIdentityProvider>;

/// A state store and the adapters behind it.
pub struct Harness {
    /// Shared document store.
    pub documents: GatedDocumentStore,
    /// Board repository, for arranging data behind the store's back.
    pub boards: Arc<Boards>,
    /// Task repository, for arranging data behind the store's back.
    pub tasks: Arc<Tasks>,
    /// Signed-in session.
    pub identity: StaticIdentityProvider,
    /// State store under test.
    pub store: Store,
}

impl Harness {
    /// Builds a harness with `alice` signed in.
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        init_tracing();
        let documents = GatedDocumentStore::new();
        let clock = Arc::new(TickingClock::default());
        let boards = Arc::new(DocumentBoardRepository::new(
            Arc::new(documents.clone()),
            Arc::clone(&clock),
        ));
        let tasks = Arc::new(DocumentTaskRepository::new(
            Arc::new(documents.clone()),
            clock,
        ));
        let identity = StaticIdentityProvider::signed_in(alice());
        let store = StateStore::new(
            Arc::clone(&boards),
            Arc::clone(&tasks),
            Arc::new(identity.clone()),
            config,
        );
        Self {
            documents,
            boards,
            tasks,
            identity,
            store,
        }
    }

    /// Creates a board with the default columns through the store.
    pub async fn create_board(&self, title: &str) -> Board {
        let draft = BoardDraft::with_default_columns(title).expect("valid board draft");
        let applied = self.store.create_board(draft).await.expect("board created");
        assert_eq!(applied, Applied::Fulfilled);
        self.store
            .snapshot()
            .boards()
            .current_board()
            .cloned()
            .expect("created board is current")
    }

    /// Creates a task in `column` of `board` through the store.
    pub async fn create_task(&self, board: &Board, column: &str, title: &str) -> Task {
        let column_id = ColumnId::new(column);
        assert!(board.has_column(&column_id), "column {column} exists on board");
        let draft = TaskDraft::new(board.id().clone(), column_id, title).expect("valid draft");
        let applied = self.store.create_task(draft).await.expect("task created");
        assert_eq!(applied, Applied::Fulfilled);
        self.store
            .snapshot()
            .tasks()
            .tasks()
            .first()
            .cloned()
            .expect("created task heads the list")
    }
}

/// The signed-in user.
#[must_use]
pub fn alice() -> UserId {
    UserId::new("alice")
}

/// Default configuration.
#[fixture]
pub fn config() -> SyncConfig {
    SyncConfig::default()
}
