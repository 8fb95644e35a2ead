//! Shared world state for drag-and-drop BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::adapters::document::DocumentBoardRepository;
use taskboard::board::domain::Board;
use taskboard::config::SyncConfig;
use taskboard::document::adapters::memory::InMemoryDocumentStore;
use taskboard::identity::{StaticIdentityProvider, UserId};
use taskboard::reorder::{DropOutcome, ReorderEngine};
use taskboard::state::{StateStore, SyncResult};
use taskboard::task::adapters::document::DocumentTaskRepository;
use taskboard::task::domain::{Task, TaskId};

/// Board repository used by the BDD world.
pub type Boards = DocumentBoardRepository<InMemoryDocumentStore, DefaultClock>;
/// Task repository used by the BDD world.
pub type Tasks = DocumentTaskRepository<InMemoryDocumentStore, DefaultClock>;
/// State store used by the BDD world.
pub type Store = StateStore<Boards, Tasks, StaticIdentityProvider>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct BoardReorderWorld {
    pub documents: InMemoryDocumentStore,
    pub tasks: Arc<Tasks>,
    pub store: Option<Store>,
    pub board: Option<Board>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_drop: Option<SyncResult<DropOutcome>>,
}

impl BoardReorderWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let documents = InMemoryDocumentStore::new();
        let tasks = Arc::new(DocumentTaskRepository::new(
            Arc::new(documents.clone()),
            Arc::new(DefaultClock),
        ));
        Self {
            documents,
            tasks,
            store: None,
            board: None,
            task_ids: HashMap::new(),
            last_drop: None,
        }
    }

    /// Starts the state store; must run on the scenario's runtime.
    #[must_use]
    pub fn start_store(&mut self) -> &Store {
        let boards = Arc::new(DocumentBoardRepository::new(
            Arc::new(self.documents.clone()),
            Arc::new(DefaultClock),
        ));
        let identity = StaticIdentityProvider::signed_in(UserId::new("alice"));
        self.store.insert(StateStore::new(
            boards,
            Arc::clone(&self.tasks),
            Arc::new(identity),
            &SyncConfig::default(),
        ))
    }

    /// Returns the running state store.
    pub fn store(&self) -> Result<&Store, eyre::Report> {
        self.store
            .as_ref()
            .ok_or_else(|| eyre::eyre!("state store not started in scenario world"))
    }

    /// Returns a reorder engine driving the running state store.
    pub fn engine(&self) -> Result<ReorderEngine<Store>, eyre::Report> {
        Ok(ReorderEngine::new(Arc::new(self.store()?.clone())))
    }

    /// Returns the board created by the scenario.
    pub fn board(&self) -> Result<&Board, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns the identifier of the task with the given title.
    pub fn task_id(&self, title: &str) -> Result<&TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }

    /// Returns the task with the given title as held in state.
    pub fn task_in_state(&self, title: &str) -> Result<Task, eyre::Report> {
        let id = self.task_id(title)?;
        self.store()?
            .snapshot()
            .tasks()
            .task(id)
            .cloned()
            .ok_or_else(|| eyre::eyre!("task {title} missing from state"))
    }
}

impl Default for BoardReorderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardReorderWorld {
    BoardReorderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
