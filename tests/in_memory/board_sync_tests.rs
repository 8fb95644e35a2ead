//! Board and task mutations round-tripped through the in-memory store.

use super::helpers::{Harness, alice, config};
use rstest::rstest;
use taskboard::board::domain::{BoardDraft, BoardPatch, Member};
use taskboard::board::ports::BoardRepository;
use taskboard::config::SyncConfig;
use taskboard::document::adapters::memory::StoreOperation;
use taskboard::document::ports::DocumentStoreError;
use taskboard::identity::UserId;
use taskboard::state::{Applied, Slice, SyncError};
use taskboard::task::domain::TaskPatch;
use taskboard::task::ports::TaskRepository;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_board_is_echoed_with_owner_and_selected(config: SyncConfig) {
    let harness = Harness::new(&config);

    let board = harness.create_board("Launch").await;

    assert_eq!(board.title(), "Launch");
    assert_eq!(board.members(), [Member::owner(alice())]);
    assert_eq!(board.created_at(), board.updated_at());
    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.boards().boards().first(), Some(&board));
    assert!(!snapshot.boards().loading());
    assert!(snapshot.boards().error().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owned_boards_are_listed_most_recently_updated_first(config: SyncConfig) {
    let harness = Harness::new(&config);
    let older = harness.create_board("Older").await;
    let newer = harness.create_board("Newer").await;
    let foreign = BoardDraft::with_default_columns("Bob's")
        .expect("valid draft")
        .with_member(Member::owner(UserId::new("bob")));
    harness
        .boards
        .create(foreign)
        .await
        .expect("foreign board created");
    let patch = BoardPatch::new().with_title("Older, renamed").expect("valid title");
    harness
        .store
        .update_board(older.id(), patch)
        .await
        .expect("board updated");

    harness
        .store
        .fetch_current_user_boards()
        .await
        .expect("boards fetched");

    let snapshot = harness.store.snapshot();
    let titles: Vec<_> = snapshot.boards().boards().iter().map(|b| b.title()).collect();
    assert_eq!(titles, vec!["Older, renamed", newer.title()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_current_board_clears_selection(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Doomed").await;

    let applied = harness.store.delete_board(board.id()).await.expect("deleted");

    assert_eq!(applied, Applied::Fulfilled);
    let snapshot = harness.store.snapshot();
    assert!(snapshot.boards().current_board().is_none());
    assert!(snapshot.boards().board(board.id()).is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_another_board_keeps_selection(config: SyncConfig) {
    let harness = Harness::new(&config);
    let other = harness.create_board("Other").await;
    let current = harness.create_board("Current").await;

    harness.store.delete_board(other.id()).await.expect("deleted");

    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.boards().current_board(), Some(&current));
    assert_eq!(snapshot.boards().boards(), [current]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_board_selects_stored_board_or_nothing(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Stored").await;
    harness.store.clear_selection().await.expect("cleared");

    harness.store.fetch_board(board.id()).await.expect("fetched");
    assert_eq!(
        harness.store.snapshot().boards().current_board(),
        Some(&board)
    );

    harness.store.delete_board(board.id()).await.expect("deleted");
    harness.store.fetch_board(board.id()).await.expect("fetched");
    assert!(harness.store.snapshot().boards().current_board().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_out_listing_is_rejected_and_reported(config: SyncConfig) {
    let harness = Harness::new(&config);
    harness.identity.sign_out();

    let result = harness.store.fetch_current_user_boards().await;

    assert!(matches!(result, Err(SyncError::NotSignedIn)));
    let snapshot = harness.store.snapshot();
    let error = snapshot.error(Slice::Boards).expect("error recorded");
    assert!(error.starts_with("Failed to fetch boards"), "{error}");
    assert!(!snapshot.loading(Slice::Boards));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_tasks_are_listed_newest_first(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Work").await;
    let first = harness.create_task(&board, "todo", "First").await;
    let second = harness.create_task(&board, "done", "Second").await;
    let elsewhere = harness.create_board("Elsewhere").await;
    harness.create_task(&elsewhere, "todo", "Unrelated").await;

    harness
        .store
        .fetch_board_tasks(board.id())
        .await
        .expect("tasks fetched");

    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.tasks().tasks(), [second, first]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_task_update_leaves_task_unchanged(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Work").await;
    let task = harness.create_task(&board, "todo", "Draft").await;
    harness
        .documents
        .inner()
        .fail_next(
            StoreOperation::Update,
            DocumentStoreError::Unavailable("offline".to_owned()),
        )
        .expect("failure queued");
    let patch = TaskPatch::new().with_title("Final").expect("valid title");

    let result = harness.store.update_task(task.id(), patch).await;

    assert!(matches!(result, Err(SyncError::Task(_))));
    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.tasks().task(task.id()), Some(&task));
    let error = snapshot.tasks().error().expect("error recorded");
    assert!(error.starts_with("Failed to update task"), "{error}");
    assert!(error.contains("offline"), "{error}");
    assert!(!snapshot.tasks().loading());

    let stored = harness
        .tasks
        .list_for_board(board.id())
        .await
        .expect("tasks listed");
    assert_eq!(stored.first().map(|t| t.title()), Some("Draft"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_update_merges_only_patched_fields(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Work").await;
    let task = harness.create_task(&board, "todo", "Draft").await;
    let patch = TaskPatch::new().with_description("More detail");

    harness
        .store
        .update_task(task.id(), patch)
        .await
        .expect("updated");

    let snapshot = harness.store.snapshot();
    let updated = snapshot.tasks().task(task.id()).expect("task in state");
    assert_eq!(updated.title(), "Draft");
    assert_eq!(updated.description(), "More detail");
    assert_eq!(updated.column_id(), task.column_id());
}
