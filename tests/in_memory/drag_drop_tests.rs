//! Drops carried from the reorder engine through to the store.

use super::helpers::{Harness, Store, config};
use rstest::rstest;
use std::sync::Arc;
use taskboard::board::domain::ColumnId;
use taskboard::config::SyncConfig;
use taskboard::document::adapters::memory::StoreOperation;
use taskboard::reorder::{DragLocation, DropEvent, DropOutcome, IgnoreReason, ReorderEngine};
use taskboard::state::{Applied, SyncError};
use taskboard::task::ports::TaskRepository;

fn engine(harness: &Harness) -> ReorderEngine<Store> {
    ReorderEngine::new(Arc::new(harness.store.clone()))
}

fn at(column: &str, index: usize) -> DragLocation {
    DragLocation::new(ColumnId::new(column), index)
}

fn updates(harness: &Harness) -> usize {
    harness
        .documents
        .inner()
        .call_count(StoreOperation::Update)
        .expect("call count")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_other_column_moves_and_persists(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "todo", "Ship it").await;
    let event = DropEvent::new(
        task.id().clone(),
        at("todo", 0),
        at("done", 0),
    );

    let outcome = engine(&harness).handle_drop(&event).await.expect("drop handled");

    assert_eq!(outcome, DropOutcome::Moved(Applied::Fulfilled));
    let snapshot = harness.store.snapshot();
    let moved = snapshot.tasks().task(task.id()).expect("task in state");
    assert_eq!(moved.column_id(), &ColumnId::new("done"));
    assert_eq!(moved.title(), task.title());
    let stored = harness
        .tasks
        .list_for_board(board.id())
        .await
        .expect("tasks listed");
    let persisted = stored.first().expect("stored task");
    assert_eq!(persisted.column_id(), &ColumnId::new("done"));
    assert!(persisted.updated_at() > task.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_drop_writes_nothing(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "todo", "Stay").await;
    let event = DropEvent::cancelled(task.id().clone(), at("todo", 0));

    let outcome = engine(&harness).handle_drop(&event).await.expect("drop handled");

    assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::NoDestination));
    assert_eq!(updates(&harness), 0);
    assert_eq!(harness.store.snapshot().tasks().task(task.id()), Some(&task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_in_place_writes_nothing(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "in-progress", "Stay").await;
    let event = DropEvent::new(
        task.id().clone(),
        at("in-progress", 2),
        at("in-progress", 2),
    );

    let outcome = engine(&harness).handle_drop(&event).await.expect("drop handled");

    assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::Unchanged));
    assert_eq!(updates(&harness), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_within_column_rewrites_same_column(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "todo", "Shuffle").await;
    let event = DropEvent::new(
        task.id().clone(),
        at("todo", 0),
        at("todo", 3),
    );

    let outcome = engine(&harness).handle_drop(&event).await.expect("drop handled");

    assert_eq!(outcome, DropOutcome::Moved(Applied::Fulfilled));
    assert_eq!(updates(&harness), 1);
    let snapshot = harness.store.snapshot();
    let kept = snapshot.tasks().task(task.id()).expect("task in state");
    assert_eq!(kept.column_id(), &ColumnId::new("todo"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_foreign_column_is_rejected_before_writing(config: SyncConfig) {
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "todo", "Lost").await;
    let event = DropEvent::new(
        task.id().clone(),
        at("todo", 0),
        at("archive", 0),
    );

    let result = engine(&harness).handle_drop(&event).await;

    assert!(matches!(result, Err(SyncError::UnknownColumn { .. })));
    assert_eq!(updates(&harness), 0);
    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.tasks().task(task.id()), Some(&task));
    let error = snapshot.tasks().error().expect("error recorded");
    assert!(error.starts_with("Failed to move task"), "{error}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unvalidated_drop_on_foreign_column_is_written(mut config: SyncConfig) {
    config.validate_column_moves = false;
    let harness = Harness::new(&config);
    let board = harness.create_board("Sprint").await;
    let task = harness.create_task(&board, "todo", "Lost").await;
    let event = DropEvent::new(
        task.id().clone(),
        at("todo", 0),
        at("archive", 0),
    );

    let outcome = engine(&harness).handle_drop(&event).await.expect("drop handled");

    assert_eq!(outcome, DropOutcome::Moved(Applied::Fulfilled));
    assert_eq!(updates(&harness), 1);
}
