//! Then steps for drag-and-drop BDD scenarios.

use super::world::{BoardReorderWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::document::adapters::memory::StoreOperation;
use taskboard::reorder::DropOutcome;
use taskboard::state::{Applied, SyncError};
use taskboard::task::ports::TaskRepository;

fn last_drop(
    world: &BoardReorderWorld,
) -> Result<&Result<DropOutcome, SyncError>, eyre::Report> {
    world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no drop handled in scenario"))
}

#[then("the drop moved the task")]
fn drop_moved(world: &BoardReorderWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Ok(DropOutcome::Moved(Applied::Fulfilled)) => Ok(()),
        other => Err(eyre::eyre!("expected a fulfilled move, got {other:?}")),
    }
}

#[then("the drop is ignored")]
fn drop_ignored(world: &BoardReorderWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Ok(DropOutcome::Ignored(_)) => Ok(()),
        other => Err(eyre::eyre!("expected an ignored drop, got {other:?}")),
    }
}

#[then("the drop is rejected because the column is unknown")]
fn drop_rejected_unknown_column(world: &BoardReorderWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Err(SyncError::UnknownColumn { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected an unknown column error, got {other:?}")),
    }
}

#[then("the drop is rejected by the store")]
fn drop_rejected_by_store(world: &BoardReorderWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Err(SyncError::Task(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a task repository error, got {other:?}")),
    }
}

#[then(r#"the task "{title}" is in column "{column}""#)]
fn task_in_column(
    world: &BoardReorderWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = world.task_in_state(&title)?;
    eyre::ensure!(
        task.column_id().as_str() == column,
        "expected {title} in {column}, found {}",
        task.column_id()
    );
    Ok(())
}

#[then(r#"the stored task "{title}" is in column "{column}""#)]
fn stored_task_in_column(
    world: &BoardReorderWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let stored = run_async(world.tasks.list_for_board(world.board()?.id()))
        .wrap_err("list stored tasks")?;
    let task = stored
        .iter()
        .find(|task| task.id() == id)
        .ok_or_else(|| eyre::eyre!("task {title} missing from store"))?;
    eyre::ensure!(
        task.column_id().as_str() == column,
        "expected stored {title} in {column}, found {}",
        task.column_id()
    );
    Ok(())
}

#[then("no task update reached the store")]
fn no_update_reached_store(world: &BoardReorderWorld) -> Result<(), eyre::Report> {
    let updates = world
        .documents
        .call_count(StoreOperation::Update)
        .wrap_err("read update count")?;
    eyre::ensure!(updates == 0, "expected no updates, found {updates}");
    Ok(())
}

#[then(r#"the task error starts with "{prefix}""#)]
fn task_error_starts_with(world: &BoardReorderWorld, prefix: String) -> Result<(), eyre::Report> {
    let snapshot = world.store()?.snapshot();
    let error = snapshot
        .tasks()
        .error()
        .ok_or_else(|| eyre::eyre!("no task error recorded"))?;
    eyre::ensure!(error.starts_with(&prefix), "unexpected task error: {error}");
    Ok(())
}
