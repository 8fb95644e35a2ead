//! Given steps for drag-and-drop BDD scenarios.

use super::world::{BoardReorderWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{BoardDraft, ColumnId};
use taskboard::document::adapters::memory::StoreOperation;
use taskboard::document::ports::DocumentStoreError;
use taskboard::task::domain::TaskDraft;

#[given(r#"a board "{title}" with the default columns"#)]
fn board_with_default_columns(
    world: &mut BoardReorderWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let draft = BoardDraft::with_default_columns(title).wrap_err("build board draft")?;
    let store = world.start_store();
    run_async(store.create_board(draft)).wrap_err("create board for scenario")?;
    let board = store
        .snapshot()
        .boards()
        .current_board()
        .cloned()
        .ok_or_else(|| eyre::eyre!("created board was not selected"))?;
    world.board = Some(board);
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn task_in_column(
    world: &mut BoardReorderWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id().clone();
    let draft = TaskDraft::new(board_id, ColumnId::new(column), title.clone())
        .wrap_err("build task draft")?;
    let store = world.store()?;
    run_async(store.create_task(draft)).wrap_err("create task for scenario")?;
    let id = store
        .snapshot()
        .tasks()
        .tasks()
        .first()
        .map(|task| task.id().clone())
        .ok_or_else(|| eyre::eyre!("created task missing from state"))?;
    world.task_ids.insert(title, id);
    Ok(())
}

#[given("the store will refuse the next update")]
fn store_refuses_next_update(world: &mut BoardReorderWorld) -> Result<(), eyre::Report> {
    world
        .documents
        .fail_next(
            StoreOperation::Update,
            DocumentStoreError::Unavailable("connection reset".to_owned()),
        )
        .wrap_err("queue update failure")
}
