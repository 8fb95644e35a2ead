//! When steps for drag-and-drop BDD scenarios.

use super::world::{BoardReorderWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::ColumnId;
use taskboard::reorder::{DragLocation, DropEvent};

fn drop_task(world: &mut BoardReorderWorld, event: &DropEvent) -> Result<(), eyre::Report> {
    let engine = world.engine()?;
    world.last_drop = Some(run_async(engine.handle_drop(event)));
    Ok(())
}

#[when(r#"the task "{title}" is dropped from "{source}" onto "{destination}""#)]
fn task_dropped(
    world: &mut BoardReorderWorld,
    title: String,
    source: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let event = DropEvent::new(
        world.task_id(&title)?.clone(),
        DragLocation::new(ColumnId::new(source), 0),
        DragLocation::new(ColumnId::new(destination), 1),
    );
    drop_task(world, &event)
}

#[when(r#"the task "{title}" is dropped from "{source}" onto "{destination}" in place"#)]
fn task_dropped_in_place(
    world: &mut BoardReorderWorld,
    title: String,
    source: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let event = DropEvent::new(
        world.task_id(&title)?.clone(),
        DragLocation::new(ColumnId::new(source), 0),
        DragLocation::new(ColumnId::new(destination), 0),
    );
    drop_task(world, &event)
}

#[when(r#"the drag of task "{title}" from "{source}" is cancelled"#)]
fn drag_cancelled(
    world: &mut BoardReorderWorld,
    title: String,
    source: String,
) -> Result<(), eyre::Report> {
    let event = DropEvent::cancelled(
        world.task_id(&title)?.clone(),
        DragLocation::new(ColumnId::new(source), 0),
    );
    drop_task(world, &event)
}
