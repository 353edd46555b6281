//! When steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskdeck::board::domain::{CardSlot, DragGesture, TaskStatus};

#[when("the last todo card is dragged to the top of its column")]
fn drag_last_todo_to_top(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let source = {
        let session = world.session_mut()?;
        let len = session.board().column(TaskStatus::Todo).len();
        CardSlot::new(TaskStatus::Todo, len.saturating_sub(1))
    };
    let gesture = DragGesture::to(source, CardSlot::new(TaskStatus::Todo, 0));
    let session = world.session_mut()?;
    run_async(session.on_drop(gesture)).map_err(|err| eyre::eyre!("drop failed: {err}"))?;
    Ok(())
}

#[when("the first todo card is dragged into the empty done column")]
fn drag_first_todo_into_done(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let gesture = DragGesture::to(
        CardSlot::new(TaskStatus::Todo, 0),
        CardSlot::new(TaskStatus::Done, 0),
    );
    let session = world.session_mut()?;
    run_async(session.on_drop(gesture)).map_err(|err| eyre::eyre!("drop failed: {err}"))?;
    Ok(())
}

#[when("the first todo card is dropped outside the board")]
fn drop_first_todo_outside(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let gesture = DragGesture::cancelled(CardSlot::new(TaskStatus::Todo, 0));
    let session = world.session_mut()?;
    run_async(session.on_drop(gesture)).map_err(|err| eyre::eyre!("drop failed: {err}"))?;
    Ok(())
}
