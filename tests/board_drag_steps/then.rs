//! Then steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::then;
use std::collections::HashSet;
use taskdeck::board::{domain::TaskStatus, ports::TaskRepository};

fn column_names(world: &mut BoardWorld, status: TaskStatus) -> Result<Vec<String>, eyre::Report> {
    let session = world.session_mut()?;
    Ok(session
        .board()
        .column(status)
        .iter()
        .map(|card| card.task().name().to_owned())
        .collect())
}

#[then("the todo column reads Gamma, Alpha, Beta")]
fn todo_reads_gamma_alpha_beta(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let names = column_names(world, TaskStatus::Todo)?;
    if names != ["Gamma", "Alpha", "Beta"] {
        return Err(eyre::eyre!("unexpected todo order: {names:?}"));
    }
    Ok(())
}

#[then("the todo column reads Alpha, Beta, Gamma")]
fn todo_reads_alpha_beta_gamma(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let names = column_names(world, TaskStatus::Todo)?;
    if names != ["Alpha", "Beta", "Gamma"] {
        return Err(eyre::eyre!("unexpected todo order: {names:?}"));
    }
    Ok(())
}

#[then("the done column reads Alpha alone")]
fn done_reads_alpha(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let names = column_names(world, TaskStatus::Done)?;
    if names != ["Alpha"] {
        return Err(eyre::eyre!("unexpected done order: {names:?}"));
    }
    Ok(())
}

#[then("every todo card keeps a distinct sort key")]
fn todo_keys_are_distinct(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let session = world.session_mut()?;
    let keys: Vec<i64> = session
        .board()
        .column(TaskStatus::Todo)
        .iter()
        .map(|card| card.task().position().get())
        .collect();
    let distinct: HashSet<i64> = keys.iter().copied().collect();
    if distinct.len() != keys.len() {
        return Err(eyre::eyre!("duplicate sort keys in todo column: {keys:?}"));
    }
    Ok(())
}

#[then("Alpha is stored with status done")]
fn alpha_stored_as_done(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let task_id = *world
        .task_ids
        .get("Alpha")
        .ok_or_else(|| eyre::eyre!("Alpha was never created"))?;
    let stored = run_async(world.repository.find_by_id(task_id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("Alpha is missing from the store"))?;
    if stored.status() != TaskStatus::Done {
        return Err(eyre::eyre!(
            "expected done status, found {}",
            stored.status().as_str()
        ));
    }
    Ok(())
}
