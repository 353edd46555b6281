//! Given steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::given;
use taskdeck::board::{
    domain::{TaskPriority, TaskStatus},
    services::CreateTaskRequest,
};

#[given("a board whose todo column holds Alpha, Beta and Gamma")]
fn board_with_three_todo_tasks(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    for name in ["Alpha", "Beta", "Gamma"] {
        let request = CreateTaskRequest::new(
            world.workspace_id,
            world.project_id,
            world.member_id,
            name,
            TaskStatus::Todo,
            TaskPriority::Medium,
        );
        let task = run_async(world.lifecycle.create(world.user_id, request))
            .map_err(|err| eyre::eyre!("create task {name}: {err}"))?;
        world.task_ids.insert(name.to_owned(), task.id());
    }
    run_async(world.open_session())
}
