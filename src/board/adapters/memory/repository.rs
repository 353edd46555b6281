//! In-memory task repository for tests and local board sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Position, PositionUpdate, Task, TaskId, TaskPredicate, TaskPriority, TaskQuery, TaskStatus, WorkspaceId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tests a task against one compiled predicate.
fn matches(task: &Task, predicate: &TaskPredicate) -> bool {
    match predicate {
        TaskPredicate::WorkspaceEquals(workspace_id) => task.workspace_id() == *workspace_id,
        TaskPredicate::ProjectEquals(project_id) => task.project_id() == *project_id,
        TaskPredicate::AssigneeEquals(assignee_id) => task.assignee_id() == *assignee_id,
        TaskPredicate::StatusEquals(status) => task.status() == *status,
        TaskPredicate::PriorityEquals(priority) => task.priority() == *priority,
        TaskPredicate::DueDateEquals(due_date) => task.due_date() == Some(*due_date),
        TaskPredicate::NameContains(term) => task
            .name()
            .to_lowercase()
            .contains(&term.to_lowercase()),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn fetch_matching(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| query.predicates().iter().all(|p| matches(task, p)))
            .cloned()
            .collect();
        // Newest first; the id tiebreak keeps fetches deterministic when
        // timestamps collide under a mocked clock.
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(tasks)
    }

    async fn highest_position(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> TaskRepositoryResult<Option<Position>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .values()
            .filter(|task| {
                task.workspace_id() == workspace_id
                    && task.status() == status
                    && task.priority() == priority
            })
            .map(Task::position)
            .max())
    }

    async fn apply_placement(
        &self,
        update: &PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .tasks
            .get_mut(&update.task_id())
            .ok_or(TaskRepositoryError::NotFound(update.task_id()))?;
        task.apply_placement(update.status(), update.position(), updated_at);
        Ok(())
    }
}
