//! Repository port for task persistence and the board read path.

use crate::board::domain::{
    Position, PositionUpdate, Task, TaskId, TaskPriority, TaskQuery, TaskStatus, WorkspaceId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The backing store is assumed to offer per-document writes only; there
/// is no native reorder or multi-document transaction primitive. Bulk
/// reordering is therefore expressed as a sequence of
/// [`apply_placement`](Self::apply_placement) calls.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (descriptive edits; the sort
    /// key travels through [`apply_placement`](Self::apply_placement)).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks matching a compiled query, in the query's
    /// ordering.
    async fn fetch_matching(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the largest sort key in the (workspace, status, priority)
    /// partition, or `None` when the partition is empty.
    async fn highest_position(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> TaskRepositoryResult<Option<Position>>;

    /// Writes one task's placement: its column and sort key.
    ///
    /// This is the single-document write bulk application loops over;
    /// `updated_at` is stamped by the caller so adapters stay clock-free.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn apply_placement(
        &self,
        update: &PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
