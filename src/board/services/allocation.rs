//! Sort-key allocation for newly created tasks.

use crate::board::{
    domain::{BoardDomainError, Position, TaskPriority, TaskStatus, WorkspaceId},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while allocating a sort key.
#[derive(Debug, Clone, Error)]
pub enum AllocationError {
    /// The partition has no room left under the position ceiling.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The extremal lookup failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Computes the sort key for a brand-new task so it lands at the tail of
/// its (workspace, status, priority) partition without disturbing any
/// existing row.
#[derive(Clone)]
pub struct PositionAllocator<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> PositionAllocator<R>
where
    R: TaskRepository,
{
    /// Creates an allocator over a task repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Allocates the next sort key for the partition.
    ///
    /// The lookup takes the partition's maximum position, never its
    /// minimum: appending past the tail is the only choice that cannot
    /// land inside the existing range or collide with a sibling.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the extremal lookup
    /// fails and [`AllocationError::Domain`] when the partition is full.
    pub async fn allocate(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Result<Position, AllocationError> {
        let tail = self
            .repository
            .highest_position(workspace_id, status, priority)
            .await?;
        match tail {
            Some(position) => Ok(position.following()?),
            None => Ok(Position::FLOOR),
        }
    }
}
