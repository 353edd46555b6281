//! Service layer for task creation, direct edit, and deletion.

use crate::board::{
    domain::{
        BoardDomainError, MemberId, ProjectId, Task, TaskDraft, TaskId, TaskPriority,
        TaskRevision, TaskStatus, UserId, WorkspaceId,
    },
    ports::{
        DirectoryError, MemberDirectory, TaskRepository, TaskRepositoryError,
    },
    services::allocation::{AllocationError, PositionAllocator},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// The sort key is absent on purpose: the allocator computes it at
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assignee_id: MemberId,
    name: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        assignee_id: MemberId,
        name: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Self {
        Self {
            workspace_id,
            project_id,
            assignee_id,
            name: name.into(),
            description: None,
            status,
            priority,
            due_date: None,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Membership lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The acting user is not a member of the workspace.
    #[error("user {user_id} is not a member of workspace {workspace_id}")]
    AccessDenied {
        /// Workspace the operation targeted.
        workspace_id: WorkspaceId,
        /// The acting user.
        user_id: UserId,
    },
}

impl From<AllocationError> for TaskLifecycleError {
    fn from(error: AllocationError) -> Self {
        match error {
            AllocationError::Domain(err) => Self::Domain(err),
            AllocationError::Repository(err) => Self::Repository(err),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, M, C>
where
    R: TaskRepository,
    M: MemberDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    members: Arc<M>,
    allocator: PositionAllocator<R>,
    clock: Arc<C>,
}

impl<R, M, C> TaskLifecycleService<R, M, C>
where
    R: TaskRepository,
    M: MemberDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, members: Arc<M>, clock: Arc<C>) -> Self {
        let allocator = PositionAllocator::new(Arc::clone(&repository));
        Self {
            repository,
            members,
            allocator,
            clock,
        }
    }

    /// Creates a new task at the tail of its partition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the actor is not a workspace
    /// member, the draft fails validation, allocation fails, or the
    /// repository rejects persistence.
    pub async fn create(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        self.authorize(request.workspace_id, actor).await?;

        let mut draft = TaskDraft::new(
            request.workspace_id,
            request.project_id,
            request.assignee_id,
            request.name,
            request.status,
            request.priority,
        )?;
        if let Some(description) = request.description {
            draft = draft.with_description(description);
        }
        if let Some(due_date) = request.due_date {
            draft = draft.with_due_date(due_date);
        }

        let position = self
            .allocator
            .allocate(draft.workspace_id(), draft.status(), draft.priority())
            .await?;
        let task = Task::create(draft, position, &*self.clock);
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), position = %task.position(), "task created");
        Ok(task)
    }

    /// Applies a direct edit to a task's descriptive fields; the sort
    /// key is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with a not-found cause
    /// when the task no longer exists; the caller should refresh its
    /// board.
    pub async fn revise(
        &self,
        actor: UserId,
        task_id: TaskId,
        revision: &TaskRevision,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        self.authorize(task.workspace_id(), actor).await?;

        task.apply_revision(revision, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task. No further state in this subsystem cascades.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with a not-found cause
    /// when the task no longer exists.
    pub async fn delete(&self, actor: UserId, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        self.authorize(task.workspace_id(), actor).await?;
        self.repository.delete(task_id).await?;
        Ok(())
    }

    async fn authorize(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> TaskLifecycleResult<()> {
        let membership = self.members.find_for_user(workspace_id, user_id).await?;
        if membership.is_none() {
            return Err(TaskLifecycleError::AccessDenied {
                workspace_id,
                user_id,
            });
        }
        Ok(())
    }
}
