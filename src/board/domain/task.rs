//! Work-item aggregate and its column/priority classifications.

use super::{
    BoardDomainError, MemberId, ParsePriorityError, ParseStatusError, Position, ProjectId, TaskId,
    WorkspaceId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Work status; one fixed board column per variant.
///
/// The derived ordering follows the left-to-right column order of the
/// board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet scheduled.
    Backlog,
    /// Scheduled but not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// The five board columns in display order.
    pub const COLUMNS: [Self; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Scheduling priority; partitions allocation alongside workspace and
/// status but does not affect column membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Default priority.
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Validated field set for a task that does not exist yet.
///
/// The sort key is deliberately absent: positions are computed by the
/// allocator at creation time, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assignee_id: MemberId,
    name: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BlankTaskName`] when the name is empty
    /// after trimming.
    pub fn new(
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        assignee_id: MemberId,
        name: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Result<Self, BoardDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BoardDomainError::BlankTaskName);
        }
        Ok(Self {
            workspace_id,
            project_id,
            assignee_id,
            name,
            description: None,
            status,
            priority,
            due_date: None,
        })
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

    /// Returns the workspace scope of the draft.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the column the task will be created in.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority partition the task will be allocated in.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }
}

/// Work-item aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assignee_id: MemberId,
    name: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted workspace scope.
    pub workspace_id: WorkspaceId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted assignee.
    pub assignee_id: MemberId,
    /// Persisted display name.
    pub name: String,
    /// Persisted free-text description, if any.
    pub description: Option<String>,
    /// Persisted column.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted sort key.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft and an allocated sort
    /// key.
    #[must_use]
    pub fn create(draft: TaskDraft, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            workspace_id: draft.workspace_id,
            project_id: draft.project_id,
            assignee_id: draft.assignee_id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            assignee_id: data.assignee_id,
            name: data.name,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the workspace scope.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> MemberId {
        self.assignee_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the column the task currently sits in.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the sort key within the (workspace, status) partition.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a direct edit to the task's descriptive fields.
    ///
    /// The sort key is never touched by an edit; only drag
    /// reconciliation moves cards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BlankTaskName`] when the revision
    /// renames the task to a blank string.
    pub fn apply_revision(
        &mut self,
        revision: &TaskRevision,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        if let Some(name) = revision.name.as_ref() {
            if name.trim().is_empty() {
                return Err(BoardDomainError::BlankTaskName);
            }
            self.name.clone_from(name);
        }
        if let Some(description) = revision.description.as_ref() {
            self.description.clone_from(description);
        }
        if let Some(status) = revision.status {
            self.status = status;
        }
        if let Some(priority) = revision.priority {
            self.priority = priority;
        }
        if let Some(project_id) = revision.project_id {
            self.project_id = project_id;
        }
        if let Some(assignee_id) = revision.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(due_date) = revision.due_date {
            self.due_date = due_date;
        }
        self.touch(clock);
        Ok(())
    }

    /// Returns a copy carrying an optimistic placement.
    ///
    /// Timestamps are left untouched; the authoritative refetch supplies
    /// them once the placement is confirmed.
    #[must_use]
    pub fn with_placement(mut self, status: TaskStatus, position: Position) -> Self {
        self.status = status;
        self.position = position;
        self
    }

    /// Applies a confirmed placement write, refreshing the mutation
    /// timestamp.
    pub fn apply_placement(
        &mut self,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) {
        self.status = status;
        self.position = position;
        self.updated_at = updated_at;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Partial edit of a task's descriptive fields.
///
/// `None` leaves a field untouched. For the clearable fields
/// (description, due date) the inner option distinguishes "set to a
/// value" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRevision {
    name: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    project_id: Option<ProjectId>,
    assignee_id: Option<MemberId>,
    due_date: Option<Option<NaiveDate>>,
}

impl TaskRevision {
    /// Creates an empty revision touching nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Moves the task to another column without repositioning it.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Reassigns the task to another project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Reassigns the task to another member.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub fn without_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Returns `true` when the revision touches no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }
}
