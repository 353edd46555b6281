//! Denormalized read model joining tasks with project and assignee
//! summaries.

use super::{MemberId, Position, ProjectId, Task, TaskStatus, UserId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Slim projection of a project, enough for the board to render a card
/// without another round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    id: ProjectId,
    workspace_id: WorkspaceId,
    name: String,
}

impl ProjectSummary {
    /// Creates a project summary.
    #[must_use]
    pub fn new(id: ProjectId, workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            workspace_id,
            name: name.into(),
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the workspace the project belongs to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the project display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Slim projection of a workspace member, enough for the board to render
/// an assignee without another round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    id: MemberId,
    workspace_id: WorkspaceId,
    user_id: UserId,
    name: String,
    email: String,
}

impl MemberProfile {
    /// Creates a member profile.
    #[must_use]
    pub fn new(
        id: MemberId,
        workspace_id: WorkspaceId,
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            workspace_id,
            user_id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the workspace the membership belongs to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the user account backing the membership.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A task joined with its resolved project and assignee.
///
/// Either join may be unset when the referenced record no longer
/// resolves; the card itself is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    task: Task,
    project: Option<ProjectSummary>,
    assignee: Option<MemberProfile>,
}

impl TaskCard {
    /// Creates a card with both joins unset.
    #[must_use]
    pub const fn new(task: Task) -> Self {
        Self {
            task,
            project: None,
            assignee: None,
        }
    }

    /// Attaches the resolved owning project.
    #[must_use]
    pub fn with_project(mut self, project: ProjectSummary) -> Self {
        self.project = Some(project);
        self
    }

    /// Attaches the resolved assignee profile.
    #[must_use]
    pub fn with_assignee(mut self, assignee: MemberProfile) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Returns the underlying task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the resolved project, if any.
    #[must_use]
    pub const fn project(&self) -> Option<&ProjectSummary> {
        self.project.as_ref()
    }

    /// Returns the resolved assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&MemberProfile> {
        self.assignee.as_ref()
    }

    /// Applies an optimistic placement to the underlying task.
    pub fn place(&mut self, status: TaskStatus, position: Position) {
        self.task = self.task.clone().with_placement(status, position);
    }

    /// Consumes the card, returning the underlying task.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }
}
