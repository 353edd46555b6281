//! Filter set validation and compilation into the storage read path.
//!
//! The raw, all-optional parameter form mirrors what a query string
//! carries; it validates into [`TaskFilter`], whose workspace scope is
//! mandatory. Compilation yields an ordered predicate sequence with the
//! workspace scope first, so every storage adapter narrows by workspace
//! before anything else.

use super::{FilterError, MemberId, ProjectId, TaskPriority, TaskStatus, WorkspaceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw filter input as received from the presentation layer.
///
/// Every field is optional here; validation decides what is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilterParams {
    /// Workspace scope (required downstream).
    pub workspace_id: Option<String>,
    /// Exact project match.
    pub project_id: Option<String>,
    /// Exact assignee match.
    pub assignee_id: Option<String>,
    /// Exact column match.
    pub status: Option<String>,
    /// Exact priority match.
    pub priority: Option<String>,
    /// Exact-date due-date match, ISO `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Substring match on the task name.
    pub search: Option<String>,
}

/// Validated, closed filter set for one board fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    workspace_id: WorkspaceId,
    project_id: Option<ProjectId>,
    assignee_id: Option<MemberId>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<NaiveDate>,
    search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter matching every task in the workspace.
    #[must_use]
    pub const fn for_workspace(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assignee_id: None,
            status: None,
            priority: None,
            due_date: None,
            search: None,
        }
    }

    /// Validates a raw parameter set into a filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingWorkspaceScope`] when the workspace
    /// id is absent, and the corresponding parse variants for malformed
    /// ids, statuses, priorities, or dates. Rejection happens before any
    /// query is issued.
    pub fn from_params(params: TaskFilterParams) -> Result<Self, FilterError> {
        let workspace_id = params
            .workspace_id
            .ok_or(FilterError::MissingWorkspaceScope)?;
        let mut filter = Self::for_workspace(WorkspaceId::from_uuid(parse_id(
            "workspace_id",
            &workspace_id,
        )?));

        if let Some(value) = params.project_id {
            filter.project_id = Some(ProjectId::from_uuid(parse_id("project_id", &value)?));
        }
        if let Some(value) = params.assignee_id {
            filter.assignee_id = Some(MemberId::from_uuid(parse_id("assignee_id", &value)?));
        }
        if let Some(value) = params.status {
            filter.status = Some(TaskStatus::try_from(value.as_str())?);
        }
        if let Some(value) = params.priority {
            filter.priority = Some(TaskPriority::try_from(value.as_str())?);
        }
        if let Some(value) = params.due_date {
            let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| FilterError::InvalidDueDate(value))?;
            filter.due_date = Some(parsed);
        }
        if let Some(value) = params.search {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                filter.search = Some(trimmed.to_owned());
            }
        }
        Ok(filter)
    }

    /// Narrows the filter to one project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Narrows the filter to one assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Narrows the filter to one column.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Narrows the filter to one priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Narrows the filter to tasks due on one date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Narrows the filter with a name substring.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns the mandatory workspace scope.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the project narrowing, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assignee narrowing, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<MemberId> {
        self.assignee_id
    }

    /// Returns the column narrowing, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority narrowing, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the due-date narrowing, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the name substring narrowing, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Applies a partial filter change, leaving untouched dimensions as
    /// they are. The workspace scope cannot change; open a new session
    /// for another workspace.
    #[must_use]
    pub fn apply(mut self, update: FilterUpdate) -> Self {
        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
        if let Some(assignee_id) = update.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
        self
    }

    /// Compiles the filter into the ordered predicate sequence consumed
    /// by the storage read path.
    ///
    /// The workspace predicate always comes first; optional narrowings
    /// follow in declaration order.
    #[must_use]
    pub fn compile(&self) -> TaskQuery {
        let mut predicates = vec![TaskPredicate::WorkspaceEquals(self.workspace_id)];
        if let Some(project_id) = self.project_id {
            predicates.push(TaskPredicate::ProjectEquals(project_id));
        }
        if let Some(assignee_id) = self.assignee_id {
            predicates.push(TaskPredicate::AssigneeEquals(assignee_id));
        }
        if let Some(status) = self.status {
            predicates.push(TaskPredicate::StatusEquals(status));
        }
        if let Some(priority) = self.priority {
            predicates.push(TaskPredicate::PriorityEquals(priority));
        }
        if let Some(due_date) = self.due_date {
            predicates.push(TaskPredicate::DueDateEquals(due_date));
        }
        if let Some(search) = self.search.clone() {
            predicates.push(TaskPredicate::NameContains(search));
        }
        TaskQuery {
            predicates,
            ordering: TaskOrdering::CreatedDescending,
        }
    }
}

/// Partial filter change; `None` leaves a dimension untouched while
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    /// Project narrowing change.
    pub project_id: Option<Option<ProjectId>>,
    /// Assignee narrowing change.
    pub assignee_id: Option<Option<MemberId>>,
    /// Column narrowing change.
    pub status: Option<Option<TaskStatus>>,
    /// Priority narrowing change.
    pub priority: Option<Option<TaskPriority>>,
    /// Due-date narrowing change.
    pub due_date: Option<Option<NaiveDate>>,
    /// Name substring change.
    pub search: Option<Option<String>>,
}

impl FilterUpdate {
    /// Creates a change touching nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column narrowing.
    #[must_use]
    pub fn set_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(Some(status));
        self
    }

    /// Clears the column narrowing.
    #[must_use]
    pub fn clear_status(mut self) -> Self {
        self.status = Some(None);
        self
    }

    /// Sets the project narrowing.
    #[must_use]
    pub fn set_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(Some(project_id));
        self
    }

    /// Clears the project narrowing.
    #[must_use]
    pub fn clear_project(mut self) -> Self {
        self.project_id = Some(None);
        self
    }

    /// Sets the assignee narrowing.
    #[must_use]
    pub fn set_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(Some(assignee_id));
        self
    }

    /// Sets the priority narrowing.
    #[must_use]
    pub fn set_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(Some(priority));
        self
    }

    /// Sets the due-date narrowing.
    #[must_use]
    pub fn set_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Sets the name substring narrowing.
    #[must_use]
    pub fn set_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(Some(search.into()));
        self
    }

    /// Clears the name substring narrowing.
    #[must_use]
    pub fn clear_search(mut self) -> Self {
        self.search = Some(None);
        self
    }
}

/// One predicate of a compiled task query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPredicate {
    /// Task belongs to the workspace.
    WorkspaceEquals(WorkspaceId),
    /// Task belongs to the project.
    ProjectEquals(ProjectId),
    /// Task is assigned to the member.
    AssigneeEquals(MemberId),
    /// Task sits in the column.
    StatusEquals(TaskStatus),
    /// Task carries the priority.
    PriorityEquals(TaskPriority),
    /// Task is due exactly on the date.
    DueDateEquals(NaiveDate),
    /// Task name contains the substring, case-insensitively.
    NameContains(String),
}

/// Result ordering of a compiled task query.
///
/// Fetch ordering is independent of the column-internal position
/// ordering the board applies after projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrdering {
    /// Newest tasks first.
    CreatedDescending,
}

/// Compiled query consumed by the storage read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    predicates: Vec<TaskPredicate>,
    ordering: TaskOrdering,
}

impl TaskQuery {
    /// Returns the predicates in application order.
    #[must_use]
    pub fn predicates(&self) -> &[TaskPredicate] {
        &self.predicates
    }

    /// Returns the result ordering.
    #[must_use]
    pub const fn ordering(&self) -> TaskOrdering {
        self.ordering
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<Uuid, FilterError> {
    Uuid::parse_str(value.trim()).map_err(|_| FilterError::InvalidId {
        field,
        value: value.to_owned(),
    })
}
