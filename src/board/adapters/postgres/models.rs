//! Diesel row models for work-item persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Workspace scope.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned member.
    pub assignee_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Board column.
    pub status: String,
    /// Scheduling priority.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Sort key.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Workspace scope.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned member.
    pub assignee_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Board column.
    pub status: String,
    /// Scheduling priority.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Sort key.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
