//! Diesel schema for work-item persistence.

diesel::table! {
    /// Work-item records partitioned by workspace and status.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Workspace scope.
        workspace_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Assigned member.
        assignee_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Board column.
        #[max_length = 50]
        status -> Varchar,
        /// Scheduling priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Sort key within the (workspace, status) partition.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
