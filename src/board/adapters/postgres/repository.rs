//! `PostgreSQL` repository implementation for work-item storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        MemberId, PersistedTaskData, Position, PositionUpdate, ProjectId, Task, TaskId,
        TaskOrdering, TaskPredicate, TaskPriority, TaskQuery, TaskStatus, WorkspaceId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set((
                    tasks::project_id.eq(row.project_id),
                    tasks::assignee_id.eq(row.assignee_id),
                    tasks::name.eq(row.name),
                    tasks::description.eq(row.description),
                    tasks::status.eq(row.status),
                    tasks::priority.eq(row.priority),
                    tasks::due_date.eq(row.due_date),
                    tasks::position.eq(row.position),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn fetch_matching(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let query = query.clone();
        self.run_blocking(move |connection| {
            let mut select = tasks::table.into_boxed();
            for predicate in query.predicates() {
                select = apply_predicate(select, predicate);
            }
            select = match query.ordering() {
                TaskOrdering::CreatedDescending => {
                    select.order((tasks::created_at.desc(), tasks::id.desc()))
                }
            };
            let rows = select
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn highest_position(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> TaskRepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| {
            let tail = tasks::table
                .filter(tasks::workspace_id.eq(workspace_id.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .filter(tasks::priority.eq(priority.as_str()))
                .select(tasks::position)
                .order(tasks::position.desc())
                .first::<i64>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            tail.map(|value| Position::new(value).map_err(TaskRepositoryError::persistence))
                .transpose()
        })
        .await
    }

    async fn apply_placement(
        &self,
        update: &PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let update = *update;
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(update.task_id().into_inner()))
                .set((
                    tasks::status.eq(update.status().as_str()),
                    tasks::position.eq(update.position().get()),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(update.task_id()));
            }
            Ok(())
        })
        .await
    }
}

type BoxedTaskQuery<'a> = tasks::BoxedQuery<'a, diesel::pg::Pg>;

fn apply_predicate<'a>(
    select: BoxedTaskQuery<'a>,
    predicate: &TaskPredicate,
) -> BoxedTaskQuery<'a> {
    match predicate {
        TaskPredicate::WorkspaceEquals(workspace_id) => {
            select.filter(tasks::workspace_id.eq(workspace_id.into_inner()))
        }
        TaskPredicate::ProjectEquals(project_id) => {
            select.filter(tasks::project_id.eq(project_id.into_inner()))
        }
        TaskPredicate::AssigneeEquals(assignee_id) => {
            select.filter(tasks::assignee_id.eq(assignee_id.into_inner()))
        }
        TaskPredicate::StatusEquals(status) => select.filter(tasks::status.eq(status.as_str())),
        TaskPredicate::PriorityEquals(priority) => {
            select.filter(tasks::priority.eq(priority.as_str()))
        }
        TaskPredicate::DueDateEquals(due_date) => select.filter(tasks::due_date.eq(*due_date)),
        TaskPredicate::NameContains(term) => {
            select.filter(tasks::name.ilike(substring_pattern(term)))
        }
    }
}

/// Builds an `ILIKE` pattern matching the term anywhere in the name,
/// escaping the wildcard metacharacters in the term itself.
fn substring_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        workspace_id: task.workspace_id().into_inner(),
        project_id: task.project_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        name: task.name().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        position: task.position().get(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let position = Position::new(row.position).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        project_id: ProjectId::from_uuid(row.project_id),
        assignee_id: MemberId::from_uuid(row.assignee_id),
        name: row.name,
        description: row.description,
        status,
        priority,
        due_date: row.due_date,
        position,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
