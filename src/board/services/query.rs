//! Board read path: compile the filter, fetch, and denormalize.

use crate::board::{
    domain::{
        BoardSnapshot, MemberId, ProjectId, Task, TaskCard, TaskFilter, UserId, WorkspaceId,
    },
    ports::{
        DirectoryError, MemberDirectory, ProjectDirectory, TaskRepository, TaskRepositoryError,
    },
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for the board read path.
#[derive(Debug, Error)]
pub enum BoardQueryError {
    /// Repository fetch failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The acting user is not a member of the workspace.
    #[error("user {user_id} is not a member of workspace {workspace_id}")]
    AccessDenied {
        /// Workspace the fetch targeted.
        workspace_id: WorkspaceId,
        /// The acting user.
        user_id: UserId,
    },
}

/// Read-side service behind the board: runs compiled queries and joins
/// in project and assignee summaries.
#[derive(Clone)]
pub struct BoardQueryService<R, P, M>
where
    R: TaskRepository,
    P: ProjectDirectory,
    M: MemberDirectory,
{
    repository: Arc<R>,
    projects: Arc<P>,
    members: Arc<M>,
}

impl<R, P, M> BoardQueryService<R, P, M>
where
    R: TaskRepository,
    P: ProjectDirectory,
    M: MemberDirectory,
{
    /// Creates a new board query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, projects: Arc<P>, members: Arc<M>) -> Self {
        Self {
            repository,
            projects,
            members,
        }
    }

    /// Fetches the cards matching a filter, denormalized with project
    /// and assignee summaries.
    ///
    /// A card whose project or assignee no longer resolves is returned
    /// with that field unset; the fetch itself still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardQueryError::AccessDenied`] when the actor is not a
    /// member of the filter's workspace, or the underlying repository
    /// and directory failures.
    pub async fn fetch_cards(
        &self,
        actor: UserId,
        filter: &TaskFilter,
    ) -> Result<Vec<TaskCard>, BoardQueryError> {
        self.authorize(filter.workspace_id(), actor).await?;

        let query = filter.compile();
        let tasks = self.repository.fetch_matching(&query).await?;

        let project_ids: Vec<ProjectId> = distinct(tasks.iter().map(Task::project_id));
        let assignee_ids: Vec<MemberId> = distinct(tasks.iter().map(Task::assignee_id));

        let projects: HashMap<ProjectId, _> = self
            .projects
            .find_many(&project_ids)
            .await?
            .into_iter()
            .map(|summary| (summary.id(), summary))
            .collect();
        let assignees: HashMap<MemberId, _> = self
            .members
            .find_many(&assignee_ids)
            .await?
            .into_iter()
            .map(|profile| (profile.id(), profile))
            .collect();

        let cards = tasks
            .into_iter()
            .map(|task| {
                let project = projects.get(&task.project_id()).cloned();
                let assignee = assignees.get(&task.assignee_id()).cloned();
                let mut card = TaskCard::new(task);
                if let Some(summary) = project {
                    card = card.with_project(summary);
                }
                if let Some(profile) = assignee {
                    card = card.with_assignee(profile);
                }
                card
            })
            .collect();
        Ok(cards)
    }

    /// Fetches and projects the board for a filter.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardQueryError`] from the card fetch.
    pub async fn fetch_board(
        &self,
        actor: UserId,
        filter: &TaskFilter,
    ) -> Result<BoardSnapshot, BoardQueryError> {
        let cards = self.fetch_cards(actor, filter).await?;
        Ok(BoardSnapshot::project(cards))
    }

    async fn authorize(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<(), BoardQueryError> {
        let membership = self.members.find_for_user(workspace_id, user_id).await?;
        if membership.is_none() {
            return Err(BoardQueryError::AccessDenied {
                workspace_id,
                user_id,
            });
        }
        Ok(())
    }
}

/// Collects distinct ids, preserving first-seen order.
fn distinct<T: Copy + Eq + std::hash::Hash>(ids: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
