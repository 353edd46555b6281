//! Shared world state for board drag BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::board::{
    adapters::memory::{
        InMemoryMemberDirectory, InMemoryProjectDirectory, InMemoryTaskRepository,
    },
    domain::{
        MemberId, MemberProfile, ProjectId, ProjectSummary, TaskFilter, TaskId, UserId,
        WorkspaceId,
    },
    services::{BoardSession, TaskLifecycleService},
};

/// Session type used by the BDD world.
pub type TestSession = BoardSession<
    InMemoryTaskRepository,
    InMemoryProjectDirectory,
    InMemoryMemberDirectory,
    DefaultClock,
>;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryMemberDirectory, DefaultClock>;

/// Scenario world for board drag behaviour tests.
pub struct BoardWorld {
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub member_id: MemberId,
    pub user_id: UserId,
    pub repository: Arc<InMemoryTaskRepository>,
    pub projects: Arc<InMemoryProjectDirectory>,
    pub members: Arc<InMemoryMemberDirectory>,
    pub lifecycle: TestLifecycle,
    pub session: Option<TestSession>,
    pub task_ids: HashMap<String, TaskId>,
}

impl BoardWorld {
    /// Creates a world with one seeded workspace and no tasks.
    #[must_use]
    pub fn new() -> Self {
        let workspace_id = WorkspaceId::new();
        let project_id = ProjectId::new();
        let member_id = MemberId::new();
        let user_id = UserId::new();

        let repository = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectDirectory::new());
        projects
            .register(ProjectSummary::new(project_id, workspace_id, "Atlas"))
            .expect("register project");
        let members = Arc::new(InMemoryMemberDirectory::new());
        members
            .register(MemberProfile::new(
                member_id,
                workspace_id,
                user_id,
                "Ada Lovelace",
                "ada@example.com",
            ))
            .expect("register member");

        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&members),
            Arc::new(DefaultClock),
        );

        Self {
            workspace_id,
            project_id,
            member_id,
            user_id,
            repository,
            projects,
            members,
            lifecycle,
            session: None,
            task_ids: HashMap::new(),
        }
    }

    /// Opens the board session over the seeded workspace.
    pub async fn open_session(&mut self) -> eyre::Result<()> {
        let session = BoardSession::open(
            Arc::clone(&self.repository),
            Arc::clone(&self.projects),
            Arc::clone(&self.members),
            Arc::new(DefaultClock),
            self.user_id,
            TaskFilter::for_workspace(self.workspace_id),
        )
        .await
        .map_err(|err| eyre::eyre!("open session: {err}"))?;
        self.session = Some(session);
        Ok(())
    }

    /// Returns the open session or fails the step.
    pub fn session_mut(&mut self) -> eyre::Result<&mut TestSession> {
        self.session
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no open session in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
