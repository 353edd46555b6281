//! Service tests for the board session: optimistic application,
//! deterministic rollback, and the drag state machine.

use super::fixtures::{TestScope, scope, seeded_task, store_all};
use crate::board::{
    adapters::memory::{
        InMemoryMemberDirectory, InMemoryProjectDirectory, InMemoryTaskRepository,
    },
    domain::{
        BoardSnapshot, CardSlot, DragGesture, DragPhase, FilterUpdate, Position, PositionUpdate,
        Task, TaskFilter, TaskId, TaskPriority, TaskQuery, TaskStatus, UserId, WorkspaceId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{BoardSession, BoardSessionError, BulkUpdateError, DropOutcome},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestSession<R> =
    BoardSession<R, InMemoryProjectDirectory, InMemoryMemberDirectory, DefaultClock>;

async fn open_session(scope: &TestScope) -> TestSession<InMemoryTaskRepository> {
    BoardSession::open(
        Arc::clone(&scope.repository),
        Arc::clone(&scope.projects),
        Arc::clone(&scope.members),
        Arc::new(DefaultClock),
        scope.user_id,
        TaskFilter::for_workspace(scope.workspace_id),
    )
    .await
    .expect("session opens")
}

fn column_names(board: &BoardSnapshot, status: TaskStatus) -> Vec<String> {
    board
        .column(status)
        .iter()
        .map(|card| card.task().name().to_owned())
        .collect()
}

async fn seed_todo_column(scope: &TestScope) -> Vec<Task> {
    let tasks = vec![
        seeded_task(scope, "Alpha", TaskStatus::Todo, 1000, 0),
        seeded_task(scope, "Beta", TaskStatus::Todo, 2000, 1),
        seeded_task(scope, "Gamma", TaskStatus::Todo, 3000, 2),
    ];
    store_all(scope, &tasks).await;
    tasks
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_drop_applies_durably_and_refetches(scope: TestScope) {
    let tasks = seed_todo_column(&scope).await;
    let mut session = open_session(&scope).await;

    let outcome = session
        .on_drop(DragGesture::to(
            CardSlot::new(TaskStatus::Todo, 2),
            CardSlot::new(TaskStatus::Todo, 0),
        ))
        .await
        .expect("drop succeeds");

    let DropOutcome::Applied(receipt) = outcome else {
        panic!("expected an applied outcome, got {outcome:?}");
    };
    assert_eq!(receipt.applied().len(), 3);
    assert_eq!(
        column_names(session.board(), TaskStatus::Todo),
        ["Gamma", "Alpha", "Beta"]
    );
    assert_eq!(session.phase(), DragPhase::Idle);

    // The refetched board reflects durable state: distinct, ascending
    // keys per column.
    let mut keys = Vec::new();
    for task in &tasks {
        let stored = scope
            .repository
            .find_by_id(task.id())
            .await
            .expect("lookup succeeds")
            .expect("task still stored");
        keys.push(stored.position().get());
    }
    let gamma = tasks.get(2).expect("third task");
    let stored_gamma = scope
        .repository
        .find_by_id(gamma.id())
        .await
        .expect("lookup succeeds")
        .expect("gamma stored");
    assert_eq!(stored_gamma.position().get(), 1000);
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_cross_column_drop_updates_status_durably(scope: TestScope) {
    let tasks = seed_todo_column(&scope).await;
    let mut session = open_session(&scope).await;

    session
        .on_drop(DragGesture::to(
            CardSlot::new(TaskStatus::Todo, 0),
            CardSlot::new(TaskStatus::Done, 0),
        ))
        .await
        .expect("drop succeeds");

    let alpha = tasks.first().expect("first task");
    let stored = scope
        .repository
        .find_by_id(alpha.id())
        .await
        .expect("lookup succeeds")
        .expect("alpha stored");
    assert_eq!(stored.status(), TaskStatus::Done);
    assert_eq!(stored.position().get(), 1000);
    assert_eq!(
        column_names(session.board(), TaskStatus::Todo),
        ["Beta", "Gamma"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_cancelled_gesture_is_a_pure_no_op(scope: TestScope) {
    seed_todo_column(&scope).await;
    let mut session = open_session(&scope).await;
    let before = session.board().clone();

    let outcome = session
        .on_drop(DragGesture::cancelled(CardSlot::new(TaskStatus::Todo, 1)))
        .await
        .expect("cancel succeeds");

    assert_eq!(outcome, DropOutcome::Cancelled);
    assert_eq!(session.board(), &before);
    assert_eq!(session.phase(), DragPhase::Idle);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_card_on_its_own_slot_persists_nothing(scope: TestScope) {
    seed_todo_column(&scope).await;
    let mut session = open_session(&scope).await;
    let before = session.board().clone();

    let outcome = session
        .on_drop(DragGesture::to(
            CardSlot::new(TaskStatus::Todo, 1),
            CardSlot::new(TaskStatus::Todo, 1),
        ))
        .await
        .expect("no-op drop succeeds");

    assert_eq!(outcome, DropOutcome::NoChange);
    assert_eq!(session.board(), &before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_stale_gesture_is_rejected_and_the_board_kept(scope: TestScope) {
    seed_todo_column(&scope).await;
    let mut session = open_session(&scope).await;
    let before = session.board().clone();

    let result = session
        .on_drop(DragGesture::to(
            CardSlot::new(TaskStatus::Todo, 9),
            CardSlot::new(TaskStatus::Done, 0),
        ))
        .await;

    assert!(matches!(result, Err(BoardSessionError::Stale(_))));
    assert_eq!(session.board(), &before);
    assert_eq!(session.phase(), DragPhase::Idle);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_filter_refetches_the_narrowed_board(scope: TestScope) {
    let tasks = vec![
        seeded_task(&scope, "Open", TaskStatus::Todo, 1000, 0),
        seeded_task(&scope, "Closed", TaskStatus::Done, 1000, 1),
    ];
    store_all(&scope, &tasks).await;
    let mut session = open_session(&scope).await;
    assert_eq!(session.board().card_count(), 2);

    session
        .change_filter(FilterUpdate::new().set_status(TaskStatus::Done))
        .await
        .expect("filter change succeeds");
    assert_eq!(session.board().card_count(), 1);
    assert_eq!(
        column_names(session.board(), TaskStatus::Done),
        ["Closed"]
    );

    session
        .change_filter(FilterUpdate::new().clear_status())
        .await
        .expect("filter change succeeds");
    assert_eq!(session.board().card_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_a_session_requires_membership(scope: TestScope) {
    let result = BoardSession::open(
        Arc::clone(&scope.repository),
        Arc::clone(&scope.projects),
        Arc::clone(&scope.members),
        Arc::new(DefaultClock),
        UserId::new(),
        TaskFilter::for_workspace(scope.workspace_id),
    )
    .await;
    assert!(matches!(result, Err(BoardSessionError::Query(_))));
}

/// Store wrapper that fails placement writes for one task, leaving every
/// other operation to the inner repository.
#[derive(Clone)]
struct FailingPlacementStore {
    inner: Arc<InMemoryTaskRepository>,
    fail_on: TaskId,
}

#[async_trait]
impl TaskRepository for FailingPlacementStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.store(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.update(task).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn fetch_matching(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.fetch_matching(query).await
    }

    async fn highest_position(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> TaskRepositoryResult<Option<Position>> {
        self.inner.highest_position(workspace_id, status, priority).await
    }

    async fn apply_placement(
        &self,
        update: &PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        if update.task_id() == self.fail_on {
            return Err(TaskRepositoryError::persistence(std::io::Error::other(
                "simulated write fault",
            )));
        }
        self.inner.apply_placement(update, updated_at).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_partial_write_reverts_to_the_confirmed_board(scope: TestScope) {
    let tasks = seed_todo_column(&scope).await;
    // Dragging Gamma to the top renumbers Gamma, Alpha, Beta in that
    // order; failing Alpha leaves Gamma written and Beta unattempted.
    let alpha = tasks.first().expect("first task");
    let store = Arc::new(FailingPlacementStore {
        inner: Arc::clone(&scope.repository),
        fail_on: alpha.id(),
    });
    let mut session: TestSession<FailingPlacementStore> = BoardSession::open(
        Arc::clone(&store),
        Arc::clone(&scope.projects),
        Arc::clone(&scope.members),
        Arc::new(DefaultClock),
        scope.user_id,
        TaskFilter::for_workspace(scope.workspace_id),
    )
    .await
    .expect("session opens");
    let confirmed = session.board().clone();

    let result = session
        .on_drop(DragGesture::to(
            CardSlot::new(TaskStatus::Todo, 2),
            CardSlot::new(TaskStatus::Todo, 0),
        ))
        .await;

    let Err(BoardSessionError::Bulk(BulkUpdateError::Partial(failure))) = result else {
        panic!("expected a partial write failure, got {result:?}");
    };
    assert_eq!(failure.failed(), [alpha.id()]);
    assert_eq!(failure.applied().len(), 1);
    assert_eq!(failure.skipped().len(), 1);

    // The optimistic projection is discarded; the view falls back to the
    // last confirmed snapshot.
    assert_eq!(session.board(), &confirmed);
    assert_eq!(session.phase(), DragPhase::Idle);

    // The write that landed before the fault is durable (the moved card
    // leads the batch), ready for the corrective refetch.
    let gamma = tasks.get(2).expect("third task");
    let stored_gamma = scope
        .repository
        .find_by_id(gamma.id())
        .await
        .expect("lookup succeeds")
        .expect("gamma stored");
    assert_eq!(stored_gamma.position().get(), 1000);
}
