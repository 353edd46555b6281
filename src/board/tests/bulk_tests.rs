//! Service tests for bulk placement application, using a mocked store to
//! pin down write ordering and partial-failure behaviour.

use crate::board::{
    domain::{
        PlacementParams, Position, PositionUpdate, Task, TaskId, TaskPriority, TaskQuery,
        TaskStatus, UpdateBatch, WorkspaceId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{BulkUpdateError, BulkUpdateService},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use mockall::Sequence;
use rstest::rstest;
use std::sync::Arc;

mockall::mock! {
    pub TaskStore {}

    #[async_trait]
    impl TaskRepository for TaskStore {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn fetch_matching(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;
        async fn highest_position(
            &self,
            workspace_id: WorkspaceId,
            status: TaskStatus,
            priority: TaskPriority,
        ) -> TaskRepositoryResult<Option<Position>>;
        async fn apply_placement(
            &self,
            update: &PositionUpdate,
            updated_at: DateTime<Utc>,
        ) -> TaskRepositoryResult<()>;
    }
}

fn update(task_id: TaskId, position: i64) -> PositionUpdate {
    PositionUpdate::new(
        task_id,
        TaskStatus::Todo,
        Position::new(position).expect("valid position"),
    )
}

fn service(mock: MockTaskStore) -> BulkUpdateService<MockTaskStore, DefaultClock> {
    BulkUpdateService::new(Arc::new(mock), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_batch_is_written_in_emission_order() {
    let ids = [TaskId::new(), TaskId::new(), TaskId::new()];
    let mut mock = MockTaskStore::new();
    let mut order = Sequence::new();
    for id in ids {
        mock.expect_apply_placement()
            .withf(move |update, _| update.task_id() == id)
            .times(1)
            .in_sequence(&mut order)
            .returning(|_, _| Ok(()));
    }

    let batch = UpdateBatch::new(vec![
        update(ids[0], 1000),
        update(ids[1], 2000),
        update(ids[2], 3000),
    ]);
    let receipt = service(mock)
        .apply(&batch)
        .await
        .expect("batch applies");
    assert_eq!(receipt.applied(), ids);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_mid_batch_fault_stops_the_sequence_and_reports_every_id() {
    let ids = [TaskId::new(), TaskId::new(), TaskId::new()];
    let mut mock = MockTaskStore::new();
    let mut order = Sequence::new();
    let (first, second, third) = (ids[0], ids[1], ids[2]);
    mock.expect_apply_placement()
        .withf(move |update, _| update.task_id() == first)
        .times(1)
        .in_sequence(&mut order)
        .returning(|_, _| Ok(()));
    mock.expect_apply_placement()
        .withf(move |update, _| update.task_id() == second)
        .times(1)
        .in_sequence(&mut order)
        .returning(|_, _| {
            Err(TaskRepositoryError::persistence(std::io::Error::other(
                "write timed out",
            )))
        });
    // The third write must never be attempted once the second fails.
    mock.expect_apply_placement()
        .withf(move |update, _| update.task_id() == third)
        .never();

    let batch = UpdateBatch::new(vec![
        update(first, 1000),
        update(second, 2000),
        update(third, 3000),
    ]);
    let error = service(mock)
        .apply(&batch)
        .await
        .expect_err("batch stops part-way");

    let BulkUpdateError::Partial(failure) = error else {
        panic!("expected a partial write failure, got {error:?}");
    };
    assert_eq!(failure.applied(), [first]);
    assert_eq!(failure.failed(), [second]);
    assert_eq!(failure.skipped(), [third]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_invalid_payload_is_rejected_before_any_write() {
    let mut mock = MockTaskStore::new();
    mock.expect_apply_placement().never();

    let payload = [
        PlacementParams {
            task_id: TaskId::new().to_string(),
            status: "todo".to_owned(),
            position: 1000,
        },
        PlacementParams {
            task_id: TaskId::new().to_string(),
            status: "todo".to_owned(),
            position: 3,
        },
    ];
    let error = service(mock)
        .apply_params(&payload)
        .await
        .expect_err("payload is rejected");
    assert!(matches!(error, BulkUpdateError::Validation(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_well_formed_payload_parses_and_applies(#[values(1000, 250_000)] position: i64) {
    let task_id = TaskId::new();
    let mut mock = MockTaskStore::new();
    mock.expect_apply_placement()
        .withf(move |update, _| {
            update.task_id() == task_id && update.position().get() == position
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let payload = [PlacementParams {
        task_id: task_id.to_string(),
        status: "in_progress".to_owned(),
        position,
    }];
    let receipt = service(mock)
        .apply_params(&payload)
        .await
        .expect("payload applies");
    assert_eq!(receipt.applied(), [task_id]);
}
