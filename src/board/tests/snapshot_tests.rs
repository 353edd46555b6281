//! Unit tests for the board projection.

use super::fixtures::{TestScope, cards, scope, seeded_task};
use crate::board::domain::{BoardSnapshot, TaskStatus};
use rstest::rstest;

#[rstest]
fn empty_board_has_all_five_columns() {
    let board = BoardSnapshot::empty();
    for status in TaskStatus::COLUMNS {
        assert!(board.column(status).is_empty());
    }
    assert_eq!(board.card_count(), 0);
}

#[rstest]
fn project_partitions_by_status_and_orders_by_position(scope: TestScope) {
    let tasks = vec![
        seeded_task(&scope, "Beta", TaskStatus::Todo, 2000, 0),
        seeded_task(&scope, "Gamma", TaskStatus::Done, 1000, 1),
        seeded_task(&scope, "Alpha", TaskStatus::Todo, 1000, 2),
    ];

    let board = BoardSnapshot::project(cards(tasks));

    let todo: Vec<&str> = board
        .column(TaskStatus::Todo)
        .iter()
        .map(|card| card.task().name())
        .collect();
    assert_eq!(todo, ["Alpha", "Beta"]);
    assert_eq!(board.column(TaskStatus::Done).len(), 1);
    assert!(board.column(TaskStatus::Backlog).is_empty());
    assert_eq!(board.card_count(), 3);
}

#[rstest]
fn projecting_the_same_cards_twice_yields_identical_boards(scope: TestScope) {
    let tasks = vec![
        seeded_task(&scope, "Alpha", TaskStatus::Todo, 3000, 0),
        seeded_task(&scope, "Beta", TaskStatus::InProgress, 1000, 1),
        seeded_task(&scope, "Gamma", TaskStatus::Todo, 1000, 2),
    ];

    let first = BoardSnapshot::project(cards(tasks.clone()));
    let second = BoardSnapshot::project(cards(tasks));
    assert_eq!(first, second);
}

#[rstest]
fn columns_iterates_in_display_order(scope: TestScope) {
    let tasks = vec![
        seeded_task(&scope, "Alpha", TaskStatus::Done, 1000, 0),
        seeded_task(&scope, "Beta", TaskStatus::Backlog, 1000, 1),
    ];

    let board = BoardSnapshot::project(cards(tasks));
    let order: Vec<TaskStatus> = board.columns().map(|(status, _)| status).collect();
    assert_eq!(order, TaskStatus::COLUMNS);
}
