//! Behaviour tests for board drag reconciliation.

mod board_drag_steps;

use board_drag_steps::world::{BoardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Reordering within a column renumbers the shifted cards"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_within_a_column(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Moving a card across columns updates its status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_across_columns(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Dropping outside any column leaves the board unchanged"
)]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_drop(world: BoardWorld) {
    let _ = world;
}
