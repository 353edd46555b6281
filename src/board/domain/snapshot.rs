//! In-memory board projection: one ordered card list per status column.

use super::{TaskCard, TaskStatus};
use std::collections::BTreeMap;

/// Derived board state partitioning the loaded task set into the five
/// fixed columns, each ordered by ascending position.
///
/// Snapshots are never persisted; they are rebuilt from every successful
/// fetch and mutated only through drag reconciliation. Projecting the
/// same card list twice yields the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    columns: BTreeMap<TaskStatus, Vec<TaskCard>>,
}

impl BoardSnapshot {
    /// Creates a board with all five columns empty.
    #[must_use]
    pub fn empty() -> Self {
        let columns = TaskStatus::COLUMNS
            .iter()
            .map(|status| (*status, Vec::new()))
            .collect();
        Self { columns }
    }

    /// Partitions cards into columns and orders each column by ascending
    /// position.
    ///
    /// The sort is stable, so cards sharing a position (possible only
    /// transiently, between a partial write and the corrective refetch)
    /// keep their fetch order.
    #[must_use]
    pub fn project(cards: impl IntoIterator<Item = TaskCard>) -> Self {
        let mut board = Self::empty();
        for card in cards {
            board
                .columns
                .entry(card.task().status())
                .or_default()
                .push(card);
        }
        for column in board.columns.values_mut() {
            column.sort_by_key(|card| card.task().position());
        }
        board
    }

    /// Returns the cards of one column in display order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[TaskCard] {
        self.columns.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Returns the columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[TaskCard])> {
        self.columns
            .iter()
            .map(|(status, cards)| (*status, cards.as_slice()))
    }

    /// Returns the total number of cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Removes and returns the card at the given column index, or `None`
    /// when the index is out of range.
    pub(crate) fn remove_card(&mut self, status: TaskStatus, index: usize) -> Option<TaskCard> {
        let column = self.columns.get_mut(&status)?;
        if index >= column.len() {
            return None;
        }
        Some(column.remove(index))
    }

    /// Inserts a card at the given column index; `index` may equal the
    /// column length to append. Returns `false` when the index is out of
    /// range.
    pub(crate) fn insert_card(
        &mut self,
        status: TaskStatus,
        index: usize,
        card: TaskCard,
    ) -> bool {
        let Some(column) = self.columns.get_mut(&status) else {
            return false;
        };
        if index > column.len() {
            return false;
        }
        column.insert(index, card);
        true
    }

    /// Iterates one column mutably; used by reconciliation to renumber.
    pub(crate) fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<TaskCard> {
        self.columns.entry(status).or_default()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
