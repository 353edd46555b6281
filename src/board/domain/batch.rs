//! Placement deltas produced by drag reconciliation and their raw wire
//! form.

use super::{BatchValidationError, Position, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One task's new placement: the column it now sits in and its sort key
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    task_id: TaskId,
    status: TaskStatus,
    position: Position,
}

impl PositionUpdate {
    /// Creates a placement delta.
    #[must_use]
    pub const fn new(task_id: TaskId, status: TaskStatus, position: Position) -> Self {
        Self {
            task_id,
            status,
            position,
        }
    }

    /// Returns the task the delta addresses.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the column the task moves to.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the new sort key.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Raw placement entry as received from the presentation layer, prior to
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementParams {
    /// Task identifier as a string.
    pub task_id: String,
    /// Target column name.
    pub status: String,
    /// Target sort key.
    pub position: i64,
}

/// Ordered, deduplicated set of placement deltas produced by one drag
/// gesture; the unit of bulk application.
///
/// Order is significant: writes are applied front to back, so the moved
/// task leads and sibling renumberings follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
    updates: Vec<PositionUpdate>,
}

impl UpdateBatch {
    /// Creates a batch from deltas in emission order, dropping later
    /// duplicates of the same task.
    #[must_use]
    pub fn new(updates: Vec<PositionUpdate>) -> Self {
        let mut seen = HashSet::with_capacity(updates.len());
        let updates = updates
            .into_iter()
            .filter(|update| seen.insert(update.task_id()))
            .collect();
        Self { updates }
    }

    /// Creates a batch with no deltas.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            updates: Vec::new(),
        }
    }

    /// Validates a raw payload wholesale into a batch.
    ///
    /// A single invalid entry rejects the entire payload; no partial
    /// acceptance. The position bounds are the same ones allocation and
    /// reconciliation emit under, so well-formed client payloads echoing
    /// server-produced values always pass.
    ///
    /// # Errors
    ///
    /// Returns the first [`BatchValidationError`] encountered, carrying
    /// the offending entry index.
    pub fn parse(params: &[PlacementParams]) -> Result<Self, BatchValidationError> {
        let mut updates = Vec::with_capacity(params.len());
        for (index, entry) in params.iter().enumerate() {
            let raw_id = Uuid::parse_str(entry.task_id.trim()).map_err(|_| {
                BatchValidationError::InvalidTaskId {
                    index,
                    value: entry.task_id.clone(),
                }
            })?;
            let task_id = TaskId::from_uuid(raw_id);
            let status = TaskStatus::try_from(entry.status.as_str()).map_err(|_| {
                BatchValidationError::UnknownStatus {
                    index,
                    value: entry.status.clone(),
                }
            })?;
            let position = Position::new(entry.position).map_err(|_| {
                BatchValidationError::PositionOutOfBounds {
                    index,
                    task_id,
                    value: entry.position,
                }
            })?;
            updates.push(PositionUpdate::new(task_id, status, position));
        }
        Ok(Self::new(updates))
    }

    /// Returns the deltas in application order.
    #[must_use]
    pub fn updates(&self) -> &[PositionUpdate] {
        &self.updates
    }

    /// Returns `true` when the batch carries no deltas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Returns the number of deltas in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }
}

impl<'a> IntoIterator for &'a UpdateBatch {
    type Item = &'a PositionUpdate;
    type IntoIter = std::slice::Iter<'a, PositionUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.iter()
    }
}
