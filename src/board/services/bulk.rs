//! Bulk application of placement batches against a per-document store.
//!
//! The store offers no multi-document atomicity, so a batch is applied
//! as a fixed-order sequence of single-document writes: the moved task
//! first, then destination-column siblings, then source-column siblings.
//! A failure stops the sequence immediately and reports exactly which
//! writes landed, which failed, and which were never attempted, so the
//! caller can refetch and recompute a corrective diff instead of
//! retrying blindly.

use crate::board::{
    domain::{BatchValidationError, PlacementParams, PositionUpdate, TaskId, UpdateBatch},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Record of a fully applied batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    applied: Vec<TaskId>,
}

impl BatchReceipt {
    /// Returns the ids whose placements were written, in write order.
    #[must_use]
    pub fn applied(&self) -> &[TaskId] {
        &self.applied
    }
}

/// A batch that stopped part-way: some writes landed, one failed, the
/// rest were never attempted.
#[derive(Debug, Clone)]
pub struct PartialWriteFailure {
    applied: Vec<TaskId>,
    failed: Vec<TaskId>,
    skipped: Vec<TaskId>,
    cause: TaskRepositoryError,
}

impl PartialWriteFailure {
    /// Returns the ids whose placements were written before the fault.
    #[must_use]
    pub fn applied(&self) -> &[TaskId] {
        &self.applied
    }

    /// Returns the ids whose writes failed.
    #[must_use]
    pub fn failed(&self) -> &[TaskId] {
        &self.failed
    }

    /// Returns the ids whose writes were never attempted.
    #[must_use]
    pub fn skipped(&self) -> &[TaskId] {
        &self.skipped
    }

    /// Returns the underlying store fault.
    #[must_use]
    pub const fn cause(&self) -> &TaskRepositoryError {
        &self.cause
    }
}

impl fmt::Display for PartialWriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batch stopped after {} of {} writes; failed: {}",
            self.applied.len(),
            self.applied.len() + self.failed.len() + self.skipped.len(),
            format_ids(&self.failed),
        )
    }
}

fn format_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned while applying a placement batch.
#[derive(Debug, Clone, Error)]
pub enum BulkUpdateError {
    /// The raw payload failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] BatchValidationError),
    /// The batch stopped part-way through its writes.
    #[error("{0}")]
    Partial(PartialWriteFailure),
}

/// Applies placement batches in emission order with per-document writes.
#[derive(Clone)]
pub struct BulkUpdateService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BulkUpdateService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new bulk update service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Applies a validated batch, write by write, in the batch's order.
    ///
    /// # Errors
    ///
    /// Returns [`BulkUpdateError::Partial`] on the first write fault,
    /// listing applied, failed, and unattempted ids.
    pub async fn apply(&self, batch: &UpdateBatch) -> Result<BatchReceipt, BulkUpdateError> {
        let stamped_at = self.clock.utc();
        let mut applied = Vec::with_capacity(batch.len());
        for (index, update) in batch.updates().iter().enumerate() {
            match self.repository.apply_placement(update, stamped_at).await {
                Ok(()) => applied.push(update.task_id()),
                Err(cause) => {
                    let skipped = batch
                        .updates()
                        .get(index + 1..)
                        .unwrap_or_default()
                        .iter()
                        .map(PositionUpdate::task_id)
                        .collect::<Vec<_>>();
                    let failure = PartialWriteFailure {
                        applied,
                        failed: vec![update.task_id()],
                        skipped,
                        cause,
                    };
                    tracing::warn!(%failure, "placement batch stopped part-way");
                    return Err(BulkUpdateError::Partial(failure));
                }
            }
        }
        tracing::debug!(writes = applied.len(), "placement batch applied");
        Ok(BatchReceipt { applied })
    }

    /// Validates a raw payload and applies the resulting batch.
    ///
    /// Validation is wholesale: one invalid entry rejects the payload
    /// and no write is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`BulkUpdateError::Validation`] before any write, or
    /// [`BulkUpdateError::Partial`] from the application phase.
    pub async fn apply_params(
        &self,
        params: &[PlacementParams],
    ) -> Result<BatchReceipt, BulkUpdateError> {
        let batch = UpdateBatch::parse(params)?;
        self.apply(&batch).await
    }
}
