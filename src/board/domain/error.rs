//! Error types for board domain validation, parsing, and reconciliation.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be blank")]
    BlankTaskName,

    /// A position value falls outside the agreed sort-key bounds.
    #[error("position {0} is outside the allowed range")]
    PositionOutOfBounds(i64),

    /// Renumbering a column would push a rank past the position ceiling.
    #[error("column rank {0} exceeds the renumbering capacity")]
    ColumnCapacityExceeded(usize),
}

/// Error returned while parsing task statuses from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing task priorities from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Errors rejecting a raw filter set before any query is issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The mandatory workspace scope is absent.
    #[error("filter set is missing the mandatory workspace scope")]
    MissingWorkspaceScope,

    /// An identifier field does not parse as a UUID.
    #[error("filter field '{field}' holds an invalid identifier: {value}")]
    InvalidId {
        /// Name of the offending filter field.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The status filter names an unknown column.
    #[error(transparent)]
    UnknownStatus(#[from] ParseStatusError),

    /// The priority filter names an unknown priority.
    #[error(transparent)]
    UnknownPriority(#[from] ParsePriorityError),

    /// The due-date filter is not an ISO calendar date.
    #[error("due date filter '{0}' is not a valid ISO date")]
    InvalidDueDate(String),
}

/// Errors aborting a drag reconciliation against a stale board.
///
/// Reconciliation is all-or-nothing: any of these leaves the board
/// snapshot untouched and requires the caller to refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The drag source does not exist in the current snapshot.
    #[error("source slot {index} is out of range for column {column} of length {len}")]
    SourceOutOfRange {
        /// Column the gesture started from.
        column: TaskStatus,
        /// Index reported by the gesture.
        index: usize,
        /// Actual column length in the snapshot.
        len: usize,
    },

    /// The drop destination does not exist in the current snapshot.
    #[error("destination slot {index} is out of range for column {column} of length {len}")]
    DestinationOutOfRange {
        /// Column the gesture ended in.
        column: TaskStatus,
        /// Index reported by the gesture.
        index: usize,
        /// Actual column length in the snapshot.
        len: usize,
    },

    /// Renumbering the touched column would exceed the position ceiling.
    #[error("column {column} cannot hold a card at rank {rank}")]
    ColumnCapacityExceeded {
        /// Column being renumbered.
        column: TaskStatus,
        /// First rank that no longer fits.
        rank: usize,
    },
}

/// Errors rejecting a raw placement batch wholesale.
///
/// Validation runs before any write is attempted; a single invalid entry
/// rejects the entire batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchValidationError {
    /// An entry's task id does not parse as a UUID.
    #[error("batch entry {index} holds an invalid task id: {value}")]
    InvalidTaskId {
        /// Zero-based entry index in the payload.
        index: usize,
        /// The raw value that failed to parse.
        value: String,
    },

    /// An entry names an unknown status.
    #[error("batch entry {index} names an unknown status: {value}")]
    UnknownStatus {
        /// Zero-based entry index in the payload.
        index: usize,
        /// The raw status value.
        value: String,
    },

    /// An entry's position falls outside the agreed sort-key bounds.
    #[error("batch entry {index} for task {task_id} carries position {value}, outside the allowed range")]
    PositionOutOfBounds {
        /// Zero-based entry index in the payload.
        index: usize,
        /// Task the entry addresses.
        task_id: TaskId,
        /// The rejected position value.
        value: i64,
    },
}
