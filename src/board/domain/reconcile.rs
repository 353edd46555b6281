//! Drag reconciliation: turning one drop gesture into a new board state
//! and the minimal set of placement deltas that makes the durable store
//! match it.
//!
//! A touched column is renumbered on the same gapped scale the allocator
//! appends on, so freshly created and freshly dragged cards stay on one
//! position scheme. Deltas are emitted only for cards whose canonical
//! sort key (or column) differs from the stored one, keeping writes
//! proportional to the cards that actually shifted.

use super::{
    BoardSnapshot, Position, PositionUpdate, ReconcileError, TaskStatus, UpdateBatch,
};

/// A card location on the board: column plus zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// Column the slot addresses.
    pub column: TaskStatus,
    /// Zero-based index within the column.
    pub index: usize,
}

impl CardSlot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(column: TaskStatus, index: usize) -> Self {
        Self { column, index }
    }
}

/// One complete drag gesture as reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    source: CardSlot,
    destination: Option<CardSlot>,
}

impl DragGesture {
    /// Creates a gesture dropped onto a column slot.
    #[must_use]
    pub const fn to(source: CardSlot, destination: CardSlot) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// Creates a gesture dropped outside any column.
    #[must_use]
    pub const fn cancelled(source: CardSlot) -> Self {
        Self {
            source,
            destination: None,
        }
    }

    /// Returns where the drag started.
    #[must_use]
    pub const fn source(&self) -> CardSlot {
        self.source
    }

    /// Returns where the drag ended, or `None` when it was dropped
    /// outside any column.
    #[must_use]
    pub const fn destination(&self) -> Option<CardSlot> {
        self.destination
    }
}

/// Phase of the drag state machine.
///
/// One gesture is handled to completion before another is accepted; the
/// phase cycles `Idle → Dragging → Reconciling → Idle`, with a
/// destination-less drop short-circuiting straight back to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// A gesture has been picked up.
    Dragging,
    /// A committed drop is being reconciled and applied.
    Reconciling,
}

/// Outcome of reconciling a committed drop: the optimistic board and the
/// deltas to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    board: BoardSnapshot,
    batch: UpdateBatch,
}

impl Reconciliation {
    /// Returns the optimistic board state.
    #[must_use]
    pub const fn board(&self) -> &BoardSnapshot {
        &self.board
    }

    /// Returns the placement deltas in application order.
    #[must_use]
    pub const fn batch(&self) -> &UpdateBatch {
        &self.batch
    }

    /// Consumes the reconciliation into its board and batch.
    #[must_use]
    pub fn into_parts(self) -> (BoardSnapshot, UpdateBatch) {
        (self.board, self.batch)
    }
}

/// Reconciles a committed drop from `source` to `destination` against a
/// board snapshot.
///
/// Returns the new board plus the deltas for the moved card (first) and
/// any sibling whose placement shifted, destination column before source
/// column. A drop back onto the source slot yields an unchanged board
/// and an empty batch.
///
/// # Errors
///
/// Returns [`ReconcileError`] when either slot is out of range for the
/// snapshot (a stale gesture) or a touched column no longer fits under
/// the position ceiling. The input snapshot is never modified.
pub fn reconcile(
    board: &BoardSnapshot,
    source: CardSlot,
    destination: CardSlot,
) -> Result<Reconciliation, ReconcileError> {
    if source == destination {
        return Ok(Reconciliation {
            board: board.clone(),
            batch: UpdateBatch::empty(),
        });
    }

    let mut next = board.clone();
    let moved = next
        .remove_card(source.column, source.index)
        .ok_or_else(|| ReconcileError::SourceOutOfRange {
            column: source.column,
            index: source.index,
            len: board.column(source.column).len(),
        })?;

    let dest_len = next.column(destination.column).len();
    if destination.index > dest_len {
        return Err(ReconcileError::DestinationOutOfRange {
            column: destination.column,
            index: destination.index,
            len: dest_len,
        });
    }

    let moved_id = moved.task().id();
    if !next.insert_card(destination.column, destination.index, moved) {
        return Err(ReconcileError::DestinationOutOfRange {
            column: destination.column,
            index: destination.index,
            len: dest_len,
        });
    }

    let mut updates = renumber_column(&mut next, destination.column)?;

    // The moved card leads the batch; renumbering emits in rank order,
    // so pull its delta to the front when it is present at all.
    if let Some(slot) = updates
        .iter()
        .position(|update| update.task_id() == moved_id)
        && slot > 0
    {
        let lead = updates.remove(slot);
        updates.insert(0, lead);
    }

    if source.column != destination.column {
        updates.extend(renumber_column(&mut next, source.column)?);
    }

    Ok(Reconciliation {
        batch: UpdateBatch::new(updates),
        board: next,
    })
}

/// Renumbers one column onto the canonical gapped scale, emitting a
/// delta for every card whose stored placement differs.
fn renumber_column(
    board: &mut BoardSnapshot,
    column: TaskStatus,
) -> Result<Vec<PositionUpdate>, ReconcileError> {
    let mut updates = Vec::new();
    let cards = board.column_mut(column);
    for (rank, card) in cards.iter_mut().enumerate() {
        let canonical = Position::at_rank(rank)
            .map_err(|_| ReconcileError::ColumnCapacityExceeded { column, rank })?;
        let shifted = card.task().position() != canonical || card.task().status() != column;
        card.place(column, canonical);
        if shifted {
            updates.push(PositionUpdate::new(card.task().id(), column, canonical));
        }
    }
    Ok(updates)
}
