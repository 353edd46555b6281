//! Board session: a scoped store over one (workspace, filter) view that
//! drives drops through reconciliation, bulk application, and refetch.

use crate::board::{
    domain::{
        BoardSnapshot, CardSlot, DragGesture, DragPhase, FilterUpdate, ReconcileError, TaskFilter,
        UserId, reconcile,
    },
    ports::{MemberDirectory, ProjectDirectory, TaskRepository},
    services::{
        bulk::{BatchReceipt, BulkUpdateError, BulkUpdateService},
        query::{BoardQueryError, BoardQueryService},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a board session.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// The read path failed, or the actor lost workspace access.
    #[error(transparent)]
    Query(#[from] BoardQueryError),
    /// The gesture referenced slots the current board does not have; the
    /// board is stale and must be refreshed.
    #[error(transparent)]
    Stale(#[from] ReconcileError),
    /// Batch validation or application failed; the board shows the last
    /// confirmed state again.
    #[error(transparent)]
    Bulk(#[from] BulkUpdateError),
    /// A gesture arrived while another was still being reconciled.
    #[error("another drag gesture is still being reconciled")]
    GestureInFlight,
}

/// Outcome of a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drag ended outside any column; nothing happened.
    Cancelled,
    /// The card landed back on its own slot; nothing to persist.
    NoChange,
    /// The batch was fully applied and the board refetched.
    Applied(BatchReceipt),
}

/// A live view over one workspace board under one filter set.
///
/// The session keeps two snapshot versions: the last confirmed
/// projection of an authoritative fetch, and, while a batch is in
/// flight, the speculative projection produced by reconciliation. The
/// speculative snapshot is promoted by the post-apply refetch and
/// discarded on any failure, so a failed batch deterministically falls
/// back to the confirmed state.
///
/// Sessions are constructed on demand for a (workspace, filter, actor)
/// triple and dropped when the view goes away; nothing is cached
/// process-wide.
pub struct BoardSession<R, P, M, C>
where
    R: TaskRepository,
    P: ProjectDirectory,
    M: MemberDirectory,
    C: Clock + Send + Sync,
{
    query: BoardQueryService<R, P, M>,
    bulk: BulkUpdateService<R, C>,
    actor: UserId,
    filter: TaskFilter,
    confirmed: BoardSnapshot,
    speculative: Option<BoardSnapshot>,
    phase: DragPhase,
}

impl<R, P, M, C> BoardSession<R, P, M, C>
where
    R: TaskRepository,
    P: ProjectDirectory,
    M: MemberDirectory,
    C: Clock + Send + Sync,
{
    /// Opens a session: gates on workspace membership and loads the
    /// initial board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Query`] when the actor is not a
    /// member of the filter's workspace or the initial fetch fails.
    pub async fn open(
        repository: Arc<R>,
        projects: Arc<P>,
        members: Arc<M>,
        clock: Arc<C>,
        actor: UserId,
        filter: TaskFilter,
    ) -> Result<Self, BoardSessionError> {
        let query = BoardQueryService::new(Arc::clone(&repository), projects, members);
        let bulk = BulkUpdateService::new(repository, clock);
        let mut session = Self {
            query,
            bulk,
            actor,
            filter,
            confirmed: BoardSnapshot::empty(),
            speculative: None,
            phase: DragPhase::Idle,
        };
        session.refresh().await?;
        Ok(session)
    }

    /// Returns the board the view should render: the speculative
    /// snapshot while a batch is in flight, the confirmed one otherwise.
    #[must_use]
    pub fn board(&self) -> &BoardSnapshot {
        self.speculative.as_ref().unwrap_or(&self.confirmed)
    }

    /// Returns the current drag phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns the session's filter set.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Refetches the authoritative board and discards any speculative
    /// state. Server state always wins over optimistic local edits.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Query`] when the fetch fails; the
    /// previous snapshots are kept in that case.
    pub async fn refresh(&mut self) -> Result<(), BoardSessionError> {
        let board = self.query.fetch_board(self.actor, &self.filter).await?;
        self.confirmed = board;
        self.speculative = None;
        Ok(())
    }

    /// Applies a partial filter change and refetches the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Query`] when the refetch fails.
    pub async fn change_filter(&mut self, update: FilterUpdate) -> Result<(), BoardSessionError> {
        self.filter = self.filter.clone().apply(update);
        self.refresh().await
    }

    /// Handles one complete drag gesture.
    ///
    /// A destination-less gesture cancels with no side effects. A
    /// committed drop is reconciled against the currently rendered
    /// board; the resulting batch is applied in order and a successful
    /// application is followed by an authoritative refetch. On batch
    /// failure the speculative snapshot is discarded, so the board
    /// reverts to the last confirmed state and the error carries what
    /// the caller needs for a single consolidated notice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Stale`] for out-of-range slots,
    /// [`BoardSessionError::Bulk`] for validation or write failures, and
    /// [`BoardSessionError::Query`] when the post-apply refetch fails.
    pub async fn on_drop(&mut self, gesture: DragGesture) -> Result<DropOutcome, BoardSessionError> {
        if self.phase != DragPhase::Idle {
            return Err(BoardSessionError::GestureInFlight);
        }
        self.phase = DragPhase::Dragging;
        let Some(destination) = gesture.destination() else {
            self.phase = DragPhase::Idle;
            return Ok(DropOutcome::Cancelled);
        };
        self.phase = DragPhase::Reconciling;
        let outcome = self.reconcile_and_apply(gesture, destination).await;
        self.phase = DragPhase::Idle;
        outcome
    }

    async fn reconcile_and_apply(
        &mut self,
        gesture: DragGesture,
        destination: CardSlot,
    ) -> Result<DropOutcome, BoardSessionError> {
        let reconciliation = reconcile(self.board(), gesture.source(), destination)?;
        let (board, batch) = reconciliation.into_parts();
        if batch.is_empty() {
            return Ok(DropOutcome::NoChange);
        }
        tracing::debug!(writes = batch.len(), "drop reconciled");
        self.speculative = Some(board);
        match self.bulk.apply(&batch).await {
            Ok(receipt) => {
                self.refresh().await?;
                Ok(DropOutcome::Applied(receipt))
            }
            Err(error) => {
                self.speculative = None;
                Err(error.into())
            }
        }
    }
}
