//! Domain model for board ordering and placement.
//!
//! The board domain models sort-key allocation, filter compilation, the
//! in-memory board projection, and drag reconciliation while keeping all
//! infrastructure concerns outside of the domain boundary.

mod batch;
mod card;
mod error;
mod filter;
mod ids;
mod position;
mod reconcile;
mod snapshot;
mod task;

pub use batch::{PlacementParams, PositionUpdate, UpdateBatch};
pub use card::{MemberProfile, ProjectSummary, TaskCard};
pub use error::{
    BatchValidationError, BoardDomainError, FilterError, ParsePriorityError, ParseStatusError,
    ReconcileError,
};
pub use filter::{
    FilterUpdate, TaskFilter, TaskFilterParams, TaskOrdering, TaskPredicate, TaskQuery,
};
pub use ids::{MemberId, ProjectId, TaskId, UserId, WorkspaceId};
pub use position::Position;
pub use reconcile::{CardSlot, DragGesture, DragPhase, Reconciliation, reconcile};
pub use snapshot::BoardSnapshot;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPriority, TaskRevision, TaskStatus};
