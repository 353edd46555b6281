//! Application services for board ordering and placement.

mod allocation;
mod bulk;
mod lifecycle;
mod query;
mod session;

pub use allocation::{AllocationError, PositionAllocator};
pub use bulk::{BatchReceipt, BulkUpdateError, BulkUpdateService, PartialWriteFailure};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use query::{BoardQueryError, BoardQueryService};
pub use session::{BoardSession, BoardSessionError, DropOutcome};
