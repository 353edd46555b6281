//! Board ordering and placement for work items.
//!
//! This module implements the task ordering subsystem: assigning an
//! initial sort key to a newly created work item within its column,
//! reconciling a drag-and-drop gesture into a minimal set of persisted
//! position and status changes, applying those changes as a batch against
//! a per-document store, and compiling multi-predicate filters into the
//! query used to repopulate the board. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
