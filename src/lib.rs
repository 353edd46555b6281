//! Taskdeck: work-item ordering core for a multi-column board.
//!
//! This crate implements the ordering subsystem behind a kanban-style
//! work-item tracker: sparse sort-key allocation for new tasks, filter
//! compilation for the board read path, an in-memory board projection,
//! drag-and-drop reconciliation into minimal position deltas, and batched
//! application of those deltas against a store that has no native reorder
//! primitive.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure ordering logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the durable task store and
//!   the project/member directories
//! - **Adapters**: Concrete implementations of ports (in-memory, database)
//!
//! # Modules
//!
//! - [`board`]: Board projection, position allocation, drag
//!   reconciliation, and bulk placement updates

pub mod board;
