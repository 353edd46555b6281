//! Port contracts for board ordering and placement.
//!
//! Ports define infrastructure-agnostic interfaces used by board
//! services.

pub mod directory;
pub mod repository;

pub use directory::{DirectoryError, DirectoryResult, MemberDirectory, ProjectDirectory};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
