//! In-memory adapters for board ports.

mod directory;
mod repository;

pub use directory::{InMemoryMemberDirectory, InMemoryProjectDirectory};
pub use repository::InMemoryTaskRepository;
