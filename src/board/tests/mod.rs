//! Test modules for the board context.

mod bulk_tests;
mod session_tests;
mod snapshot_tests;
