//! Step definitions for board drag behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
