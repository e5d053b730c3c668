//! Test fixtures, mocks, and assertion helpers shared across the MCP
//! crates and the top-level integration suite.

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::*;
pub use fixtures::*;
pub use mocks::*;
