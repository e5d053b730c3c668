//! End-to-end scenarios and cross-cutting protocol invariants for the
//! `mcp` session engine, run against the public `mcp` facade crate.

pub mod properties;
pub mod scenarios;
