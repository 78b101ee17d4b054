//! raylut (workspace facade crate).
//!
//! Re-exports the table crates under short module names and hosts the
//! configuration layer shared by the `raylut` binary and the integration tests.

pub mod config;

pub use raylut_core as core;
pub use raylut_term as term;
pub use raylut_types as types;
