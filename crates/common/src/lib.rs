//! Shared building blocks for the graph store crates: logging setup
//! and small HTTP payload types.

pub mod types;
pub mod utils;
