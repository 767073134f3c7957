//! Shared types for the mush compaction simulator: configuration
//! (raw and resolved), error type, and the per-run simulation state.

pub mod config;
pub mod error;
pub mod state;
