//! Physics kernels for the mush compaction simulator.
//!
//! Everything here is a pure collaborator of the time-integration core:
//! the Darcy/compaction velocity solver, the conservative ψ advection
//! kernel, the statistics reductions, and the profile writer.

pub mod analysis;
pub mod output;
pub mod tridiag;
pub mod update;
pub mod velocity;
