// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Run orchestration for the compaction simulator: growth laws,
//! parameter resolution, the adaptive timestep controller, grid growth,
//! reporting, and the driver loop itself.

pub mod growth;
pub mod mesh;
pub mod reporter;
pub mod resolver;
pub mod simulation;
pub mod timestep;

pub use growth::GrowthLaw;
pub use resolver::resolve;
pub use simulation::Compaction;
