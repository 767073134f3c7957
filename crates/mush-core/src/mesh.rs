// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Grid Growth
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Grid-growth policy: extend the radius grid by one node when the last
//! cell lags more than one spacing behind the physical boundary.
//!
//! The timestep controller bounds the boundary advance per step to a
//! tenth of a spacing, so one appended node per iteration is always
//! enough; needing more is a stability fault, not a policy concern.

use ndarray::Array1;

use mush_types::state::SimulationState;

/// True when the grid must grow to keep pace with the boundary.
pub fn lags_boundary(state: &SimulationState, boundary_radius: f64) -> bool {
    state.outer_radius() + state.dr < boundary_radius
}

/// Append one node at `last + dr` and one freshly solidified cell with
/// solid fraction `psi_fill`. The node-aligned velocity grows with the
/// grid so the field stays consistent until the next solve.
pub fn extend(state: &mut SimulationState, psi_fill: f64) {
    let mut r = state.r.to_vec();
    r.push(state.outer_radius() + state.dr);
    state.r = Array1::from_vec(r);

    let mut psi = state.psi.to_vec();
    psi.push(psi_fill);
    state.psi = Array1::from_vec(psi);

    let mut velocity = state.velocity.to_vec();
    let top = *velocity.last().unwrap_or(&0.0);
    velocity.push(top);
    state.velocity = Array1::from_vec(velocity);
}
