// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Velocity Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Darcy/compaction velocity solver for the solid matrix.
//!
//! Solves the 1-D two-phase momentum balance on the node grid:
//!
//!   δ²·η · (1/A) d/dr[ A ψ dV/dr ]  −  ψ²/K(φ) · V  =  sign · φ ψ
//!
//! with permeability K(φ) = K0·φ^n and metric A = r² (spherical) or 1
//! (cartesian). V = 0 at the center; the top boundary is either
//! zero-gradient (`dVdz==0`) or pinned to zero. Cell-centered porosity
//! makes the staggering exact: the faces around a node are the adjacent
//! cells, so no interpolation beyond the nodal average is needed.

use ndarray::Array1;

use mush_types::config::{BoundaryCondition, Coordinates, PhysicsParams};
use mush_types::error::{MushError, MushResult};

use crate::tridiag::thomas_solve;

/// Below this porosity a node is treated as fully solid (V pinned to 0),
/// keeping the Darcy term out of the singular K(φ→0) limit.
const PHI_FLOOR: f64 = 1e-10;

fn metric(coordinates: Coordinates, r: f64) -> f64 {
    match coordinates {
        Coordinates::Spherical => r * r,
        Coordinates::Cartesian => 1.0,
    }
}

/// Solid-matrix velocity for a given porosity field.
///
/// `phi` is cell-centered (one element fewer than `r`); the returned
/// velocity is node-aligned (same length as `r`). Pure: no side effects,
/// deterministic for identical inputs.
pub fn velocity_sramek(
    phi: &Array1<f64>,
    r: &Array1<f64>,
    options: &PhysicsParams,
) -> MushResult<Array1<f64>> {
    let n_nodes = r.len();
    if n_nodes < 2 {
        return Err(MushError::Config(format!(
            "velocity solve requires at least 2 grid nodes, got {n_nodes}"
        )));
    }
    if phi.len() + 1 != n_nodes {
        return Err(MushError::Config(format!(
            "velocity solve expects one cell per node pair: {} cells for {} nodes",
            phi.len(),
            n_nodes
        )));
    }

    let dr = r[1] - r[0];
    let visc = options.delta * options.delta * options.eta;

    let mut lower = vec![0.0; n_nodes];
    let mut diag = vec![0.0; n_nodes];
    let mut upper = vec![0.0; n_nodes];
    let mut rhs = vec![0.0; n_nodes];

    // Center: no relative motion at r = 0.
    diag[0] = 1.0;

    for i in 1..n_nodes - 1 {
        let phi_node = 0.5 * (phi[i - 1] + phi[i]);
        if phi_node < PHI_FLOOR {
            // Fully solid node: the matrix cannot move through itself.
            diag[i] = 1.0;
            continue;
        }
        let psi_node = 1.0 - phi_node;

        let a_node = metric(options.coordinates, r[i]).max(f64::EPSILON);
        let a_lo = metric(options.coordinates, 0.5 * (r[i - 1] + r[i]));
        let a_up = metric(options.coordinates, 0.5 * (r[i] + r[i + 1]));
        let psi_lo = 1.0 - phi[i - 1];
        let psi_up = 1.0 - phi[i];

        let coeff_lo = visc * a_lo * psi_lo / (a_node * dr * dr);
        let coeff_up = visc * a_up * psi_up / (a_node * dr * dr);
        let darcy = psi_node * psi_node
            / (options.k0 * phi_node.powf(options.permeability_exponent));

        lower[i] = coeff_lo;
        upper[i] = coeff_up;
        diag[i] = -(coeff_lo + coeff_up) - darcy;
        rhs[i] = options.sign * phi_node * psi_node;
    }

    // Outer boundary.
    let top = n_nodes - 1;
    match options.bc {
        BoundaryCondition::ZeroGradient => {
            lower[top] = -1.0;
            diag[top] = 1.0;
        }
        BoundaryCondition::ZeroVelocity => {
            diag[top] = 1.0;
        }
    }

    let v = thomas_solve(&lower, &diag, &upper, &rhs)?;
    if v.iter().any(|x| !x.is_finite()) {
        return Err(MushError::instability(
            "velocity solve produced non-finite values".to_string(),
        ));
    }
    Ok(Array1::from_vec(v))
}
