// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Field Update Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Conservative finite-volume advection of the solid fraction ψ:
//!
//!   ∂ψ/∂t + (1/A) ∂(A V ψ)/∂r = 0,   A = r² (spherical) or 1.
//!
//! Face fluxes are donor-cell upwind, optionally sharpened by a superbee
//! flux limiter (`FLS` scheme). The center face carries no flux and the
//! top face uses a zero-gradient closure for ψ outside the domain.

use ndarray::Array1;

use mush_types::config::{AdvectionScheme, Coordinates, PhysicsParams};
use mush_types::error::{MushError, MushResult};

fn metric(coordinates: Coordinates, r: f64) -> f64 {
    match coordinates {
        Coordinates::Spherical => r * r,
        Coordinates::Cartesian => 1.0,
    }
}

fn cell_volume(coordinates: Coordinates, r_lo: f64, r_hi: f64) -> f64 {
    match coordinates {
        Coordinates::Spherical => (r_hi * r_hi * r_hi - r_lo * r_lo * r_lo) / 3.0,
        Coordinates::Cartesian => r_hi - r_lo,
    }
}

/// Superbee limiter: max(0, min(1, 2θ), min(2, θ)).
fn superbee(theta: f64) -> f64 {
    let a = (2.0 * theta).min(1.0);
    let b = theta.min(2.0);
    a.max(b).max(0.0)
}

/// Advance ψ by one explicit step of duration `dt`.
///
/// `velocity` is node-aligned, `psi` cell-centered. Returns the updated
/// field, clamped to `[0, 1]`. Pure.
pub fn update(
    velocity: &Array1<f64>,
    psi: &Array1<f64>,
    dt: f64,
    r: &Array1<f64>,
    options: &PhysicsParams,
) -> MushResult<Array1<f64>> {
    let n = psi.len();
    if r.len() != n + 1 || velocity.len() != n + 1 {
        return Err(MushError::Config(format!(
            "field update expects {} nodes for {} cells, got grid {} / velocity {}",
            n + 1,
            n,
            r.len(),
            velocity.len()
        )));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(MushError::instability(format!(
            "field update requires finite dt > 0, got {dt}"
        )));
    }
    let dr = r[1] - r[0];

    // Flux through every node face. The center face is closed.
    let mut flux = vec![0.0; n + 1];
    for i in 1..=n {
        let v = velocity[i];
        let area = metric(options.coordinates, r[i]);

        // Donor-cell value; zero-gradient beyond the top face.
        let (donor, downwind) = if v >= 0.0 {
            (psi[i - 1], if i < n { psi[i] } else { psi[n - 1] })
        } else {
            (if i < n { psi[i] } else { psi[n - 1] }, psi[i - 1])
        };
        let mut face_psi = donor;

        if options.advection == AdvectionScheme::FluxLimited && i > 1 && i < n {
            // Second-order TVD correction on interior faces only.
            let upstream = if v >= 0.0 {
                psi[i - 2]
            } else if i + 1 < n {
                psi[i + 1]
            } else {
                psi[n - 1]
            };
            let denom = downwind - donor;
            if denom.abs() > 1e-14 {
                let theta = (donor - upstream) / denom;
                let courant = v.abs() * dt / dr;
                face_psi += 0.5 * superbee(theta) * (1.0 - courant) * denom;
            }
        }

        flux[i] = area * v * face_psi;
    }

    let mut next = Array1::zeros(n);
    for j in 0..n {
        let vol = cell_volume(options.coordinates, r[j], r[j + 1]);
        let updated = psi[j] - dt * (flux[j + 1] - flux[j]) / vol;
        if !updated.is_finite() {
            return Err(MushError::instability(format!(
                "field update produced non-finite value in cell {j}"
            )));
        }
        next[j] = updated.clamp(0.0, 1.0);
    }
    Ok(next)
}
