// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Timestep Controller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Stable explicit timestep from the current velocity field and the
//! instantaneous boundary growth rate.

use ndarray::Array1;

use mush_types::error::{MushError, MushResult};

/// Hard cap on the explicit step.
const DT_MAX: f64 = 0.5;

/// Advection / boundary-advance safety factor: neither the fastest
/// parcel nor the boundary may cross more than a tenth of a cell per step.
const CFL_FACTOR: f64 = 0.1;

/// Stable timestep for the next iteration.
///
/// `Δt = min(0.5, 0.1·dr/max|v|)`, further clamped by `0.1·dr/growth_rate`
/// when the boundary is growing. A zero growth rate skips the second
/// clamp entirely (no division by zero); a static velocity field leaves
/// the first clamp unbounded so the growth clamp dominates. Non-finite
/// velocity magnitudes and collapsed steps are stability faults.
pub fn stable_dt(velocity: &Array1<f64>, dr: f64, growth_rate: f64) -> MushResult<f64> {
    // f64::max swallows NaN, so non-finite entries are screened first.
    if velocity.iter().any(|v| !v.is_finite()) {
        return Err(MushError::instability(
            "maximum velocity magnitude is not finite".to_string(),
        ));
    }
    let v_max = velocity.iter().fold(0.0_f64, |m, v| m.max(v.abs()));

    let mut dt = (CFL_FACTOR * dr / v_max).min(DT_MAX);
    if growth_rate != 0.0 {
        if !growth_rate.is_finite() {
            return Err(MushError::instability(format!(
                "boundary growth rate is not finite: {growth_rate}"
            )));
        }
        dt = dt.min(CFL_FACTOR * dr / growth_rate);
    }

    if !dt.is_finite() || dt <= 0.0 {
        return Err(MushError::instability(format!(
            "timestep collapsed to {dt} (dr = {dr}, max|v| = {v_max}, rate = {growth_rate})"
        )));
    }
    Ok(dt)
}
