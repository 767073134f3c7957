// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Data Analysis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Pure reductions over profile arrays for the statistics file:
//! compaction-layer thickness, volume-weighted averages, and porosity of
//! the compacted region.

use ndarray::ArrayView1;

use mush_types::config::{Coordinates, PhysicsParams};

/// Thickness of the compaction boundary layer below the outer boundary.
///
/// Half-height criterion: scanning cells downward from the top, the layer
/// ends at the first cell whose porosity drops to or below the midpoint
/// between the profile's extremes. A uniform profile collapses onto its
/// top cell (thickness of half a spacing); a monotonically compacted
/// profile can span most of the domain.
pub fn thickness(phi: ArrayView1<f64>, r: ArrayView1<f64>) -> f64 {
    let n = phi.len();
    if n == 0 || r.len() != n + 1 {
        return 0.0;
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &p in phi.iter() {
        lo = lo.min(p);
        hi = hi.max(p);
    }
    let half = lo + 0.5 * (hi - lo);
    let r_top = r[n];

    // The minimum cell satisfies phi <= half, so the scan always
    // terminates inside the loop for a non-empty profile.
    for j in (0..n).rev() {
        if phi[j] <= half {
            let center = 0.5 * (r[j] + r[j + 1]);
            return r_top - center;
        }
    }
    r_top
}

/// Volume-weighted average of `values` at coordinates `coords`:
/// weights are r² in spherical coordinates, uniform otherwise.
pub fn average(values: ArrayView1<f64>, coords: ArrayView1<f64>, options: &PhysicsParams) -> f64 {
    let mut num = 0.0;
    let mut den = 0.0;
    for (&v, &x) in values.iter().zip(coords.iter()) {
        let w = match options.coordinates {
            Coordinates::Spherical => x * x,
            Coordinates::Cartesian => 1.0,
        };
        num += w * v;
        den += w;
    }
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Average porosity of the compacted region: all cells whose center lies
/// below the compaction layer, i.e. deeper than `delta` under the outer
/// boundary. Returns 0 when no cell qualifies.
pub fn porosity_compacted_region(
    phi: ArrayView1<f64>,
    r: ArrayView1<f64>,
    delta: f64,
    options: &PhysicsParams,
) -> f64 {
    let n = phi.len();
    if n == 0 || r.len() != n + 1 {
        return 0.0;
    }
    let cutoff = r[n] - delta;
    let mut num = 0.0;
    let mut den = 0.0;
    for j in 0..n {
        let center = 0.5 * (r[j] + r[j + 1]);
        if center <= cutoff {
            let w = match options.coordinates {
                Coordinates::Spherical => center * center,
                Coordinates::Cartesian => 1.0,
            };
            num += w * phi[j];
            den += w;
        }
    }
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}
