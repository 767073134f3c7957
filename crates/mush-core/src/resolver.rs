// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Parameter Resolver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Validation and completion of a raw run configuration.
//!
//! The growth parameters form a constrained triple `R∞ = C·T_max^p`:
//! exactly one of {R∞, T_max, C} may be left out and is derived from the
//! other two. Inconsistent over-specification is resolved
//! deterministically with a warning, never an error. Initial radius and
//! time are completed through the growth law (direct or inverse).

use log::warn;

use mush_types::config::{
    GridParams, GrowthParams, OutputParams, PhysicsParams, RawConfig, ResolvedConfig,
    SupercoolingParams,
};
use mush_types::error::{MushError, MushResult};

/// Default cell count when `N_init` is not given.
const DEFAULT_N_CELLS: usize = 20;

/// Relative tolerance for deciding whether supplied growth parameters
/// agree with the derived ones.
const CONSISTENCY_RTOL: f64 = 1e-9;

fn consistent(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONSISTENCY_RTOL * a.abs().max(b.abs()).max(1.0)
}

/// Growth parameters must be strictly positive and finite; anything else
/// is a configuration fault, caught before the run touches the disk.
fn require_positive(name: &str, value: f64) -> MushResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MushError::Config(format!(
            "{name} must be finite and positive, got {value}"
        )));
    }
    Ok(())
}

/// Invert R = C·t^p for t. Fails when the law is not invertible.
fn invert_radius(radius: f64, coeff: f64, exponent: f64) -> MushResult<f64> {
    if exponent <= 0.0 {
        return Err(MushError::Config(format!(
            "cannot invert growth law with non-positive exponent {exponent}"
        )));
    }
    if coeff <= 0.0 {
        return Err(MushError::Config(format!(
            "cannot invert growth law with non-positive coefficient {coeff}"
        )));
    }
    Ok((radius / coeff).powf(1.0 / exponent))
}

/// Resolve a raw configuration into a complete, validated one.
///
/// Pure apart from warnings on the log; persisting the result is the
/// reporter's concern.
pub fn resolve(raw: RawConfig) -> MushResult<ResolvedConfig> {
    let p = raw.growth_rate_exponent;
    if !p.is_finite() {
        return Err(MushError::Config(format!(
            "growth_rate_exponent must be finite, got {p}"
        )));
    }
    if !(0.0..=1.0).contains(&raw.phi_init) {
        return Err(MushError::Config(format!(
            "phi_init must lie in [0, 1], got {}",
            raw.phi_init
        )));
    }
    if !raw.dt_print.is_finite() || raw.dt_print < 0.0 {
        return Err(MushError::Config(format!(
            "dt_print must be finite and >= 0, got {}",
            raw.dt_print
        )));
    }

    let grid = GridParams {
        n_cells: raw.n_init.unwrap_or(DEFAULT_N_CELLS).max(2),
        psi_fill: raw.psi_n.unwrap_or(1.0 - raw.phi_init),
    };
    let physics = PhysicsParams {
        coordinates: raw.coordinates,
        bc: raw.bc,
        advection: raw.advection,
        sign: raw.sign,
        k0: raw.k0,
        permeability_exponent: raw.n,
        delta: raw.delta,
        eta: raw.eta,
        phi_init: raw.phi_init,
    };
    let output = OutputParams {
        directory: raw.output.clone(),
        stem: raw.filename.clone(),
        dt_print: raw.dt_print,
    };

    // No-growth runs short-circuit the triple: the boundary stays put.
    if raw.no_growth {
        let r_init = raw.r_init.ok_or_else(|| {
            MushError::Config("no_growth runs require an explicit R_init".to_string())
        })?;
        let time_max = raw.time_max.ok_or_else(|| {
            MushError::Config("no_growth runs require an explicit time_max".to_string())
        })?;
        require_positive("R_init", r_init)?;
        require_positive("time_max", time_max)?;
        return Ok(ResolvedConfig {
            growth: GrowthParams {
                exponent: p,
                coeff: 0.0,
                r_final: r_init,
                time_max,
                t_init: raw.t_init.unwrap_or(0.0),
                r_init,
                supercooling: None,
            },
            grid,
            physics,
            output,
        });
    }

    // Complete the {R∞, T_max, C} triple.
    let (r_final, time_max, coeff) = match (raw.ric_adim, raw.time_max, raw.coeff_velocity) {
        (Some(r_final), Some(time_max), Some(coeff)) => {
            let derived = r_final * time_max.powf(-p);
            if !consistent(derived, coeff) {
                warn!(
                    "Ric_adim, time_max and coeff_velocity were all supplied; \
                     coeff_velocity overwritten to {derived}"
                );
            }
            (r_final, time_max, derived)
        }
        (None, Some(time_max), Some(coeff)) => (coeff * time_max.powf(p), time_max, coeff),
        (Some(r_final), None, Some(coeff)) => {
            (r_final, invert_radius(r_final, coeff, p)?, coeff)
        }
        (Some(r_final), Some(time_max), None) => {
            (r_final, time_max, r_final / time_max.powf(p))
        }
        _ => {
            return Err(MushError::Config(
                "at least two of Ric_adim, time_max and coeff_velocity are required".to_string(),
            ))
        }
    };
    require_positive("Ric_adim", r_final)?;
    require_positive("time_max", time_max)?;
    require_positive("coeff_velocity", coeff)?;

    // Complete the initial radius / time pair through the growth law.
    let radius_at = |t: f64| coeff * t.powf(p);
    let (t_init, r_init) = match (raw.t_init, raw.r_init) {
        (Some(t_init), Some(r_init)) => {
            let from_law = radius_at(t_init);
            if consistent(from_law, r_init) {
                (t_init, r_init)
            } else {
                warn!(
                    "t_init and R_init are inconsistent with the growth law; \
                     R_init overwritten to {from_law}"
                );
                (t_init, from_law)
            }
        }
        (Some(t_init), None) => (t_init, radius_at(t_init)),
        (None, Some(r_init)) => (invert_radius(r_init, coeff, p)?, r_init),
        (None, None) => {
            let r_init = 0.1 * r_final;
            warn!("neither t_init nor R_init supplied; R_init set to 0.1·Ric_adim = {r_init}");
            (invert_radius(r_init, coeff, p)?, r_init)
        }
    };
    if !t_init.is_finite() || t_init < 0.0 {
        return Err(MushError::Config(format!(
            "t_init must be finite and >= 0, got {t_init}"
        )));
    }
    require_positive("R_init", r_init)?;

    // Delayed nucleation: derive the clock shift and retime the budget.
    let (supercooling, time_max) = match (raw.t0_supercooling, raw.r0_supercooling) {
        (Some(t_onset), Some(r_onset)) => {
            if p <= 0.0 {
                return Err(MushError::Config(format!(
                    "supercooling requires a positive growth exponent, got {p}"
                )));
            }
            if t_onset <= 0.0 || r_onset <= 0.0 {
                return Err(MushError::Config(format!(
                    "supercooling onset must be positive, got t0 = {t_onset}, r0 = {r_onset}"
                )));
            }
            let time_shift = (r_onset / r_final).powf(1.0 / p) * time_max - t_onset;
            (
                Some(SupercoolingParams {
                    t_onset,
                    r_onset,
                    t_nominal: time_max,
                    time_shift,
                }),
                time_max - time_shift,
            )
        }
        (None, None) => (None, time_max),
        _ => {
            return Err(MushError::Config(
                "t0_supercooling and r0_supercooling must be supplied together".to_string(),
            ))
        }
    };

    Ok(ResolvedConfig {
        growth: GrowthParams {
            exponent: p,
            coeff,
            r_final,
            time_max,
            t_init,
            r_init,
            supercooling,
        },
        grid,
        physics,
        output,
    })
}
