// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Growth Law
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Boundary growth laws: the prescribed radius of the solidifying core as
//! a function of time, and its time derivative.
//!
//! Two variants share one capability. The plain law is a power law
//! `R(t) = C·t^p`. The delayed-nucleation law models a supercooled
//! incubation: linear growth from 0 to an onset radius `r0` until the
//! onset time `t0`, then the same power law evaluated on a retimed clock
//! `t + Δt_sc`, where the shift was derived once at resolution time so
//! that the run still reaches the same asymptotic radius.

use mush_types::config::GrowthParams;

/// Growth-law variant, selected at configuration-resolution time.
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthLaw {
    Plain {
        coeff: f64,
        exponent: f64,
    },
    Delayed {
        coeff: f64,
        exponent: f64,
        t_onset: f64,
        r_onset: f64,
        time_shift: f64,
    },
}

impl GrowthLaw {
    pub fn from_config(growth: &GrowthParams) -> Self {
        match &growth.supercooling {
            Some(sc) => GrowthLaw::Delayed {
                // C = R∞ / T_nominal^p: identical to the plain coefficient,
                // applied on the shifted clock.
                coeff: growth.r_final / sc.t_nominal.powf(growth.exponent),
                exponent: growth.exponent,
                t_onset: sc.t_onset,
                r_onset: sc.r_onset,
                time_shift: sc.time_shift,
            },
            None => GrowthLaw::Plain {
                coeff: growth.coeff,
                exponent: growth.exponent,
            },
        }
    }

    /// Boundary radius at time `t >= 0`.
    pub fn radius(&self, t: f64) -> f64 {
        match *self {
            GrowthLaw::Plain { coeff, exponent } => coeff * t.powf(exponent),
            GrowthLaw::Delayed {
                coeff,
                exponent,
                t_onset,
                r_onset,
                time_shift,
            } => {
                if t < t_onset {
                    r_onset / t_onset * t
                } else {
                    coeff * (t + time_shift).powf(exponent)
                }
            }
        }
    }

    /// Boundary growth rate dR/dt at time `t`.
    ///
    /// Exactly 0 when the rate coefficient is 0: the naive product
    /// `0 · t^(p-1)` is NaN at t = 0 for p < 1.
    pub fn growth_rate(&self, t: f64) -> f64 {
        match *self {
            GrowthLaw::Plain { coeff, exponent } => {
                if coeff == 0.0 {
                    0.0
                } else {
                    coeff * exponent * t.powf(exponent - 1.0)
                }
            }
            GrowthLaw::Delayed {
                coeff,
                exponent,
                t_onset,
                r_onset,
                time_shift,
            } => {
                if t < t_onset {
                    r_onset / t_onset
                } else if coeff == 0.0 {
                    0.0
                } else {
                    coeff * exponent * (t + time_shift).powf(exponent - 1.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mush_types::config::SupercoolingParams;

    fn delayed_law() -> (GrowthLaw, f64) {
        // Nominal contract: R∞ = 1, T_max = 1, p = 1/2; onset at r0 = 0.7
        // after t0 = 1e-3 of supercooling.
        let exponent = 0.5;
        let r_final: f64 = 1.0;
        let t_nominal: f64 = 1.0;
        let t_onset = 1e-3;
        let r_onset = 0.7;
        let time_shift = (r_onset / r_final).powf(1.0 / exponent) * t_nominal - t_onset;
        let growth = GrowthParams {
            exponent,
            coeff: r_final / t_nominal.powf(exponent),
            r_final,
            time_max: t_nominal - time_shift,
            t_init: 0.0,
            r_init: 0.0,
            supercooling: Some(SupercoolingParams {
                t_onset,
                r_onset,
                t_nominal,
                time_shift,
            }),
        };
        (GrowthLaw::from_config(&growth), time_shift)
    }

    #[test]
    fn test_plain_linear_growth() {
        let law = GrowthLaw::Plain {
            coeff: 2.0,
            exponent: 1.0,
        };
        assert!((law.radius(5.0) - 10.0).abs() < 1e-12);
        assert!((law.growth_rate(5.0) - 2.0).abs() < 1e-12);
        assert!((law.growth_rate(0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_plain_sqrt_growth() {
        let law = GrowthLaw::Plain {
            coeff: 3.0,
            exponent: 0.5,
        };
        assert!((law.radius(4.0) - 6.0).abs() < 1e-12);
        // dR/dt = C·p·t^(p-1) = 3·0.5/sqrt(4) = 0.75
        assert!((law.growth_rate(4.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_coefficient_never_grows() {
        let law = GrowthLaw::Plain {
            coeff: 0.0,
            exponent: 0.5,
        };
        for t in [0.0, 0.1, 1.0, 100.0] {
            assert_eq!(law.radius(t), 0.0);
            assert_eq!(law.growth_rate(t), 0.0, "rate must be exactly 0 at t = {t}");
        }
    }

    #[test]
    fn test_plain_radius_strictly_increasing() {
        let law = GrowthLaw::Plain {
            coeff: 1.5,
            exponent: 0.4,
        };
        let mut prev = law.radius(0.0);
        for i in 1..100 {
            let next = law.radius(i as f64 * 0.05);
            assert!(next > prev, "radius must increase, step {i}");
            prev = next;
        }
    }

    #[test]
    fn test_delayed_reaches_onset_radius() {
        let (law, _) = delayed_law();
        assert!((law.radius(0.0)).abs() < 1e-15);
        assert!((law.radius(1e-3) - 0.7).abs() < 1e-9, "radius(t0) should hit r0");
        assert!((law.radius(0.5e-3) - 0.35).abs() < 1e-9, "linear below onset");
    }

    #[test]
    fn test_delayed_radius_continuous_at_onset() {
        let (law, _) = delayed_law();
        let eps = 1e-10;
        let below = law.radius(1e-3 - eps);
        let above = law.radius(1e-3 + eps);
        assert!(
            (below - above).abs() < 1e-6,
            "radius must be continuous at onset: {below} vs {above}"
        );
    }

    #[test]
    fn test_delayed_matches_plain_on_retimed_clock() {
        let (law, time_shift) = delayed_law();
        let plain = GrowthLaw::Plain {
            coeff: 1.0,
            exponent: 0.5,
        };
        for t in [2e-3, 0.1, 0.3] {
            let retimed = t + time_shift;
            assert!(
                (law.radius(t) - plain.radius(retimed)).abs() < 1e-12,
                "radius mismatch at t = {t}"
            );
            assert!(
                (law.growth_rate(t) - plain.growth_rate(retimed)).abs() < 1e-12,
                "growth rate mismatch at t = {t}"
            );
        }
    }

    #[test]
    fn test_delayed_reaches_asymptotic_radius() {
        let (law, time_shift) = delayed_law();
        // Run budget is T_nominal - Δt_sc; at its end the retimed clock
        // reads T_nominal and the radius reads R∞.
        let t_end = 1.0 - time_shift;
        assert!((law.radius(t_end) - 1.0).abs() < 1e-12);
    }
}
