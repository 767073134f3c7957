// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;

use crate::config::ResolvedConfig;
use crate::error::{MushError, MushResult};

/// Complete state of one compaction run.
///
/// Owned exclusively by the simulation loop and mutated in place each
/// iteration. The radius grid holds node coordinates (first node at 0);
/// the solid fraction ψ is cell-centered, one element fewer than the grid;
/// the velocity field is node-aligned.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub time: f64,
    pub iteration: usize,
    /// Node radii, strictly increasing, `r[0] == 0`.
    pub r: Array1<f64>,
    /// Cell spacing. Constant: grid growth appends nodes at `last + dr`.
    pub dr: f64,
    /// Solid fraction ψ = 1 − φ per cell, in `[0, 1]`.
    pub psi: Array1<f64>,
    /// Matrix velocity per node.
    pub velocity: Array1<f64>,
    /// Current stable timestep.
    pub dt: f64,
    /// Simulated time accumulated towards the next profile snapshot.
    pub time_since_print: f64,
}

impl SimulationState {
    /// Allocate the initial state: uniform ψ on a grid spanning `[0, R_init]`.
    pub fn new(config: &ResolvedConfig) -> Self {
        let n = config.grid.n_cells;
        let r = Array1::linspace(0.0, config.growth.r_init, n + 1);
        let dr = r[1] - r[0];
        let psi = Array1::from_elem(n, 1.0 - config.physics.phi_init);
        SimulationState {
            time: config.growth.t_init,
            iteration: 0,
            r,
            dr,
            psi,
            velocity: Array1::zeros(n + 1),
            dt: 0.0,
            time_since_print: config.growth.t_init,
        }
    }

    pub fn n_cells(&self) -> usize {
        self.psi.len()
    }

    pub fn outer_radius(&self) -> f64 {
        self.r[self.r.len() - 1]
    }

    /// Porosity φ = 1 − ψ per cell.
    pub fn porosity(&self) -> Array1<f64> {
        self.psi.mapv(|psi| 1.0 - psi)
    }

    /// Check the structural invariants of the state. Intended for the
    /// simulation loop's fault path and for tests; a violation indicates a
    /// stability bug, not a configuration problem.
    pub fn validate(&self) -> MushResult<()> {
        if self.psi.len() + 1 != self.r.len() {
            return Err(MushError::instability(format!(
                "field/grid size mismatch: {} cells for {} nodes",
                self.psi.len(),
                self.r.len()
            )));
        }
        if self.velocity.len() != self.r.len() {
            return Err(MushError::instability(format!(
                "velocity/grid size mismatch: {} values for {} nodes",
                self.velocity.len(),
                self.r.len()
            )));
        }
        for i in 1..self.r.len() {
            if !(self.r[i] > self.r[i - 1]) {
                return Err(MushError::instability(format!(
                    "grid not strictly increasing at node {i}"
                )));
            }
        }
        if self.psi.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(MushError::instability(
                "solid fraction left [0, 1]".to_string(),
            ));
        }
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(MushError::instability(format!(
                "invalid timestep {}",
                self.dt
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AdvectionScheme, BoundaryCondition, Coordinates, GridParams, GrowthParams, OutputParams,
        PhysicsParams,
    };
    use std::path::PathBuf;

    fn demo_config() -> ResolvedConfig {
        ResolvedConfig {
            growth: GrowthParams {
                exponent: 1.0,
                coeff: 2.0,
                r_final: 10.0,
                time_max: 5.0,
                t_init: 0.5,
                r_init: 1.0,
                supercooling: None,
            },
            grid: GridParams {
                n_cells: 20,
                psi_fill: 0.6,
            },
            physics: PhysicsParams {
                coordinates: Coordinates::Spherical,
                bc: BoundaryCondition::ZeroGradient,
                advection: AdvectionScheme::FluxLimited,
                sign: 1.0,
                k0: 1.0,
                permeability_exponent: 2.0,
                delta: 1.0,
                eta: 1.0,
                phi_init: 0.4,
            },
            output: OutputParams {
                directory: PathBuf::from("runs/demo"),
                stem: "demo".to_string(),
                dt_print: 0.5,
            },
        }
    }

    #[test]
    fn test_initial_state_shapes() {
        let state = SimulationState::new(&demo_config());
        assert_eq!(state.r.len(), 21);
        assert_eq!(state.psi.len(), 20);
        assert_eq!(state.velocity.len(), 21);
        assert!((state.r[0]).abs() < 1e-15, "grid starts at the center");
        assert!((state.outer_radius() - 1.0).abs() < 1e-12);
        assert!((state.dr - 0.05).abs() < 1e-12);
        assert!((state.time - 0.5).abs() < 1e-15);
        assert_eq!(state.iteration, 0);
    }

    #[test]
    fn test_initial_psi_uniform() {
        let state = SimulationState::new(&demo_config());
        for &psi in state.psi.iter() {
            assert!((psi - 0.6).abs() < 1e-15, "psi should equal 1 - phi_init");
        }
    }

    #[test]
    fn test_validate_accepts_fresh_state() {
        let state = SimulationState::new(&demo_config());
        state.validate().expect("fresh state must satisfy invariants");
    }

    #[test]
    fn test_validate_rejects_broken_grid() {
        let mut state = SimulationState::new(&demo_config());
        state.r[5] = state.r[4]; // duplicate node
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_psi() {
        let mut state = SimulationState::new(&demo_config());
        state.psi[3] = 1.5;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_porosity_complements_psi() {
        let state = SimulationState::new(&demo_config());
        let phi = state.porosity();
        for (p, s) in phi.iter().zip(state.psi.iter()) {
            assert!((p + s - 1.0).abs() < 1e-15);
        }
    }
}
