// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Simulation Loop
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! The compaction driver: owns the state, the growth law, and the
//! reporter, and advances the run one explicit step at a time.
//!
//! The velocity solve is passed in as a closure so the loop stays
//! independent of the momentum model. Production runs hand it
//! [`mush_physics::velocity::velocity_sramek`]; tests substitute
//! analytic kernels.

use log::{info, warn};
use ndarray::Array1;

use mush_physics::update::update;
use mush_types::config::{PhysicsParams, ResolvedConfig};
use mush_types::error::{MushError, MushResult};
use mush_types::state::SimulationState;

use crate::growth::GrowthLaw;
use crate::mesh;
use crate::reporter::Reporter;
use crate::timestep::stable_dt;

/// Hard iteration ceiling. A run that has not reached its final time by
/// then is stuck on a vanishing timestep and is abandoned with a warning
/// rather than an error, so its partial outputs stay usable.
const MAX_ITERATIONS: usize = 100_000_000;

/// One compaction run, parametric over the velocity kernel.
pub struct Compaction<V>
where
    V: Fn(&Array1<f64>, &Array1<f64>, &PhysicsParams) -> MushResult<Array1<f64>>,
{
    config: ResolvedConfig,
    law: GrowthLaw,
    reporter: Reporter,
    state: SimulationState,
    velocity_kernel: V,
}

impl<V> Compaction<V>
where
    V: Fn(&Array1<f64>, &Array1<f64>, &PhysicsParams) -> MushResult<Array1<f64>>,
{
    /// Set up a run: allocate the initial state, persist the resolved
    /// parameters, and write the statistics header with the initial row.
    pub fn new(config: ResolvedConfig, velocity_kernel: V) -> MushResult<Self> {
        let law = GrowthLaw::from_config(&config.growth);
        let reporter = Reporter::create(&config.output, &config.physics)?;
        reporter.persist_config(&config)?;
        reporter.write_header()?;

        let mut state = SimulationState::new(&config);
        let phi = state.porosity();
        state.velocity = velocity_kernel(&phi, &state.r, &config.physics)?;
        state.dt = stable_dt(&state.velocity, state.dr, law.growth_rate(state.time))?;
        reporter.append_stats(&state, law.growth_rate(state.time))?;

        info!(
            "run initialised: {} cells, R = {:.4e}, t = {:.4e}, dt = {:.4e}",
            state.n_cells(),
            state.outer_radius(),
            state.time,
            state.dt
        );
        Ok(Compaction {
            config,
            law,
            reporter,
            state,
            velocity_kernel,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn finished(&self) -> bool {
        self.state.time >= self.config.growth.time_max
    }

    /// Advance one explicit step: move the clock by the current `dt`,
    /// grow the grid if the boundary has outrun it, solve the velocity,
    /// advect the solid fraction, and pick the next timestep.
    pub fn advance(&mut self) -> MushResult<()> {
        self.state.iteration += 1;
        let it = self.state.iteration;
        self.state.time += self.state.dt;
        self.state.time_since_print += self.state.dt;

        let boundary = self.law.radius(self.state.time);
        if mesh::lags_boundary(&self.state, boundary) {
            mesh::extend(&mut self.state, self.config.grid.psi_fill);
            // The timestep clamp bounds the boundary advance to a tenth
            // of a spacing per step, so one node always catches up.
            if mesh::lags_boundary(&self.state, boundary) {
                return Err(MushError::Instability {
                    iteration: it,
                    message: format!(
                        "boundary at {boundary:.6e} outran the grid by more than one cell"
                    ),
                });
            }
        }

        let phi = self.state.porosity();
        self.state.velocity = (self.velocity_kernel)(&phi, &self.state.r, &self.config.physics)
            .map_err(|e| e.at_iteration(it))?;
        self.state.psi = update(
            &self.state.velocity,
            &self.state.psi,
            self.state.dt,
            &self.state.r,
            &self.config.physics,
        )
        .map_err(|e| e.at_iteration(it))?;

        let rate = self.law.growth_rate(self.state.time);
        self.state.dt =
            stable_dt(&self.state.velocity, self.state.dr, rate).map_err(|e| e.at_iteration(it))?;
        self.state.validate().map_err(|e| e.at_iteration(it))?;

        if Reporter::should_sample(it) {
            self.reporter.append_stats(&self.state, rate)?;
        }
        if self.state.time_since_print > self.config.output.dt_print {
            self.reporter.write_profile(&self.state)?;
            self.state.time_since_print -= self.config.output.dt_print;
        }
        Ok(())
    }

    /// Run to the final time (or the iteration ceiling), then snapshot
    /// the final profile unconditionally.
    pub fn run(&mut self) -> MushResult<()> {
        while !self.finished() && self.state.iteration < MAX_ITERATIONS {
            self.advance()?;
        }
        if !self.finished() {
            warn!(
                "iteration ceiling {} reached at t = {:.4e} (target {:.4e})",
                MAX_ITERATIONS, self.state.time, self.config.growth.time_max
            );
        }
        self.reporter.write_profile(&self.state)?;
        info!(
            "run complete: {} iterations, {} cells, {} profiles",
            self.state.iteration,
            self.state.n_cells(),
            self.reporter.profiles_written()
        );
        Ok(())
    }
}
