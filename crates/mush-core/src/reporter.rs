// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Reporter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Run observers: the append-only statistics file, periodic profile
//! snapshots, and the persisted resolved configuration.
//!
//! The reporter never alters simulation state; it only fixes the
//! invocation order of the statistics reductions and the row format.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use log::info;
use ndarray::s;

use mush_physics::analysis::{average, porosity_compacted_region, thickness};
use mush_physics::output::write_profile;
use mush_types::config::{OutputParams, PhysicsParams, ResolvedConfig};
use mush_types::error::MushResult;
use mush_types::state::SimulationState;

/// After this many iterations, statistics are sampled every 100th step:
/// early transients stay dense, long runs keep a bounded log.
const DENSE_SAMPLING_LIMIT: usize = 1000;
const SPARSE_SAMPLING_STRIDE: usize = 100;

pub struct Reporter {
    directory: PathBuf,
    stem: String,
    stats_path: PathBuf,
    physics: PhysicsParams,
    profile_index: usize,
}

impl Reporter {
    /// Create the output directory and the reporter bound to it. Fails
    /// immediately when the directory cannot be created: no run can
    /// proceed without its statistics file.
    pub fn create(output: &OutputParams, physics: &PhysicsParams) -> MushResult<Self> {
        std::fs::create_dir_all(&output.directory)?;
        let stats_path = output.directory.join(format!("{}_statistics.txt", output.stem));
        Ok(Reporter {
            directory: output.directory.clone(),
            stem: output.stem.clone(),
            stats_path,
            physics: physics.clone(),
            profile_index: 0,
        })
    }

    /// Persist the resolved configuration next to the run's outputs.
    pub fn persist_config(&self, config: &ResolvedConfig) -> MushResult<()> {
        let path = self.directory.join(format!("{}_param.json", self.stem));
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&path, json)?;
        info!("resolved parameters written to {}", path.display());
        Ok(())
    }

    /// Start the statistics file with its header line.
    pub fn write_header(&self) -> MushResult<()> {
        let mut file = File::create(&self.stats_path)?;
        writeln!(
            file,
            "iteration_number time radius radius_size sum_phi r_dot velocity_top \
             max_velocity RMS_velocity thickness_boundary porosity_center"
        )?;
        Ok(())
    }

    /// Sampling rule: every iteration up to the dense limit, then every
    /// hundredth.
    pub fn should_sample(iteration: usize) -> bool {
        iteration <= DENSE_SAMPLING_LIMIT || iteration % SPARSE_SAMPLING_STRIDE == 0
    }

    /// Append one statistics row for the current state.
    pub fn append_stats(&self, state: &SimulationState, growth_rate: f64) -> MushResult<()> {
        let phi = state.porosity();
        let n = state.r.len();
        let delta = thickness(phi.view(), state.r.view());
        let sum_phi = average(phi.view(), state.r.slice(s![1..]), &self.physics);
        let v_top = state.velocity[n - 1];
        let v_max = state
            .velocity
            .iter()
            .fold(0.0_f64, |m, v| m.max(v.abs()));
        let v_avg = average(
            state.velocity.slice(s![1..n - 1]),
            state.r.slice(s![1..n - 1]),
            &self.physics,
        );
        let phi_center =
            porosity_compacted_region(phi.view(), state.r.view(), delta, &self.physics);

        let mut file = OpenOptions::new().append(true).open(&self.stats_path)?;
        writeln!(
            file,
            "{} {:.4e} {:.4e} {} {:.4e} {:.4e} {:.4e} {:.4e} {:.4e} {:.4e} {:.4e}",
            state.iteration,
            state.time,
            state.outer_radius(),
            n,
            sum_phi,
            growth_rate,
            v_top,
            v_max,
            v_avg,
            delta,
            phi_center,
        )?;
        Ok(())
    }

    /// Snapshot the full profile to its own numbered file.
    pub fn write_profile(&mut self, state: &SimulationState) -> MushResult<()> {
        let path = self
            .directory
            .join(format!("{}_profile_{:05}.txt", self.stem, self.profile_index));
        let phi = state.porosity();
        write_profile(
            &path,
            state.time,
            state.r.view(),
            phi.view(),
            state.velocity.view(),
        )?;
        self.profile_index += 1;
        Ok(())
    }

    /// Number of profile snapshots written so far.
    pub fn profiles_written(&self) -> usize {
        self.profile_index
    }
}
