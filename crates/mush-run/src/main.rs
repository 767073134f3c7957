// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Run Entry Point
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Command-line driver: load a JSON parameter file, resolve it, and run
//! the compaction simulation to its final time.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use mush_core::{resolve, Compaction};
use mush_physics::velocity::velocity_sramek;
use mush_types::config::RawConfig;

#[derive(Parser, Debug)]
#[command(name = "mush-run", about = "1-D mushy-layer compaction simulator")]
struct Args {
    /// JSON parameter file describing the run.
    config: PathBuf,

    /// Override the output directory named in the parameter file.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut raw = RawConfig::from_file(&args.config)
        .with_context(|| format!("loading parameter file {}", args.config.display()))?;
    if let Some(output) = args.output {
        raw.output = output;
    }

    let config = resolve(raw).context("resolving run parameters")?;
    info!(
        "starting run '{}': R {:.4e} -> {:.4e} over t in [{:.4e}, {:.4e}]",
        config.output.stem,
        config.growth.r_init,
        config.growth.r_final,
        config.growth.t_init,
        config.growth.time_max
    );

    let mut simulation =
        Compaction::new(config, velocity_sramek).context("initialising simulation")?;
    simulation.run().context("running simulation")?;
    Ok(())
}
