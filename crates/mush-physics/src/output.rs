// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Profile Output
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Plain-text writer for full profile snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::ArrayView1;

use mush_types::error::MushResult;

/// Write one profile snapshot: a timestamp header, then one
/// `radius porosity velocity` row per grid node.
///
/// Porosity is cell-centered (one element fewer than the grid); the last
/// node row carries `nan` in the porosity column.
pub fn write_profile(
    path: &Path,
    time: f64,
    r: ArrayView1<f64>,
    porosity: ArrayView1<f64>,
    velocity: ArrayView1<f64>,
) -> MushResult<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# time = {time:.8e}")?;
    writeln!(out, "radius porosity velocity")?;
    for i in 0..r.len() {
        if i < porosity.len() {
            writeln!(out, "{:.8e} {:.8e} {:.8e}", r[i], porosity[i], velocity[i])?;
        } else {
            writeln!(out, "{:.8e} nan {:.8e}", r[i], velocity[i])?;
        }
    }
    out.flush()?;
    Ok(())
}
