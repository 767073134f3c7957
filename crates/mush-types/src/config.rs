// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::MushResult;

/// Raw run configuration as read from a JSON parameter file.
///
/// Field names follow the historical parameter-file keys (`Ric_adim`,
/// `N_init`, `psiN`, ...). Most growth parameters are optional: the
/// parameter resolver derives the missing ones and fails if the set is
/// underdetermined. `RawConfig` is never consumed directly by the
/// simulation; it must first be turned into a [`ResolvedConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// Output directory for this run.
    pub output: PathBuf,
    /// Filename stem for statistics, parameter and profile files.
    pub filename: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    /// Power-law exponent p of the boundary growth law R(t) = C·t^p.
    pub growth_rate_exponent: f64,
    /// Rate coefficient C. Derivable from `Ric_adim` and `time_max`.
    #[serde(default)]
    pub coeff_velocity: Option<f64>,
    /// Asymptotic (end-of-run) boundary radius R∞.
    #[serde(rename = "Ric_adim", default)]
    pub ric_adim: Option<f64>,
    /// Simulated time budget.
    #[serde(default)]
    pub time_max: Option<f64>,
    /// Initial time. Derivable from `R_init` through the growth law.
    #[serde(default)]
    pub t_init: Option<f64>,
    /// Initial boundary radius. Derivable from `t_init`.
    #[serde(rename = "R_init", default)]
    pub r_init: Option<f64>,
    /// Initial porosity of the mush, uniform over the domain.
    pub phi_init: f64,
    /// Number of grid cells at initialization. Defaults to 20.
    #[serde(rename = "N_init", default)]
    pub n_init: Option<usize>,
    /// Simulated-time interval between full profile snapshots.
    pub dt_print: f64,
    /// Solid fraction assigned to freshly solidified cells when the grid
    /// grows. Defaults to `1 - phi_init`.
    #[serde(rename = "psiN", default)]
    pub psi_n: Option<f64>,
    #[serde(rename = "BC", default)]
    pub bc: BoundaryCondition,
    #[serde(default)]
    pub advection: AdvectionScheme,
    /// Sign of the buoyancy forcing (+1: liquid lighter than solid).
    #[serde(default = "default_one")]
    pub sign: f64,
    /// Permeability prefactor K0 in K(φ) = K0·φ^n.
    #[serde(rename = "K0", default = "default_one")]
    pub k0: f64,
    /// Permeability exponent n.
    #[serde(default = "default_permeability_exponent")]
    pub n: f64,
    /// Compaction length (dimensionless), squared in the momentum balance.
    #[serde(default = "default_one")]
    pub delta: f64,
    /// Matrix shear viscosity (dimensionless).
    #[serde(default = "default_one")]
    pub eta: f64,
    /// Force the rate coefficient to zero: the boundary never moves.
    #[serde(default)]
    pub no_growth: bool,
    /// Delayed-nucleation onset time. Requires `r0_supercooling`.
    #[serde(default)]
    pub t0_supercooling: Option<f64>,
    /// Delayed-nucleation onset radius. Requires `t0_supercooling`.
    #[serde(default)]
    pub r0_supercooling: Option<f64>,
}

fn default_one() -> f64 {
    1.0
}

fn default_permeability_exponent() -> f64 {
    2.0
}

impl RawConfig {
    /// Load a raw configuration from a JSON parameter file.
    pub fn from_file(path: &std::path::Path) -> MushResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Coordinate system of the radial grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinates {
    #[default]
    Spherical,
    Cartesian,
}

/// Boundary condition applied to the velocity at the outer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// Zero velocity gradient at the top (`dV/dz == 0`).
    #[default]
    #[serde(rename = "dVdz==0")]
    ZeroGradient,
    /// Zero velocity at the top (`V == 0`).
    #[serde(rename = "V==0")]
    ZeroVelocity,
}

/// Advection scheme used by the field-update kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvectionScheme {
    /// Flux-limited scheme (superbee limiter).
    #[default]
    #[serde(rename = "FLS")]
    FluxLimited,
    #[serde(rename = "upwind")]
    Upwind,
}

/// Fully resolved run configuration.
///
/// Produced exactly once by the parameter resolver; read-only afterwards.
/// Split into narrow sub-structs so each component depends only on the
/// fields it actually consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub growth: GrowthParams,
    pub grid: GridParams,
    pub physics: PhysicsParams,
    pub output: OutputParams,
}

/// Resolved growth-law parameters. Invariant: R∞ = C·T_max^p holds for the
/// nominal clock (for the delayed-nucleation variant, `time_max` is the
/// retimed run budget and `supercooling.t_nominal` carries the nominal one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthParams {
    pub exponent: f64,
    pub coeff: f64,
    /// Asymptotic boundary radius R∞.
    pub r_final: f64,
    /// Run time budget (retimed when supercooling is active).
    pub time_max: f64,
    pub t_init: f64,
    pub r_init: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub supercooling: Option<SupercoolingParams>,
}

/// Delayed-nucleation parameters, fully derived at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupercoolingParams {
    /// Onset time t0: below it the boundary grows linearly to `r_onset`.
    pub t_onset: f64,
    pub r_onset: f64,
    /// Nominal time budget T_max before retiming.
    pub t_nominal: f64,
    /// Clock shift Δt_sc = (r0/R∞)^(1/p)·T_max − t0.
    pub time_shift: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridParams {
    /// Number of cells at initialization (the grid has one more node).
    pub n_cells: usize,
    /// Solid fraction of freshly appended cells.
    pub psi_fill: f64,
}

/// Physical constants and discretization choices consumed by the physics
/// kernels (velocity solver, field update, statistics reductions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub coordinates: Coordinates,
    pub bc: BoundaryCondition,
    pub advection: AdvectionScheme,
    pub sign: f64,
    pub k0: f64,
    /// Permeability exponent n in K(φ) = K0·φ^n.
    pub permeability_exponent: f64,
    pub delta: f64,
    pub eta: f64,
    pub phi_init: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputParams {
    pub directory: PathBuf,
    pub stem: String,
    pub dt_print: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "output": "runs/demo",
            "filename": "demo",
            "growth_rate_exponent": 0.5,
            "coeff_velocity": 2.0,
            "time_max": 25.0,
            "phi_init": 0.4,
            "dt_print": 1.0
        }"#
    }

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let raw: RawConfig = serde_json::from_str(minimal_json()).unwrap();
        assert_eq!(raw.coordinates, Coordinates::Spherical);
        assert_eq!(raw.bc, BoundaryCondition::ZeroGradient);
        assert_eq!(raw.advection, AdvectionScheme::FluxLimited);
        assert!((raw.sign - 1.0).abs() < 1e-15);
        assert!((raw.k0 - 1.0).abs() < 1e-15);
        assert!((raw.n - 2.0).abs() < 1e-15);
        assert!(raw.ric_adim.is_none());
        assert!(raw.n_init.is_none());
        assert!(!raw.no_growth);
    }

    #[test]
    fn test_historical_key_names() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "output": "runs/keys",
                "filename": "keys",
                "coordinates": "cartesian",
                "growth_rate_exponent": 1.0,
                "Ric_adim": 10.0,
                "time_max": 5.0,
                "R_init": 0.5,
                "phi_init": 0.4,
                "N_init": 40,
                "dt_print": 0.5,
                "psiN": 0.6,
                "BC": "V==0",
                "K0": 2.0,
                "advection": "upwind"
            }"#,
        )
        .unwrap();
        assert_eq!(raw.coordinates, Coordinates::Cartesian);
        assert_eq!(raw.bc, BoundaryCondition::ZeroVelocity);
        assert_eq!(raw.advection, AdvectionScheme::Upwind);
        assert_eq!(raw.n_init, Some(40));
        assert!((raw.ric_adim.unwrap() - 10.0).abs() < 1e-15);
        assert!((raw.r_init.unwrap() - 0.5).abs() < 1e-15);
        assert!((raw.psi_n.unwrap() - 0.6).abs() < 1e-15);
        assert!((raw.k0 - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_resolved_config_roundtrip() {
        let resolved = ResolvedConfig {
            growth: GrowthParams {
                exponent: 0.5,
                coeff: 2.0,
                r_final: 10.0,
                time_max: 25.0,
                t_init: 0.0625,
                r_init: 0.5,
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
                dt_print: 1.0,
            },
        };
        let json = serde_json::to_string_pretty(&resolved).unwrap();
        let back: ResolvedConfig = serde_json::from_str(&json).unwrap();
        assert!((back.growth.coeff - resolved.growth.coeff).abs() < 1e-15);
        assert_eq!(back.grid.n_cells, resolved.grid.n_cells);
        assert_eq!(back.physics.bc, resolved.physics.bc);
        assert_eq!(back.output.stem, resolved.output.stem);
        // Supercooling block stays absent across the roundtrip.
        assert!(back.growth.supercooling.is_none());
        assert!(!json.contains("supercooling"));
    }

    #[test]
    fn test_boundary_condition_wire_tags() {
        let json = serde_json::to_string(&BoundaryCondition::ZeroGradient).unwrap();
        assert_eq!(json, "\"dVdz==0\"");
        let json = serde_json::to_string(&AdvectionScheme::FluxLimited).unwrap();
        assert_eq!(json, "\"FLS\"");
    }
}
