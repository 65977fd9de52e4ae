use serde::{Deserialize, Serialize};

use crate::constants::{COURANT_FACTOR, UNIT_KPC, UNIT_YEAR};
use crate::galaxy::GalaxyParameters;

/// Single-step integration scheme used by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Jerk evaluated once, third-order Taylor update of the radius
    #[default]
    Simple,
    /// Leapfrog drift-kick-drift
    LeapfrogDkd,
    /// Leapfrog kick-drift-kick
    LeapfrogKdk,
}

/// Options of one simulation run (internal units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of points kept after resampling
    pub output_length: usize,
    pub max_steps: usize,
    pub max_time: f64,
    pub max_radius: f64,
    pub min_timestep: f64,
    /// Grow the SMBH by accretion at the driving luminosity
    pub smbh_growth: bool,
    pub integrator: IntegratorKind,
    /// Safety factor of the Courant-like timestep criterion
    pub courant_factor: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_length: 200,
            max_steps: 30_000,
            max_time: 1.5e8 / UNIT_YEAR,
            max_radius: 12.0 / UNIT_KPC,
            min_timestep: 1.0 / UNIT_YEAR,
            smbh_growth: true,
            integrator: IntegratorKind::Simple,
            courant_factor: COURANT_FACTOR,
        }
    }
}

/// A galaxy, a run configuration and the seed for output resampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub seed: u64,
    pub galaxy: GalaxyParameters,
    pub run: RunConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: 42,
            galaxy: GalaxyParameters::default(),
            run: RunConfig::default(),
        }
    }
}
