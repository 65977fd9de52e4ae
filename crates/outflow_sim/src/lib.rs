pub mod error;
pub mod outflow;
pub mod timestep;
pub mod trajectory;

pub use error::RunError;
pub use outflow::OutflowSimulation;
pub use timestep::{TimestepControl, courant_timestep, step_luminosity_coefficient};
pub use trajectory::{Termination, Trajectory, TrajectoryPoint};

use outflow_core::{GalaxyParameters, RunConfig};
use rand::Rng;

/// Run one outflow through `galaxy` and resample the result with `rng`
pub fn run_outflow_simulation<R: Rng + ?Sized>(
    galaxy: &GalaxyParameters,
    config: &RunConfig,
    rng: Option<&mut R>,
) -> Result<Trajectory, RunError> {
    OutflowSimulation::new(*galaxy, config.clone()).run(rng)
}
