pub mod config;
pub mod constants;
pub mod galaxy;
pub mod state;

pub use config::{IntegratorKind, RunConfig, Scenario};
pub use constants::*;
pub use galaxy::{FadeModel, GalaxyComponent, GalaxyParameters, MassProfile, ParameterError};
pub use state::{Kinematics, OutflowState};
