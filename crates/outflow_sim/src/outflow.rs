use outflow_core::{GalaxyParameters, OutflowState, RADIUS_FLOOR, RunConfig};
use outflow_physics::{Integrator, MassComponents, enclosed_mass};
use rand::Rng;
use tracing::{info, trace, warn};

use crate::error::RunError;
use crate::timestep::{TimestepControl, step_luminosity_coefficient};
use crate::trajectory::{Termination, Trajectory, TrajectoryPoint};

/// One AGN-driven outflow run through a fixed galaxy.
///
/// The galaxy passed in is never modified. Each step records a fresh
/// snapshot of it, carrying the SMBH mass grown so far.
#[derive(Debug, Clone)]
pub struct OutflowSimulation {
    galaxy: GalaxyParameters,
    config: RunConfig,
}

impl OutflowSimulation {
    pub fn new(galaxy: GalaxyParameters, config: RunConfig) -> Self {
        Self { galaxy, config }
    }

    pub fn galaxy(&self) -> &GalaxyParameters {
        &self.galaxy
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Integrate, drop points below the radius floor and resample the rest
    /// to `output_length` points.
    pub fn run<R: Rng + ?Sized>(&self, rng: Option<&mut R>) -> Result<Trajectory, RunError> {
        let trajectory = self.run_unsampled()?;
        if trajectory.is_empty() {
            return Err(RunError::EmptyAfterFilter);
        }
        let rng = rng.ok_or(RunError::NoSampler)?;
        trajectory.resample(self.config.output_length, rng)
    }

    /// Every step above the radius floor, in order
    pub fn run_unsampled(&self) -> Result<Trajectory, RunError> {
        Ok(self.integrate()?.above_radius(RADIUS_FLOOR))
    }

    fn integrate(&self) -> Result<Trajectory, RunError> {
        let config = &self.config;
        let components = self.galaxy.components();
        let period = self.galaxy.quasar_repetition_timescale();
        let mut timestep = TimestepControl::new(&self.galaxy, config);

        let mut state = OutflowState::seed();
        let mut galaxy = self.galaxy;
        let mut points = Vec::new();
        let mut steps = 0usize;

        let termination = loop {
            if steps >= config.max_steps {
                break Termination::MaxSteps;
            }
            if state.time >= config.max_time {
                break Termination::MaxTime;
            }
            if state.radius >= config.max_radius {
                break Termination::MaxRadius;
            }

            let kinematics = state.kinematics();
            let mass: MassComponents = components
                .iter()
                .map(|component| enclosed_mass(component, &kinematics))
                .sum();
            state.gas_mass = mass.mass_gas;
            state.total_mass = mass.total_mass();
            state.mass_outflow_rate = mass.dot_mass_gas;

            let dt = timestep.next_timestep(&kinematics, state.time);
            state.timestep = dt;

            let coefficient = step_luminosity_coefficient(&self.galaxy, state.time % period, dt);
            let luminosity = coefficient * galaxy.luminosity_eddington();

            let next_galaxy = if config.smbh_growth {
                let growth = (coefficient * dt / self.galaxy.salpeter_timescale).exp();
                galaxy.with_smbh_mass(galaxy.smbh_mass * growth)
            } else {
                galaxy
            };

            let next = config.integrator.advance(&kinematics, &mass, luminosity, dt);

            points.push(TrajectoryPoint { state, galaxy });
            steps += 1;
            trace!(
                step = steps,
                time = state.time,
                radius = state.radius,
                velocity = state.velocity,
                dt,
                luminosity,
                "outflow step"
            );

            if next.radius < 0.0 {
                warn!(step = steps, time = state.time, "outflow radius went negative");
                return Err(RunError::NegativeRadius {
                    step: steps,
                    time: state.time,
                });
            }

            state = OutflowState::from_kinematics(next, state.time + dt);
            galaxy = next_galaxy;
        };

        info!(
            steps,
            termination = termination.name(),
            time = state.time,
            radius = state.radius,
            "outflow run finished"
        );
        Ok(Trajectory::new(points, termination))
    }
}
