use serde::{Deserialize, Serialize};

use crate::constants::{SEED_RADIUS, SEED_VELOCITY};

/// Outflow radius and its first three time derivatives
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub radius: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub jerk: f64,
}

impl Kinematics {
    pub fn new(radius: f64, velocity: f64, acceleration: f64, jerk: f64) -> Self {
        Self {
            radius,
            velocity,
            acceleration,
            jerk,
        }
    }
}

/// One point of an outflow trajectory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutflowState {
    pub radius: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub jerk: f64,
    /// Gas mass swept up inside the outflow radius
    pub gas_mass: f64,
    /// Gas plus non-gas mass inside the outflow radius
    pub total_mass: f64,
    /// Rate of change of the swept-up gas mass
    pub mass_outflow_rate: f64,
    pub time: f64,
    /// Length of the step taken from this point
    pub timestep: f64,
}

impl OutflowState {
    /// Starting point of every run: a small, slowly expanding shell
    pub fn seed() -> Self {
        Self {
            radius: SEED_RADIUS,
            velocity: SEED_VELOCITY,
            ..Self::default()
        }
    }

    /// State at `time` with the given kinematics; mass terms and the step
    /// size are filled in when the point is next evaluated
    pub fn from_kinematics(kinematics: Kinematics, time: f64) -> Self {
        Self {
            radius: kinematics.radius,
            velocity: kinematics.velocity,
            acceleration: kinematics.acceleration,
            jerk: kinematics.jerk,
            time,
            ..Self::default()
        }
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics::new(self.radius, self.velocity, self.acceleration, self.jerk)
    }
}
