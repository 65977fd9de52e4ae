use outflow_core::{IntegratorKind, Kinematics, VELOCITY_CAP};

use crate::mass::MassComponents;
use crate::motion::jerk;

/// Clamp the shell to the driving wind's speed limit. A capped shell may
/// no longer speed up, so positive acceleration and jerk are zeroed too.
pub fn cap_velocity(kinematics: Kinematics) -> Kinematics {
    if kinematics.velocity > VELOCITY_CAP {
        Kinematics {
            velocity: VELOCITY_CAP,
            acceleration: kinematics.acceleration.min(0.0),
            jerk: kinematics.jerk.min(0.0),
            ..kinematics
        }
    } else {
        kinematics
    }
}

/// One step of a shell integrator
pub trait Integrator {
    /// Advance `kinematics` by `dt` under a fixed mass distribution and
    /// luminosity, returning the new radius, velocity, acceleration and jerk.
    fn advance(
        &self,
        kinematics: &Kinematics,
        mass: &MassComponents,
        luminosity: f64,
        dt: f64,
    ) -> Kinematics;
}

impl Integrator for IntegratorKind {
    fn advance(
        &self,
        kinematics: &Kinematics,
        mass: &MassComponents,
        luminosity: f64,
        dt: f64,
    ) -> Kinematics {
        match self {
            Self::Simple => simple_step(kinematics, mass, luminosity, dt),
            Self::LeapfrogDkd => leapfrog_dkd_step(kinematics, mass, luminosity, dt),
            Self::LeapfrogKdk => leapfrog_kdk_step(kinematics, mass, luminosity, dt),
        }
    }
}

/// Third-order Taylor step from the jerk at the start of the interval
fn simple_step(k: &Kinematics, mass: &MassComponents, luminosity: f64, dt: f64) -> Kinematics {
    let j = jerk(luminosity, mass, k);
    let a = k.acceleration + j * dt;
    let v = k.velocity + a * dt + 0.5 * j * dt * dt;

    let capped = cap_velocity(Kinematics::new(k.radius, v, a, j));
    let (v, a, j) = (capped.velocity, capped.acceleration, capped.jerk);

    let r = k.radius + v * dt + 0.5 * a * dt * dt + j * dt * dt * dt / 6.0;
    Kinematics::new(r, v, a, j)
}

/// Drift-kick-drift: acceleration and radius move half a step on the old
/// jerk, velocity takes the full kick, then both finish the step.
fn leapfrog_dkd_step(
    k: &Kinematics,
    mass: &MassComponents,
    luminosity: f64,
    dt: f64,
) -> Kinematics {
    let half_acceleration = k.acceleration + k.jerk * dt / 2.0;
    let half_radius = k.radius + k.velocity * dt / 2.0;

    let half = Kinematics::new(half_radius, k.velocity, half_acceleration, k.jerk);
    let j = jerk(luminosity, mass, &half);
    let v = k.velocity + half_acceleration * dt;

    let capped = cap_velocity(Kinematics::new(half_radius, v, half_acceleration, j));

    Kinematics::new(
        half_radius + capped.velocity * dt / 2.0,
        capped.velocity,
        capped.acceleration + capped.jerk * dt / 2.0,
        capped.jerk,
    )
}

/// Kick-drift-kick: half kick on velocity, full drift on radius and
/// acceleration, then a second half kick from the jerk at the new radius.
fn leapfrog_kdk_step(
    k: &Kinematics,
    mass: &MassComponents,
    luminosity: f64,
    dt: f64,
) -> Kinematics {
    let j = jerk(luminosity, mass, k);
    let half_velocity = k.velocity + k.acceleration * dt / 2.0;
    let kicked = cap_velocity(Kinematics::new(k.radius, half_velocity, k.acceleration, j));

    let a = kicked.acceleration + kicked.jerk * dt;
    let r = k.radius + kicked.velocity * dt;
    let drifted = Kinematics::new(r, kicked.velocity, a, 0.0);
    let j = jerk(luminosity, mass, &drifted);
    let v = kicked.velocity + a * dt / 2.0;

    cap_velocity(Kinematics::new(r, v, a, j))
}
