use outflow_core::{ETA_DRIVE, GAMMA, Kinematics};

use crate::mass::MassComponents;

/// Third time derivative of the outflow radius (G = 1).
///
/// Energy injected by the AGN at `ETA_DRIVE * luminosity` drives a thin
/// shell of swept-up gas against the gravity of everything inside it.
pub fn jerk(luminosity: f64, mass: &MassComponents, kinematics: &Kinematics) -> f64 {
    let Kinematics {
        radius: r,
        velocity: v,
        acceleration: a,
        ..
    } = *kinematics;
    let mp = mass.mass_potential;
    let mdp = mass.dot_mass_potential;
    let mg = mass.mass_gas;
    let mdg = mass.dot_mass_gas;
    let mddg = mass.dotdot_mass_gas;

    // Work done on the shell and against gravity
    let work = mdg * v * v + mg * v * a + 2.0 * v / (r * r) * (mg * mp + mg * mg / 2.0);

    let inertia = mddg * v / mg
        + mdg * v * v / (mg * r)
        + 2.0 * mdg * a / mg
        + v * a / r
        + (mdg * mp + mg * mdp + mg * mdg) / (mg * r * r)
        - (2.0 * mg * mp * v + mg * mg * v) / (2.0 * mg * r * r * r);

    3.0 * (GAMMA - 1.0) / (mg * r) * (ETA_DRIVE * luminosity - work) - inertia
}
