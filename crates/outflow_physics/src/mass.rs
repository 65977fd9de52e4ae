use std::f64::consts::PI;
use std::iter::Sum;
use std::ops::Add;

use outflow_core::{GalaxyComponent, Kinematics, MassProfile};

/// Density reported by a profile beyond its finite extent
const SATURATED_DENSITY: f64 = 1.0e-10;

/// Enclosed-mass fraction of a profile and its time derivatives, plus the
/// dimensionless densities at the shell (`rho_contact`) and at 4/3 of its
/// radius (`rho_outer`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassFractions {
    pub mass: f64,
    pub dot_mass: f64,
    pub dotdot_mass: f64,
    pub rho_contact: f64,
    pub rho_outer: f64,
}

impl MassFractions {
    /// Profiles with a finite extent hold all their mass once the shell is past it
    fn saturated(self) -> Self {
        if self.mass > 1.0 {
            Self {
                mass: 1.0,
                dot_mass: 0.0,
                dotdot_mass: 0.0,
                rho_contact: SATURATED_DENSITY,
                rho_outer: SATURATED_DENSITY,
            }
        } else {
            self
        }
    }
}

/// Mass inside the outflow radius, split into gas and non-gas ("potential")
/// parts, with the gas densities around the shell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassComponents {
    pub mass_potential: f64,
    pub dot_mass_potential: f64,
    pub mass_gas: f64,
    pub dot_mass_gas: f64,
    pub dotdot_mass_gas: f64,
    pub rho_gas_contact: f64,
    pub rho_gas_outer: f64,
}

impl MassComponents {
    pub fn total_mass(&self) -> f64 {
        self.mass_gas + self.mass_potential
    }
}

impl Add for MassComponents {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            mass_potential: self.mass_potential + other.mass_potential,
            dot_mass_potential: self.dot_mass_potential + other.dot_mass_potential,
            mass_gas: self.mass_gas + other.mass_gas,
            dot_mass_gas: self.dot_mass_gas + other.dot_mass_gas,
            dotdot_mass_gas: self.dotdot_mass_gas + other.dotdot_mass_gas,
            rho_gas_contact: self.rho_gas_contact + other.rho_gas_contact,
            rho_gas_outer: self.rho_gas_outer + other.rho_gas_outer,
        }
    }
}

impl Sum for MassComponents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Enclosed mass of a radial density profile
pub trait MassModel {
    /// Fractions for a radius, velocity and acceleration already divided by
    /// the profile's scale length
    fn calculate_fractions(
        &self,
        scaled_radius: f64,
        scaled_velocity: f64,
        scaled_acceleration: f64,
        concentration: f64,
    ) -> MassFractions;

    /// Physical mass terms of a component of `total_mass` with the given
    /// scale length and gas fraction. Inputs are not validated.
    fn calculate(
        &self,
        kinematics: &Kinematics,
        total_mass: f64,
        scale_length: f64,
        concentration: f64,
        gas_fraction: f64,
    ) -> MassComponents {
        let fractions = self.calculate_fractions(
            kinematics.radius / scale_length,
            kinematics.velocity / scale_length,
            kinematics.acceleration / scale_length,
            concentration,
        );

        let rho_gas_contact = 3.0 * total_mass / (4.0 * PI * scale_length.powi(3))
            * fractions.rho_contact
            * gas_fraction;

        MassComponents {
            mass_potential: total_mass * fractions.mass * (1.0 - gas_fraction),
            dot_mass_potential: total_mass * fractions.dot_mass * (1.0 - gas_fraction),
            mass_gas: total_mass * fractions.mass * gas_fraction,
            dot_mass_gas: total_mass * fractions.dot_mass * gas_fraction,
            dotdot_mass_gas: total_mass * fractions.dotdot_mass * gas_fraction,
            rho_gas_contact,
            // The gas fraction enters a second time here
            rho_gas_outer: rho_gas_contact / fractions.rho_contact
                * fractions.rho_outer
                * gas_fraction,
        }
    }
}

impl MassModel for MassProfile {
    fn calculate_fractions(
        &self,
        x: f64,
        v: f64,
        a: f64,
        concentration: f64,
    ) -> MassFractions {
        match self {
            Self::Nfw => nfw_fractions(x, v, a, concentration).saturated(),
            Self::Isothermal => MassFractions {
                mass: x,
                dot_mass: v,
                dotdot_mass: a,
                rho_contact: 1.0 / 3.0,
                rho_outer: 1.0 / 3.0 * (3.0f64 / 4.0).powi(3),
            }
            .saturated(),
            Self::Hernquist => hernquist_fractions(x, v, a),
            Self::Jaffe => jaffe_fractions(x, v, a),
        }
    }
}

/// Mass terms of one galaxy component at the current outflow kinematics
pub fn enclosed_mass(component: &GalaxyComponent, kinematics: &Kinematics) -> MassComponents {
    component.profile.calculate(
        kinematics,
        component.total_mass,
        component.scale_length,
        component.concentration,
        component.gas_fraction,
    )
}

fn nfw_fractions(x: f64, v: f64, a: f64, c: f64) -> MassFractions {
    // Normalised so that the mass inside the concentration radius is 1
    let norm = (1.0 + c).ln() - c / (1.0 + c);
    let outer = 4.0 * x / 3.0;

    MassFractions {
        mass: ((1.0 + x).ln() - x / (1.0 + x)) / norm,
        dot_mass: v * x / (1.0 + x).powi(2) / norm,
        dotdot_mass: (a * x / (1.0 + x).powi(2) + v * v * (1.0 - x) / (1.0 + x).powi(3)) / norm,
        rho_contact: (1.0 + x).powi(2) / (3.0 * x) / norm,
        rho_outer: (1.0 + outer).powi(2) / (3.0 * outer) / norm,
    }
}

fn hernquist_fractions(x: f64, v: f64, a: f64) -> MassFractions {
    let outer = 4.0 * x / 3.0;

    MassFractions {
        mass: x * x / (1.0 + x).powi(2),
        dot_mass: v * 2.0 * x / (1.0 + x).powi(3),
        dotdot_mass: 2.0 * (a * x + v * v * (1.0 - 2.0 * x) / (1.0 + x)) / (1.0 + x).powi(3),
        rho_contact: 2.0 / 3.0 / x / (1.0 + x).powi(3),
        rho_outer: 2.0 / 3.0 / outer / (1.0 + outer).powi(3),
    }
}

fn jaffe_fractions(x: f64, v: f64, a: f64) -> MassFractions {
    let outer = 4.0 * x / 3.0;

    MassFractions {
        mass: x / (1.0 + x),
        dot_mass: v / (1.0 + x).powi(2),
        dotdot_mass: a / (1.0 + x).powi(2) + v * v * 2.0 / (1.0 + x).powi(3),
        rho_contact: 1.0 / 3.0 / (x * x) / (1.0 + x).powi(2),
        rho_outer: 1.0 / 3.0 / (outer * outer) / (1.0 + outer).powi(2),
    }
}
