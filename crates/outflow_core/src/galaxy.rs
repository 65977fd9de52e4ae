use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Radial mass distribution of one galaxy component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassProfile {
    /// Navarro-Frenk-White dark matter halo, truncated at the concentration radius
    Nfw,
    /// Singular isothermal sphere, truncated at one scale length
    Isothermal,
    Hernquist,
    Jaffe,
}

impl MassProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nfw => "NFW",
            Self::Isothermal => "Isothermal",
            Self::Hernquist => "Hernquist",
            Self::Jaffe => "Jaffe",
        }
    }
}

/// How the AGN luminosity evolves within one activity episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeModel {
    /// Constant luminosity, then an abrupt switch-off
    None,
    Exponential,
    PowerLaw,
    /// Continuous (1 + t/t_q)^(-19/16) decline
    King,
}

impl FadeModel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Exponential => "Exponential",
            Self::PowerLaw => "PowerLaw",
            Self::King => "King",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{component} gas fraction {value} is outside [0, 1]")]
    GasFractionOutOfRange { component: &'static str, value: f64 },

    #[error("Eddington ratio {ratio} must exceed the shutdown ratio {shutdown}, which must be positive")]
    EddingtonRatioOrder { ratio: f64, shutdown: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{component} profile {profile} needs a concentration, which only the halo carries")]
    MissingConcentration {
        component: &'static str,
        profile: &'static str,
    },
}

/// Physical parameters of one galaxy, all in internal units.
///
/// This is a value type: the simulation never mutates a shared instance.
/// The SMBH mass is the only quantity that evolves during a run, and every
/// change goes through [`GalaxyParameters::with_smbh_mass`], which returns a
/// fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParameters {
    /// Total galaxy mass including dark matter
    pub virial_mass: f64,
    /// Ratio of virial radius to halo scale radius
    pub halo_concentration: f64,
    pub halo_gas_fraction: f64,
    pub halo_profile: MassProfile,
    pub bulge_mass: f64,
    /// Bulge velocity dispersion
    pub bulge_sigma: f64,
    pub bulge_gas_fraction: f64,
    pub bulge_profile: MassProfile,
    /// Fraction of the full sphere covered by the outflow
    pub outflow_solid_angle_fraction: f64,
    /// AGN luminosity at the start of each episode, in Eddington luminosities
    pub eddington_ratio: f64,
    /// Below this ratio the AGN no longer drives the outflow
    pub eddington_ratio_shutdown: f64,
    /// Decay timescale of the exponential fade
    pub drop_timescale: f64,
    /// Index of the power-law fade
    pub alpha_drop: f64,
    /// Fraction of each repetition period during which the AGN is active
    pub duty_cycle: f64,
    pub quasar_activity_duration: f64,
    /// SMBH e-folding time at the Eddington rate
    pub salpeter_timescale: f64,
    pub fade: FadeModel,
    pub smbh_mass: f64,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            virial_mass: 1.0e12 / UNIT_MSUN,
            halo_concentration: 10.0,
            halo_gas_fraction: 1.0e-3,
            halo_profile: MassProfile::Nfw,
            bulge_mass: 2.714_531_156e9 / UNIT_MSUN,
            bulge_sigma: 1.052_339_9e7 / UNIT_VELOCITY,
            bulge_gas_fraction: 0.05,
            bulge_profile: MassProfile::Isothermal,
            outflow_solid_angle_fraction: 1.0,
            eddington_ratio: 1.0,
            eddington_ratio_shutdown: 0.01,
            drop_timescale: 3.0e5 / UNIT_YEAR,
            alpha_drop: 0.5,
            duty_cycle: 0.05,
            quasar_activity_duration: 5.0e4 / UNIT_YEAR,
            salpeter_timescale: 4.5e8 * RADIATIVE_EFFICIENCY / UNIT_YEAR,
            fade: FadeModel::None,
            smbh_mass: 4.667_139e6 / UNIT_MSUN,
        }
    }
}

/// One mass component (halo or bulge) with the scales its profile needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyComponent {
    pub profile: MassProfile,
    pub total_mass: f64,
    pub scale_length: f64,
    /// Only the NFW profile reads this; components without one carry NaN
    pub concentration: f64,
    pub gas_fraction: f64,
}

impl GalaxyParameters {
    /// Copy of these parameters with a different SMBH mass
    pub fn with_smbh_mass(self, smbh_mass: f64) -> Self {
        Self { smbh_mass, ..self }
    }

    /// Time between the starts of two consecutive AGN episodes
    pub fn quasar_repetition_timescale(&self) -> f64 {
        self.quasar_activity_duration / self.duty_cycle
    }

    pub fn virial_radius(&self) -> f64 {
        (626.0 * ((self.virial_mass / 1.0e13) * UNIT_MSUN).powf(1.0 / 3.0)) / UNIT_KPC
    }

    pub fn bulge_to_total_mass_fraction(&self) -> f64 {
        self.bulge_mass / self.virial_mass
    }

    pub fn halo_mass(&self) -> f64 {
        self.virial_mass * (1.0 - self.bulge_to_total_mass_fraction())
    }

    pub fn halo_scale_radius(&self) -> f64 {
        self.virial_radius() / self.halo_concentration
    }

    /// Scale radius of a bulge in virial equilibrium: G M / (2 sigma^2)
    pub fn bulge_scale_radius(&self) -> f64 {
        let sigma_cgs = self.bulge_sigma * UNIT_VELOCITY;
        (G_CGS * self.bulge_mass * UNIT_MASS) / (2.0 * sigma_cgs * sigma_cgs) / UNIT_LENGTH
    }

    /// Eddington luminosity of the current SMBH, in internal energy per time
    pub fn luminosity_eddington(&self) -> f64 {
        LUMINOSITY_EDD * (self.smbh_mass * UNIT_MSUN) * UNIT_TIME / UNIT_ENERGY
    }

    pub fn halo(&self) -> GalaxyComponent {
        GalaxyComponent {
            profile: self.halo_profile,
            total_mass: self.halo_mass(),
            scale_length: self.halo_scale_radius(),
            concentration: self.halo_concentration,
            gas_fraction: self.halo_gas_fraction,
        }
    }

    pub fn bulge(&self) -> GalaxyComponent {
        GalaxyComponent {
            profile: self.bulge_profile,
            total_mass: self.bulge_mass,
            scale_length: self.bulge_scale_radius(),
            concentration: f64::NAN,
            gas_fraction: self.bulge_gas_fraction,
        }
    }

    /// All mass components whose enclosed masses add up at a given radius
    pub fn components(&self) -> [GalaxyComponent; 2] {
        [self.halo(), self.bulge()]
    }

    /// Check the data-model invariants. The simulation itself never calls
    /// this; degenerate values propagate as NaN or infinity instead.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (component, value) in [
            ("halo", self.halo_gas_fraction),
            ("bulge", self.bulge_gas_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParameterError::GasFractionOutOfRange { component, value });
            }
        }

        if self.bulge_profile == MassProfile::Nfw {
            return Err(ParameterError::MissingConcentration {
                component: "bulge",
                profile: self.bulge_profile.name(),
            });
        }

        let ordered = self.eddington_ratio > self.eddington_ratio_shutdown
            && self.eddington_ratio_shutdown > 0.0;
        if !ordered {
            return Err(ParameterError::EddingtonRatioOrder {
                ratio: self.eddington_ratio,
                shutdown: self.eddington_ratio_shutdown,
            });
        }

        for (field, value) in [
            ("virial_mass", self.virial_mass),
            ("halo_concentration", self.halo_concentration),
            ("bulge_mass", self.bulge_mass),
            ("bulge_sigma", self.bulge_sigma),
            ("smbh_mass", self.smbh_mass),
            ("duty_cycle", self.duty_cycle),
            ("quasar_activity_duration", self.quasar_activity_duration),
            ("salpeter_timescale", self.salpeter_timescale),
            ("drop_timescale", self.drop_timescale),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ParameterError::NonPositive { field, value });
            }
        }

        Ok(())
    }
}
