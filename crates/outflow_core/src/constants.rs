// Physical constants (cgs) and the simulation's internal units.
// Internal units keep the equation of motion well scaled:
// - Length: 1 unit = 1 kpc
// - Mass: 1 unit = 5e9 solar masses
// - G = 1, which fixes the velocity and time units below

/// Centimetres per kiloparsec
pub const KPC_CM: f64 = 3.086e21;

/// Solar mass in grams
pub const SOLAR_MASS_G: f64 = 1.989e33;

/// Electron scattering opacity for Solar metallicity [cm^2 / g]
pub const OPACITY: f64 = 0.346;

/// Gravitational constant (cgs)
pub const G_CGS: f64 = 6.672e-8;

/// Speed of light [cm/s]
pub const C: f64 = 2.9979e10;

pub const SECONDS_IN_YEAR: f64 = 31_556_952.0;

/// Eddington luminosity of one solar mass [erg/s]: 4 pi G M_sun c / kappa
pub const LUMINOSITY_EDD: f64 = 4.0 * std::f64::consts::PI * G_CGS * SOLAR_MASS_G * C / OPACITY;

/// Coupling efficiency between AGN luminosity and outflow driving power
pub const ETA_DRIVE: f64 = 0.05;

/// Radiative efficiency of accretion onto the SMBH
pub const RADIATIVE_EFFICIENCY: f64 = 0.1;

/// Adiabatic index of the outflowing gas
pub const GAMMA: f64 = 5.0 / 3.0;

pub const UNIT_LENGTH: f64 = KPC_CM;
pub const UNIT_MASS: f64 = 5.0e9 * SOLAR_MASS_G;

/// sqrt(G_CGS * UNIT_MASS / UNIT_LENGTH) [cm/s]
pub const UNIT_VELOCITY: f64 = 14_663_324.704187239;

pub const UNIT_TIME: f64 = UNIT_LENGTH / UNIT_VELOCITY;
pub const UNIT_ENERGY: f64 = UNIT_MASS * (UNIT_VELOCITY * UNIT_VELOCITY);

/// Kiloparsecs per length unit
pub const UNIT_KPC: f64 = UNIT_LENGTH / KPC_CM;
/// Years per time unit
pub const UNIT_YEAR: f64 = UNIT_TIME / SECONDS_IN_YEAR;
/// Solar masses per mass unit
pub const UNIT_MSUN: f64 = UNIT_MASS / SOLAR_MASS_G;

/// Light speed in internal units
pub const C_INTERNAL: f64 = C / UNIT_VELOCITY;

/// Outflow velocity ceiling: the speed of the wind that drives it
pub const VELOCITY_CAP: f64 = 2.0 * ETA_DRIVE * C_INTERNAL;

/// Safety factor of the Courant-like timestep criterion
pub const COURANT_FACTOR: f64 = 0.02;

/// Largest timestep as a fraction of one quasar activity duration
pub const MAX_TIMESTEP_FRACTION: f64 = 0.1;

/// Steps forced to the minimum timestep after crossing into a new AGN episode
pub const EPISODE_SETTLE_STEPS: u8 = 3;

/// Trajectory points at or inside this radius are numerically insignificant
pub const RADIUS_FLOOR: f64 = 0.02 / UNIT_KPC;

/// Initial outflow radius: 1 pc
pub const SEED_RADIUS: f64 = 0.001 / UNIT_KPC;

/// Initial outflow velocity: 1 km/s
pub const SEED_VELOCITY: f64 = 1.0e5 / UNIT_VELOCITY;
