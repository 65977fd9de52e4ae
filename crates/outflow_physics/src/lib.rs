pub mod integrator;
pub mod luminosity;
pub mod mass;
pub mod motion;

pub use integrator::{Integrator, cap_velocity};
pub use luminosity::{LuminosityFade, agn_luminosity};
pub use mass::{MassComponents, MassFractions, MassModel, enclosed_mass};
pub use motion::jerk;

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        ((actual - expected) / scale).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
