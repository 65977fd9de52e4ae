use outflow_core::{
    EPISODE_SETTLE_STEPS, GalaxyParameters, Kinematics, MAX_TIMESTEP_FRACTION, RunConfig,
};
use outflow_physics::LuminosityFade;
use tracing::debug;

/// Courant-like step: the shortest of the radius, velocity and acceleration
/// timescales, scaled by `courant_factor`
pub fn courant_timestep(kinematics: &Kinematics, courant_factor: f64) -> f64 {
    let radius_time = kinematics.radius / (kinematics.velocity.abs() + f64::EPSILON);
    let velocity_time = kinematics.velocity / (kinematics.acceleration.abs() + f64::EPSILON);
    let acceleration_time = kinematics.acceleration / (kinematics.jerk.abs() + f64::EPSILON);

    courant_factor
        * radius_time
            .abs()
            .min(velocity_time.abs())
            .min(acceleration_time.abs())
}

/// Adaptive step-size controller for one run.
///
/// Steps never straddle the start of an AGN episode: a step that would cross
/// one is shortened to land just past it, and the next few steps are held at
/// the minimum so the derivatives can follow the luminosity jump.
#[derive(Debug, Clone)]
pub struct TimestepControl {
    courant_factor: f64,
    min_timestep: f64,
    max_timestep: f64,
    repetition_timescale: f64,
    settle_steps: u8,
}

impl TimestepControl {
    pub fn new(galaxy: &GalaxyParameters, config: &RunConfig) -> Self {
        Self {
            courant_factor: config.courant_factor,
            min_timestep: config.min_timestep,
            max_timestep: galaxy.quasar_activity_duration * MAX_TIMESTEP_FRACTION,
            repetition_timescale: galaxy.quasar_repetition_timescale(),
            settle_steps: 0,
        }
    }

    pub fn min_timestep(&self) -> f64 {
        self.min_timestep
    }

    pub fn max_timestep(&self) -> f64 {
        self.max_timestep
    }

    /// Whether the last episode boundary is still being stepped over
    pub fn is_settling(&self) -> bool {
        self.settle_steps > 0
    }

    /// Length of the step starting at `time`
    pub fn next_timestep(&mut self, kinematics: &Kinematics, time: f64) -> f64 {
        let mut dt = courant_timestep(kinematics, self.courant_factor);

        if self.settle_steps > 0 {
            dt = self.min_timestep;
            self.settle_steps -= 1;
        }

        let period = self.repetition_timescale;
        let next_episode = ((time + dt) / period).floor();
        if next_episode > (time / period).floor() {
            self.settle_steps = EPISODE_SETTLE_STEPS;
            dt = period * next_episode - time + f64::EPSILON;
            debug!(time, episode = next_episode, dt, "stepping onto AGN episode start");
        }

        dt.max(self.min_timestep).min(self.max_timestep)
    }
}

/// Mean Eddington-ratio multiplier over the step `[time_eff, time_eff + dt]`.
///
/// Zero if the AGN is already below the shutdown ratio when the step starts.
/// If it drops below during the step, only the active part contributes.
pub fn step_luminosity_coefficient(galaxy: &GalaxyParameters, time_eff: f64, dt: f64) -> f64 {
    let fade = galaxy.fade;
    let shutdown = galaxy.eddington_ratio_shutdown;

    let active_at_start = fade.luminosity_coefficient(time_eff, galaxy) >= shutdown;
    if !active_at_start {
        return 0.0;
    }

    let active_at_end = fade.luminosity_coefficient(time_eff + dt, galaxy) >= shutdown;
    if active_at_end {
        fade.luminosity_mean_coefficient(time_eff, dt, dt, galaxy)
    } else {
        let remaining = galaxy.quasar_activity_duration - time_eff;
        fade.luminosity_mean_coefficient(time_eff, remaining, dt, galaxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outflow_core::{FadeModel, UNIT_YEAR};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            ((actual - expected) / expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    /// Kinematics whose three Courant timescales all equal `timescale`
    fn uniform(timescale: f64) -> Kinematics {
        Kinematics::new(timescale, 1.0, 1.0 / timescale, 1.0 / (timescale * timescale))
    }

    fn control() -> (GalaxyParameters, TimestepControl) {
        let galaxy = GalaxyParameters::default();
        let control = TimestepControl::new(&galaxy, &RunConfig::default());
        (galaxy, control)
    }

    #[test]
    fn test_courant_picks_shortest_timescale() {
        let k = Kinematics::new(10.0, 2.0, 1.0, 4.0);
        // 10/2 = 5, 2/1 = 2, 1/4 = 0.25
        assert_close(courant_timestep(&k, 0.02), 0.02 * 0.25);
    }

    #[test]
    fn test_courant_uses_magnitudes() {
        let k = Kinematics::new(10.0, -2.0, -1.0, 4.0);
        assert_close(courant_timestep(&k, 1.0), 0.25);
    }

    #[test]
    fn test_resting_shell_gets_minimum_step() {
        let (_, mut control) = control();
        let seed = Kinematics::new(1.0e-3, 1.0e-2, 0.0, 0.0);
        assert_eq!(control.next_timestep(&seed, 0.0), control.min_timestep());
    }

    #[test]
    fn test_step_is_capped_at_a_tenth_of_the_episode() {
        let (galaxy, mut control) = control();
        let slow = uniform(galaxy.quasar_activity_duration * 1.0e2);
        let dt = control.next_timestep(&slow, 0.0);
        assert_eq!(dt, galaxy.quasar_activity_duration * 0.1);
    }

    #[test]
    fn test_episode_boundary_is_hit_then_settled() {
        let (galaxy, mut control) = control();
        let period = galaxy.quasar_repetition_timescale();
        let kinematics = uniform(5.0e4 / UNIT_YEAR);
        let courant = 1000.0 / UNIT_YEAR;

        let mut time = period - 100.0 / UNIT_YEAR;
        let dt = control.next_timestep(&kinematics, time);
        assert_close(dt, 100.0 / UNIT_YEAR);
        assert!(control.is_settling());
        time += dt;
        assert!((time / period).floor() >= 1.0);

        for _ in 0..EPISODE_SETTLE_STEPS {
            let dt = control.next_timestep(&kinematics, time);
            assert_eq!(dt, control.min_timestep());
            time += dt;
        }
        assert!(!control.is_settling());
        assert_close(control.next_timestep(&kinematics, time), courant);
    }

    #[test]
    fn test_luminosity_full_step_inside_episode() {
        let galaxy = GalaxyParameters::default();
        let dt = galaxy.quasar_activity_duration * 0.01;
        assert_close(step_luminosity_coefficient(&galaxy, 0.0, dt), 1.0);
    }

    #[test]
    fn test_luminosity_step_straddling_shutdown() {
        let galaxy = GalaxyParameters::default();
        let dt = galaxy.quasar_activity_duration * 0.01;
        let start = galaxy.quasar_activity_duration - dt / 4.0;
        assert_close(step_luminosity_coefficient(&galaxy, start, dt), 0.25);
    }

    #[test]
    fn test_luminosity_zero_after_shutdown() {
        let galaxy = GalaxyParameters::default();
        let dt = galaxy.quasar_activity_duration * 0.01;
        let start = galaxy.quasar_activity_duration * 2.0;
        assert_eq!(step_luminosity_coefficient(&galaxy, start, dt), 0.0);
    }

    #[test]
    fn test_king_fade_averages_over_the_step() {
        let galaxy = GalaxyParameters {
            fade: FadeModel::King,
            ..GalaxyParameters::default()
        };
        let dt = 1.0e-5;
        let start = 1.0e-3;
        let coefficient = step_luminosity_coefficient(&galaxy, start, dt);
        let first = FadeModel::King.luminosity_coefficient(start, &galaxy);
        let last = FadeModel::King.luminosity_coefficient(start + dt, &galaxy);
        assert!(coefficient < first && coefficient > last);
    }
}
