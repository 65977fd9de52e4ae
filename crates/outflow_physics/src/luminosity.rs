use outflow_core::{FadeModel, GalaxyParameters};

/// King-fade luminosity exponent
const KING_EXPONENT: f64 = -19.0 / 16.0;

/// AGN luminosity history within one activity episode, in units of the
/// Eddington luminosity. All averages are closed-form integrals.
pub trait LuminosityFade {
    /// Eddington-ratio multiplier at `time_eff` after the episode started
    fn luminosity_coefficient(&self, time_eff: f64, galaxy: &GalaxyParameters) -> f64;

    /// Integral of the coefficient over `[time_start, time_start + duration]`,
    /// divided by `timestep`. `duration` is shorter than `timestep` when the
    /// AGN switches off part-way through a step.
    fn luminosity_mean_coefficient(
        &self,
        time_start: f64,
        duration: f64,
        timestep: f64,
        galaxy: &GalaxyParameters,
    ) -> f64;

    /// End of the constant-luminosity phase, t_q. For the King fade this is
    /// the timescale of the continuous decline.
    fn quasar_luminosity_variation_timescale(&self, galaxy: &GalaxyParameters) -> f64;
}

impl LuminosityFade for FadeModel {
    fn luminosity_coefficient(&self, time_eff: f64, galaxy: &GalaxyParameters) -> f64 {
        let ratio = galaxy.eddington_ratio;
        let t_q = self.quasar_luminosity_variation_timescale(galaxy);

        match self {
            Self::None => {
                if time_eff <= t_q {
                    ratio
                } else {
                    0.0
                }
            }
            Self::Exponential => {
                if time_eff <= t_q {
                    ratio
                } else {
                    ratio * (-(time_eff - t_q) / galaxy.drop_timescale).exp()
                }
            }
            Self::PowerLaw => {
                if time_eff <= t_q {
                    ratio
                } else {
                    ratio * (time_eff / t_q).powf(-galaxy.alpha_drop)
                }
            }
            Self::King => ratio * (1.0 + time_eff / t_q).powf(KING_EXPONENT),
        }
    }

    fn luminosity_mean_coefficient(
        &self,
        time_start: f64,
        duration: f64,
        timestep: f64,
        galaxy: &GalaxyParameters,
    ) -> f64 {
        let ratio = galaxy.eddington_ratio;
        let t_q = self.quasar_luminosity_variation_timescale(galaxy);
        let time_end = time_start + duration;

        match self {
            Self::None => ratio * duration / timestep,
            Self::King => {
                ratio * 16.0 * t_q / (3.0 * timestep)
                    * ((1.0 + time_start / t_q).powf(-3.0 / 16.0)
                        - (1.0 + time_end / t_q).powf(-3.0 / 16.0))
            }
            _ if time_end <= t_q => ratio,
            Self::Exponential => {
                let tau = galaxy.drop_timescale;
                if time_start <= t_q {
                    ratio * (t_q - time_start) / timestep
                        + ratio * tau / timestep * (1.0 - ((t_q - duration - time_start) / tau).exp())
                } else {
                    ratio * tau / timestep
                        * ((t_q - time_start) / tau).exp()
                        * (1.0 - (-duration / tau).exp())
                }
            }
            Self::PowerLaw => power_law_mean(ratio, t_q, galaxy.alpha_drop, time_start, time_end, timestep),
        }
    }

    fn quasar_luminosity_variation_timescale(&self, galaxy: &GalaxyParameters) -> f64 {
        let duration = galaxy.quasar_activity_duration;
        let shutdown = galaxy.eddington_ratio_shutdown / galaxy.eddington_ratio;

        match self {
            Self::None => duration,
            Self::Exponential => duration + galaxy.drop_timescale * shutdown.ln(),
            Self::PowerLaw => duration / (1.0 + shutdown.powf(-1.0 / galaxy.alpha_drop)),
            Self::King => duration / (shutdown.powf(-16.0 / 19.0) - 1.0),
        }
    }
}

/// Fading part of the power-law mean, for an interval that ends after t_q.
///
/// The fading term keeps the `t_q^(1-alpha) - t^(1-alpha)` ordering, so it
/// comes out negative for `alpha < 1`. The closed form is singular at
/// `alpha == 1`, so both `alpha == 1` and `alpha == -1` take the logarithmic
/// form in both sub-cases.
fn power_law_mean(
    ratio: f64,
    t_q: f64,
    alpha: f64,
    time_start: f64,
    time_end: f64,
    timestep: f64,
) -> f64 {
    if alpha == 1.0 || alpha == -1.0 {
        if time_start <= t_q {
            ratio * (t_q - time_start) / timestep + ratio * t_q / timestep * (time_end / t_q).ln()
        } else {
            ratio * t_q / timestep * (time_end / time_start).ln()
        }
    } else {
        let exponent = 1.0 - alpha;
        let weight = ratio * t_q.powf(alpha) / (timestep * exponent);
        if time_start <= t_q {
            ratio * (t_q - time_start) / timestep
                + weight * (t_q.powf(exponent) - time_end.powf(exponent))
        } else {
            weight * (time_start.powf(exponent) - time_end.powf(exponent))
        }
    }
}

/// AGN luminosity at simulation time `time`, in internal energy per time
pub fn agn_luminosity(galaxy: &GalaxyParameters, time: f64) -> f64 {
    let time_eff = time % galaxy.quasar_repetition_timescale();
    galaxy.fade.luminosity_coefficient(time_eff, galaxy) * galaxy.luminosity_eddington()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    const ALL_FADES: [FadeModel; 4] = [
        FadeModel::None,
        FadeModel::Exponential,
        FadeModel::PowerLaw,
        FadeModel::King,
    ];

    fn galaxy_with(fade: FadeModel) -> GalaxyParameters {
        GalaxyParameters {
            fade,
            ..GalaxyParameters::default()
        }
    }

    #[test]
    fn test_variation_timescale_fixtures() {
        let expected = [
            0.007497242933416249,
            -0.19965923487105416,
            7.49649328408784e-07,
            0.00015840594632720974,
        ];
        for (fade, expected) in ALL_FADES.into_iter().zip(expected) {
            let galaxy = galaxy_with(fade);
            assert_close(fade.quasar_luminosity_variation_timescale(&galaxy), expected);
        }
    }

    #[test]
    fn test_coefficient_fixtures() {
        let cases = [
            (FadeModel::None, 0.1, 0.0),
            (FadeModel::None, 0.001, 1.0),
            (FadeModel::Exponential, 0.1, 0.0012791711490824902),
            (FadeModel::Exponential, 0.001, 0.011553880624562867),
            (FadeModel::PowerLaw, 0.1, 0.00273797247686821),
            (FadeModel::PowerLaw, 0.001, 0.027379724768682098),
            (FadeModel::King, 0.1, 0.0004719677682289763),
            (FadeModel::King, 0.001, 0.0941659644495734),
        ];
        for (fade, time, expected) in cases {
            let galaxy = galaxy_with(fade);
            assert_close(fade.luminosity_coefficient(time, &galaxy), expected);
        }
    }

    #[test]
    fn test_mean_coefficient_fixtures() {
        let cases = [
            (FadeModel::None, 0.1, 1e-6, 1e-6, 1.0),
            (FadeModel::None, 0.001, 1e-6, 1e-6, 1.0),
            (FadeModel::None, 0.1, 1e-5, 1e-6, 10.0),
            (FadeModel::None, 0.001, 1e-5, 1e-6, 10.0),
            (FadeModel::Exponential, 0.1, 1e-6, 1e-6, 0.0012791569309479355),
            (FadeModel::Exponential, 0.001, 1e-6, 1e-6, 0.011553752201849874),
            (FadeModel::Exponential, 0.1, 1e-5, 1e-6, 0.012790289772224706),
            (FadeModel::Exponential, 0.001, 1e-5, 1e-6, 0.11552596483109227),
            (FadeModel::PowerLaw, 0.1, 1e-6, 1e-6, -0.0027379656319571795),
            (FadeModel::PowerLaw, 0.001, 1e-6, 1e-6, -0.027372883257814472),
            (FadeModel::PowerLaw, 0.1, 1e-5, 1e-6, -0.02737904030975659),
            (FadeModel::PowerLaw, 0.001, 1e-5, 1e-6, -0.2731161557914118),
            (FadeModel::King, 0.1, 1e-6, 1e-6, 0.0004719649703965489),
            (FadeModel::King, 0.001, 1e-6, 1e-6, 0.09411772931041068),
            (FadeModel::King, 0.1, 1e-5, 1e-6, 0.004719397915026842),
            (FadeModel::King, 0.001, 1e-5, 1e-6, 0.9368632681259501),
        ];
        for (fade, time, duration, timestep, expected) in cases {
            let galaxy = galaxy_with(fade);
            assert_close(
                fade.luminosity_mean_coefficient(time, duration, timestep, &galaxy),
                expected,
            );
        }
    }

    #[test]
    fn test_no_fade_is_an_exact_step_function() {
        let galaxy = GalaxyParameters {
            eddington_ratio: 0.7,
            ..galaxy_with(FadeModel::None)
        };
        let duration = galaxy.quasar_activity_duration;
        for t in [0.0, duration * 0.5, duration] {
            assert_eq!(FadeModel::None.luminosity_coefficient(t, &galaxy), 0.7);
        }
        for t in [duration * (1.0 + 1e-12), duration * 2.0] {
            assert_eq!(FadeModel::None.luminosity_coefficient(t, &galaxy), 0.0);
        }
    }

    #[test]
    fn test_constant_phase_mean_is_the_eddington_ratio() {
        // Exponential t_q is negative for the default galaxy, so use a short drop time
        let galaxy = GalaxyParameters {
            drop_timescale: GalaxyParameters::default().quasar_activity_duration * 0.01,
            ..GalaxyParameters::default()
        };
        for fade in [FadeModel::Exponential, FadeModel::PowerLaw] {
            let t_q = fade.quasar_luminosity_variation_timescale(&galaxy);
            assert!(t_q > 0.0, "{}", fade.name());
            let mean = fade.luminosity_mean_coefficient(0.0, t_q * 0.5, t_q * 0.5, &galaxy);
            assert_eq!(mean, galaxy.eddington_ratio);
        }
    }

    #[test]
    fn test_exponential_mean_matches_split_integral() {
        let galaxy = GalaxyParameters {
            drop_timescale: GalaxyParameters::default().quasar_activity_duration * 0.01,
            ..GalaxyParameters::default()
        };
        let fade = FadeModel::Exponential;
        let t_q = fade.quasar_luminosity_variation_timescale(&galaxy);
        let tau = galaxy.drop_timescale;

        // Straddling the fade onset: constant part plus decayed part
        let start = t_q - tau;
        let duration = 3.0 * tau;
        let mean = fade.luminosity_mean_coefficient(start, duration, duration, &galaxy);
        let expected = (tau + tau * (1.0 - (-2.0f64).exp())) / duration;
        assert_close(mean, expected);
    }

    #[test]
    fn test_king_mean_is_bounded_by_endpoints() {
        let galaxy = galaxy_with(FadeModel::King);
        let fade = FadeModel::King;
        let start = 0.002;
        let dt = 1.0e-4;
        let mean = fade.luminosity_mean_coefficient(start, dt, dt, &galaxy);
        let first = fade.luminosity_coefficient(start, &galaxy);
        let last = fade.luminosity_coefficient(start + dt, &galaxy);
        assert!(mean < first && mean > last, "{last} < {mean} < {first}");
    }

    #[test]
    fn test_power_law_logarithmic_branch_returns_value() {
        let galaxy = GalaxyParameters {
            alpha_drop: -1.0,
            ..galaxy_with(FadeModel::PowerLaw)
        };
        let fade = FadeModel::PowerLaw;
        let t_q = fade.quasar_luminosity_variation_timescale(&galaxy);

        let straddling = fade.luminosity_mean_coefficient(t_q * 0.5, t_q, t_q, &galaxy);
        assert_close(straddling, 0.5 + 1.5f64.ln());

        let fading = fade.luminosity_mean_coefficient(t_q * 2.0, t_q, t_q, &galaxy);
        assert_close(fading, 1.5f64.ln());
    }

    #[test]
    fn test_power_law_unit_index_stays_finite() {
        let galaxy = GalaxyParameters {
            alpha_drop: 1.0,
            ..galaxy_with(FadeModel::PowerLaw)
        };
        let fade = FadeModel::PowerLaw;
        let t_q = fade.quasar_luminosity_variation_timescale(&galaxy);
        assert!(t_q.is_finite() && t_q > 0.0);

        let straddling = fade.luminosity_mean_coefficient(t_q * 0.5, t_q, t_q, &galaxy);
        assert_close(straddling, 0.5 + 1.5f64.ln());

        let fading = fade.luminosity_mean_coefficient(t_q * 2.0, t_q, t_q, &galaxy);
        assert!(fading.is_finite() && fading > 0.0);
        assert_close(fading, 1.5f64.ln());

        // (t/t_q)^-1 averaged over [2 t_q, 3 t_q] lies between its endpoint values
        let first = fade.luminosity_coefficient(t_q * 2.0, &galaxy);
        let last = fade.luminosity_coefficient(t_q * 3.0, &galaxy);
        assert!(fading < first && fading > last);
    }

    #[test]
    fn test_agn_luminosity_repeats_each_period() {
        let galaxy = GalaxyParameters::default();
        let period = galaxy.quasar_repetition_timescale();
        let early = galaxy.quasar_activity_duration * 0.5;

        let on = agn_luminosity(&galaxy, early);
        assert_close(on, galaxy.luminosity_eddington());
        assert_close(agn_luminosity(&galaxy, early + 3.0 * period), on);
        assert_eq!(agn_luminosity(&galaxy, period * 0.5), 0.0);
    }
}
