//! Dirichlet boundary temperatures on the two wall faces.

use std::f64::consts::PI;

use uom::si::{
    f64::{TemperatureInterval, Time},
    temperature_interval::kelvin as delta_kelvin,
    time::second,
};

use crate::support::units::Celsius;

use super::{ConfigError, Parameter, config::finite};

/// Period of the outdoor temperature cycle, in seconds.
const DAY: f64 = 86_400.0;

const HOUR: f64 = 3_600.0;

/// Outdoor air temperature applied at node 0.
#[derive(Debug, Clone, PartialEq)]
pub enum OutdoorTemperature {
    /// A fixed temperature.
    Constant(Celsius),

    /// A 24-hour cycle: `base + amplitude · sin(2π·t / 86400 s)`.
    Sinusoidal {
        base: Celsius,
        amplitude: TemperatureInterval,
    },

    /// One value per simulated hour, held constant within the hour.
    ///
    /// Past the end of the series, the last value is held.
    Hourly(Vec<Celsius>),
}

impl OutdoorTemperature {
    /// Builds a sinusoidal cycle when an amplitude is given, else a constant.
    #[must_use]
    pub fn from_amplitude(base: Celsius, amplitude: Option<TemperatureInterval>) -> Self {
        match amplitude {
            Some(amplitude) => Self::Sinusoidal { base, amplitude },
            None => Self::Constant(base),
        }
    }

    /// Returns the outdoor temperature at elapsed time `t`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the profile holds a non-finite value or
    /// an empty hourly series.
    pub fn at(&self, t: Time) -> Result<Celsius, ConfigError> {
        let schedule = self.schedule()?;
        Ok(Celsius::new(schedule.at(t.get::<second>())))
    }

    fn schedule(&self) -> Result<OutdoorSchedule, ConfigError> {
        let base = |t: &Celsius| finite(Parameter::OutdoorTemperature, t.value());
        match self {
            Self::Constant(t) => Ok(OutdoorSchedule::Constant(base(t)?)),
            Self::Sinusoidal { base: t, amplitude } => Ok(OutdoorSchedule::Sinusoidal {
                base: base(t)?,
                amplitude: finite(
                    Parameter::OutdoorAmplitude,
                    amplitude.get::<delta_kelvin>(),
                )?,
            }),
            Self::Hourly(series) if series.is_empty() => Err(ConfigError::EmptyOutdoorSeries),
            Self::Hourly(series) => Ok(OutdoorSchedule::Hourly(
                series.iter().map(base).collect::<Result<_, _>>()?,
            )),
        }
    }
}

/// Defaults to an 18 °C base with a 6 K daily swing.
impl Default for OutdoorTemperature {
    fn default() -> Self {
        Self::Sinusoidal {
            base: Celsius::new(18.0),
            amplitude: TemperatureInterval::new::<delta_kelvin>(6.0),
        }
    }
}

/// Temperatures imposed on the outdoor (node 0) and indoor (last node) faces.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryConditions {
    pub indoor: Celsius,
    pub outdoor: OutdoorTemperature,
}

impl BoundaryConditions {
    #[must_use]
    pub fn new(indoor: Celsius, outdoor: OutdoorTemperature) -> Self {
        Self { indoor, outdoor }
    }

    pub(super) fn validate(&self) -> Result<BoundaryProvider, ConfigError> {
        Ok(BoundaryProvider {
            indoor: finite(Parameter::IndoorTemperature, self.indoor.value())?,
            outdoor: self.outdoor.schedule()?,
        })
    }
}

/// Defaults to a 22 °C room and the default outdoor cycle.
impl Default for BoundaryConditions {
    fn default() -> Self {
        Self::new(Celsius::new(22.0), OutdoorTemperature::default())
    }
}

/// Outdoor temperature in °C as a function of elapsed seconds.
#[derive(Debug, Clone, PartialEq)]
enum OutdoorSchedule {
    Constant(f64),
    Sinusoidal { base: f64, amplitude: f64 },
    Hourly(Vec<f64>),
}

impl OutdoorSchedule {
    fn at(&self, t: f64) -> f64 {
        match self {
            Self::Constant(base) => *base,
            Self::Sinusoidal { base, amplitude } => base + amplitude * (2.0 * PI * t / DAY).sin(),
            Self::Hourly(series) => {
                let hour = (t / HOUR).floor().max(0.0) as usize;
                series[hour.min(series.len() - 1)]
            }
        }
    }
}

/// Validated boundary values in °C, queried once per step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoundaryProvider {
    indoor: f64,
    outdoor: OutdoorSchedule,
}

impl BoundaryProvider {
    /// Outdoor temperature at `t` seconds.
    #[inline]
    pub(crate) fn outdoor(&self, t: f64) -> f64 {
        self.outdoor.at(t)
    }

    /// Indoor temperature, independent of time.
    #[inline]
    pub(crate) fn indoor(&self) -> f64 {
        self.indoor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::hour;

    fn celsius(value: f64) -> Celsius {
        Celsius::new(value)
    }

    #[test]
    fn sinusoid_peaks_at_quarter_day() {
        let provider = BoundaryConditions::default().validate().unwrap();

        assert_relative_eq!(provider.outdoor(0.0), 18.0, epsilon = 1e-9);
        assert_relative_eq!(provider.outdoor(DAY / 4.0), 24.0, epsilon = 1e-9);
        assert_relative_eq!(provider.outdoor(DAY / 2.0), 18.0, epsilon = 1e-9);
        assert_relative_eq!(provider.outdoor(3.0 * DAY / 4.0), 12.0, epsilon = 1e-9);
        assert_relative_eq!(provider.outdoor(DAY), provider.outdoor(0.0), epsilon = 1e-9);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn without_amplitude_outdoor_is_constant() {
        let outdoor = OutdoorTemperature::from_amplitude(celsius(18.0), None);
        let provider = BoundaryConditions::new(celsius(22.0), outdoor)
            .validate()
            .unwrap();

        for t in [0.0, 1.0, 3_600.0, DAY / 4.0, 10.0 * DAY] {
            assert_eq!(provider.outdoor(t), 18.0);
            assert_eq!(provider.indoor(), 22.0);
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn zero_amplitude_matches_base_exactly() {
        let outdoor = OutdoorTemperature::from_amplitude(
            celsius(18.7),
            Some(TemperatureInterval::new::<delta_kelvin>(0.0)),
        );
        let provider = BoundaryConditions::new(celsius(20.1), outdoor)
            .validate()
            .unwrap();
        for t in [0.0, 1234.5, DAY / 4.0] {
            assert_eq!(provider.outdoor(t), 18.7);
            assert_eq!(provider.indoor(), 20.1);
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn hourly_series_holds_within_hour_and_after_end() {
        let outdoor = OutdoorTemperature::Hourly(vec![celsius(10.0), celsius(12.0), celsius(15.0)]);

        let at = |h: f64| outdoor.at(Time::new::<hour>(h)).unwrap().value();
        assert_eq!(at(0.0), 10.0);
        assert_eq!(at(0.99), 10.0);
        assert_eq!(at(1.0), 12.0);
        assert_eq!(at(2.5), 15.0);
        assert_eq!(at(100.0), 15.0);
    }

    #[test]
    fn rejects_empty_hourly_series() {
        let bc = BoundaryConditions::new(celsius(22.0), OutdoorTemperature::Hourly(Vec::new()));
        assert_eq!(bc.validate(), Err(ConfigError::EmptyOutdoorSeries));
    }

    #[test]
    fn rejects_non_finite_indoor() {
        let bc = BoundaryConditions::new(celsius(f64::NAN), OutdoorTemperature::default());
        assert!(matches!(
            bc.validate(),
            Err(ConfigError::Invalid {
                parameter: Parameter::IndoorTemperature,
                ..
            })
        ));
    }
}
