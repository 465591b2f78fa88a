//! Wall simulation configuration.

pub(super) mod error;

use std::num::NonZeroUsize;

use uom::si::{
    f64::{Length, Time},
    length::{meter, millimeter},
    time::{hour, second},
};

use crate::support::units::Celsius;

pub use error::{ConfigError, Parameter};
pub(crate) use error::{finite, non_negative, strictly_positive};

use super::{
    boundary::BoundaryConditions,
    material::{Material, PcmLayer, WallLayer},
};

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Spatial and temporal resolution of the explicit scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// Uniform node spacing.
    pub dx: Length,
    /// Fixed time step.
    pub dt: Time,
}

/// Defaults to `dx = 2 mm` and `dt = 1 s`.
impl Default for Discretization {
    fn default() -> Self {
        Self {
            dx: Length::new::<millimeter>(2.0),
            dt: Time::new::<second>(1.0),
        }
    }
}

impl Discretization {
    /// Returns `(dx, dt)` in metres and seconds.
    pub(super) fn validate(&self) -> Result<(f64, f64), ConfigError> {
        let dx = strictly_positive(Parameter::GridSpacing, self.dx.get::<meter>())?;
        let dt = strictly_positive(Parameter::TimeStep, self.dt.get::<second>())?;
        Ok((dx, dt))
    }
}

/// Which time steps end up in the trace.
///
/// The initial field (step 0) is always recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recording {
    /// Every time step.
    #[default]
    EveryStep,
    /// Every `K`th time step.
    Stride(NonZeroUsize),
    /// Once per simulated hour.
    Hourly,
}

impl Recording {
    /// Resolves the cadence to a step stride for time step `dt` in seconds.
    pub(super) fn stride(self, dt: f64) -> NonZeroUsize {
        match self {
            Self::EveryStep => NonZeroUsize::MIN,
            Self::Stride(k) => k,
            Self::Hourly => {
                NonZeroUsize::new((SECONDS_PER_HOUR / dt).round() as usize).unwrap_or(NonZeroUsize::MIN)
            }
        }
    }
}

/// Temperature field at the start of the run.
///
/// Whatever the choice, the two face nodes are overwritten with the boundary
/// temperatures at `t = 0` before the first snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InitialCondition {
    /// Uniform at the indoor temperature.
    #[default]
    Indoor,
    /// Uniform at the given temperature.
    Uniform(Celsius),
    /// One temperature per node, outdoor face first.
    Profile(Vec<Celsius>),
}

impl InitialCondition {
    /// Builds the initial field in °C for a grid of `nodes` nodes.
    pub(super) fn field(&self, nodes: usize, indoor: f64) -> Result<Vec<f64>, ConfigError> {
        match self {
            Self::Indoor => Ok(vec![indoor; nodes]),
            Self::Uniform(t) => Ok(vec![
                finite(Parameter::InitialTemperature, t.value())?;
                nodes
            ]),
            Self::Profile(profile) if profile.len() != nodes => {
                Err(ConfigError::InitialProfileLength {
                    expected: nodes,
                    actual: profile.len(),
                })
            }
            Self::Profile(profile) => profile
                .iter()
                .map(|t| finite(Parameter::InitialTemperature, t.value()))
                .collect(),
        }
    }
}

/// Everything needed to simulate one wall.
///
/// Build one with [`WallConfig::new`] and adjust it with the `with_*` methods:
///
/// ```
/// use pcm_wall::models::thermal::wall::{Material, PcmLayer, WallConfig};
/// use uom::si::{f64::{Length, Time}, length::meter, time::hour};
///
/// let config = WallConfig::new(Length::new::<meter>(0.2), Material::masonry())
///     .with_pcm(PcmLayer::paraffin(Length::new::<meter>(0.02)))
///     .with_duration(Time::new::<hour>(48.0));
/// assert!(config.pcm.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WallConfig {
    pub wall: WallLayer,
    pub pcm: Option<PcmLayer>,
    pub boundary: BoundaryConditions,
    pub discretization: Discretization,
    /// Total simulated time.
    pub duration: Time,
    pub initial: InitialCondition,
    pub recording: Recording,
}

impl WallConfig {
    /// Creates a PCM-free wall with default boundaries, resolution and a
    /// 48 hour duration.
    #[must_use]
    pub fn new(thickness: Length, material: Material) -> Self {
        Self {
            wall: WallLayer::new(thickness, material),
            pcm: None,
            boundary: BoundaryConditions::default(),
            discretization: Discretization::default(),
            duration: Time::new::<hour>(48.0),
            initial: InitialCondition::default(),
            recording: Recording::default(),
        }
    }

    #[must_use]
    pub fn with_pcm(mut self, pcm: PcmLayer) -> Self {
        self.pcm = Some(pcm);
        self
    }

    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryConditions) -> Self {
        self.boundary = boundary;
        self
    }

    #[must_use]
    pub fn with_discretization(mut self, discretization: Discretization) -> Self {
        self.discretization = discretization;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Time) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_initial(mut self, initial: InitialCondition) -> Self {
        self.initial = initial;
        self
    }

    #[must_use]
    pub fn with_recording(mut self, recording: Recording) -> Self {
        self.recording = recording;
        self
    }

    /// Returns the same configuration with the PCM layer removed.
    ///
    /// An embedded layer is replaced by wall material; a cladding layer is
    /// dropped along with its thickness.
    #[must_use]
    pub fn without_pcm(&self) -> Self {
        Self {
            pcm: None,
            ..self.clone()
        }
    }

    /// Returns the number of time steps, `round(duration / dt)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the duration is negative or not finite,
    /// if `dt` is not a finite positive value, or if the step count does not
    /// fit in a `usize`.
    pub fn steps(&self) -> Result<usize, ConfigError> {
        let (_, dt) = self.discretization.validate()?;
        let duration = non_negative(Parameter::Duration, self.duration.get::<second>())?;
        let steps = (duration / dt).round();
        if steps >= usize::MAX as f64 {
            return Err(ConfigError::TooManySteps { steps });
        }
        Ok(steps as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    fn config() -> WallConfig {
        WallConfig::new(Length::new::<meter>(0.2), Material::masonry())
    }

    #[test]
    fn step_count_rounds_duration() {
        assert_eq!(config().steps().unwrap(), 48 * 3600);

        let coarse = config().with_discretization(Discretization {
            dt: Time::new::<second>(7.0),
            ..Discretization::default()
        });
        // 172800 / 7 = 24685.7
        assert_eq!(coarse.steps().unwrap(), 24_686);
    }

    #[test]
    fn rejects_non_positive_resolution() {
        let zero_dx = config().with_discretization(Discretization {
            dx: Length::new::<meter>(0.0),
            ..Discretization::default()
        });
        assert_eq!(
            zero_dx.discretization.validate(),
            Err(ConfigError::Invalid {
                parameter: Parameter::GridSpacing,
                source: ConstraintError::Zero,
            })
        );

        let negative_dt = config().with_discretization(Discretization {
            dt: Time::new::<second>(-1.0),
            ..Discretization::default()
        });
        assert!(matches!(
            negative_dt.steps(),
            Err(ConfigError::Invalid {
                parameter: Parameter::TimeStep,
                source: ConstraintError::Negative,
            })
        ));
    }

    #[test]
    fn rejects_negative_duration() {
        let config = config().with_duration(Time::new::<hour>(-1.0));
        assert!(matches!(
            config.steps(),
            Err(ConfigError::Invalid {
                parameter: Parameter::Duration,
                ..
            })
        ));
    }

    #[test]
    fn rejects_infinite_resolution_and_duration() {
        let infinite_dx = config().with_discretization(Discretization {
            dx: Length::new::<meter>(f64::INFINITY),
            ..Discretization::default()
        });
        assert_eq!(
            infinite_dx.discretization.validate(),
            Err(ConfigError::Invalid {
                parameter: Parameter::GridSpacing,
                source: ConstraintError::Infinite,
            })
        );

        let infinite_dt = config().with_discretization(Discretization {
            dt: Time::new::<second>(f64::INFINITY),
            ..Discretization::default()
        });
        assert_eq!(
            infinite_dt.steps(),
            Err(ConfigError::Invalid {
                parameter: Parameter::TimeStep,
                source: ConstraintError::Infinite,
            })
        );

        let forever = config().with_duration(Time::new::<second>(f64::INFINITY));
        assert_eq!(
            forever.steps(),
            Err(ConfigError::Invalid {
                parameter: Parameter::Duration,
                source: ConstraintError::Infinite,
            })
        );
    }

    #[test]
    fn rejects_uncountable_step_count() {
        let config = config()
            .with_duration(Time::new::<second>(1e300))
            .with_discretization(Discretization {
                dt: Time::new::<second>(1e-10),
                ..Discretization::default()
            });
        assert!(matches!(
            config.steps(),
            Err(ConfigError::TooManySteps { .. })
        ));
    }

    #[test]
    fn recording_strides() {
        assert_eq!(Recording::EveryStep.stride(1.0).get(), 1);
        assert_eq!(
            Recording::Stride(NonZeroUsize::new(60).unwrap()).stride(1.0).get(),
            60
        );
        assert_eq!(Recording::Hourly.stride(1.0).get(), 3600);
        assert_eq!(Recording::Hourly.stride(7200.0).get(), 1);
    }

    #[test]
    fn initial_profile_must_match_grid() {
        let profile = InitialCondition::Profile(vec![Celsius::new(20.0); 3]);
        assert_eq!(
            profile.field(5, 22.0),
            Err(ConfigError::InitialProfileLength {
                expected: 5,
                actual: 3,
            })
        );
        assert_eq!(InitialCondition::Indoor.field(3, 22.0), Ok(vec![22.0; 3]));
    }
}
