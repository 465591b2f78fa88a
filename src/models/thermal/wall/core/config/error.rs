use std::fmt;

use thiserror::Error;
use uom::si::f64::Length;

use crate::support::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};

/// A named configuration input, used to report which value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    WallThickness,
    WallConductivity,
    WallDensity,
    WallSpecificHeat,
    PcmThickness,
    PcmConductivity,
    PcmDensity,
    PcmSpecificHeat,
    PcmLatentHeat,
    PcmMeltingPoint,
    PcmHalfWidth,
    IndoorTemperature,
    OutdoorTemperature,
    OutdoorAmplitude,
    InitialTemperature,
    Duration,
    GridSpacing,
    TimeStep,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WallThickness => "wall_thickness",
            Self::WallConductivity => "wall_k",
            Self::WallDensity => "wall_rho",
            Self::WallSpecificHeat => "wall_cp",
            Self::PcmThickness => "pcm_thickness",
            Self::PcmConductivity => "pcm_k",
            Self::PcmDensity => "pcm_rho",
            Self::PcmSpecificHeat => "pcm_cp",
            Self::PcmLatentHeat => "pcm_latent_heat",
            Self::PcmMeltingPoint => "pcm_Tmelt",
            Self::PcmHalfWidth => "pcm_dT",
            Self::IndoorTemperature => "indoor_temp",
            Self::OutdoorTemperature => "base_outdoor_temp",
            Self::OutdoorAmplitude => "amplitude",
            Self::InitialTemperature => "initial_temp",
            Self::Duration => "duration",
            Self::GridSpacing => "dx",
            Self::TimeStep => "dt",
        };
        f.write_str(name)
    }
}

/// Errors detected while validating a wall configuration.
///
/// All of these are raised before the first time step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A scalar input violates its numeric bound.
    #[error("invalid {parameter}: {source}")]
    Invalid {
        parameter: Parameter,
        #[source]
        source: ConstraintError,
    },

    /// The PCM layer is thicker than the wall it belongs to.
    #[error("pcm_thickness {pcm:?} exceeds wall_thickness {wall:?}")]
    PcmThickerThanWall { pcm: Length, wall: Length },

    /// A cladding layer sits on a face of the wall, so it cannot be centered.
    #[error("a PCM cladding layer must be placed on the outdoor or indoor face")]
    CenteredCladding,

    /// An hourly outdoor series must contain at least one value.
    #[error("hourly outdoor temperature series is empty")]
    EmptyOutdoorSeries,

    /// An explicit initial profile does not match the grid.
    #[error("initial profile has {actual} temperatures but the grid has {expected} nodes")]
    InitialProfileLength { expected: usize, actual: usize },

    /// `thickness / dx` gives more grid cells than can be indexed.
    #[error("{cells:e} grid cells cannot be indexed")]
    GridTooLarge { cells: f64 },

    /// `duration / dt` gives more time steps than can be counted.
    #[error("{steps:e} time steps cannot be counted")]
    TooManySteps { steps: f64 },
}

impl ConfigError {
    pub(crate) fn invalid(parameter: Parameter) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::Invalid { parameter, source }
    }
}

/// Rejects values that are NaN or infinite.
pub(crate) fn finite(parameter: Parameter, value: f64) -> Result<f64, ConfigError> {
    let source = if value.is_nan() {
        ConstraintError::NotANumber
    } else if value.is_infinite() {
        ConstraintError::Infinite
    } else {
        return Ok(value);
    };
    Err(ConfigError::Invalid { parameter, source })
}

/// Accepts finite values greater than zero.
pub(crate) fn strictly_positive(parameter: Parameter, value: f64) -> Result<f64, ConfigError> {
    StrictlyPositive::new(finite(parameter, value)?)
        .map(Constrained::into_inner)
        .map_err(ConfigError::invalid(parameter))
}

/// Accepts finite values of zero or more.
pub(crate) fn non_negative(parameter: Parameter, value: f64) -> Result<f64, ConfigError> {
    NonNegative::new(finite(parameter, value)?)
        .map(Constrained::into_inner)
        .map_err(ConfigError::invalid(parameter))
}
