//! Building wall models with latent heat storage.
//!
//! This module provides [`twine_core::Model`] implementations for transient
//! conduction through a wall that may carry a PCM layer. The computational
//! core is in the internal `core` module.

pub(crate) mod core;

pub use self::core::{
    BoundaryConditions, BufferingComparison, ConfigError, Discretization, Grid,
    InitialCondition, LatentHeat, LayerArrangement, Material, MaterialProfile, NodeProperties,
    OutdoorTemperature, Parameter, PcmLayer, PcmPlacement, Recorder, Recording, RunOutcome,
    SimulationError, SimulationTrace, Snapshot, TraceMetrics, TransientSolver, WallConfig,
    WallLayer, effective_capacity, indoor_heat_flux, liquid_fraction, melt_fraction, simulate,
};

use twine_core::Model;

/// Simulates a wall and returns its full temperature trace.
///
/// ```
/// use pcm_wall::models::thermal::wall::{Material, PcmLayer, PcmWall, Recording, WallConfig};
/// use twine_core::Model;
/// use uom::si::{f64::{Length, Time}, length::meter, time::hour};
///
/// let config = WallConfig::new(Length::new::<meter>(0.2), Material::masonry())
///     .with_pcm(PcmLayer::paraffin(Length::new::<meter>(0.02)))
///     .with_duration(Time::new::<hour>(2.0))
///     .with_recording(Recording::Hourly);
///
/// let trace = PcmWall.call(&config).unwrap();
/// assert_eq!(trace.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmWall;

impl Model for PcmWall {
    type Input = WallConfig;
    type Output = SimulationTrace;
    type Error = SimulationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        simulate(input)
    }
}

/// Simulates a wall with and without its PCM layer and compares the indoor
/// heat flux of the two.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmBuffering;

impl Model for PcmBuffering {
    type Input = WallConfig;
    type Output = BufferingComparison;
    type Error = SimulationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        BufferingComparison::run(input)
    }
}
