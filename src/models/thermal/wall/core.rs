//! One-dimensional transient conduction through a wall with a PCM layer.
//!
//! A configuration is validated once into a [`MaterialProfile`] (grid and
//! per-node properties) and a boundary schedule. The [`TransientSolver`] then
//! marches the temperature field forward with an explicit scheme, handing
//! snapshots to a [`Recorder`] at the configured cadence.

mod boundary;
mod config;
mod latent;
mod material;
mod metrics;
mod profile;
mod solve;
mod trace;

#[cfg(test)]
mod test_support;

pub use boundary::{BoundaryConditions, OutdoorTemperature};
pub use config::{
    ConfigError, Discretization, InitialCondition, Parameter, Recording, WallConfig,
};
pub use latent::{LatentHeat, effective_capacity, melt_fraction};
pub use material::{LayerArrangement, Material, PcmLayer, PcmPlacement, WallLayer};
pub use metrics::{BufferingComparison, TraceMetrics, indoor_heat_flux, liquid_fraction};
pub use profile::{Grid, MaterialProfile, NodeProperties};
pub use solve::{RunOutcome, SimulationError, TransientSolver};
pub use trace::{Recorder, SimulationTrace, Snapshot};

use boundary::BoundaryProvider;

/// Runs `config` to completion and returns every recorded snapshot.
///
/// # Errors
///
/// Returns a [`SimulationError`] if the configuration is invalid, the time
/// step is unstable, or the field diverges.
pub fn simulate(config: &WallConfig) -> Result<SimulationTrace, SimulationError> {
    let mut solver = TransientSolver::new(config)?;
    let mut trace = solver.trace();
    solver.run(&mut trace)?;
    Ok(trace)
}
