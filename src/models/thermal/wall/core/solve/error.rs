use thiserror::Error;
use uom::si::f64::Time;

use crate::models::thermal::wall::core::ConfigError;

/// Errors that can stop a wall simulation.
///
/// None of these are recoverable by retrying the same configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The configuration was rejected before the first step.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The time step exceeds the explicit stability bound at some node.
    ///
    /// Raised before any step is taken.
    #[error(
        "dt={dt:?} exceeds the stability bound {max_stable_dt:?} at node {node} \
         (diffusivity {diffusivity:e} m²/s)"
    )]
    Unstable {
        /// Node with the largest nominal diffusivity.
        node: usize,
        /// Nominal diffusivity at that node, in m²/s.
        diffusivity: f64,
        /// `dx² / (2·α)` at that node.
        max_stable_dt: Time,
        /// Requested time step.
        dt: Time,
    },

    /// A temperature became NaN or infinite.
    #[error("temperature at node {node} became non-finite at step {step}")]
    Diverged {
        /// Step whose update produced the non-finite value.
        step: usize,
        /// First node holding a non-finite value.
        node: usize,
        /// Last step whose field was entirely finite.
        last_valid_step: usize,
    },
}
