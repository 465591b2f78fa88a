//! Pre-flight check of the explicit stability bound.

use log::debug;
use uom::si::{f64::Time, time::second};

use crate::models::thermal::wall::core::MaterialProfile;

use super::SimulationError;

/// Checks `dt ≤ dx² / (2·α)` against the largest nominal diffusivity.
///
/// Latent heat only ever raises the effective specific heat, so nominal
/// properties give the tightest bound. Returns the bound in seconds.
pub(super) fn check(profile: &MaterialProfile, dt: f64) -> Result<f64, SimulationError> {
    let dx = profile.grid().spacing();
    let (node, diffusivity) = profile.max_diffusivity();
    let bound = dx * dx / (2.0 * diffusivity);

    if dt > bound {
        return Err(SimulationError::Unstable {
            node,
            diffusivity,
            max_stable_dt: Time::new::<second>(bound),
            dt: Time::new::<second>(dt),
        });
    }

    debug!(
        "stability: dt = {dt} s, bound = {bound:.3} s at node {node} ({:.0}% of limit)",
        100.0 * dt / bound
    );
    Ok(bound)
}
