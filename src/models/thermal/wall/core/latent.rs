//! Apparent heat capacity model for latent heat storage.
//!
//! Latent heat `L` is spread uniformly over the melting band
//! `[T_melt − ΔT, T_melt + ΔT]` as a boost to specific heat:
//!
//! ```text
//! cp_eff(T) = cp + L / (2·ΔT)   if |T − T_melt| ≤ ΔT
//! cp_eff(T) = cp                otherwise
//! ```
//!
//! This avoids tracking a moving phase front and keeps the explicit scheme
//! node-local, at the cost of smearing the transition over the band.

use uom::si::{
    f64::{AvailableEnergy, Ratio, SpecificHeatCapacity, TemperatureInterval},
    available_energy::joule_per_kilogram,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintResult, UnitInterval},
    units::Celsius,
};

use super::{
    ConfigError, Parameter,
    config::{finite, strictly_positive},
};

/// Returns the effective specific heat at temperature `t`.
///
/// All arguments are plain SI values: `nominal_cp` and the result in J/kg·K,
/// `t` and `t_melt` in °C, `half_width` in K, `latent_heat` in J/kg.
/// The band is closed, so `t = t_melt ± half_width` is inside it.
///
/// `half_width` must be strictly positive; [`LatentHeat`] validation
/// guarantees this for values reaching the solver.
#[must_use]
pub fn effective_capacity(
    nominal_cp: f64,
    t: f64,
    t_melt: f64,
    half_width: f64,
    latent_heat: f64,
) -> f64 {
    if (t - t_melt).abs() <= half_width {
        nominal_cp + latent_heat / (2.0 * half_width)
    } else {
        nominal_cp
    }
}

/// Returns the fraction of the melting band passed at temperature `t`.
///
/// Zero below `t_melt − half_width`, one above `t_melt + half_width`, and
/// linear in between. Arguments are in °C and K as for [`effective_capacity`].
#[must_use]
pub fn melt_fraction(t: f64, t_melt: f64, half_width: f64) -> f64 {
    ((t - t_melt + half_width) / (2.0 * half_width)).clamp(0.0, 1.0)
}

/// Latent heat parameters of a phase change material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatentHeat {
    /// Energy absorbed per unit mass across the full transition.
    pub latent_heat: AvailableEnergy,
    /// Center of the melting band.
    pub melting_point: Celsius,
    /// Half-width `ΔT` of the melting band.
    pub half_width: TemperatureInterval,
}

impl LatentHeat {
    #[must_use]
    pub fn new(
        latent_heat: AvailableEnergy,
        melting_point: Celsius,
        half_width: TemperatureInterval,
    ) -> Self {
        Self {
            latent_heat,
            melting_point,
            half_width,
        }
    }

    /// 200 kJ/kg over 25 ± 2 °C.
    #[must_use]
    pub fn paraffin() -> Self {
        Self::new(
            AvailableEnergy::new::<joule_per_kilogram>(200_000.0),
            Celsius::new(25.0),
            TemperatureInterval::new::<delta_kelvin>(2.0),
        )
    }

    /// Returns the effective specific heat of a material with nominal `cp`
    /// at temperature `t`.
    #[must_use]
    pub fn effective_specific_heat(
        &self,
        cp: SpecificHeatCapacity,
        t: Celsius,
    ) -> SpecificHeatCapacity {
        let cp_eff = effective_capacity(
            cp.get::<joule_per_kilogram_kelvin>(),
            t.value(),
            self.melting_point.value(),
            self.half_width.get::<delta_kelvin>(),
            self.latent_heat.get::<joule_per_kilogram>(),
        );
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp_eff)
    }

    /// Returns the fraction of the melting band passed at temperature `t`.
    ///
    /// This matches the uniform spread of latent heat over the band.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` or the band is not a number.
    pub fn liquid_fraction(&self, t: Celsius) -> ConstraintResult<Constrained<Ratio, UnitInterval>> {
        let fraction = melt_fraction(
            t.value(),
            self.melting_point.value(),
            self.half_width.get::<delta_kelvin>(),
        );
        UnitInterval::new(Ratio::new::<ratio>(fraction))
    }

    /// Validates the parameters and converts them for the stepping loop.
    pub(super) fn validate(&self) -> Result<PhaseBand, ConfigError> {
        Ok(PhaseBand {
            latent_heat: strictly_positive(
                Parameter::PcmLatentHeat,
                self.latent_heat.get::<joule_per_kilogram>(),
            )?,
            melting_point: finite(Parameter::PcmMeltingPoint, self.melting_point.value())?,
            half_width: strictly_positive(
                Parameter::PcmHalfWidth,
                self.half_width.get::<delta_kelvin>(),
            )?,
        })
    }
}

/// Validated latent heat parameters: J/kg, °C and K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PhaseBand {
    latent_heat: f64,
    melting_point: f64,
    half_width: f64,
}

impl PhaseBand {
    #[inline]
    pub(crate) fn effective_capacity(&self, nominal_cp: f64, t: f64) -> f64 {
        effective_capacity(
            nominal_cp,
            t,
            self.melting_point,
            self.half_width,
            self.latent_heat,
        )
    }

    pub(crate) fn liquid_fraction(&self, t: f64) -> f64 {
        melt_fraction(t, self.melting_point, self.half_width)
    }
}
