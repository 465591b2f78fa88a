//! Layer materials and PCM layer geometry.

use uom::si::{
    f64::{Length, MassDensity, SpecificHeatCapacity, ThermalConductivity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use super::{
    ConfigError, Parameter,
    config::{non_negative, strictly_positive},
    latent::{LatentHeat, PhaseBand},
};

/// Isotropic thermal properties of a layer material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub conductivity: ThermalConductivity,
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
}

impl Material {
    #[must_use]
    pub fn new(
        conductivity: ThermalConductivity,
        density: MassDensity,
        specific_heat: SpecificHeatCapacity,
    ) -> Self {
        Self {
            conductivity,
            density,
            specific_heat,
        }
    }

    /// Heavyweight masonry: `k = 0.6 W/m·K`, `ρ = 1800 kg/m³`, `cp = 1000 J/kg·K`.
    #[must_use]
    pub fn masonry() -> Self {
        Self::new(
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
            MassDensity::new::<kilogram_per_cubic_meter>(1800.0),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
        )
    }

    /// Solid-state paraffin: `k = 0.25 W/m·K`, `ρ = 900 kg/m³`, `cp = 2000 J/kg·K`.
    #[must_use]
    pub fn paraffin() -> Self {
        Self::new(
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.25),
            MassDensity::new::<kilogram_per_cubic_meter>(900.0),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(2000.0),
        )
    }

    /// Checks that every property is finite and strictly positive and returns
    /// SI values.
    pub(super) fn validate(&self, role: LayerRole) -> Result<SiMaterial, ConfigError> {
        let [k, rho, cp] = role.parameters();
        Ok(SiMaterial {
            conductivity: strictly_positive(k, self.conductivity.get::<watt_per_meter_kelvin>())?,
            density: strictly_positive(rho, self.density.get::<kilogram_per_cubic_meter>())?,
            specific_heat: strictly_positive(
                cp,
                self.specific_heat.get::<joule_per_kilogram_kelvin>(),
            )?,
        })
    }
}

/// Which layer a material belongs to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LayerRole {
    Wall,
    Pcm,
}

impl LayerRole {
    fn parameters(self) -> [Parameter; 3] {
        match self {
            Self::Wall => [
                Parameter::WallConductivity,
                Parameter::WallDensity,
                Parameter::WallSpecificHeat,
            ],
            Self::Pcm => [
                Parameter::PcmConductivity,
                Parameter::PcmDensity,
                Parameter::PcmSpecificHeat,
            ],
        }
    }
}

/// Validated material properties in SI units (W/m·K, kg/m³, J/kg·K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SiMaterial {
    pub(super) conductivity: f64,
    pub(super) density: f64,
    pub(super) specific_heat: f64,
}

/// Where the PCM layer sits across the wall thickness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PcmPlacement {
    /// Against the outdoor face, starting at node 0.
    #[default]
    OutdoorFace,
    /// Centered between the two faces.
    Centered,
    /// Against the indoor face, ending at the last node.
    IndoorFace,
}

/// How the PCM layer combines with the wall layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayerArrangement {
    /// The PCM replaces wall material; total thickness is the wall thickness.
    #[default]
    Embedded,
    /// The PCM is an additional layer on one face; total thickness is
    /// wall thickness plus PCM thickness.
    Cladding,
}

/// The wall layer that carries the PCM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLayer {
    pub thickness: Length,
    pub material: Material,
}

impl WallLayer {
    #[must_use]
    pub fn new(thickness: Length, material: Material) -> Self {
        Self {
            thickness,
            material,
        }
    }
}

/// A phase change material layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcmLayer {
    /// Layer thickness. Zero means the wall carries no PCM.
    pub thickness: Length,
    pub material: Material,
    pub latent: LatentHeat,
    pub placement: PcmPlacement,
    pub arrangement: LayerArrangement,
}

impl PcmLayer {
    #[must_use]
    pub fn new(thickness: Length, material: Material, latent: LatentHeat) -> Self {
        Self {
            thickness,
            material,
            latent,
            placement: PcmPlacement::default(),
            arrangement: LayerArrangement::default(),
        }
    }

    /// A paraffin layer melting at 25 °C over ±2 K with 200 kJ/kg latent heat.
    #[must_use]
    pub fn paraffin(thickness: Length) -> Self {
        Self::new(thickness, Material::paraffin(), LatentHeat::paraffin())
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PcmPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_arrangement(mut self, arrangement: LayerArrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Validates the layer against the wall it belongs to.
    pub(super) fn validate(&self, wall_thickness: Length) -> Result<SiPcmLayer, ConfigError> {
        let thickness = non_negative(Parameter::PcmThickness, self.thickness.get::<meter>())?;
        if self.thickness > wall_thickness {
            return Err(ConfigError::PcmThickerThanWall {
                pcm: self.thickness,
                wall: wall_thickness,
            });
        }
        if self.arrangement == LayerArrangement::Cladding
            && self.placement == PcmPlacement::Centered
        {
            return Err(ConfigError::CenteredCladding);
        }

        Ok(SiPcmLayer {
            thickness,
            material: self.material.validate(LayerRole::Pcm)?,
            band: self.latent.validate()?,
            placement: self.placement,
            arrangement: self.arrangement,
        })
    }
}

/// A validated PCM layer in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SiPcmLayer {
    pub(super) thickness: f64,
    pub(super) material: SiMaterial,
    pub(super) band: PhaseBand,
    pub(super) placement: PcmPlacement,
    pub(super) arrangement: LayerArrangement,
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::length::millimeter;

    use crate::support::constraint::ConstraintError;

    fn wall() -> Length {
        Length::new::<millimeter>(200.0)
    }

    #[test]
    fn rejects_non_positive_pcm_density() {
        let mut layer = PcmLayer::paraffin(Length::new::<millimeter>(20.0));
        layer.material.density = MassDensity::new::<kilogram_per_cubic_meter>(0.0);

        assert_eq!(
            layer.validate(wall()),
            Err(ConfigError::Invalid {
                parameter: Parameter::PcmDensity,
                source: ConstraintError::Zero,
            })
        );
    }

    #[test]
    fn rejects_negative_wall_conductivity() {
        let mut material = Material::masonry();
        material.conductivity = ThermalConductivity::new::<watt_per_meter_kelvin>(-0.6);

        let err = material.validate(LayerRole::Wall).unwrap_err();
        assert_eq!(err.to_string(), "invalid wall_k: value must not be negative");
    }

    #[test]
    fn rejects_pcm_thicker_than_wall() {
        let layer = PcmLayer::paraffin(Length::new::<millimeter>(250.0));
        assert!(matches!(
            layer.validate(wall()),
            Err(ConfigError::PcmThickerThanWall { .. })
        ));
    }

    #[test]
    fn rejects_infinite_pcm_thickness() {
        let layer = PcmLayer::paraffin(Length::new::<meter>(f64::INFINITY));
        assert_eq!(
            layer.validate(Length::new::<meter>(f64::INFINITY)),
            Err(ConfigError::Invalid {
                parameter: Parameter::PcmThickness,
                source: ConstraintError::Infinite,
            })
        );
    }

    #[test]
    fn rejects_centered_cladding() {
        let layer = PcmLayer::paraffin(Length::new::<millimeter>(20.0))
            .with_arrangement(LayerArrangement::Cladding)
            .with_placement(PcmPlacement::Centered);
        assert_eq!(layer.validate(wall()), Err(ConfigError::CenteredCladding));
    }

    #[test]
    fn zero_thickness_is_valid() {
        let layer = PcmLayer::paraffin(Length::new::<millimeter>(0.0));
        let si = layer.validate(wall()).expect("zero-thickness PCM is allowed");
        assert_eq!(si.thickness, 0.0);
    }
}
