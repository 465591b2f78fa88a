//! Grid layout and per-node material properties.
//!
//! The wall is discretized into `N = ceil(thickness / dx) + 1` nodes with
//! uniform spacing `dx`. Node 0 sits on the outdoor face and node `N − 1` on
//! the indoor face. Properties are piecewise constant: every node carries
//! either the wall material or the PCM material, and the PCM region always
//! covers a whole number of nodes.

use std::ops::Range;

use log::debug;
use uom::si::{f64::Length, length::meter};

use crate::support::constraint::{Constrained, NonNegative};

use super::{
    ConfigError, Parameter, WallConfig,
    config::strictly_positive,
    latent::PhaseBand,
    material::{LayerArrangement, LayerRole, PcmPlacement, SiMaterial, SiPcmLayer},
};

/// Relative slack when dividing thickness by spacing, so that a thickness
/// that is a whole multiple of `dx` up to rounding does not gain a node.
const GRID_TOLERANCE: f64 = 1e-9;

/// Uniformly spaced nodes across the wall thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    dx: f64,
    len: usize,
}

impl Grid {
    fn spanning(thickness: f64, dx: f64) -> Result<Self, ConfigError> {
        let cells = (thickness / dx * (1.0 - GRID_TOLERANCE)).ceil().max(1.0);
        if !cells.is_finite() || cells >= usize::MAX as f64 {
            return Err(ConfigError::GridTooLarge { cells });
        }
        Ok(Self {
            dx,
            len: cells as usize + 1,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// A grid always has both face nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node spacing.
    #[must_use]
    pub fn dx(&self) -> Length {
        Length::new::<meter>(self.dx)
    }

    pub(crate) fn spacing(&self) -> f64 {
        self.dx
    }

    /// Node positions in metres, measured from the outdoor face.
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        (0..self.len).map(|i| i as f64 * self.dx).collect()
    }
}

/// Material properties at one node, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeProperties {
    /// W/m·K.
    pub conductivity: f64,
    /// kg/m³.
    pub density: f64,
    /// Nominal specific heat, J/kg·K.
    pub specific_heat: f64,
    /// Whether the node belongs to the PCM region.
    pub is_pcm: bool,
}

impl NodeProperties {
    fn new(material: SiMaterial, is_pcm: bool) -> Self {
        Self {
            conductivity: material.conductivity,
            density: material.density,
            specific_heat: material.specific_heat,
            is_pcm,
        }
    }

    /// Nominal thermal diffusivity `k / (ρ·cp)` in m²/s.
    #[must_use]
    pub fn diffusivity(&self) -> f64 {
        self.diffusivity_at(self.specific_heat)
    }

    /// Diffusivity for an effective specific heat `cp` in J/kg·K.
    #[inline]
    #[must_use]
    pub fn diffusivity_at(&self, cp: f64) -> f64 {
        self.conductivity / (self.density * cp)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PcmRegion {
    nodes: Range<usize>,
    band: PhaseBand,
}

/// The grid together with the properties of each of its nodes.
///
/// Built once from a validated [`WallConfig`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProfile {
    grid: Grid,
    nodes: Vec<NodeProperties>,
    pcm: Option<PcmRegion>,
}

impl MaterialProfile {
    /// Builds the grid and assigns a property set to every node.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the spacing or any thickness or material
    /// property is invalid, or if the PCM layer is thicker than the wall.
    pub fn build(config: &WallConfig) -> Result<Self, ConfigError> {
        let wall_thickness =
            strictly_positive(Parameter::WallThickness, config.wall.thickness.get::<meter>())?;
        let wall = config.wall.material.validate(LayerRole::Wall)?;
        let (dx, _) = config.discretization.validate()?;
        let pcm = config
            .pcm
            .as_ref()
            .map(|layer| layer.validate(config.wall.thickness))
            .transpose()?;

        let total = match &pcm {
            Some(layer) if layer.arrangement == LayerArrangement::Cladding => {
                let total: Constrained<f64, NonNegative> = [wall_thickness, layer.thickness]
                    .into_iter()
                    .map(NonNegative::new)
                    .sum::<Result<_, _>>()
                    .map_err(ConfigError::invalid(Parameter::PcmThickness))?;
                total.into_inner()
            }
            _ => wall_thickness,
        };

        let grid = Grid::spanning(total, dx)?;
        let mut nodes = vec![NodeProperties::new(wall, false); grid.len()];

        let pcm = pcm.and_then(|layer| {
            let range = layer.node_range(&grid);
            if range.is_empty() {
                return None;
            }
            for node in &mut nodes[range.clone()] {
                *node = NodeProperties::new(layer.material, true);
            }
            Some(PcmRegion {
                nodes: range,
                band: layer.band,
            })
        });

        debug!(
            "wall grid: {} nodes over {total} m (dx = {dx} m), PCM nodes {:?}",
            grid.len(),
            pcm.as_ref().map(|region| region.nodes.clone()),
        );

        Ok(Self { grid, nodes, pcm })
    }

    /// Node layout across the wall.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Properties of every node, outdoor face first.
    #[must_use]
    pub fn nodes(&self) -> &[NodeProperties] {
        &self.nodes
    }

    /// Indices of the PCM nodes; empty when the wall carries no PCM.
    #[must_use]
    pub fn pcm_nodes(&self) -> Range<usize> {
        self.pcm
            .as_ref()
            .map_or(0..0, |region| region.nodes.clone())
    }

    pub(crate) fn phase_band(&self) -> Option<&PhaseBand> {
        self.pcm.as_ref().map(|region| &region.band)
    }

    /// Effective specific heat of `node` at temperature `t` (°C), in J/kg·K.
    ///
    /// Non-PCM nodes always return their nominal value.
    #[inline]
    #[must_use]
    pub fn effective_specific_heat(&self, node: usize, t: f64) -> f64 {
        let props = &self.nodes[node];
        match &self.pcm {
            Some(region) if props.is_pcm => region.band.effective_capacity(props.specific_heat, t),
            _ => props.specific_heat,
        }
    }

    /// The node with the largest nominal diffusivity and that diffusivity.
    pub(crate) fn max_diffusivity(&self) -> (usize, f64) {
        self.nodes
            .iter()
            .map(NodeProperties::diffusivity)
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, alpha)| {
                if alpha > best.1 { (i, alpha) } else { best }
            })
    }
}

impl SiPcmLayer {
    /// Snaps the layer to whole nodes on the chosen face or centered.
    fn node_range(&self, grid: &Grid) -> Range<usize> {
        let count = ((self.thickness / grid.spacing()).round() as usize).min(grid.len());
        let start = match self.placement {
            PcmPlacement::OutdoorFace => 0,
            PcmPlacement::Centered => (grid.len() - count) / 2,
            PcmPlacement::IndoorFace => grid.len() - count,
        };
        start..start + count
    }
}
