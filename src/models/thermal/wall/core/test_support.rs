use uom::si::{f64::Length, length::meter};

use super::{Material, PcmLayer, WallConfig};

/// 0.2 m of masonry with default boundaries, resolution and duration.
pub(super) fn reference_wall() -> WallConfig {
    WallConfig::new(Length::new::<meter>(0.2), Material::masonry())
}

/// The reference wall with 0.02 m of paraffin on its outdoor face.
pub(super) fn reference_config() -> WallConfig {
    reference_wall().with_pcm(PcmLayer::paraffin(Length::new::<meter>(0.02)))
}
