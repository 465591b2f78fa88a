//! Compares a masonry wall with and without a paraffin layer over two days.
//!
//! Run with `RUST_LOG=debug` to see the grid layout and stability margin.

use pcm_wall::models::thermal::wall::{
    BufferingComparison, Material, PcmLayer, PcmWall, Recording, SimulationError, WallConfig,
};
use twine_core::Model;
use uom::si::{
    energy::kilojoule,
    f64::{Length, Time},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    ratio::{percent, ratio},
    time::hour,
};

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = WallConfig::new(Length::new::<meter>(0.2), Material::masonry())
        .with_pcm(PcmLayer::paraffin(Length::new::<meter>(0.02)))
        .with_duration(Time::new::<hour>(48.0))
        .with_recording(Recording::Hourly);

    let trace = PcmWall.call(&config)?;
    let comparison = BufferingComparison::run(&config)?;

    println!("hour  outdoor  q_pcm [W/m²]  q_bare [W/m²]  liquid");
    let rows = trace
        .hours()
        .zip(trace.snapshots())
        .zip(&comparison.with_pcm.indoor_heat_flux)
        .zip(&comparison.without_pcm.indoor_heat_flux)
        .zip(&comparison.with_pcm.liquid_fraction);
    for ((((hours, snapshot), q_pcm), q_bare), liquid) in rows {
        println!(
            "{hours:4.0}  {:7.2}  {:12.2}  {:13.2}  {:6.2}",
            snapshot.outdoor_face(),
            q_pcm.get::<watt_per_square_meter>(),
            q_bare.get::<watt_per_square_meter>(),
            liquid.as_ref().get::<ratio>(),
        );
    }

    println!();
    println!(
        "peak indoor flux: {:.2} W/m² with PCM, {:.2} W/m² without",
        comparison.with_pcm.peak_indoor_heat_flux.get::<watt_per_square_meter>(),
        comparison.without_pcm.peak_indoor_heat_flux.get::<watt_per_square_meter>(),
    );
    println!(
        "indoor heat exchange: {:.1} kJ/m² with PCM, {:.1} kJ/m² without",
        comparison.with_pcm.indoor_heat_exchange.get::<kilojoule>(),
        comparison.without_pcm.indoor_heat_exchange.get::<kilojoule>(),
    );
    if let Some(reduction) = comparison.peak_flux_reduction() {
        println!("peak flux reduction: {:.1}%", reduction.get::<percent>());
    }
    if let Some(reduction) = comparison.heat_exchange_reduction() {
        println!("heat exchange reduction: {:.1}%", reduction.get::<percent>());
    }

    Ok(())
}
