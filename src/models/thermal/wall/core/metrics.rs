//! Indoor heat flux, PCM melt state and the PCM buffering comparison.

use uom::{
    ConstZero,
    si::{
        energy::joule,
        f64::{Energy, HeatFluxDensity, Ratio},
        heat_flux_density::watt_per_square_meter,
        ratio::ratio,
        time::second,
    },
};

use crate::support::constraint::{Constrained, UnitInterval};

use super::{MaterialProfile, SimulationError, SimulationTrace, TransientSolver, WallConfig};

/// Heat flux into the room through the indoor face.
///
/// Evaluated as `k_{N−2} · (T_{N−2} − T_{N−1}) / dx`, positive when heat
/// flows into the room. A field with fewer than two nodes carries no flux.
///
/// # Panics
///
/// Panics if `temperatures` has more nodes than `profile`.
#[must_use]
pub fn indoor_heat_flux(profile: &MaterialProfile, temperatures: &[f64]) -> HeatFluxDensity {
    let n = temperatures.len();
    if n < 2 {
        return HeatFluxDensity::ZERO;
    }
    let k = profile.nodes()[n - 2].conductivity;
    let dx = profile.grid().spacing();
    HeatFluxDensity::new::<watt_per_square_meter>(
        k * (temperatures[n - 2] - temperatures[n - 1]) / dx,
    )
}

/// Mean liquid fraction over the PCM nodes.
///
/// Returns `None` when the wall has no PCM nodes.
///
/// # Panics
///
/// Panics if `temperatures` is shorter than the grid of `profile`.
#[must_use]
pub fn liquid_fraction(
    profile: &MaterialProfile,
    temperatures: &[f64],
) -> Option<Constrained<Ratio, UnitInterval>> {
    let band = profile.phase_band()?;
    let nodes = profile.pcm_nodes();
    let count = nodes.len() as f64;
    let mean = temperatures[nodes]
        .iter()
        .map(|&t| band.liquid_fraction(t))
        .sum::<f64>()
        / count;
    UnitInterval::new(Ratio::new::<ratio>(mean)).ok()
}

/// Per-snapshot and aggregate indoor-side results of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceMetrics {
    /// Indoor heat flux at each snapshot.
    pub indoor_heat_flux: Vec<HeatFluxDensity>,
    /// PCM liquid fraction at each snapshot; empty without PCM.
    pub liquid_fraction: Vec<Constrained<Ratio, UnitInterval>>,
    /// Largest indoor flux magnitude over the run.
    pub peak_indoor_heat_flux: HeatFluxDensity,
    /// Heat exchanged through each square metre of the indoor face,
    /// integrated as `∫|q| dt` over the snapshots (trapezoidal rule).
    pub indoor_heat_exchange: Energy,
}

impl TraceMetrics {
    /// Evaluates the metrics for a trace produced on `profile`.
    #[must_use]
    pub fn new(profile: &MaterialProfile, trace: &SimulationTrace) -> Self {
        let snapshots = trace.snapshots();

        let indoor_heat_flux: Vec<_> = snapshots
            .iter()
            .map(|snapshot| indoor_heat_flux(profile, &snapshot.temperatures))
            .collect();

        let liquid_fraction = snapshots
            .iter()
            .filter_map(|snapshot| liquid_fraction(profile, &snapshot.temperatures))
            .collect();

        let peak_indoor_heat_flux = indoor_heat_flux
            .iter()
            .map(|q| q.abs())
            .fold(HeatFluxDensity::ZERO, |peak, q| peak.max(q));

        let exchange: f64 = snapshots
            .windows(2)
            .zip(indoor_heat_flux.windows(2))
            .map(|(pair, q)| {
                let dt = (pair[1].time - pair[0].time).get::<second>();
                let q0 = q[0].get::<watt_per_square_meter>().abs();
                let q1 = q[1].get::<watt_per_square_meter>().abs();
                0.5 * (q0 + q1) * dt
            })
            .sum();

        Self {
            indoor_heat_flux,
            liquid_fraction,
            peak_indoor_heat_flux,
            indoor_heat_exchange: Energy::new::<joule>(exchange),
        }
    }

    /// Runs `config` to completion and evaluates its metrics.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the run cannot start or diverges.
    pub fn simulate(config: &WallConfig) -> Result<Self, SimulationError> {
        let mut solver = TransientSolver::new(config)?;
        let mut trace = solver.trace();
        solver.run(&mut trace)?;
        Ok(Self::new(solver.profile(), &trace))
    }
}

/// The configured wall against the same wall without its PCM layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferingComparison {
    pub with_pcm: TraceMetrics,
    pub without_pcm: TraceMetrics,
}

impl BufferingComparison {
    /// Simulates both walls with identical boundaries, resolution and
    /// recording.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimulationError`] raised by either run.
    pub fn run(config: &WallConfig) -> Result<Self, SimulationError> {
        Ok(Self {
            with_pcm: TraceMetrics::simulate(config)?,
            without_pcm: TraceMetrics::simulate(&config.without_pcm())?,
        })
    }

    /// Relative reduction of the peak indoor flux, `1 − peak_pcm / peak_bare`.
    ///
    /// Returns `None` if the bare wall has no indoor flux.
    #[must_use]
    pub fn peak_flux_reduction(&self) -> Option<Ratio> {
        reduction(
            self.with_pcm.peak_indoor_heat_flux.get::<watt_per_square_meter>(),
            self.without_pcm.peak_indoor_heat_flux.get::<watt_per_square_meter>(),
        )
    }

    /// Relative reduction of the integrated indoor heat exchange.
    ///
    /// Returns `None` if the bare wall exchanges no heat.
    #[must_use]
    pub fn heat_exchange_reduction(&self) -> Option<Ratio> {
        reduction(
            self.with_pcm.indoor_heat_exchange.get::<joule>(),
            self.without_pcm.indoor_heat_exchange.get::<joule>(),
        )
    }
}

fn reduction(with_pcm: f64, without_pcm: f64) -> Option<Ratio> {
    (without_pcm > 0.0).then(|| Ratio::new::<ratio>(1.0 - with_pcm / without_pcm))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::Time,
        time::hour,
    };

    use crate::{
        models::thermal::wall::core::{
            BoundaryConditions, InitialCondition, OutdoorTemperature, Recording,
            test_support::{reference_config, reference_wall},
        },
        support::units::Celsius,
    };

    #[test]
    fn flux_uses_last_interior_node() {
        let profile = MaterialProfile::build(&reference_wall()).unwrap();
        let mut field = vec![22.0; profile.grid().len()];
        let n = field.len();
        field[n - 2] = 23.0;

        // 0.6 · 1 / 0.002
        let q = indoor_heat_flux(&profile, &field);
        assert_relative_eq!(q.get::<watt_per_square_meter>(), 300.0, max_relative = 1e-12);
    }

    #[test]
    fn liquid_fraction_spans_band() {
        let profile = MaterialProfile::build(&reference_config()).unwrap();
        let n = profile.grid().len();

        let solid = liquid_fraction(&profile, &vec![20.0; n]).unwrap();
        assert_relative_eq!(solid.into_inner().get::<ratio>(), 0.0);

        let half = liquid_fraction(&profile, &vec![25.0; n]).unwrap();
        assert_relative_eq!(half.into_inner().get::<ratio>(), 0.5, epsilon = 1e-9);

        let liquid = liquid_fraction(&profile, &vec![30.0; n]).unwrap();
        assert_relative_eq!(liquid.into_inner().get::<ratio>(), 1.0);

        let bare = MaterialProfile::build(&reference_wall()).unwrap();
        assert!(liquid_fraction(&bare, &vec![25.0; n]).is_none());
    }

    #[test]
    fn steady_wall_exchanges_constant_flux() {
        // 0.2 m of masonry between 0 °C and 20 °C, started on the steady profile.
        let config = reference_wall()
            .with_boundary(BoundaryConditions::new(
                Celsius::new(20.0),
                OutdoorTemperature::Constant(Celsius::new(0.0)),
            ))
            .with_initial(InitialCondition::Profile(
                (0..=100)
                    .map(|i| Celsius::new(0.2 * f64::from(i)))
                    .collect(),
            ))
            .with_duration(Time::new::<hour>(2.0))
            .with_recording(Recording::Hourly);

        let metrics = TraceMetrics::simulate(&config).unwrap();
        assert_eq!(metrics.indoor_heat_flux.len(), 3);
        assert!(metrics.liquid_fraction.is_empty());

        // q = k·ΔT/L = 0.6 · 20 / 0.2, flowing out of the room.
        for q in &metrics.indoor_heat_flux {
            assert_relative_eq!(q.get::<watt_per_square_meter>(), -60.0, epsilon = 1e-6);
        }
        assert_relative_eq!(
            metrics.peak_indoor_heat_flux.get::<watt_per_square_meter>(),
            60.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            metrics.indoor_heat_exchange.get::<joule>(),
            60.0 * 7_200.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn comparison_runs_both_walls() {
        let config = reference_config()
            .with_duration(Time::new::<hour>(6.0))
            .with_recording(Recording::Hourly);

        let comparison = BufferingComparison::run(&config).unwrap();
        assert_eq!(comparison.with_pcm.indoor_heat_flux.len(), 7);
        assert_eq!(comparison.without_pcm.indoor_heat_flux.len(), 7);
        assert_eq!(comparison.with_pcm.liquid_fraction.len(), 7);
        assert!(comparison.without_pcm.liquid_fraction.is_empty());
        assert!(comparison.peak_flux_reduction().is_some());
    }

    #[test]
    fn reduction_needs_a_baseline() {
        assert!(reduction(1.0, 0.0).is_none());
        assert_relative_eq!(reduction(25.0, 100.0).unwrap().get::<ratio>(), 0.75);
    }
}
