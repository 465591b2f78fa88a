//! Recording of temperature snapshots.

use std::{num::NonZeroUsize, ops::ControlFlow};

use uom::si::{f64::Time, time::second};

/// Receives temperature fields from a running solver.
///
/// Returning [`ControlFlow::Break`] stops the run after the current step.
pub trait Recorder {
    /// Called with the field after `step` steps, at elapsed time `time`.
    ///
    /// Temperatures are in °C, outdoor face first.
    fn record(&mut self, step: usize, time: Time, temperatures: &[f64]) -> ControlFlow<()>;
}

/// The temperature field at one recorded step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub time: Time,
    /// Node temperatures in °C, outdoor face first.
    pub temperatures: Vec<f64>,
}

impl Snapshot {
    /// Temperature of the outdoor face node.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot holds no temperatures.
    #[must_use]
    pub fn outdoor_face(&self) -> f64 {
        self.temperatures[0]
    }

    /// Temperature of the indoor face node.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot holds no temperatures.
    #[must_use]
    pub fn indoor_face(&self) -> f64 {
        self.temperatures[self.temperatures.len() - 1]
    }
}

/// Ordered snapshots of one run, together with the node positions.
///
/// Snapshots are only ever appended, in increasing step order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTrace {
    positions: Vec<f64>,
    stride: NonZeroUsize,
    snapshots: Vec<Snapshot>,
}

impl SimulationTrace {
    /// Creates an empty trace for nodes at `positions` (metres).
    #[must_use]
    pub fn new(positions: Vec<f64>, stride: NonZeroUsize) -> Self {
        Self {
            positions,
            stride,
            snapshots: Vec::new(),
        }
    }

    /// Node positions in metres from the outdoor face.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Number of steps between consecutive snapshots.
    #[must_use]
    pub fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The most recent snapshot, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Snapshot times in hours, for plotting collaborators.
    pub fn hours(&self) -> impl Iterator<Item = f64> + '_ {
        self.snapshots
            .iter()
            .map(|snapshot| snapshot.time.get::<second>() / 3_600.0)
    }
}

impl Recorder for SimulationTrace {
    fn record(&mut self, step: usize, time: Time, temperatures: &[f64]) -> ControlFlow<()> {
        self.snapshots.push(Snapshot {
            step,
            time,
            temperatures: temperatures.to_vec(),
        });
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn appends_in_order() {
        let mut trace = SimulationTrace::new(vec![0.0, 0.1, 0.2], NonZeroUsize::MIN);
        assert!(trace.is_empty());

        let _ = trace.record(0, Time::new::<second>(0.0), &[18.0, 22.0, 22.0]);
        let _ = trace.record(1, Time::new::<second>(3_600.0), &[19.0, 21.0, 22.0]);

        assert_eq!(trace.len(), 2);
        let last = trace.last().unwrap();
        assert_eq!(last.step, 1);
        assert_relative_eq!(last.outdoor_face(), 19.0);
        assert_relative_eq!(last.indoor_face(), 22.0);

        let hours: Vec<_> = trace.hours().collect();
        assert_relative_eq!(hours[1], 1.0);
    }
}
