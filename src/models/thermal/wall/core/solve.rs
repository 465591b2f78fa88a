//! Explicit finite-difference time stepping.
//!
//! Interior nodes follow the forward-time, centered-space update
//!
//! ```text
//! T_i' = T_i + dt · α_i(T_i) · (T_{i+1} − 2·T_i + T_{i−1}) / dx²
//! α_i(T) = k_i / (ρ_i · cp_eff_i(T))
//! ```
//!
//! with properties taken at the node itself. The face nodes are reset to the
//! boundary temperatures after every step.

mod error;
mod stability;

pub use error::SimulationError;

use std::{num::NonZeroUsize, ops::ControlFlow};

use log::{info, trace, warn};
use uom::si::{f64::Time, time::second};

use super::{BoundaryProvider, MaterialProfile, Recorder, SimulationTrace, WallConfig};

/// How a call to [`TransientSolver::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All configured steps were taken.
    Completed { steps: usize },
    /// The recorder asked to stop after `step`.
    Stopped { step: usize },
}

/// Owns the temperature field and advances it one step at a time.
///
/// Construction validates the whole configuration and performs the stability
/// check, so a solver that exists can always be stepped.
#[derive(Debug, Clone)]
pub struct TransientSolver {
    profile: MaterialProfile,
    boundary: BoundaryProvider,
    dt: f64,
    steps: usize,
    stride: NonZeroUsize,
    step: usize,
    field: Vec<f64>,
    scratch: Vec<f64>,
}

impl TransientSolver {
    /// Builds the grid and the initial field for `config`.
    ///
    /// The face nodes of the initial field hold the boundary temperatures at
    /// `t = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid configuration and
    /// [`SimulationError::Unstable`] if `dt` exceeds the stability bound.
    pub fn new(config: &WallConfig) -> Result<Self, SimulationError> {
        let profile = MaterialProfile::build(config)?;
        let boundary = config.boundary.validate()?;
        let (_, dt) = config.discretization.validate()?;
        let steps = config.steps()?;

        stability::check(&profile, dt)?;

        let mut field = config.initial.field(profile.grid().len(), boundary.indoor())?;
        apply_boundaries(&mut field, &boundary, 0.0);
        let scratch = field.clone();

        Ok(Self {
            profile,
            boundary,
            dt,
            steps,
            stride: config.recording.stride(dt),
            step: 0,
            field,
            scratch,
        })
    }

    /// Creates an empty trace matching this solver's grid and cadence.
    #[must_use]
    pub fn trace(&self) -> SimulationTrace {
        SimulationTrace::new(self.profile.grid().positions(), self.stride)
    }

    /// Advances the field by one time step.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] if any new temperature is not
    /// finite. The field is left at the last valid step.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let next = self.step + 1;
        let time = next as f64 * self.dt;
        let dx = self.profile.grid().spacing();
        let factor = self.dt / (dx * dx);

        let nodes = self.profile.nodes();
        let interior = &mut self.scratch[1..self.field.len() - 1];
        for (offset, (new, window)) in interior.iter_mut().zip(self.field.windows(3)).enumerate() {
            let i = offset + 1;
            let t = window[1];
            let alpha = nodes[i].diffusivity_at(self.profile.effective_specific_heat(i, t));
            *new = t + factor * alpha * (window[2] - 2.0 * t + window[0]);
        }
        apply_boundaries(&mut self.scratch, &self.boundary, time);

        if let Some(node) = self.scratch.iter().position(|t| !t.is_finite()) {
            warn!("temperature at node {node} diverged at step {next}");
            return Err(SimulationError::Diverged {
                step: next,
                node,
                last_valid_step: self.step,
            });
        }

        std::mem::swap(&mut self.field, &mut self.scratch);
        self.step = next;
        Ok(())
    }

    /// Steps to the end of the run, handing snapshots to `recorder`.
    ///
    /// A fresh solver first records the initial field. After that every step
    /// that is a multiple of the recording stride is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] if the field stops being finite.
    /// Snapshots recorded before that point stay with the recorder.
    pub fn run(&mut self, recorder: &mut impl Recorder) -> Result<RunOutcome, SimulationError> {
        info!(
            "simulating {} steps of {} s on {} nodes",
            self.steps,
            self.dt,
            self.field.len()
        );

        if self.step == 0 && self.record(recorder).is_break() {
            warn!("recorder stopped the run before the first step");
            return Ok(RunOutcome::Stopped { step: 0 });
        }

        while self.step < self.steps {
            self.step()?;
            if self.step % self.stride == 0 && self.record(recorder).is_break() {
                warn!("recorder stopped the run at step {}", self.step);
                return Ok(RunOutcome::Stopped { step: self.step });
            }
        }

        info!("simulation completed after {} steps", self.step);
        Ok(RunOutcome::Completed { steps: self.step })
    }

    fn record(&self, recorder: &mut impl Recorder) -> ControlFlow<()> {
        trace!("recording step {}", self.step);
        recorder.record(self.step, self.time(), &self.field)
    }

    /// Current temperatures in °C, outdoor face first.
    #[must_use]
    pub fn field(&self) -> &[f64] {
        &self.field
    }

    /// Number of steps taken so far.
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// Total number of steps in the configured run.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.steps
    }

    /// Elapsed simulated time.
    #[must_use]
    pub fn time(&self) -> Time {
        Time::new::<second>(self.step as f64 * self.dt)
    }

    /// Grid and node properties the solver steps on.
    #[must_use]
    pub fn profile(&self) -> &MaterialProfile {
        &self.profile
    }
}

fn apply_boundaries(field: &mut [f64], boundary: &BoundaryProvider, time: f64) {
    if let [outdoor, .., indoor] = field {
        *outdoor = boundary.outdoor(time);
        *indoor = boundary.indoor();
    }
}
