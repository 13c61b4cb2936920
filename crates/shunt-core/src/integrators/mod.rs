pub mod euler;

use crate::{ScenarioError, SimulationState, F};
use serde::{Serialize, Deserialize};

pub use euler::{SemiImplicitEuler, ExplicitEuler};

/// Fixed time step and safety bound for one braking run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// s
    pub dt: F,
    /// Runs still moving after this many steps are aborted.
    pub max_steps: usize,
}

impl StepConfig {
    pub const DEFAULT_DT: F = 0.05;
    pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

    pub fn new(dt: F, max_steps: usize) -> Self {
        Self { dt, max_steps }
    }

    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// `dt` must be finite and positive.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.dt.is_finite() && self.dt > 0.0 {
            Ok(())
        } else {
            Err(ScenarioError::InvalidTimeStep { dt: self.dt })
        }
    }
}

impl Default for StepConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DT, Self::DEFAULT_MAX_STEPS)
    }
}

pub trait Integrator: Send + Sync {
    /// Advance `state` by `dt` under the deceleration (m/s²) returned by
    /// `deceleration` for the current state.
    fn step(
        &self,
        state: &SimulationState,
        dt: F,
        deceleration: &impl Fn(&SimulationState) -> F,
    ) -> SimulationState;
}
