use crate::{SimulationState, Time};
use serde::{Serialize, Deserialize};

/// Recorded states of one braking run, in step order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub states: Vec<SimulationState>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, state: SimulationState) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of integration steps taken (the initial state is not a step).
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn initial_state(&self) -> Option<&SimulationState> {
        self.states.first()
    }

    pub fn final_state(&self) -> Option<&SimulationState> {
        self.states.last()
    }

    pub fn stopping_distance(&self) -> f64 {
        self.final_state().map_or(0.0, |s| s.distance)
    }

    pub fn stopping_time(&self) -> Time {
        self.final_state().map_or(0.0, |s| s.time)
    }

    /// Every `stride`-th state plus the final one.
    pub fn thinned(&self, stride: usize) -> Vec<SimulationState> {
        let stride = stride.max(1);
        let mut out: Vec<SimulationState> = self.states.iter().step_by(stride).copied().collect();
        if let Some(last) = self.final_state() {
            if out.last() != Some(last) {
                out.push(*last);
            }
        }
        out
    }
}
