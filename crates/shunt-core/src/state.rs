use serde::{Serialize, Deserialize};

pub type Time = f64;

/// Kinematic state of the train during one braking run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub time: Time,
    pub speed: f64,
    pub distance: f64,
}

impl SimulationState {
    pub fn at_rest() -> Self {
        Self { time: 0.0, speed: 0.0, distance: 0.0 }
    }

    /// Brake application instant: t = 0, s = 0.
    pub fn initial(speed: f64) -> Self {
        Self { time: 0.0, speed, distance: 0.0 }
    }

    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::at_rest()
    }
}

impl From<f64> for SimulationState {
    fn from(speed: f64) -> Self {
        SimulationState::initial(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SimulationState::initial(25.0 / 3.6);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.distance, 0.0);
        assert!(state.is_moving());
    }

    #[test]
    fn test_zero_and_negative_speed_not_moving() {
        assert!(!SimulationState::initial(0.0).is_moving());
        assert!(!SimulationState::initial(-1.0).is_moving());
        assert!(!SimulationState::default().is_moving());
    }
}
