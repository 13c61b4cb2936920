use super::Integrator;
use crate::{SimulationState, F};

/// Euler step that advances distance with the already updated speed.
///
/// This is the discretization the braking-distance results are calibrated on.
#[derive(Clone, Copy, Debug, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(
        &self,
        state: &SimulationState,
        dt: F,
        deceleration: &impl Fn(&SimulationState) -> F,
    ) -> SimulationState {
        let speed = state.speed - deceleration(state) * dt;
        SimulationState {
            time: state.time + dt,
            speed,
            distance: state.distance + speed * dt,
        }
    }
}

/// Forward Euler: distance advances with the speed at the start of the step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(
        &self,
        state: &SimulationState,
        dt: F,
        deceleration: &impl Fn(&SimulationState) -> F,
    ) -> SimulationState {
        SimulationState {
            time: state.time + dt,
            speed: state.speed - deceleration(state) * dt,
            distance: state.distance + state.speed * dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_semi_implicit_uses_new_speed() {
        let state = SimulationState::initial(10.0);
        let next = SemiImplicitEuler.step(&state, 0.5, &|_: &SimulationState| 2.0);
        assert_relative_eq!(next.speed, 9.0);
        assert_relative_eq!(next.distance, 4.5);
        assert_relative_eq!(next.time, 0.5);
    }

    #[test]
    fn test_explicit_uses_old_speed() {
        let state = SimulationState::initial(10.0);
        let next = ExplicitEuler.step(&state, 0.5, &|_: &SimulationState| 2.0);
        assert_relative_eq!(next.speed, 9.0);
        assert_relative_eq!(next.distance, 5.0);
    }

    #[test]
    fn test_constant_deceleration_converges_to_exact_stop() {
        // v0² / 2a = 25 m
        let dt = 1e-4;
        for integrator_distance in [
            run(&SemiImplicitEuler, dt),
            run(&ExplicitEuler, dt),
        ] {
            assert_relative_eq!(integrator_distance, 25.0, max_relative = 1e-3);
        }
    }

    fn run(integrator: &impl Integrator, dt: F) -> F {
        let mut state = SimulationState::initial(10.0);
        while state.is_moving() {
            state = integrator.step(&state, dt, &|_: &SimulationState| 2.0);
        }
        state.distance
    }
}
