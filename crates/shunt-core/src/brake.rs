//! Pneumatic brake helpers: cylinder force, fill ramps and propagation delay.

use crate::scenario::{BrakeMode, Scenario};
use crate::{Time, F};
use std::f64::consts::PI;

/// Speed of the pressure drop along the brake pipe in m/s.
pub const BRAKE_PROPAGATION_VELOCITY: F = 250.0;

/// Return spring force subtracted from the piston force in N.
pub const CYLINDER_RETURN_FORCE: F = 1500.0;

/// Share of cylinder pressure available immediately in mode G.
const G_MODE_INITIAL_FILL: F = 0.1;

/// Fraction of full cylinder force available `t` seconds after application.
pub fn fill_fraction(mode: BrakeMode, t: Time, fill_time: F) -> F {
    if t >= fill_time {
        return 1.0;
    }
    match mode {
        BrakeMode::G => G_MODE_INITIAL_FILL + (1.0 - G_MODE_INITIAL_FILL) * (t / fill_time),
        BrakeMode::P => t / fill_time,
    }
}

/// Piston force of a brake cylinder in N, net of the return spring.
pub fn cylinder_force(pressure: F, diameter: F) -> F {
    pressure * PI * diameter * diameter / 4.0 - CYLINDER_RETURN_FORCE
}

/// Delay until the brake signal reaches a vehicle `distance_from_front` metres back.
pub fn propagation_delay(distance_from_front: F) -> Time {
    distance_from_front / BRAKE_PROPAGATION_VELOCITY
}

/// Fill time of each wagon including the signal delay from the train head.
///
/// Wagon k waits for the locomotive and wagons `0..k` to be passed.
pub fn effective_fill_times(scenario: &Scenario) -> Vec<Time> {
    let mut ahead = scenario.locomotive.length;
    scenario
        .wagons
        .iter()
        .map(|wagon| {
            let fill_time = wagon.fill_time + propagation_delay(ahead);
            ahead += wagon.length;
            fill_time
        })
        .collect()
}

/// Guaranteed deceleration in m/s² for a braked-weight percentage.
///
/// λ = ⌊100 · braked weight / mass⌋ and a = 0.0075 λ + 0.076, rounded to
/// two decimals.
pub fn braked_weight_deceleration(mass: F, braked_weight: F) -> F {
    let lambda = (100.0 * braked_weight / mass).floor();
    let deceleration = 0.0075 * lambda + 0.076;
    (deceleration * 100.0).round() / 100.0
}
