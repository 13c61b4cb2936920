use shunt_core::SimulationState;
use shunt_sampler::{BaseParams, BrakeSimulator, PreparedTrain};

fn main() -> anyhow::Result<()> {
    // Class 363 with five loaded wagons at 25 km/h
    let params = BaseParams::default();
    let n_wagons = 5;
    let scenario = params.nominal_scenario(n_wagons);

    let sim = BrakeSimulator::standard();
    let trajectory = sim.trace(&scenario)?;
    let train = PreparedTrain::new(&scenario);

    println!("Nominal stop: {} wagons, {:.1} m train", n_wagons, scenario.train_length());
    println!("Locomotive brake force: {:.0} N", scenario.locomotive.brake_force);
    println!("Dynamic mass: {:.0} kg", train.dynamic_mass);
    println!();
    println!("{:>7} {:>8} {:>9} {:>10} {:>10} {:>9}", "t/s", "v/km/h", "s/m", "F_loco/N", "F_wag/N", "a/m/s²");

    // Every 2 s
    for state in trajectory.thinned(40) {
        let at = SimulationState { speed: state.speed.max(0.0), ..state };
        let forces = sim.forces(&train, &at);
        println!(
            "{:>7.2} {:>8.2} {:>9.3} {:>10.0} {:>10.0} {:>9.4}",
            state.time,
            state.speed.max(0.0) * 3.6,
            state.distance,
            forces.locomotive_full + forces.locomotive_ramped,
            forces.wagons,
            sim.deceleration(&train, &at),
        );
    }

    println!();
    println!("Stopped after {} steps, {:.2} s", trajectory.steps(), trajectory.stopping_time());
    println!("Braking distance: {:.3} m", trajectory.stopping_distance());
    Ok(())
}
