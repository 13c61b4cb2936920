use shunt_core::BrakeMode;
use shunt_sampler::{simulate, BaseParams};

fn main() -> anyhow::Result<()> {
    let base = BaseParams::default();

    println!("Train length (25 km/h, mode G)");
    for n_wagons in [1, 2, 5, 10, 15, 20] {
        let scenario = base.nominal_scenario(n_wagons);
        println!(
            "  {:>2} wagons, {:>6.1} m: {:.2} m",
            n_wagons,
            scenario.train_length(),
            simulate(&scenario)?
        );
    }

    println!("Cylinder pressure (5 wagons)");
    for bar in [3.4, 3.6, 3.8, 4.0] {
        let mut params = base.clone();
        params.distributions.cylinder_pressure.mean = bar * 1e5;
        println!("  {:.1} bar: {:.2} m", bar, simulate(&params.nominal_scenario(5))?);
    }

    println!("Initial speed (5 wagons)");
    for kmh in [10.0, 15.0, 20.0, 25.0, 30.0] {
        let params = base.clone().with_speed_kmh(kmh);
        println!("  {:>4.0} km/h: {:.2} m", kmh, simulate(&params.nominal_scenario(5))?);
    }

    println!("Brake mode (5 wagons)");
    for mode in [BrakeMode::G, BrakeMode::P] {
        let mut params = base.clone();
        params.locomotive.brake_mode = mode;
        params.wagon.brake_mode = mode;
        println!("  {:?}: {:.2} m", mode, simulate(&params.nominal_scenario(5))?);
    }

    Ok(())
}
