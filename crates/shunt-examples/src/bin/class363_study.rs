use shunt_io::report::{exceedance_report, summary_table, DEFAULT_THRESHOLDS};
use shunt_io::{exceedance_table, Summary};
use shunt_sampler::{BaseParams, MonteCarlo};

fn main() -> anyhow::Result<()> {
    let n_trials = 1000;
    let seed = 42;
    let params = BaseParams::default();

    println!("Class 363 shunting, {} trials per train length", n_trials);

    for n_wagons in [1, 5, 10] {
        let result = MonteCarlo::new(params.clone(), n_wagons, n_trials, seed).run_parallel()?;
        let Some(summary) = Summary::from_distances(&result.distances) else {
            continue;
        };

        println!();
        println!("{} wagons ({:.2} s)", n_wagons, result.elapsed.as_secs_f64());
        println!("{}", summary_table(&summary));

        let thresholds: Vec<f64> = if n_wagons == 5 {
            DEFAULT_THRESHOLDS.to_vec()
        } else {
            (0..6).map(|k| (summary.mean + k as f64 - 1.0).round()).collect()
        };
        println!("{}", exceedance_report(&exceedance_table(&result.distances, &thresholds)));
    }

    Ok(())
}
