use crate::export::{default_stem, write_trajectory_csv, OutputPaths};
use crate::report::{
    exceedance_report, exceedance_table, resolves_tail, sorted, summary_table, upper_quantile,
    Summary, DEFAULT_THRESHOLDS, TAIL_PROBABILITY,
};
use crate::{write_run_with_manifest, RunManifest};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shunt_core::{StepConfig, F};
use shunt_sampler::{BaseParams, BrakeSimulator, MonteCarlo, MonteCarloResult};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shunt")]
#[command(about = "Braking distance of shunting trains under brake parameter scatter")]
#[command(long_about = "Time-stepped braking simulation of a locomotive and freight wagons, \
    repeated over randomly drawn cylinder pressures, friction factors and fill times")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monte Carlo study of the braking distance
    Run(RunArgs),
    /// Single braking run with every parameter at its mean
    Nominal(NominalArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Number of wagons behind the locomotive
    #[arg(long, default_value = "5")]
    pub wagons: usize,

    /// Number of Monte Carlo trials
    #[arg(long, default_value = "1000")]
    pub trials: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Initial speed in km/h, overrides the parameter file
    #[arg(long)]
    pub speed_kmh: Option<F>,

    /// Base parameters (JSON), defaults for missing fields
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Distances in m for the exceedance table
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_THRESHOLDS.to_vec())]
    pub thresholds: Vec<F>,

    /// Integration time step in s
    #[arg(long, default_value_t = StepConfig::DEFAULT_DT)]
    pub dt: F,

    /// Distances CSV; exceedance table and manifest are written alongside
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write `<stem>.csv` into this directory with a generated stem
    #[arg(long, conflicts_with = "out")]
    pub out_dir: Option<PathBuf>,

    /// Spread trials over all cores
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args, Clone, Debug)]
pub struct NominalArgs {
    /// Number of wagons behind the locomotive
    #[arg(long, default_value = "5")]
    pub wagons: usize,

    /// Initial speed in km/h, overrides the parameter file
    #[arg(long)]
    pub speed_kmh: Option<F>,

    /// Base parameters (JSON), defaults for missing fields
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Integration time step in s
    #[arg(long, default_value_t = StepConfig::DEFAULT_DT)]
    pub dt: F,

    /// Write the speed and distance history as CSV
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Keep every nth state in the trace
    #[arg(long, default_value = "1")]
    pub stride: usize,
}

/// Base parameters from an optional JSON file, with the speed override applied.
pub fn load_params(path: Option<&Path>, speed_kmh: Option<F>) -> anyhow::Result<BaseParams> {
    let params = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing parameters in {}", path.display()))?
        }
        None => BaseParams::default(),
    };
    Ok(match speed_kmh {
        Some(kmh) => params.with_speed_kmh(kmh),
        None => params,
    })
}

pub fn run_monte_carlo_command(args: &RunArgs) -> anyhow::Result<MonteCarloResult> {
    let params = load_params(args.params.as_deref(), args.speed_kmh)?;
    let config = StepConfig::default().with_dt(args.dt);
    config.validate().context("invalid --dt")?;

    println!("Shunting brake Monte Carlo");
    println!("==========================");
    println!("Wagons: {}", args.wagons);
    println!("Trials: {}", args.trials);
    println!("Seed: {}", args.seed);
    println!("Initial speed: {:.1} km/h", params.initial_speed * 3.6);
    println!("dt: {:.4} s", args.dt);

    let mc = MonteCarlo::new(params.clone(), args.wagons, args.trials, args.seed)
        .with_step_config(config);
    let result = if args.parallel { mc.run_parallel()? } else { mc.run()? };

    let rows = exceedance_table(&result.distances, &args.thresholds);
    if let Some(summary) = Summary::from_distances(&result.distances) {
        println!();
        println!("{}", summary_table(&summary));

        if resolves_tail(result.len(), TAIL_PROBABILITY) {
            if let Some(critical) = upper_quantile(&sorted(&result.distances), TAIL_PROBABILITY) {
                println!("p = {:e} for: {:.3} m", TAIL_PROBABILITY, critical);
            }
        }
        println!("{}", exceedance_report(&rows));
    }
    println!("Time: {:.2} s", result.elapsed.as_secs_f64());

    let out = match (&args.out, &args.out_dir) {
        (Some(out), _) => Some(out.clone()),
        (None, Some(dir)) => {
            let stem = default_stem(
                "Class363",
                args.wagons,
                &format!("{:?}", params.wagon.brake_mode),
                params.initial_speed * 3.6,
                args.trials,
            );
            Some(dir.join(stem).with_extension("csv"))
        }
        (None, None) => None,
    };
    if let Some(out) = out {
        let paths = OutputPaths::from_distances(out);
        let manifest = RunManifest::new(&params, &result, args.dt, args.parallel);
        write_run_with_manifest(&result, &rows, &manifest, &paths)?;
        println!("Distances written to {}", paths.distances.display());
    }

    Ok(result)
}

/// Returns the stopping distance in m.
pub fn run_nominal_command(args: &NominalArgs) -> anyhow::Result<F> {
    let params = load_params(args.params.as_deref(), args.speed_kmh)?;
    let scenario = params.nominal_scenario(args.wagons);
    let simulator = BrakeSimulator::standard().with_config(StepConfig::default().with_dt(args.dt));
    let trajectory = simulator.trace(&scenario)?;

    println!("Nominal braking run");
    println!("===================");
    println!("Wagons: {}", args.wagons);
    println!("Train length: {:.1} m", scenario.train_length());
    println!("Initial speed: {:.1} km/h", scenario.initial_speed * 3.6);
    println!("Locomotive brake force: {:.0} N", scenario.locomotive.brake_force);
    println!("Steps: {}", trajectory.steps());
    println!("Stopping time: {:.2} s", trajectory.stopping_time());
    println!("Stopping distance: {:.3} m", trajectory.stopping_distance());

    if let Some(path) = &args.trace {
        write_trajectory_csv(path, &trajectory.thinned(args.stride))?;
        println!("Trace written to {}", path.display());
    }

    Ok(trajectory.stopping_distance())
}
