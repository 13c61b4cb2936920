use approx::assert_relative_eq;
use shunt_io::cli::{load_params, run_monte_carlo_command, run_nominal_command, NominalArgs, RunArgs};
use shunt_io::report::DEFAULT_THRESHOLDS;
use shunt_io::{exceedance_table, OutputPaths, RunManifest};
use shunt_sampler::BaseParams;
use std::fs;

fn run_args(trials: usize) -> RunArgs {
    RunArgs {
        wagons: 5,
        trials,
        seed: 42,
        speed_kmh: None,
        params: None,
        thresholds: DEFAULT_THRESHOLDS.to_vec(),
        dt: 0.05,
        out: None,
        out_dir: None,
        parallel: false,
    }
}

#[test]
fn run_writes_distances_exceedance_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("class363.csv");
    let args = RunArgs { out: Some(out.clone()), ..run_args(50) };

    let result = run_monte_carlo_command(&args).unwrap();
    let paths = OutputPaths::from_distances(&out);

    let distances = fs::read_to_string(&paths.distances).unwrap();
    let lines: Vec<&str> = distances.lines().collect();
    assert_eq!(lines[0], "trial,distance");
    assert_eq!(lines.len(), 51);
    let first: f64 = lines[1].split(',').nth(1).unwrap().parse().unwrap();
    assert_eq!(first, result.distances[0]);

    let exceedance = fs::read_to_string(&paths.exceedance).unwrap();
    assert_eq!(exceedance.lines().next(), Some("threshold,probability"));
    assert_eq!(exceedance.lines().count(), DEFAULT_THRESHOLDS.len() + 1);

    let manifest = RunManifest::load_from_file(&paths.manifest).unwrap();
    assert_eq!(manifest.seed, 42);
    assert_eq!(manifest.n_trials, 50);
    assert_eq!(manifest.n_wagons, 5);
    assert_relative_eq!(manifest.params.initial_speed, 25.0 / 3.6, max_relative = 1e-12);
    assert_eq!(manifest.params.wagon.brake_blocks, 16);
    let summary = manifest.summary.unwrap();
    assert_eq!(summary.count, 50);
    assert!(summary.min <= summary.mean && summary.mean <= summary.max);
}

#[test]
fn generated_stem_in_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs { out_dir: Some(dir.path().to_path_buf()), ..run_args(10) };
    run_monte_carlo_command(&args).unwrap();

    assert!(dir.path().join("Class363_5WagonsG25M10.csv").exists());
    assert!(dir.path().join("Class363_5WagonsG25M10.manifest.json").exists());
}

#[test]
fn parallel_flag_gives_same_distances() {
    let sequential = run_monte_carlo_command(&run_args(40)).unwrap();
    let parallel = run_monte_carlo_command(&RunArgs { parallel: true, ..run_args(40) }).unwrap();
    assert_eq!(sequential.distances, parallel.distances);
}

#[test]
fn exceedance_over_run_is_non_increasing() {
    let result = run_monte_carlo_command(&run_args(300)).unwrap();
    let thresholds: Vec<f64> = (120..=140).map(|k| k as f64 * 0.5).collect();
    let rows = exceedance_table(&result.distances, &thresholds);
    for pair in rows.windows(2) {
        assert!(pair[1].probability <= pair[0].probability);
    }
    assert_eq!(rows[0].probability, 1.0);
    assert_eq!(rows.last().unwrap().probability, 0.0);
}

#[test]
fn partial_params_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    fs::write(
        &path,
        r#"{ "wagon": { "mass": 60000.0 }, "distributions": { "fill_time": { "mean": 20.0, "std_dev": 1.0 } } }"#,
    )
    .unwrap();

    let params = load_params(Some(&path), Some(15.0)).unwrap();
    assert_eq!(params.wagon.mass, 60_000.0);
    assert_eq!(params.wagon.brake_blocks, 16);
    assert_eq!(params.distributions.fill_time.mean, 20.0);
    assert_eq!(params.locomotive, BaseParams::default().locomotive);
    assert_relative_eq!(params.initial_speed, 15.0 / 3.6);
}

#[test]
fn malformed_params_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ wagons: ").unwrap();

    let err = load_params(Some(&path), None).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));
    assert!(load_params(Some(&dir.path().join("missing.json")), None).is_err());
}

#[test]
fn nominal_writes_trace() {
    let dir = tempfile::tempdir().unwrap();
    let trace = dir.path().join("trace.csv");
    let args = NominalArgs {
        wagons: 5,
        speed_kmh: None,
        params: None,
        dt: 0.05,
        trace: Some(trace.clone()),
        stride: 10,
    };

    let distance = run_nominal_command(&args).unwrap();
    assert_relative_eq!(distance, 64.306_056_8, max_relative = 1e-6);

    let csv = fs::read_to_string(&trace).unwrap();
    let last = csv.lines().last().unwrap();
    let fields: Vec<f64> = last.split(',').map(|f| f.parse().unwrap()).collect();
    assert!(fields[1] <= 0.0);
    assert_relative_eq!(fields[2], distance);
    // 313 states thinned by 10, plus the final state
    assert_eq!(csv.lines().count(), 1 + 32 + 1);
}

#[test]
fn bad_time_step_is_an_error() {
    for dt in [f64::NAN, -0.05, 0.0] {
        let err = run_monte_carlo_command(&RunArgs { dt, ..run_args(5) }).unwrap_err();
        assert!(format!("{:#}", err).contains("--dt"));

        let nominal = NominalArgs {
            wagons: 5,
            speed_kmh: None,
            params: None,
            dt,
            trace: None,
            stride: 1,
        };
        assert!(run_nominal_command(&nominal).is_err());
    }
}
