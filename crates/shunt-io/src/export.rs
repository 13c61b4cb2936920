//! Plain-text output of a Monte Carlo run.

use crate::report::ExceedanceRow;
use anyhow::Context;
use shunt_core::{SimulationState, F};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

fn create(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// One row per trial: `trial,distance`.
pub fn write_distances_csv(path: &Path, distances: &[F]) -> anyhow::Result<()> {
    let mut out = create(path)?;
    writeln!(out, "trial,distance")?;
    for (trial, distance) in distances.iter().enumerate() {
        writeln!(out, "{},{}", trial, distance)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_exceedance_csv(path: &Path, rows: &[ExceedanceRow]) -> anyhow::Result<()> {
    let mut out = create(path)?;
    writeln!(out, "threshold,probability")?;
    for row in rows {
        writeln!(out, "{},{}", row.threshold, row.probability)?;
    }
    out.flush()?;
    Ok(())
}

/// `time,speed,distance` for each recorded state.
pub fn write_trajectory_csv(path: &Path, states: &[SimulationState]) -> anyhow::Result<()> {
    let mut out = create(path)?;
    writeln!(out, "time,speed,distance")?;
    for state in states {
        writeln!(out, "{},{},{}", state.time, state.speed, state.distance)?;
    }
    out.flush()?;
    Ok(())
}

/// Sibling files written next to a distances CSV.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub distances: PathBuf,
    pub exceedance: PathBuf,
    pub manifest: PathBuf,
}

impl OutputPaths {
    pub fn from_distances(path: impl Into<PathBuf>) -> Self {
        let distances = path.into();
        Self {
            exceedance: distances.with_extension("exceedance.csv"),
            manifest: distances.with_extension("manifest.json"),
            distances,
        }
    }
}

/// File stem in the style `Class363_5WagonsG25M1000`.
pub fn default_stem(label: &str, n_wagons: usize, brake_mode: &str, speed_kmh: F, n_trials: usize) -> String {
    format!(
        "{}_{}Wagons{}{}M{}",
        label,
        n_wagons,
        brake_mode,
        speed_kmh.round() as i64,
        n_trials
    )
}
