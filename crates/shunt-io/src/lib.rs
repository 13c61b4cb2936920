use serde::{Deserialize, Serialize};
use shunt_core::F;
use shunt_sampler::{BaseParams, MonteCarloResult};
use std::path::Path;
use uuid::Uuid;

pub mod cli;
pub mod export;
pub mod report;

pub use export::{write_distances_csv, write_exceedance_csv, OutputPaths};
pub use report::{exceedance, exceedance_table, upper_quantile, ExceedanceRow, Summary};

/// Everything needed to repeat a Monte Carlo run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub seed: u64,
    pub n_wagons: usize,
    pub n_trials: usize,
    pub dt: F,
    pub parallel: bool,
    pub elapsed_secs: F,
    pub params: BaseParams,
    pub summary: Option<Summary>,
    pub crate_version: String,
}

impl RunManifest {
    pub fn new(params: &BaseParams, result: &MonteCarloResult, dt: F, parallel: bool) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            seed: result.seed,
            n_wagons: result.n_wagons,
            n_trials: result.len(),
            dt,
            parallel,
            elapsed_secs: result.elapsed.as_secs_f64(),
            params: params.clone(),
            summary: Summary::from_distances(&result.distances),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// Write distances, exceedance table and manifest side by side.
pub fn write_run_with_manifest(
    result: &MonteCarloResult,
    rows: &[ExceedanceRow],
    manifest: &RunManifest,
    paths: &OutputPaths,
) -> anyhow::Result<()> {
    write_distances_csv(&paths.distances, &result.distances)?;
    write_exceedance_csv(&paths.exceedance, rows)?;
    manifest.save_to_file(&paths.manifest)?;
    log::info!(
        "wrote {} distances to {}",
        result.len(),
        paths.distances.display()
    );
    Ok(())
}
