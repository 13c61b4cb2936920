use shunt_core::{DistributionError, ScenarioError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonteCarloError {
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("trial {trial} failed: {source}")]
    Trial {
        trial: usize,
        #[source]
        source: ScenarioError,
    },
}
