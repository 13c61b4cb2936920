pub mod simulator;
pub mod params;
pub mod monte_carlo;
pub mod error;

pub use simulator::{BrakeSimulator, PreparedTrain, ForceBreakdown};
pub use params::{
    BaseParams, LocomotiveParams, WagonTemplate, ParameterDistributions, ParameterSamplers,
    SampledColumns,
};
pub use monte_carlo::{MonteCarlo, MonteCarloResult};
pub use error::MonteCarloError;

/// Braking distance of one scenario with the standard models.
pub fn simulate(scenario: &shunt_core::Scenario) -> Result<shunt_core::F, shunt_core::ScenarioError> {
    BrakeSimulator::standard().simulate(scenario)
}
