use crate::error::MonteCarloError;
use crate::params::{BaseParams, ParameterSamplers, SampledColumns};
use crate::simulator::BrakeSimulator;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use shunt_core::{
    FrictionLaw, Integrator, NoiseGenerator, RunningResistance, Scenario, SemiImplicitEuler,
    StepConfig, F,
};
use shunt_models::{Karwatzki, Strahl};
use std::time::{Duration, Instant};

/// Braking distances of a Monte Carlo run, in trial order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub distances: Vec<F>,
    pub seed: u64,
    pub n_wagons: usize,
    /// Wall-clock time of the trial loop.
    pub elapsed: Duration,
}

impl MonteCarloResult {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn into_distances(self) -> Vec<F> {
        self.distances
    }
}

/// Repeats the braking simulation with per-wagon parameters drawn at random.
pub struct MonteCarlo<I = SemiImplicitEuler, Fr = Karwatzki, R = Strahl>
where
    I: Integrator,
    Fr: FrictionLaw,
    R: RunningResistance,
{
    pub base: BaseParams,
    pub n_wagons: usize,
    pub n_trials: usize,
    pub seed: u64,
    pub simulator: BrakeSimulator<I, Fr, R>,
}

impl MonteCarlo {
    pub fn new(base: BaseParams, n_wagons: usize, n_trials: usize, seed: u64) -> Self {
        Self {
            base,
            n_wagons,
            n_trials,
            seed,
            simulator: BrakeSimulator::standard(),
        }
    }
}

impl<I, Fr, R> MonteCarlo<I, Fr, R>
where
    I: Integrator,
    Fr: FrictionLaw,
    R: RunningResistance,
{
    pub fn with_simulator<I2, Fr2, R2>(
        self,
        simulator: BrakeSimulator<I2, Fr2, R2>,
    ) -> MonteCarlo<I2, Fr2, R2>
    where
        I2: Integrator,
        Fr2: FrictionLaw,
        R2: RunningResistance,
    {
        MonteCarlo {
            base: self.base,
            n_wagons: self.n_wagons,
            n_trials: self.n_trials,
            seed: self.seed,
            simulator,
        }
    }

    pub fn with_step_config(mut self, config: StepConfig) -> Self {
        self.simulator.config = config;
        self
    }

    /// Run all trials one after another.
    pub fn run(&self) -> Result<MonteCarloResult, MonteCarloError> {
        let samplers = self.base.distributions.samplers()?;
        log::debug!(
            "monte carlo: {} trials, {} wagons, seed {}",
            self.n_trials,
            self.n_wagons,
            self.seed
        );

        let start = Instant::now();
        let mut distances = Vec::with_capacity(self.n_trials);
        for trial in 0..self.n_trials {
            distances.push(self.run_trial(trial, &samplers)?);
        }
        Ok(self.finish(distances, start.elapsed()))
    }

    /// Run trials on the rayon pool. Produces the same sequence as [`run`](Self::run).
    pub fn run_parallel(&self) -> Result<MonteCarloResult, MonteCarloError> {
        let samplers = self.base.distributions.samplers()?;
        log::debug!(
            "monte carlo: {} trials, {} wagons, seed {}, {} threads",
            self.n_trials,
            self.n_wagons,
            self.seed,
            rayon::current_num_threads()
        );

        let start = Instant::now();
        let distances = (0..self.n_trials)
            .into_par_iter()
            .map(|trial| self.run_trial(trial, &samplers))
            .collect::<Result<Vec<F>, MonteCarloError>>()?;
        Ok(self.finish(distances, start.elapsed()))
    }

    /// Scenario used by trial `trial`.
    pub fn sample_scenario(&self, trial: usize) -> Result<Scenario, MonteCarloError> {
        let samplers = self.base.distributions.samplers()?;
        self.draw_scenario(trial, &samplers)
    }

    fn draw_scenario(
        &self,
        trial: usize,
        samplers: &ParameterSamplers,
    ) -> Result<Scenario, MonteCarloError> {
        let mut noise = NoiseGenerator::from_trial_id(self.seed, trial as u64);
        let n = self.n_wagons;

        // Column by column, in this order
        let draws = SampledColumns {
            cylinder_pressure: noise.sample_n(&samplers.cylinder_pressure, n),
            friction_efficiency: noise.sample_n(&samplers.friction_efficiency, n),
            fill_time: noise.sample_n(&samplers.fill_time, n),
            friction_correction: noise.sample_n(&samplers.friction_correction, n),
        };

        self.base
            .scenario_from_draws(draws)
            .map_err(|source| MonteCarloError::Trial { trial, source })
    }

    fn run_trial(&self, trial: usize, samplers: &ParameterSamplers) -> Result<F, MonteCarloError> {
        let scenario = self.draw_scenario(trial, samplers)?;
        let distance = self
            .simulator
            .simulate(&scenario)
            .map_err(|source| MonteCarloError::Trial { trial, source })?;
        log::trace!("trial {}: {:.3} m", trial, distance);
        Ok(distance)
    }

    fn finish(&self, distances: Vec<F>, elapsed: Duration) -> MonteCarloResult {
        log::debug!(
            "monte carlo finished {} trials in {:.2} s",
            distances.len(),
            elapsed.as_secs_f64()
        );
        MonteCarloResult {
            distances,
            seed: self.seed,
            n_wagons: self.n_wagons,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterDistributions;
    use shunt_core::{NormalParam, ScenarioError};

    #[test]
    fn test_result_length_and_order() {
        let mc = MonteCarlo::new(BaseParams::default(), 3, 20, 7);
        let result = mc.run().unwrap();
        assert_eq!(result.len(), 20);
        assert_eq!(result.seed, 7);

        // Trial k is reproducible on its own
        let scenario = mc.sample_scenario(11).unwrap();
        let distance = mc.simulator.simulate(&scenario).unwrap();
        assert_eq!(result.distances[11], distance);
    }

    #[test]
    fn test_wagons_draw_independently() {
        let mc = MonteCarlo::new(BaseParams::default(), 5, 1, 42);
        let scenario = mc.sample_scenario(0).unwrap();
        let pressures: Vec<F> = scenario.wagons.iter().map(|w| w.cylinder_pressure).collect();
        assert!(pressures.windows(2).all(|w| w[0] != w[1]));
        assert!(scenario.wagons.iter().all(|w| w.mass == 90_000.0 && w.brake_blocks == 16));
    }

    #[test]
    fn test_zero_trials() {
        let result = MonteCarlo::new(BaseParams::default(), 5, 0, 1).run().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_scatter_gives_nominal_distance() {
        let mut base = BaseParams::default();
        base.distributions = ParameterDistributions::default().nominal();
        let nominal = BrakeSimulator::standard().simulate(&base.nominal_scenario(5)).unwrap();

        let result = MonteCarlo::new(base, 5, 4, 3).run().unwrap();
        assert!(result.distances.iter().all(|&d| d == nominal));
    }

    #[test]
    fn test_invalid_distribution() {
        let mut base = BaseParams::default();
        base.distributions.fill_time = NormalParam::new(24.0, -1.0);
        let err = MonteCarlo::new(base, 5, 10, 1).run().unwrap_err();
        assert!(matches!(err, MonteCarloError::Distribution(_)));
    }

    #[test]
    fn test_failing_trial_reports_index() {
        // Efficiency scatter far below zero fails validation on the first trial
        let mut base = BaseParams::default();
        base.distributions.friction_efficiency = NormalParam::fixed(-0.5);
        match MonteCarlo::new(base, 2, 10, 1).run() {
            Err(MonteCarloError::Trial { trial, source: ScenarioError::Negative { field, .. } }) => {
                assert_eq!(trial, 0);
                assert_eq!(field, "wagons[0].friction_efficiency");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_step_limit_aborts_run() {
        let mc = MonteCarlo::new(BaseParams::default(), 5, 3, 1)
            .with_step_config(StepConfig::default().with_max_steps(50));
        assert!(matches!(
            mc.run_parallel(),
            Err(MonteCarloError::Trial { source: ScenarioError::StepLimitExceeded { .. }, .. })
        ));
    }
}
