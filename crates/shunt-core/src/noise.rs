use crate::error::DistributionError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};
use serde::{Serialize, Deserialize};

/// Mean and standard deviation of a normally distributed parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalParam {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParam {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// A parameter without scatter.
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    pub fn distribution(&self, parameter: &'static str) -> Result<Normal<f64>, DistributionError> {
        Normal::new(self.mean, self.std_dev)
            .ok()
            .filter(|_| self.mean.is_finite() && self.std_dev >= 0.0)
            .ok_or(DistributionError::InvalidNormal {
                parameter,
                mean: self.mean,
                std_dev: self.std_dev,
            })
    }
}

/// Seeded random source owned by a single trial.
pub struct NoiseGenerator {
    rng: ChaCha20Rng,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Independent stream for trial `trial_id` of a run seeded with `global_seed`.
    pub fn from_trial_id(global_seed: u64, trial_id: u64) -> Self {
        let seed = global_seed.wrapping_add(trial_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }

    /// `n` independent draws from `dist`.
    pub fn sample_n(&mut self, dist: &Normal<f64>, n: usize) -> Vec<f64> {
        (0..n).map(|_| dist.sample(&mut self.rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let dist = NormalParam::new(24.0, 2.0).distribution("fill_time").unwrap();
        let a = NoiseGenerator::from_trial_id(42, 7).sample_n(&dist, 16);
        let b = NoiseGenerator::from_trial_id(42, 7).sample_n(&dist, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_trials_get_distinct_streams() {
        let dist = NormalParam::new(0.0, 1.0).distribution("x").unwrap();
        let a = NoiseGenerator::from_trial_id(42, 0).sample_n(&dist, 8);
        let b = NoiseGenerator::from_trial_id(42, 1).sample_n(&dist, 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_param_has_no_scatter() {
        let dist = NormalParam::fixed(0.83).distribution("eta").unwrap();
        let draws = NoiseGenerator::new(1).sample_n(&dist, 5);
        assert!(draws.iter().all(|&x| x == 0.83));
    }

    #[test]
    fn test_invalid_std_dev_rejected() {
        let err = NormalParam::new(1.0, -0.5).distribution("mu_c").unwrap_err();
        assert!(matches!(err, DistributionError::InvalidNormal { parameter: "mu_c", .. }));
        assert!(NormalParam::new(f64::NAN, 1.0).distribution("p").is_err());
        assert!(NormalParam::new(1.0, f64::NAN).distribution("p").is_err());
        assert!(NormalParam::new(1.0, -1e-12).distribution("p").is_err());
    }

    #[test]
    fn test_sample_moments() {
        let dist = NormalParam::new(3.8e5, 5e3).distribution("pressure").unwrap();
        let draws = NoiseGenerator::new(42).sample_n(&dist, 20_000);
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (draws.len() - 1) as f64;
        // 4 standard errors
        assert!((mean - 3.8e5).abs() < 4.0 * 5e3 / (draws.len() as f64).sqrt());
        assert!((var.sqrt() - 5e3).abs() / 5e3 < 0.05);
    }
}
