use thiserror::Error;

/// Reasons a scenario cannot be simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("{field} must be finite")]
    NonFinite { field: String },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("wagon {wagon} has no brake blocks")]
    NoBrakeBlocks { wagon: usize },

    #[error("wagon {wagon} cylinder force {force:.0} N is below the return spring")]
    WeakCylinder { wagon: usize, force: f64 },

    #[error("time step must be finite and positive, got {dt}")]
    InvalidTimeStep { dt: f64 },

    #[error("integration diverged after {steps} steps")]
    Diverged { steps: usize },

    #[error("wagon column `{field}` has {found} entries, expected {expected}")]
    ColumnLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("train still moving after {steps} steps (speed {speed:.3} m/s, distance {distance:.1} m)")]
    StepLimitExceeded { steps: usize, speed: f64, distance: f64 },
}

/// Invalid parameters for a sampling distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("normal distribution for {parameter} needs finite mean and non-negative std dev (mean {mean}, std dev {std_dev})")]
    InvalidNormal {
        parameter: &'static str,
        mean: f64,
        std_dev: f64,
    },
}
