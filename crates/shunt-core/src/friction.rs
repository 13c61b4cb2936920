use crate::F;

/// Brake block friction coefficient as a function of speed and block force.
pub trait FrictionLaw: Send + Sync {
    /// Dimensionless coefficient at `speed` (m/s) under a normal force of
    /// `block_force` (N) on a single block.
    fn coefficient(&self, speed: F, block_force: F) -> F;
}
