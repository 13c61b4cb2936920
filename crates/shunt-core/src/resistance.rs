use crate::F;

/// Running resistance of the hauled wagons.
pub trait RunningResistance: Send + Sync {
    /// Resisting force in N at `speed` (m/s) for a static mass of `mass` kg.
    fn force(&self, speed: F, mass: F) -> F;

    /// Specific resistance (N per N of weight) at `speed`.
    fn specific(&self, speed: F) -> F;
}
