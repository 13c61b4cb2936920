use shunt_core::{FrictionLaw, F};
use serde::{Serialize, Deserialize};

/// Karwatzki friction law for brake blocks:
/// μ(v, F) = k1 · (F + k2)/(F + k3) · (v + k4)/(v + k5)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Karwatzki {
    pub k1: F,
    /// N
    pub k2: F,
    /// N
    pub k3: F,
    /// m/s
    pub k4: F,
    /// m/s
    pub k5: F,
}

impl Karwatzki {
    pub fn new(k1: F, k2: F, k3: F, k4: F, k5: F) -> Self {
        Self { k1, k2, k3, k4, k5 }
    }

    /// Coefficients for composite (K) brake blocks.
    pub fn composite() -> Self {
        Self::new(0.055, 200_000.0, 50_000.0, 150.0 / 3.6, 75.0 / 3.6)
    }

    /// Limit for very high block forces and zero speed: k1 · k4 / k5.
    pub fn high_force_limit(&self) -> F {
        self.k1 * self.k4 / self.k5
    }
}

impl Default for Karwatzki {
    fn default() -> Self {
        Self::composite()
    }
}

impl FrictionLaw for Karwatzki {
    fn coefficient(&self, speed: F, block_force: F) -> F {
        self.k1 * (block_force + self.k2) / (block_force + self.k3) * (speed + self.k4)
            / (speed + self.k5)
    }
}
