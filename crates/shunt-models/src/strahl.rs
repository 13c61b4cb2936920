use shunt_core::{RunningResistance, F, GRAVITY};
use serde::{Serialize, Deserialize};

/// Strahl formula for freight wagons:
/// w = a + b · (v / v_ref)², resistance = w · m · g
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strahl {
    pub a: F,
    pub b: F,
    /// m/s
    pub reference_speed: F,
}

impl Strahl {
    pub fn new(a: F, b: F, reference_speed: F) -> Self {
        Self { a, b, reference_speed }
    }

    /// Covered freight wagons, reference speed 100 km/h.
    pub fn freight() -> Self {
        Self::new(1.6e-3, 5.7e-3, 27.8)
    }
}

impl Default for Strahl {
    fn default() -> Self {
        Self::freight()
    }
}

impl RunningResistance for Strahl {
    fn force(&self, speed: F, mass: F) -> F {
        self.specific(speed) * mass * GRAVITY
    }

    fn specific(&self, speed: F) -> F {
        self.a + self.b * (speed / self.reference_speed).powi(2)
    }
}
