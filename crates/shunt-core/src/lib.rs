pub mod state;
pub mod scenario;
pub mod brake;
pub mod friction;
pub mod resistance;
pub mod integrators;
pub mod trajectory;
pub mod noise;
pub mod error;

// Core types
pub type F = f64;
pub use state::{SimulationState, Time};
pub use noise::{NoiseGenerator, NormalParam};
pub use error::{ScenarioError, DistributionError};

// Scenario model
pub use scenario::{BrakeMode, Locomotive, Wagon, Scenario, WagonColumns};

// Physical law traits
pub use friction::FrictionLaw;
pub use resistance::RunningResistance;

// Integrators
pub use integrators::{Integrator, StepConfig, SemiImplicitEuler, ExplicitEuler};

// Trajectory output
pub use trajectory::Trajectory;

/// Standard gravity in m/s².
pub const GRAVITY: F = 9.81;
