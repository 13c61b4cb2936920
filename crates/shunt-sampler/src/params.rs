use shunt_core::{
    BrakeMode, DistributionError, Locomotive, NormalParam, Scenario, ScenarioError, Wagon,
    WagonColumns, F,
};
use rand_distr::Normal;
use serde::{Serialize, Deserialize};

/// Locomotive description; brake force derives from braked weight unless given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotiveParams {
    /// kg
    pub mass: F,
    /// kg
    pub braked_weight: F,
    /// Explicit brake force in N, overrides `braked_weight`.
    pub brake_force: Option<F>,
    /// m
    pub length: F,
    /// s
    pub fill_time: F,
    pub brake_mode: BrakeMode,
}

impl Default for LocomotiveParams {
    fn default() -> Self {
        Self {
            mass: 53_000.0,
            braked_weight: 56_000.0,
            brake_force: None,
            length: 10.5,
            fill_time: 24.0,
            brake_mode: BrakeMode::G,
        }
    }
}

impl LocomotiveParams {
    pub fn to_locomotive(&self) -> Locomotive {
        match self.brake_force {
            Some(force) => Locomotive::new(self.mass, force, self.length, self.fill_time, self.brake_mode),
            None => Locomotive::from_braked_weight(
                self.mass,
                self.braked_weight,
                self.length,
                self.fill_time,
                self.brake_mode,
            ),
        }
    }
}

/// Wagon parameters shared by every wagon of the train.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WagonTemplate {
    /// kg
    pub mass: F,
    pub rotating_mass_factor: F,
    pub brake_mode: BrakeMode,
    /// m
    pub cylinder_diameter: F,
    /// m
    pub length: F,
    pub brake_rigging: F,
    pub brake_blocks: u32,
}

impl Default for WagonTemplate {
    /// Loaded four-axle wagon.
    fn default() -> Self {
        Self {
            mass: 90_000.0,
            rotating_mass_factor: 1.04,
            brake_mode: BrakeMode::G,
            cylinder_diameter: 0.406,
            length: 14.0,
            brake_rigging: 5.65,
            brake_blocks: 16,
        }
    }
}

/// Scatter of the per-wagon brake parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDistributions {
    /// Pa
    pub cylinder_pressure: NormalParam,
    pub friction_efficiency: NormalParam,
    /// s
    pub fill_time: NormalParam,
    pub friction_correction: NormalParam,
}

impl Default for ParameterDistributions {
    fn default() -> Self {
        Self {
            cylinder_pressure: NormalParam::new(3.8e5, 5e3),
            friction_efficiency: NormalParam::new(0.83, 0.02),
            fill_time: NormalParam::new(24.0, 2.0),
            friction_correction: NormalParam::new(1.0, 0.025),
        }
    }
}

impl ParameterDistributions {
    /// All parameters pinned to their means.
    pub fn nominal(&self) -> Self {
        Self {
            cylinder_pressure: NormalParam::fixed(self.cylinder_pressure.mean),
            friction_efficiency: NormalParam::fixed(self.friction_efficiency.mean),
            fill_time: NormalParam::fixed(self.fill_time.mean),
            friction_correction: NormalParam::fixed(self.friction_correction.mean),
        }
    }

    pub fn samplers(&self) -> Result<ParameterSamplers, DistributionError> {
        Ok(ParameterSamplers {
            cylinder_pressure: self.cylinder_pressure.distribution("cylinder_pressure")?,
            friction_efficiency: self.friction_efficiency.distribution("friction_efficiency")?,
            fill_time: self.fill_time.distribution("fill_time")?,
            friction_correction: self.friction_correction.distribution("friction_correction")?,
        })
    }
}

/// Ready-to-sample distributions, built once per Monte Carlo run.
#[derive(Clone, Copy, Debug)]
pub struct ParameterSamplers {
    pub cylinder_pressure: Normal<F>,
    pub friction_efficiency: Normal<F>,
    pub fill_time: Normal<F>,
    pub friction_correction: Normal<F>,
}

/// Deterministic base of a Monte Carlo study plus the parameter scatter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseParams {
    /// m/s
    pub initial_speed: F,
    pub locomotive: LocomotiveParams,
    pub wagon: WagonTemplate,
    pub distributions: ParameterDistributions,
}

impl Default for BaseParams {
    /// Shunting at 25 km/h with a 53 t locomotive.
    fn default() -> Self {
        Self {
            initial_speed: 25.0 / 3.6,
            locomotive: LocomotiveParams::default(),
            wagon: WagonTemplate::default(),
            distributions: ParameterDistributions::default(),
        }
    }
}

impl BaseParams {
    pub fn with_speed_kmh(mut self, kmh: F) -> Self {
        self.initial_speed = kmh / 3.6;
        self
    }

    /// Scenario of `n_wagons` identical wagons with every random parameter at its mean.
    pub fn nominal_scenario(&self, n_wagons: usize) -> Scenario {
        let d = &self.distributions;
        let wagon = Wagon {
            mass: self.wagon.mass,
            rotating_mass_factor: self.wagon.rotating_mass_factor,
            fill_time: d.fill_time.mean,
            brake_mode: self.wagon.brake_mode,
            cylinder_diameter: self.wagon.cylinder_diameter,
            cylinder_pressure: d.cylinder_pressure.mean,
            length: self.wagon.length,
            brake_rigging: self.wagon.brake_rigging,
            brake_blocks: self.wagon.brake_blocks,
            friction_efficiency: d.friction_efficiency.mean,
            friction_correction: d.friction_correction.mean,
        };
        Scenario::new(self.initial_speed, self.locomotive.to_locomotive(), vec![wagon; n_wagons])
    }

    /// Scenario from sampled per-wagon columns, deterministic fields from the template.
    pub fn scenario_from_draws(&self, draws: SampledColumns) -> Result<Scenario, ScenarioError> {
        let n = draws.cylinder_pressure.len();
        let columns = WagonColumns {
            mass: vec![self.wagon.mass; n],
            rotating_mass_factor: vec![self.wagon.rotating_mass_factor; n],
            fill_time: draws.fill_time,
            brake_mode: vec![self.wagon.brake_mode; n],
            cylinder_diameter: vec![self.wagon.cylinder_diameter; n],
            cylinder_pressure: draws.cylinder_pressure,
            length: vec![self.wagon.length; n],
            brake_rigging: vec![self.wagon.brake_rigging; n],
            brake_blocks: vec![self.wagon.brake_blocks; n],
            friction_efficiency: draws.friction_efficiency,
            friction_correction: draws.friction_correction,
        };
        Scenario::from_columns(self.initial_speed, self.locomotive.to_locomotive(), columns)
    }
}

/// Random per-wagon columns drawn for one trial.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledColumns {
    pub cylinder_pressure: Vec<F>,
    pub friction_efficiency: Vec<F>,
    pub fill_time: Vec<F>,
    pub friction_correction: Vec<F>,
}
