use crate::brake::{braked_weight_deceleration, cylinder_force};
use crate::error::ScenarioError;
use crate::F;
use serde::{Serialize, Deserialize};

/// Brake mode of a vehicle's distributor valve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrakeMode {
    /// Goods: 10 % of cylinder pressure immediately, remainder linear.
    #[default]
    G,
    /// Passenger: linear build-up from zero.
    P,
}

impl BrakeMode {
    /// Numeric mode flag as used in brake sheets: nonzero selects G.
    pub fn from_flag(flag: F) -> Self {
        if flag != 0.0 {
            BrakeMode::G
        } else {
            BrakeMode::P
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Locomotive {
    /// kg
    pub mass: F,
    /// Fully applied brake force in N.
    pub brake_force: F,
    /// m
    pub length: F,
    /// s
    pub fill_time: F,
    pub brake_mode: BrakeMode,
}

impl Locomotive {
    pub fn new(mass: F, brake_force: F, length: F, fill_time: F, brake_mode: BrakeMode) -> Self {
        Self { mass, brake_force, length, fill_time, brake_mode }
    }

    /// Locomotive whose brake force follows from its braked weight.
    ///
    /// The braked-weight percentage is mapped to a guaranteed deceleration,
    /// see [`braked_weight_deceleration`].
    pub fn from_braked_weight(
        mass: F,
        braked_weight: F,
        length: F,
        fill_time: F,
        brake_mode: BrakeMode,
    ) -> Self {
        let deceleration = braked_weight_deceleration(mass, braked_weight);
        Self::new(mass, mass * deceleration, length, fill_time, brake_mode)
    }
}

/// Per-wagon vehicle and brake parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wagon {
    /// kg
    pub mass: F,
    /// Dynamic augment for rotating wheelsets (≥ 1 in practice).
    pub rotating_mass_factor: F,
    /// Own cylinder fill time in s, before propagation delay.
    pub fill_time: F,
    pub brake_mode: BrakeMode,
    /// m
    pub cylinder_diameter: F,
    /// Pa
    pub cylinder_pressure: F,
    /// m
    pub length: F,
    /// Leverage ratio of the brake rigging.
    pub brake_rigging: F,
    pub brake_blocks: u32,
    pub friction_efficiency: F,
    pub friction_correction: F,
}

/// One fully specified braking run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// m/s
    pub initial_speed: F,
    pub locomotive: Locomotive,
    pub wagons: Vec<Wagon>,
}

impl Scenario {
    pub fn new(initial_speed: F, locomotive: Locomotive, wagons: Vec<Wagon>) -> Self {
        Self { initial_speed, locomotive, wagons }
    }

    /// Build a scenario from column-oriented wagon data.
    pub fn from_columns(
        initial_speed: F,
        locomotive: Locomotive,
        columns: WagonColumns,
    ) -> Result<Self, ScenarioError> {
        let scenario = Self::new(initial_speed, locomotive, columns.into_wagons()?);
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn n_wagons(&self) -> usize {
        self.wagons.len()
    }

    /// Static mass of all wagons (locomotive excluded).
    pub fn wagon_mass(&self) -> F {
        self.wagons.iter().map(|w| w.mass).sum()
    }

    /// Locomotive mass plus wagon masses scaled by their dynamic augment.
    pub fn dynamic_mass(&self) -> F {
        self.locomotive.mass
            + self
                .wagons
                .iter()
                .map(|w| w.rotating_mass_factor * w.mass)
                .sum::<F>()
    }

    pub fn train_length(&self) -> F {
        self.locomotive.length + self.wagons.iter().map(|w| w.length).sum::<F>()
    }

    /// Check every parameter for physical validity.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        finite("initial_speed", self.initial_speed)?;

        let loco = &self.locomotive;
        positive("locomotive.mass", loco.mass)?;
        non_negative("locomotive.brake_force", loco.brake_force)?;
        non_negative("locomotive.length", loco.length)?;
        non_negative("locomotive.fill_time", loco.fill_time)?;

        for (k, wagon) in self.wagons.iter().enumerate() {
            let field = |name: &str| format!("wagons[{k}].{name}");
            positive(field("mass"), wagon.mass)?;
            positive(field("rotating_mass_factor"), wagon.rotating_mass_factor)?;
            non_negative(field("fill_time"), wagon.fill_time)?;
            non_negative(field("cylinder_diameter"), wagon.cylinder_diameter)?;
            non_negative(field("cylinder_pressure"), wagon.cylinder_pressure)?;
            non_negative(field("length"), wagon.length)?;
            non_negative(field("brake_rigging"), wagon.brake_rigging)?;
            non_negative(field("friction_efficiency"), wagon.friction_efficiency)?;
            non_negative(field("friction_correction"), wagon.friction_correction)?;
            if wagon.brake_blocks == 0 {
                return Err(ScenarioError::NoBrakeBlocks { wagon: k });
            }
            let force = cylinder_force(wagon.cylinder_pressure, wagon.cylinder_diameter);
            if force < 0.0 {
                return Err(ScenarioError::WeakCylinder { wagon: k, force });
            }
        }

        Ok(())
    }
}

/// Column-oriented wagon parameters, one entry per wagon in train order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WagonColumns {
    pub mass: Vec<F>,
    pub rotating_mass_factor: Vec<F>,
    pub fill_time: Vec<F>,
    pub brake_mode: Vec<BrakeMode>,
    pub cylinder_diameter: Vec<F>,
    pub cylinder_pressure: Vec<F>,
    pub length: Vec<F>,
    pub brake_rigging: Vec<F>,
    pub brake_blocks: Vec<u32>,
    pub friction_efficiency: Vec<F>,
    pub friction_correction: Vec<F>,
}

impl WagonColumns {
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Zip the columns into wagons; every column must match `mass` in length.
    pub fn into_wagons(self) -> Result<Vec<Wagon>, ScenarioError> {
        let n = self.mass.len();
        let lengths = [
            ("rotating_mass_factor", self.rotating_mass_factor.len()),
            ("fill_time", self.fill_time.len()),
            ("brake_mode", self.brake_mode.len()),
            ("cylinder_diameter", self.cylinder_diameter.len()),
            ("cylinder_pressure", self.cylinder_pressure.len()),
            ("length", self.length.len()),
            ("brake_rigging", self.brake_rigging.len()),
            ("brake_blocks", self.brake_blocks.len()),
            ("friction_efficiency", self.friction_efficiency.len()),
            ("friction_correction", self.friction_correction.len()),
        ];
        if let Some(&(field, found)) = lengths.iter().find(|(_, len)| *len != n) {
            return Err(ScenarioError::ColumnLengthMismatch { field, expected: n, found });
        }

        Ok((0..n)
            .map(|k| Wagon {
                mass: self.mass[k],
                rotating_mass_factor: self.rotating_mass_factor[k],
                fill_time: self.fill_time[k],
                brake_mode: self.brake_mode[k],
                cylinder_diameter: self.cylinder_diameter[k],
                cylinder_pressure: self.cylinder_pressure[k],
                length: self.length[k],
                brake_rigging: self.brake_rigging[k],
                brake_blocks: self.brake_blocks[k],
                friction_efficiency: self.friction_efficiency[k],
                friction_correction: self.friction_correction[k],
            })
            .collect())
    }
}

impl From<&[Wagon]> for WagonColumns {
    fn from(wagons: &[Wagon]) -> Self {
        let mut columns = WagonColumns::default();
        for w in wagons {
            columns.mass.push(w.mass);
            columns.rotating_mass_factor.push(w.rotating_mass_factor);
            columns.fill_time.push(w.fill_time);
            columns.brake_mode.push(w.brake_mode);
            columns.cylinder_diameter.push(w.cylinder_diameter);
            columns.cylinder_pressure.push(w.cylinder_pressure);
            columns.length.push(w.length);
            columns.brake_rigging.push(w.brake_rigging);
            columns.brake_blocks.push(w.brake_blocks);
            columns.friction_efficiency.push(w.friction_efficiency);
            columns.friction_correction.push(w.friction_correction);
        }
        columns
    }
}

fn finite(field: impl Into<String>, value: F) -> Result<F, ScenarioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScenarioError::NonFinite { field: field.into() })
    }
}

fn positive(field: impl Into<String>, value: F) -> Result<F, ScenarioError> {
    let field = field.into();
    let value = finite(field.clone(), value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ScenarioError::NonPositive { field, value })
    }
}

fn non_negative(field: impl Into<String>, value: F) -> Result<F, ScenarioError> {
    let field = field.into();
    let value = finite(field.clone(), value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ScenarioError::Negative { field, value })
    }
}
