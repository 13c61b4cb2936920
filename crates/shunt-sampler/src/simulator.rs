use shunt_core::brake::{cylinder_force, effective_fill_times, fill_fraction};
use shunt_core::{
    FrictionLaw, Integrator, RunningResistance, Scenario, ScenarioError, SemiImplicitEuler,
    SimulationState, StepConfig, Time, Trajectory, F,
};
use shunt_models::{Karwatzki, Strahl};

/// Scenario with the per-run constants worked out once.
pub struct PreparedTrain<'a> {
    pub scenario: &'a Scenario,
    /// Fill time per wagon including propagation delay.
    pub fill_times: Vec<Time>,
    /// Net piston force per wagon in N.
    pub cylinder_forces: Vec<F>,
    /// Static wagon mass in kg.
    pub wagon_mass: F,
    /// Locomotive plus augmented wagon mass in kg.
    pub dynamic_mass: F,
}

impl<'a> PreparedTrain<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self {
            scenario,
            fill_times: effective_fill_times(scenario),
            cylinder_forces: scenario
                .wagons
                .iter()
                .map(|w| cylinder_force(w.cylinder_pressure, w.cylinder_diameter))
                .collect(),
            wagon_mass: scenario.wagon_mass(),
            dynamic_mass: scenario.dynamic_mass(),
        }
    }
}

/// Retarding forces acting on the train at one instant, in N.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceBreakdown {
    /// Locomotive brake force scaled by its fill ramp.
    pub locomotive_ramped: F,
    /// Fully applied locomotive brake force.
    pub locomotive_full: F,
    /// Sum of wagon block friction forces.
    pub wagons: F,
    /// Running resistance of the wagons.
    pub resistance: F,
}

impl ForceBreakdown {
    pub fn total(&self) -> F {
        self.locomotive_full + (self.locomotive_ramped + self.wagons + self.resistance)
    }
}

/// Time-stepped braking-distance simulator.
pub struct BrakeSimulator<I, Fr, R>
where
    I: Integrator,
    Fr: FrictionLaw,
    R: RunningResistance,
{
    pub integrator: I,
    pub friction: Fr,
    pub resistance: R,
    pub config: StepConfig,
}

impl BrakeSimulator<SemiImplicitEuler, Karwatzki, Strahl> {
    /// Composite blocks, freight wagon resistance, dt = 0.05 s.
    pub fn standard() -> Self {
        Self::new(SemiImplicitEuler, Karwatzki::composite(), Strahl::freight())
    }
}

impl Default for BrakeSimulator<SemiImplicitEuler, Karwatzki, Strahl> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<I, Fr, R> BrakeSimulator<I, Fr, R>
where
    I: Integrator,
    Fr: FrictionLaw,
    R: RunningResistance,
{
    pub fn new(integrator: I, friction: Fr, resistance: R) -> Self {
        Self {
            integrator,
            friction,
            resistance,
            config: StepConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StepConfig) -> Self {
        self.config = config;
        self
    }

    /// Distance in m travelled from brake application to standstill.
    pub fn simulate(&self, scenario: &Scenario) -> Result<F, ScenarioError> {
        self.integrate(scenario, |_| {}).map(|state| state.distance)
    }

    /// Like [`simulate`](Self::simulate) but keeps every intermediate state.
    pub fn trace(&self, scenario: &Scenario) -> Result<Trajectory, ScenarioError> {
        let mut trajectory = Trajectory::new();
        self.integrate(scenario, |state| trajectory.push(*state))?;
        Ok(trajectory)
    }

    /// Forces on `train` at `state`.
    pub fn forces(&self, train: &PreparedTrain<'_>, state: &SimulationState) -> ForceBreakdown {
        let scenario = train.scenario;
        let (t, v) = (state.time, state.speed);

        let loco = &scenario.locomotive;
        let locomotive_ramped = loco.brake_force * fill_fraction(loco.brake_mode, t, loco.fill_time);

        let mut wagons = 0.0;
        for (k, wagon) in scenario.wagons.iter().enumerate() {
            let fill = fill_fraction(wagon.brake_mode, t, train.fill_times[k]);
            let blocks = train.cylinder_forces[k] * fill * wagon.brake_rigging;
            let mu = self.friction.coefficient(v, blocks / wagon.brake_blocks as F);
            wagons += blocks * mu * wagon.friction_efficiency * wagon.friction_correction;
        }

        ForceBreakdown {
            locomotive_ramped,
            locomotive_full: loco.brake_force,
            wagons,
            resistance: self.resistance.force(v, train.wagon_mass),
        }
    }

    /// Deceleration in m/s² of `train` at `state`.
    pub fn deceleration(&self, train: &PreparedTrain<'_>, state: &SimulationState) -> F {
        self.forces(train, state).total() / train.dynamic_mass
    }

    fn integrate(
        &self,
        scenario: &Scenario,
        mut observe: impl FnMut(&SimulationState),
    ) -> Result<SimulationState, ScenarioError> {
        scenario.validate()?;
        self.config.validate()?;
        let train = PreparedTrain::new(scenario);
        let dt = self.config.dt;

        let mut state = SimulationState::initial(scenario.initial_speed);
        observe(&state);

        let mut steps = 0;
        while state.is_moving() {
            if steps >= self.config.max_steps {
                log::warn!(
                    "braking run aborted after {} steps at {:.3} m/s",
                    steps,
                    state.speed
                );
                return Err(ScenarioError::StepLimitExceeded {
                    steps,
                    speed: state.speed,
                    distance: state.distance,
                });
            }
            state = self
                .integrator
                .step(&state, dt, &|s: &SimulationState| self.deceleration(&train, s));
            steps += 1;
            if !(state.speed.is_finite() && state.distance.is_finite()) {
                log::warn!("braking run diverged after {} steps", steps);
                return Err(ScenarioError::Diverged { steps });
            }
            observe(&state);
        }

        log::trace!(
            "stopped after {} steps, t = {:.2} s, s = {:.3} m",
            steps,
            state.time,
            state.distance
        );
        Ok(state)
    }
}
