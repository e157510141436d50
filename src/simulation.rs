/*
 * Simulation Module
 *
 * The Simulation struct is the explicit context the front-end drives: it
 * owns the swarm, the light, the food areas, the parameter block, the
 * movement policy and the random number generator.
 */

use nannou::prelude::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::cockroach::{Cockroach, Swarm};
use crate::food::{self, FoodArea};
use crate::params::{ParamsError, SimulationParams};
use crate::physics::{self, MovementPolicy, TickReport};

/// Convert sentinel light coordinates into an optional light position.
///
/// The light is present only when both coordinates are non-negative.
pub fn light_from_sentinel(x: f32, y: f32) -> Option<Vec2> {
    if x >= 0.0 && y >= 0.0 {
        Some(vec2(x, y))
    } else {
        None
    }
}

pub struct Simulation {
    params: SimulationParams,
    policy: MovementPolicy,
    swarm: Swarm,
    food_areas: Vec<FoodArea>,
    light: Option<Vec2>,
    rng: StdRng,
    // Reused snapshot buffer for the steering pass
    snapshot: Vec<Cockroach>,
    ticks: u64,
    last_report: TickReport,
}

impl Simulation {
    pub fn new(params: SimulationParams, policy: MovementPolicy) -> Result<Self, ParamsError> {
        Self::from_rng(params, policy, StdRng::from_entropy())
    }

    // Reproducible run
    pub fn with_seed(params: SimulationParams, policy: MovementPolicy, seed: u64) -> Result<Self, ParamsError> {
        Self::from_rng(params, policy, StdRng::seed_from_u64(seed))
    }

    fn from_rng(params: SimulationParams, policy: MovementPolicy, mut rng: StdRng) -> Result<Self, ParamsError> {
        params.validate()?;

        let swarm = Swarm::new(&params, &mut rng);
        let food_count = food::random_food_count(&params, &mut rng);
        let food_areas = food::place_food_areas(food_count, &params, &mut rng);

        info!(
            cockroaches = swarm.len(),
            food_areas = food_areas.len(),
            policy = policy.label(),
            "simulation initialised"
        );

        Ok(Self {
            snapshot: Vec::with_capacity(swarm.len()),
            params,
            policy,
            swarm,
            food_areas,
            light: None,
            rng,
            ticks: 0,
            last_report: TickReport::default(),
        })
    }

    /// Advance one tick with the stored light.
    pub fn tick(&mut self) -> TickReport {
        let report = physics::update_swarm(
            &mut self.swarm,
            &mut self.snapshot,
            self.light,
            &self.params,
            self.policy,
            &mut self.rng,
        );
        self.ticks += 1;
        self.last_report = report;
        report
    }

    /// Set the light from sentinel coordinates, then advance one tick.
    pub fn update_with_sentinel(&mut self, light_x: f32, light_y: f32) -> TickReport {
        self.light = light_from_sentinel(light_x, light_y);
        self.tick()
    }

    /// Discard the swarm and spawn a fresh one of the configured size.
    ///
    /// Food areas are kept.
    pub fn reset(&mut self) {
        // Built aside, then swapped in with a single assignment
        let swarm = Swarm::new(&self.params, &mut self.rng);
        self.swarm = swarm;
        self.ticks = 0;
        self.last_report = TickReport::default();
        info!(cockroaches = self.swarm.len(), "swarm reset");
    }

    pub fn set_light(&mut self, light: Option<Vec2>) {
        self.light = light;
    }

    pub fn light(&self) -> Option<Vec2> {
        self.light
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn food_areas(&self) -> &[FoodArea] {
        &self.food_areas
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn policy(&self) -> MovementPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MovementPolicy) {
        if policy != self.policy {
            info!(policy = policy.label(), "movement policy changed");
            self.policy = policy;
        }
    }

    pub fn set_commit_cohesion(&mut self, commit: bool) {
        self.params.commit_cohesion = commit;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }
}
