/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds the single
 * configuration block of the swarm: neighbour horizons, mix ratios, swarm
 * size, arena dimensions and tick cadence. The defaults below are the
 * tuned constants; the UI may flip a few runtime switches but never the
 * geometry.
 */

use std::time::Duration;
use thiserror::Error;

// Default constants
pub const POWER_FOR_WEIGHTS: f32 = 3.0;
pub const HORIZON: f32 = 300.0;
pub const WEIGHT_OF_NEIGHBORS: f32 = 0.1;
pub const BUBBLE: f32 = 5.0;
pub const WEIGHT_OF_ESCAPE: f32 = 0.8;
pub const WEIGHT_OF_MIMIC: f32 = 0.3;
pub const MIMIC_HORIZON: f32 = 30.0;
pub const LIGHT_BUBBLE: f32 = 100.0;
pub const FOOD_BUBBLE: f32 = 50.0;
pub const MAX_FOOD_AREAS: usize = 4;
pub const WEIGHT_OF_LIGHT_ESCAPE: f32 = 0.8;
pub const MIN_DISTANCE_FROM_BOX_EDGES: f32 = 10.0;
pub const SWARM_SIZE: usize = 30;
pub const TICK_INTERVAL_MS: u64 = 20;
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// Errors raised when validating a parameter block.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("arena must have positive dimensions, got {width}x{height}")]
    EmptyArena { width: f32, height: f32 },
    #[error("swarm size must be at least 1")]
    EmptySwarm,
    #[error("{name} must lie in [0, 1], got {value}")]
    MixRatioOutOfRange { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("at least one food area must be allowed")]
    NoFoodAreas,
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

// Parameters for the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    // Influence of distance on neighbour weights: weight = d^(-1/power)
    pub power_for_weights: f32,
    // Cohesion horizon and mix ratio
    pub horizon: f32,
    pub weight_of_neighbors: f32,
    // Minimal distance between cockroaches and the escape mix ratio
    // (the escape ratio is shared with boundary containment)
    pub bubble: f32,
    pub weight_of_escape: f32,
    // Mimicry horizon and mix ratio
    pub mimic_horizon: f32,
    pub weight_of_mimic: f32,
    // Light avoidance
    pub light_bubble: f32,
    pub weight_of_light_escape: f32,
    // Food areas (display only)
    pub food_bubble: f32,
    pub max_food_areas: usize,
    // Arena
    pub arena_width: f32,
    pub arena_height: f32,
    pub min_distance_from_box_edges: f32,
    // Swarm and cadence
    pub swarm_size: usize,
    pub tick_interval_ms: u64,
    // Whether the anti-isolation rule commits its heading. When off the rule
    // is still evaluated every tick but its candidate is discarded.
    pub commit_cohesion: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            power_for_weights: POWER_FOR_WEIGHTS,
            horizon: HORIZON,
            weight_of_neighbors: WEIGHT_OF_NEIGHBORS,
            bubble: BUBBLE,
            weight_of_escape: WEIGHT_OF_ESCAPE,
            mimic_horizon: MIMIC_HORIZON,
            weight_of_mimic: WEIGHT_OF_MIMIC,
            light_bubble: LIGHT_BUBBLE,
            weight_of_light_escape: WEIGHT_OF_LIGHT_ESCAPE,
            food_bubble: FOOD_BUBBLE,
            max_food_areas: MAX_FOOD_AREAS,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_distance_from_box_edges: MIN_DISTANCE_FROM_BOX_EDGES,
            swarm_size: SWARM_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            commit_cohesion: false,
        }
    }
}

impl SimulationParams {
    // Check the block before any swarm is built from it
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ParamsError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.swarm_size == 0 {
            return Err(ParamsError::EmptySwarm);
        }
        if self.max_food_areas == 0 {
            return Err(ParamsError::NoFoodAreas);
        }
        if self.tick_interval_ms == 0 {
            return Err(ParamsError::ZeroTickInterval);
        }

        let ratios = [
            ("weight_of_neighbors", self.weight_of_neighbors),
            ("weight_of_escape", self.weight_of_escape),
            ("weight_of_mimic", self.weight_of_mimic),
            ("weight_of_light_escape", self.weight_of_light_escape),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::MixRatioOutOfRange { name, value });
            }
        }

        let positives = [
            ("power_for_weights", self.power_for_weights),
            ("horizon", self.horizon),
            ("bubble", self.bubble),
            ("mimic_horizon", self.mimic_horizon),
            ("light_bubble", self.light_bubble),
            ("food_bubble", self.food_bubble),
            ("min_distance_from_box_edges", self.min_distance_from_box_edges),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        Ok(())
    }

    // Centre of the arena in window coordinates
    pub fn arena_center(&self) -> (f32, f32) {
        (self.arena_width * 0.5, self.arena_height * 0.5)
    }

    // Radius of the disk agents are spawned in
    pub fn spawn_radius(&self) -> f32 {
        f32::min(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
