/*
 * Cockroach Swarm Simulation - Module Definitions
 *
 * This file defines the module structure of the simulation. The swarm core
 * (cockroach, rules, physics, food, simulation, params) only borrows Vec2
 * from nannou; the front-end modules (app, input, renderer, ui, debug) own
 * the window and drive the core.
 */

// Re-export key components for easier access
pub use app::Model;
pub use cockroach::{Cockroach, Swarm};
pub use debug::DebugInfo;
pub use food::FoodArea;
pub use params::{ParamsError, SimulationParams};
pub use physics::{MovementPolicy, TickReport};
pub use rules::{Rule, SteeringError};
pub use simulation::{light_from_sentinel, Simulation};

// Define modules
pub mod app;
pub mod cockroach;
pub mod debug;
pub mod food;
pub mod input;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod rules;
pub mod simulation;
pub mod ui;
