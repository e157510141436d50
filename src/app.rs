/*
 * Application Module
 *
 * This module defines the nannou model that wraps a Simulation and drives
 * it. The simulation advances on a fixed tick interval with an accumulator,
 * independent of how often frames are rendered.
 */

use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::physics::MovementPolicy;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui::{self, Controls};

// Catch-up limit after a stall, so one slow frame cannot snowball
const MAX_TICKS_PER_FRAME: usize = 5;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    pub controls: Controls,
    pub debug_info: DebugInfo,
    // Pointer position in arena coordinates
    pub mouse_position: Vec2,
    pub light_held: bool,
    // Fixed tick cadence
    pub tick_accumulator: Duration,
    pub last_update_time: Instant,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();
    let policy = MovementPolicy::default();
    let controls = Controls::new(policy, params.commit_cohesion);

    // The window is the arena
    let window_id = app
        .new_window()
        .title("Cockroach Swarm")
        .size(params.arena_width as u32, params.arena_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build the window");

    let window = app.window(window_id).expect("Window vanished right after creation");
    let egui = Egui::from_window(&window);

    // main() validates the same default block before the app starts
    let simulation = Simulation::new(params, policy).expect("Default parameters are valid");

    Model {
        simulation,
        egui,
        controls,
        debug_info: DebugInfo::default(),
        mouse_position: Vec2::ZERO,
        light_held: false,
        tick_accumulator: Duration::ZERO,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let should_reset = ui::update_ui(
        &mut model.egui,
        &mut model.controls,
        &model.debug_info,
        model.simulation.swarm().len(),
    );

    // Push the panel switches into the simulation
    model.simulation.set_policy(model.controls.policy);
    model.simulation.set_commit_cohesion(model.controls.commit_cohesion);

    if should_reset {
        model.simulation.reset();
        model.tick_accumulator = Duration::ZERO;
    }

    let now = Instant::now();
    let elapsed = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    let ticks = if model.controls.paused {
        model.tick_accumulator = Duration::ZERO;
        0
    } else {
        model.tick_accumulator += elapsed;
        run_due_ticks(model)
    };

    model.debug_info.light_on = model.simulation.light().is_some();
    model.debug_info.record_ticks(ticks, model.simulation.ticks(), model.simulation.last_report());
}

// Run every tick the accumulator holds, up to the per-frame cap
fn run_due_ticks(model: &mut Model) -> usize {
    let step = model.simulation.params().tick_interval();
    let mut ticks = 0;

    while model.tick_accumulator >= step {
        if ticks == MAX_TICKS_PER_FRAME {
            // Drop the backlog rather than fast-forwarding the swarm
            model.tick_accumulator = Duration::ZERO;
            break;
        }
        model.simulation.tick();
        model.tick_accumulator -= step;
        ticks += 1;
    }

    ticks
}
