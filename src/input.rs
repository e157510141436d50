/*
 * Input Module
 *
 * This module handles user input for the swarm simulation:
 * - Left button held: the light follows the pointer
 * - Q quits, R resets the swarm
 * - Raw events are forwarded to egui
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::params::SimulationParams;
use crate::simulation::light_from_sentinel;

// nannou puts the origin at the window centre with y up; the arena starts
// at its bottom-left corner
pub fn screen_to_arena(pos: Vec2, params: &SimulationParams) -> Vec2 {
    let (cx, cy) = params.arena_center();
    vec2(pos.x + cx, pos.y + cy)
}

// Light position for the current pointer, absent when outside the arena
fn pointer_light(model: &Model) -> Option<Vec2> {
    let pos = model.mouse_position;
    light_from_sentinel(pos.x, pos.y)
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = screen_to_arena(pos, model.simulation.params());

    if model.light_held {
        let light = pointer_light(model);
        model.simulation.set_light(light);
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        // Clicks on the panel do not switch the light on
        if !model.egui.ctx().is_pointer_over_area() {
            model.light_held = true;
            let light = pointer_light(model);
            model.simulation.set_light(light);
        }
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.light_held = false;
        model.simulation.set_light(None);
    }
}

// Keyboard commands
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Q => app.quit(),
        Key::R => {
            model.simulation.reset();
            model.tick_accumulator = std::time::Duration::ZERO;
        }
        _ => {}
    }
}

// Forward raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
