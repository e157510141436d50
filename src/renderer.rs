/*
 * Renderer Module
 *
 * This module draws one frame: white background, food areas as green
 * disks, the light as a yellow disk while the button is held, then every
 * cockroach as a small black point. The egui panel goes on top.
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::params::SimulationParams;

// Sectors used to draw a disk
pub const CIRCLE_STEPS: usize = 16;
// Side of the square drawn for one cockroach
const COCKROACH_SIZE: f32 = 2.0;

const FOOD_COLOR: (u8, u8, u8) = (51, 102, 0);
const LIGHT_COLOR: (u8, u8, u8) = (255, 235, 0);

pub fn arena_to_screen(pos: Vec2, params: &SimulationParams) -> Vec2 {
    let (cx, cy) = params.arena_center();
    vec2(pos.x - cx, pos.y - cy)
}

// Vertices of a disk approximated by CIRCLE_STEPS sectors
pub fn circle_points(center: Vec2, radius: f32) -> [Vec2; CIRCLE_STEPS] {
    std::array::from_fn(|index| {
        let angle = TAU * index as f32 / CIRCLE_STEPS as f32;
        center + vec2(angle.cos(), angle.sin()) * radius
    })
}

// The disk follows the held pointer, even where the sentinel switches the
// steering light off
pub fn light_disk_center(light_held: bool, pointer: Vec2) -> Option<Vec2> {
    light_held.then_some(pointer)
}

fn disk(draw: &Draw, center: Vec2, radius: f32, (r, g, b): (u8, u8, u8)) {
    draw.polygon()
        .color(rgb(r, g, b))
        .points(circle_points(center, radius));
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let simulation = &model.simulation;
    let params = simulation.params();

    draw.background().color(WHITE);

    for area in simulation.food_areas() {
        disk(&draw, arena_to_screen(area.position, params), area.radius, FOOD_COLOR);
    }

    if let Some(center) = light_disk_center(model.light_held, model.mouse_position) {
        disk(&draw, arena_to_screen(center, params), params.light_bubble, LIGHT_COLOR);
    }

    for position in simulation.swarm().positions() {
        draw.rect()
            .xy(arena_to_screen(position, params))
            .w_h(COCKROACH_SIZE, COCKROACH_SIZE)
            .color(BLACK);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(error = ?err, "failed to draw the swarm");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(error = ?err, "failed to draw the control panel");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_points_lie_on_the_circle() {
        let center = vec2(40.0, -10.0);
        let points = circle_points(center, 50.0);
        assert_eq!(points.len(), 16);
        assert!((points[0] - vec2(90.0, -10.0)).length() < 1e-4);
        for point in points {
            assert!((point.distance(center) - 50.0).abs() < 1e-3);
        }
    }

    #[test]
    fn light_disk_tracks_held_pointer_outside_arena() {
        let params = SimulationParams::default();
        let below_left = crate::input::screen_to_arena(vec2(-420.0, -310.0), &params);
        assert!(below_left.x < 0.0 && below_left.y < 0.0);

        assert_eq!(light_disk_center(true, below_left), Some(below_left));
        assert_eq!(light_disk_center(true, vec2(-5.0, 120.0)), Some(vec2(-5.0, 120.0)));
        assert_eq!(light_disk_center(false, vec2(300.0, 200.0)), None);
        // Steering still sees no light there
        assert_eq!(crate::simulation::light_from_sentinel(below_left.x, below_left.y), None);
    }

    #[test]
    fn arena_and_screen_round_trip() {
        let params = SimulationParams::default();
        let pos = vec2(123.0, 456.0);
        let back = crate::input::screen_to_arena(arena_to_screen(pos, &params), &params);
        assert!(back.distance(pos) < 1e-4);
    }
}
