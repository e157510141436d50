/*
 * Food Module
 *
 * Food areas are static disks laid out once when the simulation starts.
 * They are drawn but no steering rule reacts to them yet.
 */

use nannou::prelude::{vec2, Vec2};
use rand::Rng;
use tracing::warn;

use crate::params::SimulationParams;

// Redraws allowed per area before an overlapping candidate is accepted
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodArea {
    pub position: Vec2,
    pub radius: f32,
}

impl FoodArea {
    pub fn overlaps(&self, other: &FoodArea) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }
}

// Number of food areas for a run, uniform in [1, max_food_areas]
pub fn random_food_count<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> usize {
    rng.gen_range(1..=params.max_food_areas.max(1))
}

/// Place `count` food areas fully inside the arena, redrawing candidates
/// that overlap an area already placed.
pub fn place_food_areas<R: Rng + ?Sized>(count: usize, params: &SimulationParams, rng: &mut R) -> Vec<FoodArea> {
    let radius = params.food_bubble;
    let mut areas: Vec<FoodArea> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut candidate = random_area(radius, params, rng);
        let mut attempts = 1;
        while areas.iter().any(|area| area.overlaps(&candidate)) {
            if attempts == MAX_PLACEMENT_ATTEMPTS {
                warn!(attempts, placed = areas.len(), "food area overlaps, keeping it anyway");
                break;
            }
            candidate = random_area(radius, params, rng);
            attempts += 1;
        }
        areas.push(candidate);
    }

    areas
}

fn random_area<R: Rng + ?Sized>(radius: f32, params: &SimulationParams, rng: &mut R) -> FoodArea {
    // Clamp the range to the centre line when the disk is wider than the arena
    let axis = |rng: &mut R, extent: f32| {
        if extent > 2.0 * radius {
            rng.gen_range(radius..extent - radius)
        } else {
            extent / 2.0
        }
    };
    let x = axis(rng, params.arena_width);
    let y = axis(rng, params.arena_height);
    FoodArea {
        position: vec2(x, y),
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn food_count_stays_in_range() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let count = random_food_count(&params, &mut rng);
            assert!((1..=4).contains(&count));
            seen[count] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn food_areas_fit_the_arena_without_overlap() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(2);
        let areas = place_food_areas(4, &params, &mut rng);

        assert_eq!(areas.len(), 4);
        for (i, area) in areas.iter().enumerate() {
            assert_eq!(area.radius, params.food_bubble);
            assert!(area.position.x >= area.radius && area.position.x <= params.arena_width - area.radius);
            assert!(area.position.y >= area.radius && area.position.y <= params.arena_height - area.radius);
            for other in &areas[i + 1..] {
                assert!(!area.overlaps(other));
            }
        }
    }

    #[test]
    fn crowded_arena_still_returns_every_area() {
        let params = SimulationParams {
            arena_width: 120.0,
            arena_height: 120.0,
            ..SimulationParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let areas = place_food_areas(4, &params, &mut rng);
        assert_eq!(areas.len(), 4);
    }
}
