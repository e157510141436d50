/*
 * Steering Rules Module
 *
 * The five neighbour rules a cockroach follows, each evaluated against a
 * frozen snapshot of the swarm:
 * 1. Anti-isolation: drift toward the neighbours within the horizon
 * 2. Mimicry: copy the heading of close neighbours
 * 3. Anti-crowding: escape the nearest neighbour inside the bubble
 * 4. Light avoidance: flee the light when it is close
 * 5. Boundary containment: turn back near the edges of the box
 *
 * Every rule blends a proposed direction with the current velocity
 * (`w * proposal + (1 - w) * velocity`) and yields a candidate heading.
 * A rule never writes the heading itself; the engine decides what to commit.
 */

use std::fmt;

use nannou::prelude::{vec2, Vec2};
use thiserror::Error;

use crate::cockroach::Cockroach;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    AntiIsolation,
    Mimicry,
    AntiCrowding,
    LightAvoidance,
    BoundaryContainment,
}

impl Rule {
    // Evaluation order; a later rule overwrites the heading of an earlier one
    pub const ORDER: [Rule; 5] = [
        Rule::AntiIsolation,
        Rule::Mimicry,
        Rule::AntiCrowding,
        Rule::LightAvoidance,
        Rule::BoundaryContainment,
    ];

    pub fn index(self) -> usize {
        match self {
            Rule::AntiIsolation => 0,
            Rule::Mimicry => 1,
            Rule::AntiCrowding => 2,
            Rule::LightAvoidance => 3,
            Rule::BoundaryContainment => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::AntiIsolation => "anti-isolation",
            Rule::Mimicry => "mimicry",
            Rule::AntiCrowding => "anti-crowding",
            Rule::LightAvoidance => "light avoidance",
            Rule::BoundaryContainment => "boundary containment",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule could not produce a direction: a zero-length vector had to be
/// normalized, two points coincided, or the blend was not finite.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SteeringError {
    #[error("degenerate geometry in the {rule} rule")]
    DegenerateGeometry { rule: Rule },
}

/// `Ok(None)` when the rule does not apply, `Ok(Some(heading))` otherwise.
pub type RuleResult = Result<Option<f32>, SteeringError>;

// Mix a unit proposal with the current velocity
#[inline]
fn blend(proposal: Vec2, velocity: Vec2, weight: f32) -> Vec2 {
    proposal * weight + velocity * (1.0 - weight)
}

#[inline]
fn unit(rule: Rule, v: Vec2) -> Result<Vec2, SteeringError> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Ok(v / length)
    } else {
        Err(SteeringError::DegenerateGeometry { rule })
    }
}

#[inline]
fn heading_of(rule: Rule, sum: Vec2) -> RuleResult {
    if sum.is_finite() {
        Ok(Some(sum.y.atan2(sum.x)))
    } else {
        Err(SteeringError::DegenerateGeometry { rule })
    }
}

// Inverse-distance weight d^(-1/power); undefined for coincident points
#[inline]
fn distance_weight(rule: Rule, distance: f32, params: &SimulationParams) -> Result<f32, SteeringError> {
    if distance > 0.0 {
        Ok(distance.powf(-1.0 / params.power_for_weights))
    } else {
        Err(SteeringError::DegenerateGeometry { rule })
    }
}

/// Rule 1: steer toward the weighted neighbours within `horizon`.
pub fn anti_isolation(snapshot: &[Cockroach], index: usize, heading: f32, params: &SimulationParams) -> RuleResult {
    let rule = Rule::AntiIsolation;
    let me = &snapshot[index];

    let mut sum = Vec2::ZERO;
    let mut neighbors = 0;
    for (n, other) in snapshot.iter().enumerate() {
        if n == index {
            continue;
        }
        let delta = other.position - me.position;
        let distance = delta.length();
        if distance < params.horizon {
            sum += delta * distance_weight(rule, distance, params)?;
            neighbors += 1;
        }
    }

    if neighbors == 0 {
        return Ok(None);
    }
    let proposal = unit(rule, sum)?;
    heading_of(rule, blend(proposal, me.velocity_for(heading), params.weight_of_neighbors))
}

/// Rule 2: align with the weighted velocities of neighbours within `mimic_horizon`.
pub fn mimicry(snapshot: &[Cockroach], index: usize, heading: f32, params: &SimulationParams) -> RuleResult {
    let rule = Rule::Mimicry;
    let me = &snapshot[index];

    let mut sum = Vec2::ZERO;
    let mut models = 0;
    for (n, other) in snapshot.iter().enumerate() {
        if n == index {
            continue;
        }
        let distance = other.position.distance(me.position);
        if distance < params.mimic_horizon {
            sum += other.velocity() * distance_weight(rule, distance, params)?;
            models += 1;
        }
    }

    if models == 0 {
        return Ok(None);
    }
    let proposal = unit(rule, sum)?;
    heading_of(rule, blend(proposal, me.velocity_for(heading), params.weight_of_mimic))
}

/// Rule 3: escape the single nearest neighbour strictly inside `bubble`.
pub fn anti_crowding(snapshot: &[Cockroach], index: usize, heading: f32, params: &SimulationParams) -> RuleResult {
    let rule = Rule::AntiCrowding;
    let me = &snapshot[index];

    let mut closest: Option<(Vec2, f32)> = None;
    for (n, other) in snapshot.iter().enumerate() {
        if n == index {
            continue;
        }
        let delta = other.position - me.position;
        let distance = delta.length();
        let closer = closest.map_or(true, |(_, best)| distance < best);
        if distance < params.bubble && closer {
            closest = Some((delta, distance));
        }
    }

    let Some((delta, distance)) = closest else {
        return Ok(None);
    };
    if distance <= 0.0 {
        return Err(SteeringError::DegenerateGeometry { rule });
    }
    let away = -delta / distance;
    heading_of(rule, blend(away, me.velocity_for(heading), params.weight_of_escape))
}

/// Rule 4: flee the light when it is strictly inside `light_bubble`.
pub fn light_avoidance(
    snapshot: &[Cockroach],
    index: usize,
    heading: f32,
    light: Option<Vec2>,
    params: &SimulationParams,
) -> RuleResult {
    let rule = Rule::LightAvoidance;
    let Some(light) = light else {
        return Ok(None);
    };
    let me = &snapshot[index];

    let delta = light - me.position;
    let distance = delta.length();
    if distance >= params.light_bubble {
        return Ok(None);
    }
    if distance <= 0.0 {
        return Err(SteeringError::DegenerateGeometry { rule });
    }
    let away = -delta / distance;
    heading_of(rule, blend(away, me.velocity_for(heading), params.weight_of_light_escape))
}

/// Rule 5: turn back when closer than `min_distance_from_box_edges` to an edge.
///
/// The corrective term divides by the cockroach's own coordinate, so the
/// pull weakens as the coordinate grows and blows up at zero. That case is
/// reported as degenerate. Axes that are not violated contribute `-0.0`.
pub fn boundary_containment(snapshot: &[Cockroach], index: usize, heading: f32, params: &SimulationParams) -> RuleResult {
    let rule = Rule::BoundaryContainment;
    let me = &snapshot[index];
    let velocity = me.velocity_for(heading);
    let margin = params.min_distance_from_box_edges;
    let escape = params.weight_of_escape;
    let (width, height) = (params.arena_width, params.arena_height);
    let (x, y) = (me.position.x, me.position.y);

    let mut too_close = false;
    let mut sum = vec2(-0.0, -0.0);

    let delta_x = width - x;
    if delta_x < margin {
        too_close = true;
        sum.x = (margin - x) / x * escape + (1.0 - escape) * velocity.x;
    } else if delta_x > width - margin {
        too_close = true;
        sum.x = ((width - margin) - x) / x * escape + (1.0 - escape) * velocity.x;
    }

    let delta_y = height - y;
    if delta_y < margin {
        too_close = true;
        sum.y = (margin - y) / y * escape + (1.0 - escape) * velocity.y;
    } else if delta_y > height - margin {
        too_close = true;
        sum.y = ((height - margin) - y) / y * escape + (1.0 - escape) * velocity.y;
    }

    if !too_close {
        return Ok(None);
    }
    heading_of(rule, sum)
}
