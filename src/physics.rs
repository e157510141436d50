/*
 * Physics Module
 *
 * This module advances the swarm by one tick. A tick has two passes that
 * never interleave:
 * 1. Steering: every cockroach picks a new heading from a frozen snapshot
 *    of the swarm, so the result does not depend on iteration order
 * 2. Integration: every cockroach moves one step along its new heading
 *
 * Under the rule-based policy the five rules run in their fixed order and
 * each committed candidate overwrites the heading the next rule sees.
 */

use std::f32::consts::TAU;

use nannou::prelude::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::cockroach::{Cockroach, Swarm};
use crate::params::SimulationParams;
use crate::rules::{self, Rule, RuleResult};

/// How cockroaches choose their heading, selected when the simulation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementPolicy {
    // Fresh uniform heading every tick
    RandomWalk,
    // The five steering rules
    #[default]
    RuleBased,
}

impl MovementPolicy {
    pub fn label(self) -> &'static str {
        match self {
            MovementPolicy::RandomWalk => "Random walk",
            MovementPolicy::RuleBased => "Rule based",
        }
    }
}

// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    // Headings committed by each rule, indexed by `Rule::index`
    pub committed: [usize; 5],
    // Rules skipped because their geometry was degenerate
    pub degenerate: usize,
}

impl TickReport {
    pub fn committed_by(&self, rule: Rule) -> usize {
        self.committed[rule.index()]
    }
}

fn evaluate(rule: Rule, snapshot: &[Cockroach], index: usize, heading: f32, light: Option<Vec2>, params: &SimulationParams) -> RuleResult {
    match rule {
        Rule::AntiIsolation => rules::anti_isolation(snapshot, index, heading, params),
        Rule::Mimicry => rules::mimicry(snapshot, index, heading, params),
        Rule::AntiCrowding => rules::anti_crowding(snapshot, index, heading, params),
        Rule::LightAvoidance => rules::light_avoidance(snapshot, index, heading, light, params),
        Rule::BoundaryContainment => rules::boundary_containment(snapshot, index, heading, params),
    }
}

/// Run the five rules for one cockroach and return its new heading.
///
/// A rule with degenerate geometry leaves the heading untouched. The
/// anti-isolation candidate is only committed when `params.commit_cohesion`
/// is set.
pub fn steer_by_rules(
    snapshot: &[Cockroach],
    index: usize,
    light: Option<Vec2>,
    params: &SimulationParams,
    report: &mut TickReport,
) -> f32 {
    let mut heading = snapshot[index].heading;

    for rule in Rule::ORDER {
        match evaluate(rule, snapshot, index, heading, light, params) {
            // Discarded anyway, so a degenerate outcome is not a fallback either
            Ok(Some(_)) | Err(_) if rule == Rule::AntiIsolation && !params.commit_cohesion => {}
            Ok(Some(candidate)) => {
                heading = candidate;
                report.committed[rule.index()] += 1;
            }
            Ok(None) => {}
            Err(error) => {
                report.degenerate += 1;
                debug!(cockroach = index, %error, "keeping previous heading");
            }
        }
    }

    heading
}

/// Advance the whole swarm by one tick.
///
/// `snapshot` is scratch space reused across ticks; once its capacity
/// matches the swarm no allocation happens here.
pub fn update_swarm<R: Rng + ?Sized>(
    swarm: &mut Swarm,
    snapshot: &mut Vec<Cockroach>,
    light: Option<Vec2>,
    params: &SimulationParams,
    policy: MovementPolicy,
    rng: &mut R,
) -> TickReport {
    let mut report = TickReport::default();

    // Freeze the pre-tick state
    snapshot.clear();
    snapshot.extend_from_slice(swarm.as_slice());

    // First pass: headings
    for (i, cockroach) in swarm.as_mut_slice().iter_mut().enumerate() {
        cockroach.heading = match policy {
            MovementPolicy::RandomWalk => rng.gen_range(0.0..TAU),
            MovementPolicy::RuleBased => steer_by_rules(snapshot, i, light, params, &mut report),
        };
    }

    // Second pass: positions
    for cockroach in swarm.as_mut_slice() {
        cockroach.advance();
    }

    trace!(
        policy = policy.label(),
        mimicry = report.committed_by(Rule::Mimicry),
        crowding = report.committed_by(Rule::AntiCrowding),
        light = report.committed_by(Rule::LightAvoidance),
        boundary = report.committed_by(Rule::BoundaryContainment),
        degenerate = report.degenerate,
        "tick"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params_500() -> SimulationParams {
        SimulationParams {
            arena_width: 500.0,
            arena_height: 500.0,
            ..SimulationParams::default()
        }
    }

    fn tick(swarm: &mut Swarm, light: Option<Vec2>, params: &SimulationParams) -> TickReport {
        let mut rng = StdRng::seed_from_u64(0);
        let mut snapshot = Vec::new();
        update_swarm(swarm, &mut snapshot, light, params, MovementPolicy::RuleBased, &mut rng)
    }

    #[test]
    fn tick_is_deterministic_for_a_seed() {
        let params = SimulationParams::default();
        let mut a = Swarm::new(&params, &mut StdRng::seed_from_u64(3));
        let mut b = a.clone();

        for _ in 0..50 {
            tick(&mut a, Some(vec2(400.0, 300.0)), &params);
            tick(&mut b, Some(vec2(400.0, 300.0)), &params);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn headings_come_from_pre_tick_snapshot() {
        let params = params_500();
        let forward = vec![
            Cockroach::new(vec2(250.0, 250.0), 0.0),
            Cockroach::new(vec2(262.0, 250.0), 1.5),
            Cockroach::new(vec2(256.0, 259.0), 3.0),
            Cockroach::new(vec2(252.0, 253.0), 4.0),
        ];
        let reversed: Vec<Cockroach> = forward.iter().rev().copied().collect();
        let mut forward = Swarm::from_cockroaches(forward);
        let mut backward = Swarm::from_cockroaches(reversed);

        tick(&mut forward, None, &params);
        tick(&mut backward, None, &params);

        for (a, b) in forward.iter().zip(backward.iter().rev()) {
            assert!((a.heading - b.heading).abs() < 1e-4);
            assert!(a.position.distance(b.position) < 1e-4);
        }
    }

    #[test]
    fn crowded_cockroach_moves_away() {
        let params = params_500();
        let mut swarm = Swarm::from_cockroaches(vec![
            Cockroach::new(vec2(250.0, 250.0), 0.0),
            Cockroach::new(vec2(253.0, 250.0), std::f32::consts::PI),
        ]);
        let separation = swarm.as_slice()[0].position - swarm.as_slice()[1].position;
        let report = tick(&mut swarm, None, &params);

        let movement = swarm.as_slice()[0].velocity();
        assert!(movement.dot(separation) > 0.0);
        assert_eq!(report.committed_by(Rule::AntiCrowding), 2);
    }

    #[test]
    fn absent_light_never_steers() {
        let params = params_500();
        let mut lit = Swarm::from_cockroaches(vec![Cockroach::new(vec2(250.0, 250.0), 0.0)]);
        let mut dark = lit.clone();

        let report = tick(&mut dark, None, &params);
        assert_eq!(report.committed_by(Rule::LightAvoidance), 0);
        assert_eq!(dark.as_slice()[0].heading, 0.0);

        let report = tick(&mut lit, Some(vec2(260.0, 250.0)), &params);
        assert_eq!(report.committed_by(Rule::LightAvoidance), 1);
        assert!(lit.as_slice()[0].heading.cos() < 0.0);
    }

    #[test]
    fn cohesion_is_discarded_unless_enabled() {
        let mut params = params_500();
        let start = vec![
            Cockroach::new(vec2(100.0, 250.0), 0.0),
            Cockroach::new(vec2(100.0, 350.0), 0.0),
        ];

        let mut swarm = Swarm::from_cockroaches(start.clone());
        let report = tick(&mut swarm, None, &params);
        assert_eq!(report.committed_by(Rule::AntiIsolation), 0);
        assert_eq!(swarm.as_slice()[0].heading, 0.0);

        params.commit_cohesion = true;
        let mut swarm = Swarm::from_cockroaches(start);
        let report = tick(&mut swarm, None, &params);
        assert_eq!(report.committed_by(Rule::AntiIsolation), 2);
        assert!(swarm.as_slice()[0].heading > 0.0);
        assert!(swarm.as_slice()[1].heading < 0.0);
    }

    #[test]
    fn cancelling_cohesion_keeps_heading_when_committed() {
        let mut params = params_500();
        params.commit_cohesion = true;
        // Neighbours outside the mimic horizon, exactly opposite each other
        let start = vec![
            Cockroach::new(vec2(250.0, 250.0), 0.3),
            Cockroach::new(vec2(210.0, 250.0), 0.3),
            Cockroach::new(vec2(290.0, 250.0), 0.3),
        ];

        let mut swarm = Swarm::from_cockroaches(start.clone());
        let report = tick(&mut swarm, None, &params);
        assert_eq!(report.degenerate, 1);
        assert_eq!(report.committed_by(Rule::AntiIsolation), 2);
        assert_eq!(swarm.as_slice()[0].heading, 0.3);

        // Discarded cohesion is not counted as a fallback
        params.commit_cohesion = false;
        let mut swarm = Swarm::from_cockroaches(start);
        let report = tick(&mut swarm, None, &params);
        assert_eq!(report.degenerate, 0);
        assert!(swarm.iter().all(|c| c.heading == 0.3));
    }

    #[test]
    fn degenerate_geometry_keeps_positions_finite() {
        let params = params_500();
        let mut swarm = Swarm::from_cockroaches(vec![
            Cockroach::new(vec2(250.0, 250.0), 0.3),
            Cockroach::new(vec2(250.0, 250.0), 0.3),
            Cockroach::new(vec2(0.0, 0.0), 0.0),
        ]);
        let report = tick(&mut swarm, Some(vec2(250.0, 250.0)), &params);

        assert!(report.degenerate > 0);
        for cockroach in &swarm {
            assert!(cockroach.position.is_finite());
            assert!(cockroach.heading.is_finite());
        }
    }

    #[test]
    fn random_walk_draws_fresh_headings() {
        let params = SimulationParams::default();
        let mut swarm = Swarm::new(&params, &mut StdRng::seed_from_u64(5));
        let before: Vec<f32> = swarm.iter().map(|c| c.heading).collect();

        let mut rng = StdRng::seed_from_u64(6);
        let mut snapshot = Vec::new();
        let report = update_swarm(&mut swarm, &mut snapshot, None, &params, MovementPolicy::RandomWalk, &mut rng);

        assert_eq!(report, TickReport::default());
        let changed = swarm.iter().zip(&before).filter(|(c, h)| c.heading != **h).count();
        assert_eq!(changed, swarm.len());
        assert!(swarm.iter().all(|c| (0.0..TAU).contains(&c.heading)));
    }

    #[test]
    fn swarm_size_survives_many_ticks() {
        let params = SimulationParams::default();
        let mut swarm = Swarm::new(&params, &mut StdRng::seed_from_u64(9));
        for _ in 0..200 {
            tick(&mut swarm, None, &params);
        }
        assert_eq!(swarm.len(), params.swarm_size);
    }
}
