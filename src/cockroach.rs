/*
 * Cockroach Module
 *
 * This module defines the Cockroach struct (one swarm member) and the Swarm
 * container. A cockroach moves at a constant step length; its heading is
 * the only state the steering rules change.
 */

use std::f32::consts::TAU;

use nannou::prelude::{vec2, Vec2};
use rand::Rng;

use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cockroach {
    pub position: Vec2,
    pub speed: f32,
    pub heading: f32,
}

impl Cockroach {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            speed: 1.0,
            heading,
        }
    }

    // Velocity for a given heading, at this cockroach's speed
    #[inline]
    pub fn velocity_for(&self, heading: f32) -> Vec2 {
        vec2(heading.cos(), heading.sin()) * self.speed
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity_for(self.heading)
    }

    // Move one step along the current heading
    pub fn advance(&mut self) {
        self.position += self.velocity();
    }
}

/// Fixed-size, ordered collection of cockroaches.
///
/// The length never changes after construction; a reset builds a new swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Swarm {
    cockroaches: Vec<Cockroach>,
}

impl Swarm {
    /// Spawn `params.swarm_size` cockroaches area-uniformly inside the disk of
    /// radius `min(width, height) / 2` centred on the arena, with unit speed
    /// and a uniform heading in `[0, 2π)`.
    pub fn new<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> Self {
        let (center_x, center_y) = params.arena_center();
        let max_radius = params.spawn_radius();

        let cockroaches = (0..params.swarm_size)
            .map(|_| {
                let theta = rng.gen_range(0.0..TAU);
                // sqrt keeps the density uniform over the disk area
                let rho = (rng.gen::<f32>() * max_radius * max_radius).sqrt();
                let position = vec2(center_x + theta.cos() * rho, center_y + theta.sin() * rho);
                Cockroach::new(position, rng.gen_range(0.0..TAU))
            })
            .collect();

        Self { cockroaches }
    }

    pub fn from_cockroaches(cockroaches: Vec<Cockroach>) -> Self {
        Self { cockroaches }
    }

    pub fn len(&self) -> usize {
        self.cockroaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cockroaches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cockroach> {
        self.cockroaches.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cockroach> {
        self.cockroaches.iter()
    }

    pub fn as_slice(&self) -> &[Cockroach] {
        &self.cockroaches
    }

    // Positions only, for renderers
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cockroaches.iter().map(|cockroach| cockroach.position)
    }

    // Mutable access stays inside the crate so the length cannot change
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Cockroach] {
        &mut self.cockroaches
    }
}

impl<'a> IntoIterator for &'a Swarm {
    type Item = &'a Cockroach;
    type IntoIter = std::slice::Iter<'a, Cockroach>;

    fn into_iter(self) -> Self::IntoIter {
        self.cockroaches.iter()
    }
}
