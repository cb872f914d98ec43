//! Level layout and particle spawning helpers

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::BOUNDARY_LIMIT;
use crate::sim::{Environment, Particles};

/// Add the default level: four arena walls and three interior ledges.
///
/// Returns how many boundaries the environment accepted.
pub fn build_default_level(env: &mut Environment) -> usize {
    const L: f32 = BOUNDARY_LIMIT;
    let segments = [
        // Arena walls: bottom, right, top, left
        (Vec2::new(-L, -L), Vec2::new(L, -L)),
        (Vec2::new(L, -L), Vec2::new(L, L)),
        (Vec2::new(-L, L), Vec2::new(L, L)),
        (Vec2::new(-L, -L), Vec2::new(-L, L)),
        // Ledges
        (Vec2::new(-0.5 * L, 0.5 * L), Vec2::new(L, 0.5 * L)),
        (Vec2::new(-L, -0.5 * L), Vec2::new(0.5 * L, -0.5 * L)),
        (Vec2::new(-0.2 * L, -0.2 * L), Vec2::new(0.2 * L, 0.2 * L)),
    ];

    let mut added = 0;
    for (tail, head) in segments {
        if env.add_boundary(tail, head).is_some() {
            added += 1;
        }
    }
    log::info!("Default level built: {} of {} boundaries", added, segments.len());
    added
}

/// Spawns bursts of particles jittered around a point.
///
/// Seeded, so a given seed always produces the same sequence of positions.
#[derive(Debug, Clone)]
pub struct Spewer {
    rng: Pcg32,
    /// Half-side of the square particles are scattered in
    pub spread: f32,
}

impl Spewer {
    pub fn new(seed: u64, spread: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            spread,
        }
    }

    /// Next jittered position around `center`
    pub fn next_position(&mut self, center: Vec2) -> Vec2 {
        if self.spread <= 0.0 {
            return center;
        }
        let jitter = Vec2::new(
            self.rng.random_range(-self.spread..self.spread),
            self.rng.random_range(-self.spread..self.spread),
        );
        center + jitter
    }

    /// Spawn up to `count` particles around `center`.
    ///
    /// Stops at the first rejected spawn and returns how many were placed.
    pub fn spew(&mut self, particles: &mut Particles, center: Vec2, count: usize) -> usize {
        for placed in 0..count {
            let position = self.next_position(center);
            if particles.spawn_at(position).is_none() {
                return placed;
            }
        }
        count
    }
}
