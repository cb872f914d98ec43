//! Planet set and its force field on particles
//!
//! A planet with a (near) zero direction attracts everything. A planet with a
//! direction splits space in two: particles on the side the direction points
//! toward are pushed away, particles on the other side are pulled in. This
//! keeps particles getting flung past clusters of planets instead of orbiting
//! them chaotically.
//!
//! The field is `sign · delta · mass / (|delta|² + ε)` with the raw,
//! unnormalized `delta`, so it falls off like `1/r` and stays bounded at the
//! planet's centre. It is not Newtonian gravity.

use glam::Vec2;

use super::particles::Particles;
use crate::consts::{FIELD_SOFTENING, SYMMETRIC_DIRECTION_EPS};
use crate::error::{SimResult, alloc_filled, alloc_slots};

/// Whether a planet direction counts as omnidirectional
#[inline]
pub fn is_symmetric(direction: Vec2) -> bool {
    direction.length_squared() < SYMMETRIC_DIRECTION_EPS
}

/// Polarity of a planet's field at offset `delta` (particle - planet).
///
/// `-1` attracts, `+1` repels.
#[inline]
pub fn field_sign(delta: Vec2, direction: Vec2) -> f32 {
    if is_symmetric(direction) {
        -1.0
    } else {
        1.0_f32.copysign(delta.dot(direction))
    }
}

/// Force a single planet exerts on a unit particle at offset `delta`
#[inline]
pub fn field_force(delta: Vec2, direction: Vec2, mass: f32) -> Vec2 {
    let sign = field_sign(delta, direction);
    delta * (sign * (mass / (delta.length_squared() + FIELD_SOFTENING)))
}

/// Gravity-well planets as a fixed-capacity structure-of-arrays
#[derive(Debug, Clone)]
pub struct Planets {
    positions: Vec<Vec2>,
    directions: Vec<Vec2>,
    masses: Vec<f32>,
    ages: Vec<f32>,
    len: usize,
}

impl Planets {
    /// Allocate storage for `capacity` planets
    pub fn new(capacity: usize) -> SimResult<Self> {
        let planets = Self {
            positions: alloc_slots("planet", capacity)?,
            directions: alloc_slots("planet", capacity)?,
            masses: alloc_filled("planet", capacity, 0.0)?,
            ages: alloc_filled("planet", capacity, 0.0)?,
            len: 0,
        };
        log::debug!("Planet storage allocated for {} planets", capacity);
        Ok(planets)
    }

    /// Place a new planet. Returns its slot, or `None` when full.
    pub fn spawn_at(&mut self, position: Vec2, direction: Vec2, mass: f32) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let i = self.len;
        self.positions[i] = position;
        self.directions[i] = direction;
        self.masses[i] = mass;
        self.ages[i] = 0.0;
        self.len += 1;
        Some(i)
    }

    /// Move a live planet. Returns `false` if `index` is not live.
    pub fn move_to(&mut self, index: usize, position: Vec2) -> bool {
        match self.positions[..self.len].get_mut(index) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Advance every live planet's age (drives cosmetic pulsing only)
    pub fn age(&mut self, dt: f32) {
        for age in &mut self.ages[..self.len] {
            *age += dt;
        }
    }

    /// Add every planet's pull or push into each live particle's force
    pub fn apply_to_particles(&self, particles: &mut Particles) {
        let n = self.len;
        let planets = self.positions[..n]
            .iter()
            .zip(&self.directions[..n])
            .zip(&self.masses[..n]);

        let (positions, forces) = particles.positions_and_forces_mut();
        for (pos, force) in positions.iter().zip(forces.iter_mut()) {
            for ((planet, direction), mass) in planets.clone() {
                *force += field_force(*pos - *planet, *direction, *mass);
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions[..self.len]
    }

    #[inline]
    pub fn directions(&self) -> &[Vec2] {
        &self.directions[..self.len]
    }

    #[inline]
    pub fn masses(&self) -> &[f32] {
        &self.masses[..self.len]
    }

    #[inline]
    pub fn ages(&self) -> &[f32] {
        &self.ages[..self.len]
    }
}
