//! Particle set: fixed-capacity structure-of-arrays
//!
//! Slots `[0, len)` are live. Storage for every slot is allocated once up
//! front; spawning writes into the next free slot and `clear` simply resets
//! the live count, so stale data beyond `len` is never exposed.

use glam::Vec2;

use crate::consts::{BOUNDARY_LIMIT, DEFAULT_MAX_VELOCITY};
use crate::error::{SimResult, alloc_slots};

/// Point particles with unit mass
#[derive(Debug, Clone)]
pub struct Particles {
    positions: Vec<Vec2>,
    positions_previous: Vec<Vec2>,
    velocities: Vec<Vec2>,
    velocities_previous: Vec<Vec2>,
    forces: Vec<Vec2>,
    len: usize,
    /// Per-axis velocity limit applied after collision response
    pub max_velocity: f32,
}

impl Particles {
    /// Allocate storage for `capacity` particles
    pub fn new(capacity: usize) -> SimResult<Self> {
        let particles = Self {
            positions: alloc_slots("particle", capacity)?,
            positions_previous: alloc_slots("particle", capacity)?,
            velocities: alloc_slots("particle", capacity)?,
            velocities_previous: alloc_slots("particle", capacity)?,
            forces: alloc_slots("particle", capacity)?,
            len: 0,
            max_velocity: DEFAULT_MAX_VELOCITY,
        };
        log::debug!("Particle storage allocated for {} particles", capacity);
        Ok(particles)
    }

    /// Spawn a resting particle at `position`.
    ///
    /// Returns the slot index, or `None` (leaving every slot untouched) when
    /// the set is already full.
    pub fn spawn_at(&mut self, position: Vec2) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let i = self.len;
        self.positions[i] = position;
        self.positions_previous[i] = position;
        self.velocities[i] = Vec2::ZERO;
        self.velocities_previous[i] = Vec2::ZERO;
        self.forces[i] = Vec2::ZERO;
        self.len += 1;
        Some(i)
    }

    /// Drop every live particle
    pub fn clear(&mut self) {
        self.len = 0;
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
    pub fn positions_previous(&self) -> &[Vec2] {
        &self.positions_previous[..self.len]
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities[..self.len]
    }

    #[inline]
    pub fn velocities_previous(&self) -> &[Vec2] {
        &self.velocities_previous[..self.len]
    }

    #[inline]
    pub fn forces(&self) -> &[Vec2] {
        &self.forces[..self.len]
    }

    #[inline]
    pub fn velocities_mut(&mut self) -> &mut [Vec2] {
        &mut self.velocities[..self.len]
    }

    #[inline]
    pub fn forces_mut(&mut self) -> &mut [Vec2] {
        &mut self.forces[..self.len]
    }

    /// Live positions (read) alongside live forces (write)
    pub(crate) fn positions_and_forces_mut(&mut self) -> (&[Vec2], &mut [Vec2]) {
        (&self.positions[..self.len], &mut self.forces[..self.len])
    }

    /// Previous positions (read) alongside current positions and velocities (write)
    pub(crate) fn contact_view_mut(&mut self) -> (&[Vec2], &mut [Vec2], &mut [Vec2]) {
        let n = self.len;
        (
            &self.positions_previous[..n],
            &mut self.positions[..n],
            &mut self.velocities[..n],
        )
    }

    /// Cache this frame's starting positions and velocities
    pub fn snapshot_previous(&mut self) {
        let n = self.len;
        self.positions_previous[..n].copy_from_slice(&self.positions[..n]);
        self.velocities_previous[..n].copy_from_slice(&self.velocities[..n]);
    }

    /// Semi-implicit Euler with unit mass: `v += f·dt`, then `x += v·dt`
    pub fn integrate(&mut self, dt: f32) {
        let n = self.len;
        for ((pos, vel), force) in self.positions[..n]
            .iter_mut()
            .zip(&mut self.velocities[..n])
            .zip(&self.forces[..n])
        {
            *vel += *force * dt;
            *pos += *vel * dt;
        }
    }

    /// Clamp each velocity component into `[-max_velocity, max_velocity]`
    pub fn clamp_velocities(&mut self) {
        let limit = self.max_velocity.abs();
        for vel in &mut self.velocities[..self.len] {
            *vel = clamp_components(*vel, limit);
        }
    }

    /// Clamp each position component into `[-BOUNDARY_LIMIT, BOUNDARY_LIMIT]`
    pub fn clamp_positions(&mut self) {
        for pos in &mut self.positions[..self.len] {
            *pos = clamp_components(*pos, BOUNDARY_LIMIT);
        }
    }

    /// Start every live particle's force accumulator at `gravity`
    pub fn reset_forces(&mut self, gravity: Vec2) {
        self.forces[..self.len].fill(gravity);
    }
}

/// Per-component clamp that never panics; a NaN limit leaves `v` unchanged
#[inline]
fn clamp_components(v: Vec2, limit: f32) -> Vec2 {
    Vec2::new(v.x.min(limit).max(-limit), v.y.min(limit).max(-limit))
}
