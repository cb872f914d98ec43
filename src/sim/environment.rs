//! Boundary set: the static line segments particles bounce off
//!
//! Boundaries are append-only for the lifetime of a run. Each one carries a
//! precomputed unit normal and a pair of decaying impact-energy counters that
//! a renderer can use to make struck walls glow.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, segments_cross};
use crate::consts::*;
use crate::error::{SimResult, reserve};

/// Accumulated impact energy at each end of a boundary (cosmetic only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactEnergy {
    pub tail: f32,
    pub head: f32,
}

impl ImpactEnergy {
    /// Credit `energy` to both endpoints.
    ///
    /// Hits are not attributed to the nearest endpoint; both ends glow.
    pub fn credit(&mut self, energy: f32) {
        self.tail += energy;
        self.head += energy;
    }

    fn decay(&mut self, amount: f32) {
        self.tail = (self.tail - amount).clamp(0.0, IMPACT_ENERGY_MAX);
        self.head = (self.head - amount).clamp(0.0, IMPACT_ENERGY_MAX);
    }
}

/// A static boundary segment with its derived normal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    pub segment: Segment,
    pub normal: Vec2,
    pub impact: ImpactEnergy,
}

/// Fixed-capacity, insertion-ordered set of boundaries plus the global
/// restitution and gravity shared by every particle.
#[derive(Debug, Clone)]
pub struct Environment {
    boundaries: Vec<Boundary>,
    capacity: usize,
    /// Velocity multiplier applied after every bounce, in (0, 1]
    pub restitution: f32,
    /// Force every live particle starts each frame with
    pub gravity: Vec2,
    /// Grazing tolerance; contacts are nudged off by a multiple of this
    pub thickness: f32,
}

impl Environment {
    /// Create an empty environment able to hold `capacity` boundaries
    pub fn new(capacity: usize) -> SimResult<Self> {
        let boundaries = reserve("boundary", capacity)?;
        log::debug!("Environment allocated for {} boundaries", capacity);

        Ok(Self {
            boundaries,
            capacity,
            restitution: DEFAULT_RESTITUTION,
            gravity: DEFAULT_GRAVITY,
            thickness: BOUNDARY_THICKNESS,
        })
    }

    /// Append a boundary between two points.
    ///
    /// Endpoints are reordered so `tail.x < head.x` before the normal is
    /// derived. Returns the new boundary's index, or `None` if the set is full.
    pub fn add_boundary(&mut self, tail: Vec2, head: Vec2) -> Option<usize> {
        if self.is_full() {
            log::debug!("Boundary rejected: environment full ({})", self.capacity);
            return None;
        }

        let segment = Segment::canonical(tail, head);
        self.boundaries.push(Boundary {
            segment,
            normal: segment.normal(),
            impact: ImpactEnergy::default(),
        });
        Some(self.boundaries.len() - 1)
    }

    /// Move every impact counter toward zero at `IMPACT_DECAY_RATE` per second
    pub fn decay(&mut self, dt: f32) {
        let amount = IMPACT_DECAY_RATE * dt;
        for boundary in &mut self.boundaries {
            boundary.impact.decay(amount);
        }
    }

    /// Whether any boundary crosses the straight path `start -> end`
    pub fn is_boundary_between(&self, start: Vec2, end: Vec2) -> bool {
        self.boundaries
            .iter()
            .any(|b| segments_cross(b.segment.tail, b.segment.head, start, end))
    }

    #[inline]
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    #[inline]
    pub(crate) fn boundaries_mut(&mut self) -> &mut [Boundary] {
        &mut self.boundaries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.boundaries.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_add_boundary_canonicalizes() {
        let mut env = Environment::new(4).unwrap();
        let idx = env.add_boundary(Vec2::new(1.0, -1.0), Vec2::new(-1.0, -1.0));
        assert_eq!(idx, Some(0));

        let b = &env.boundaries()[0];
        assert_eq!(b.segment.tail, Vec2::new(-1.0, -1.0));
        assert!((b.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert_eq!(b.impact, ImpactEnergy::default());
    }

    #[test]
    fn test_add_boundary_full_is_rejected() {
        let mut env = Environment::new(1).unwrap();
        assert!(env.add_boundary(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).is_some());
        assert!(env.is_full());

        assert_eq!(env.add_boundary(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)), None);
        assert_eq!(env.len(), 1);
        assert_eq!(env.boundaries()[0].segment.tail, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_capacity() {
        assert!(matches!(
            Environment::new(0),
            Err(SimError::ZeroCapacity { what: "boundary" })
        ));
    }

    #[test]
    fn test_decay_clamps() {
        let mut env = Environment::new(2).unwrap();
        env.add_boundary(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        env.boundaries_mut()[0].impact = ImpactEnergy {
            tail: 80.0,
            head: 10.0,
        };

        // 50/s for 0.1s = 5
        env.decay(0.1);
        let impact = env.boundaries()[0].impact;
        assert_eq!(impact.tail, IMPACT_ENERGY_MAX);
        assert!((impact.head - 5.0).abs() < 1e-5);

        env.decay(1.0);
        let impact = env.boundaries()[0].impact;
        assert_eq!(impact.tail, 0.0);
        assert_eq!(impact.head, 0.0);
    }

    #[test]
    fn test_credit_both_endpoints() {
        let mut impact = ImpactEnergy::default();
        impact.credit(1.5);
        assert_eq!(impact.tail, 1.5);
        assert_eq!(impact.head, 1.5);
    }

    #[test]
    fn test_is_boundary_between() {
        let mut env = Environment::new(2).unwrap();
        env.add_boundary(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));

        assert!(env.is_boundary_between(Vec2::new(0.0, 0.5), Vec2::new(0.0, -0.5)));
        assert!(!env.is_boundary_between(Vec2::new(0.0, 0.5), Vec2::new(0.0, 0.1)));
        assert!(!env.is_boundary_between(Vec2::new(1.5, 0.5), Vec2::new(1.5, -0.5)));
    }
}
