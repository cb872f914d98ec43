//! Vertex data handed to a renderer each frame
//!
//! Layouts match what the particle, planet and boundary shaders expect, so a
//! renderer can upload the slices straight into vertex buffers.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::sim::World;

/// Boundary impact energy at which a wall glows at full heat
pub const FULL_HEAT_HITS: f32 = 25.0;

/// Particle vertex: position plus velocity for speed colouring
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct ParticleVertex {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Planet vertex: age and mass drive the pulsing radius
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct PlanetVertex {
    pub position: Vec2,
    pub age: f32,
    pub mass: f32,
}

/// One endpoint of a boundary line with its accumulated impact energy
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct BoundaryVertex {
    pub position: Vec2,
    pub hits: f32,
}

/// Read-only copy of everything drawn in a frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub particles: Vec<ParticleVertex>,
    pub planets: Vec<PlanetVertex>,
    /// Two vertices per boundary: tail then head
    pub boundaries: Vec<BoundaryVertex>,
    pub score: Option<u64>,
}

impl FrameSnapshot {
    /// Copy the live entries of every set, in stable order
    pub fn capture(world: &World) -> Self {
        let particles = world
            .particles
            .positions()
            .iter()
            .zip(world.particles.velocities())
            .map(|(p, v)| ParticleVertex {
                position: *p,
                velocity: *v,
            })
            .collect();

        let planets = world
            .planets
            .positions()
            .iter()
            .zip(world.planets.ages())
            .zip(world.planets.masses())
            .map(|((p, age), mass)| PlanetVertex {
                position: *p,
                age: *age,
                mass: *mass,
            })
            .collect();

        let boundaries = world
            .environment
            .boundaries()
            .iter()
            .flat_map(|b| {
                [
                    BoundaryVertex {
                        position: b.segment.tail,
                        hits: b.impact.tail,
                    },
                    BoundaryVertex {
                        position: b.segment.head,
                        hits: b.impact.head,
                    },
                ]
            })
            .collect();

        Self {
            frame: world.frame,
            particles,
            planets,
            boundaries,
            score: world.goal.as_ref().map(|g| g.score),
        }
    }

    /// Raw bytes of the particle buffer
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn planet_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.planets)
    }

    pub fn boundary_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.boundaries)
    }
}

/// Wall glow in [0, 1] for an endpoint's impact energy
#[inline]
pub fn boundary_heat(hits: f32) -> f32 {
    (hits / FULL_HEAT_HITS).min(1.0)
}

/// Wall colour for an endpoint's impact energy: cool blue to hot red
pub fn boundary_color(hits: f32) -> [f32; 4] {
    let heat = boundary_heat(hits);
    [heat, 0.1 * heat + 0.1, 0.1 * (1.0 - heat) + 0.1, 1.0]
}

/// Particle colour by speed: mostly translucent white, tinted red when fast
/// and blue when slow
pub fn particle_color(velocity: Vec2) -> [f32; 4] {
    let speed = velocity.length();
    let tint = [speed, 0.3 * speed, 1.0 - speed, 1.0];
    let base = [1.0, 1.0, 1.0, 0.3];
    let a = 0.9;
    std::array::from_fn(|i| tint[i] * a + (1.0 - a) * base[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Aabb, Goal};

    #[test]
    fn test_capture_copies_live_entries_only() {
        let mut world = World::new(4, 2, 2).unwrap();
        world.particles.spawn_at(Vec2::new(0.1, 0.2));
        world.particles.spawn_at(Vec2::new(0.3, 0.4));
        world.particles.spawn_at(Vec2::new(0.5, 0.6));
        world.particles.clear();
        world.particles.spawn_at(Vec2::new(-0.1, -0.2));
        world.planets.spawn_at(Vec2::new(0.0, 0.5), Vec2::ZERO, 0.7);
        world
            .environment
            .add_boundary(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        world.goal = Some(Goal::new(Aabb::from_corners(Vec2::ZERO, Vec2::ONE)));

        let snap = FrameSnapshot::capture(&world);
        assert_eq!(
            snap.particles,
            vec![ParticleVertex {
                position: Vec2::new(-0.1, -0.2),
                velocity: Vec2::ZERO,
            }]
        );
        assert_eq!(snap.planets[0].mass, 0.7);
        assert_eq!(snap.boundaries.len(), 2);
        assert_eq!(snap.boundaries[0].position, Vec2::new(-1.0, 0.0));
        assert_eq!(snap.score, Some(0));
    }

    #[test]
    fn test_byte_views_match_layout() {
        let mut world = World::new(2, 1, 1).unwrap();
        world.particles.spawn_at(Vec2::ZERO);
        world.particles.spawn_at(Vec2::ONE);
        let snap = FrameSnapshot::capture(&world);
        assert_eq!(snap.particle_bytes().len(), 2 * 4 * std::mem::size_of::<f32>());
        assert!(snap.planet_bytes().is_empty());

        // Tightly packed: no padding between fields
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 16);
        assert_eq!(std::mem::size_of::<PlanetVertex>(), 16);
        assert_eq!(std::mem::size_of::<BoundaryVertex>(), 12);
        let floats: &[f32] = bytemuck::cast_slice(&snap.particles);
        assert_eq!(floats, &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_heat_saturates() {
        assert_eq!(boundary_heat(0.0), 0.0);
        assert_eq!(boundary_heat(12.5), 0.5);
        assert_eq!(boundary_heat(40.0), 1.0);
        assert_eq!(boundary_color(0.0), [0.0, 0.1, 0.2, 1.0]);
    }

    #[test]
    fn test_particle_color_at_rest_is_bluish() {
        let c = particle_color(Vec2::ZERO);
        assert!(c[2] > c[0]);
        assert!((c[3] - 0.93).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(1, 1, 1).unwrap();
        let json = serde_json::to_string(&FrameSnapshot::capture(&world)).unwrap();
        assert!(json.contains("\"particles\":[]"));
    }
}
