//! Simulation world: the three sets plus the optional scoring goal

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Contact;
use super::environment::Environment;
use super::geometry::Aabb;
use super::particles::Particles;
use super::planets::Planets;
use super::step::{StepStats, step};
use crate::consts::BOUNDARY_THICKNESS;
use crate::error::SimResult;
use crate::settings::Settings;

/// Scoring rectangle: moving particles that enter it are caught
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub area: Aabb,
    /// The area is grown by this much on every side when testing particles
    pub tolerance: f32,
    pub score: u64,
}

impl Goal {
    pub fn new(area: Aabb) -> Self {
        Self {
            area,
            tolerance: BOUNDARY_THICKNESS,
            score: 0,
        }
    }

    /// Score every moving particle within `tolerance` of the area and bring
    /// it to rest.
    ///
    /// Returns how many particles were caught this call.
    pub fn collect(&mut self, particles: &mut Particles) -> u32 {
        let mut caught = 0;
        for i in 0..particles.len() {
            if !self
                .area
                .contains_with_tolerance(particles.positions()[i], self.tolerance)
            {
                continue;
            }
            if particles.velocities()[i] == Vec2::ZERO {
                continue;
            }
            particles.velocities_mut()[i] = Vec2::ZERO;
            particles.forces_mut()[i] = Vec2::ZERO;
            caught += 1;
        }
        self.score += u64::from(caught);
        caught
    }
}

/// Everything the simulation mutates from frame to frame
#[derive(Debug, Clone)]
pub struct World {
    pub environment: Environment,
    pub particles: Particles,
    pub planets: Planets,
    pub goal: Option<Goal>,
    /// Frames ticked so far
    pub frame: u64,
    contacts: Vec<Contact>,
}

impl World {
    /// Allocate a world with the given capacities and default tunables
    pub fn new(
        particle_capacity: usize,
        planet_capacity: usize,
        boundary_capacity: usize,
    ) -> SimResult<Self> {
        Ok(Self {
            environment: Environment::new(boundary_capacity)?,
            particles: Particles::new(particle_capacity)?,
            planets: Planets::new(planet_capacity)?,
            goal: None,
            frame: 0,
            contacts: Vec::new(),
        })
    }

    /// Allocate a world sized and tuned by `settings`
    pub fn from_settings(settings: &Settings) -> SimResult<Self> {
        settings.validate()?;
        let mut world = Self::new(
            settings.particle_capacity,
            settings.planet_capacity,
            settings.boundary_capacity,
        )?;
        settings.apply(&mut world);
        log::info!(
            "World created: {} particles, {} planets, {} boundaries max",
            settings.particle_capacity,
            settings.planet_capacity,
            settings.boundary_capacity
        );
        Ok(world)
    }

    /// Run the particle step against the boundaries
    pub fn step(&mut self, dt: f32) -> StepStats {
        step(
            &mut self.particles,
            &mut self.environment,
            dt,
            &mut self.contacts,
        )
    }

    /// Contacts resolved by the most recent step
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_collects_moving_particles() {
        let mut ps = Particles::new(4).unwrap();
        ps.spawn_at(Vec2::new(0.0, 0.0)); // inside, moving
        ps.spawn_at(Vec2::new(0.05, 0.0)); // inside, at rest
        ps.spawn_at(Vec2::new(0.5, 0.5)); // outside, moving
        ps.velocities_mut()[0] = Vec2::new(0.1, 0.0);
        ps.velocities_mut()[2] = Vec2::new(0.1, 0.0);
        ps.forces_mut()[0] = Vec2::new(0.0, -1.0);

        let mut goal = Goal::new(Aabb::from_corners(Vec2::splat(-0.1), Vec2::splat(0.1)));
        assert_eq!(goal.collect(&mut ps), 1);
        assert_eq!(goal.score, 1);
        assert_eq!(ps.velocities()[0], Vec2::ZERO);
        assert_eq!(ps.forces()[0], Vec2::ZERO);
        assert_eq!(ps.velocities()[2], Vec2::new(0.1, 0.0));

        // Already at rest: not scored twice
        assert_eq!(goal.collect(&mut ps), 0);
        assert_eq!(goal.score, 1);
    }

    #[test]
    fn test_goal_catches_particles_on_its_edge() {
        let mut ps = Particles::new(3).unwrap();
        ps.spawn_at(Vec2::new(0.1, 0.0)); // on the edge
        ps.spawn_at(Vec2::new(0.1 + 0.5 * BOUNDARY_THICKNESS, 0.0)); // inside the tolerance band
        ps.spawn_at(Vec2::new(0.1 + 2.0 * BOUNDARY_THICKNESS, 0.0)); // beyond it
        for vel in ps.velocities_mut() {
            *vel = Vec2::new(0.0, -0.2);
        }

        let mut goal = Goal::new(Aabb::from_corners(Vec2::splat(-0.1), Vec2::splat(0.1)));
        assert_eq!(goal.collect(&mut ps), 2);
        assert_eq!(ps.velocities()[2], Vec2::new(0.0, -0.2));

        // Zero tolerance: the edge itself counts as outside
        let mut strict = Goal {
            tolerance: 0.0,
            ..Goal::new(goal.area)
        };
        ps.velocities_mut()[0] = Vec2::new(0.0, -0.2);
        assert_eq!(strict.collect(&mut ps), 0);
    }

    #[test]
    fn test_world_from_settings_applies_tunables() {
        let settings = Settings {
            gravity: [0.0, -1.0],
            restitution: 0.4,
            max_velocity: 2.0,
            particle_capacity: 8,
            planet_capacity: 2,
            boundary_capacity: 3,
            ..Default::default()
        };
        let world = World::from_settings(&settings).unwrap();
        assert_eq!(world.environment.gravity, Vec2::new(0.0, -1.0));
        assert_eq!(world.environment.restitution, 0.4);
        assert_eq!(world.particles.max_velocity, 2.0);
        assert_eq!(world.particles.capacity(), 8);
        assert_eq!(world.planets.capacity(), 2);
        assert_eq!(world.environment.capacity(), 3);
    }

    #[test]
    fn test_world_rejects_invalid_settings() {
        let settings = Settings {
            restitution: 0.0,
            ..Default::default()
        };
        assert!(World::from_settings(&settings).is_err());
    }
}
