//! Per-frame pipeline
//!
//! Advances the world by one frame in a fixed order so collision and
//! integration always see a consistent state.

use glam::Vec2;

use super::step::StepStats;
use super::world::World;

/// A planet placement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpawn {
    pub position: Vec2,
    /// Zero for a symmetric attractor
    pub direction: Vec2,
    pub mass: f32,
}

/// Commands for a single frame, produced by the input layer
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Particles to spawn, in order
    pub spawn_particles: Vec<Vec2>,
    /// Planets to place, in order
    pub spawn_planets: Vec<PlanetSpawn>,
    /// Drag the first planet here (spawning it if there is none)
    pub grab_planet: Option<PlanetSpawn>,
    pub clear_particles: bool,
    pub clear_planets: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Spawns dropped because a set was full
    pub rejected_particles: u32,
    pub rejected_planets: u32,
    /// Particles caught by the goal this frame
    pub collected: u32,
    pub step: StepStats,
}

/// Advance the world by one frame.
///
/// Order: impact decay, clears, spawns, planet forces, goal, planet aging,
/// particle step.
pub fn tick(world: &mut World, input: &FrameInput, dt: f32) -> FrameReport {
    let mut report = FrameReport::default();

    world.environment.decay(dt);

    if input.clear_particles {
        world.particles.clear();
    }
    if input.clear_planets {
        world.planets.clear();
    }

    for &position in &input.spawn_particles {
        if world.particles.spawn_at(position).is_none() {
            report.rejected_particles += 1;
        }
    }
    for spawn in &input.spawn_planets {
        if !place_planet(world, spawn) {
            report.rejected_planets += 1;
        }
    }
    if let Some(grab) = &input.grab_planet {
        if !world.planets.move_to(0, grab.position) && !place_planet(world, grab) {
            report.rejected_planets += 1;
        }
    }
    if report.rejected_particles > 0 || report.rejected_planets > 0 {
        log::debug!(
            "Frame {}: dropped {} particle and {} planet spawns (sets full)",
            world.frame,
            report.rejected_particles,
            report.rejected_planets
        );
    }

    world.planets.apply_to_particles(&mut world.particles);

    if let Some(goal) = world.goal.as_mut() {
        report.collected = goal.collect(&mut world.particles);
    }

    world.planets.age(dt);
    report.step = world.step(dt);
    world.frame += 1;

    report
}

fn place_planet(world: &mut World, spawn: &PlanetSpawn) -> bool {
    world
        .planets
        .spawn_at(spawn.position, spawn.direction, spawn.mass)
        .is_some()
}
