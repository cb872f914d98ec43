//! Snad headless driver
//!
//! Builds the default level, drops a planet in the middle and spews sand
//! from the top for a fixed number of frames, then prints a JSON summary.
//!
//! Usage: `snad [settings.json] [frames]`

use std::process::ExitCode;

use glam::Vec2;
use serde::Serialize;

use snad::consts::SIM_DT;
use snad::scene::{Spewer, build_default_level};
use snad::sim::{FrameInput, PlanetSpawn, World, tick};
use snad::{Settings, SimResult};

const DEFAULT_FRAMES: u64 = 600;
const SPEW_PER_FRAME: usize = 20;
const SPEW_SEED: u64 = 0x5a4d;

#[derive(Debug, Serialize)]
struct Summary {
    frames: u64,
    particles: usize,
    planets: usize,
    boundaries: usize,
    rejected_particles: u64,
    swept_contacts: u64,
    grazing_contacts: u64,
    max_position: f32,
    max_velocity: f32,
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    match run(&settings, frames) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode summary: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, frames: u64) -> SimResult<Summary> {
    log::info!("Snad starting ({} frames)", frames);

    let mut world = World::from_settings(settings)?;
    build_default_level(&mut world.environment);

    let setup = FrameInput {
        spawn_planets: vec![PlanetSpawn {
            position: Vec2::new(0.0, 0.1),
            direction: settings.next_planet_direction(),
            mass: settings.next_planet_mass,
        }],
        ..Default::default()
    };
    tick(&mut world, &setup, SIM_DT);

    let mut spewer = Spewer::new(SPEW_SEED, 0.02);
    let source = Vec2::new(0.6, 0.85);
    let idle = FrameInput::default();

    let mut summary = Summary {
        frames,
        particles: 0,
        planets: 0,
        boundaries: 0,
        rejected_particles: 0,
        swept_contacts: 0,
        grazing_contacts: 0,
        max_position: 0.0,
        max_velocity: 0.0,
    };

    for _ in 0..frames {
        let requested = SPEW_PER_FRAME.min(world.particles.capacity());
        let placed = spewer.spew(&mut world.particles, source, requested);
        summary.rejected_particles += (requested - placed) as u64;

        let report = tick(&mut world, &idle, SIM_DT);
        summary.swept_contacts += u64::from(report.step.swept);
        summary.grazing_contacts += u64::from(report.step.grazing);

        if world.frame % 60 == 0 {
            log::info!(
                "Frame {}: {} particles, {} contacts",
                world.frame,
                world.particles.len(),
                report.step.total()
            );
        }
    }

    summary.particles = world.particles.len();
    summary.planets = world.planets.len();
    summary.boundaries = world.environment.len();
    summary.max_position = max_abs(world.particles.positions());
    summary.max_velocity = max_abs(world.particles.velocities());
    Ok(summary)
}

fn max_abs(values: &[Vec2]) -> f32 {
    values
        .iter()
        .map(|v| v.abs().max_element())
        .fold(0.0, f32::max)
}
