//! Simulation settings and live-tunable parameters
//!
//! Persisted as JSON. Every field has a default, so a settings file only
//! needs to list the values it changes.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::sim::World;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Global gravity applied to every particle each frame
    pub gravity: [f32; 2],
    /// Velocity multiplier after a bounce, in (0, 1]
    pub restitution: f32,
    /// Per-axis particle velocity limit
    pub max_velocity: f32,

    // === Placement ===
    /// Mass given to the next planet placed
    pub next_planet_mass: f32,
    /// Place dipole planets (pointing up) instead of symmetric attractors
    pub next_planet_asymmetric: bool,

    // === Timing ===
    /// Frames slower than this rate are simulated with dt capped at 1/rate
    pub min_update_rate: f32,

    // === Capacities (fixed for a run) ===
    pub particle_capacity: usize,
    pub planet_capacity: usize,
    pub boundary_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY.to_array(),
            restitution: DEFAULT_RESTITUTION,
            max_velocity: DEFAULT_MAX_VELOCITY,

            next_planet_mass: DEFAULT_PLANET_MASS,
            next_planet_asymmetric: false,

            min_update_rate: DEFAULT_MIN_UPDATE_RATE,

            particle_capacity: MAX_PARTICLES,
            planet_capacity: MAX_PLANETS,
            boundary_capacity: MAX_BOUNDARIES,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let [gx, gy] = self.gravity;
        check("gravity.x", gx, "a finite value", gx.is_finite())?;
        check("gravity.y", gy, "a finite value", gy.is_finite())?;
        check(
            "restitution",
            self.restitution,
            "(0, 1]",
            self.restitution > 0.0 && self.restitution <= 1.0,
        )?;
        check(
            "max_velocity",
            self.max_velocity,
            "(0, inf)",
            self.max_velocity > 0.0 && self.max_velocity.is_finite(),
        )?;
        check(
            "next_planet_mass",
            self.next_planet_mass,
            "(0, inf)",
            self.next_planet_mass > 0.0 && self.next_planet_mass.is_finite(),
        )?;
        check(
            "min_update_rate",
            self.min_update_rate,
            "(0, inf)",
            self.min_update_rate > 0.0 && self.min_update_rate.is_finite(),
        )?;

        for (what, capacity) in [
            ("particle", self.particle_capacity),
            ("planet", self.planet_capacity),
            ("boundary", self.boundary_capacity),
        ] {
            if capacity == 0 {
                return Err(SimError::ZeroCapacity { what });
            }
        }
        Ok(())
    }

    /// Push the live tunables into a running world
    pub fn apply(&self, world: &mut World) {
        world.environment.gravity = self.gravity();
        world.environment.restitution = self.restitution;
        world.particles.max_velocity = self.max_velocity;
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        Vec2::from_array(self.gravity)
    }

    /// Direction for the next planet placed
    pub fn next_planet_direction(&self) -> Vec2 {
        if self.next_planet_asymmetric {
            Vec2::Y
        } else {
            Vec2::ZERO
        }
    }

    /// Longest step a single frame may simulate
    #[inline]
    pub fn max_dt(&self) -> f32 {
        1.0 / self.min_update_rate
    }

    /// Frame dt after capping a measured frame time
    #[inline]
    pub fn frame_dt(&self, raw_dt: f32) -> f32 {
        raw_dt.min(self.max_dt())
    }
}

fn check(name: &'static str, value: f32, range: &'static str, ok: bool) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidSetting { name, value, range })
    }
}
