//! Snad - a 2D falling-sand toy with gravity-well planets
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, planet field, boundary collisions)
//! - `settings`: Live-tunable parameters and capacities
//! - `input`: Edge-detected button state and control mapping
//! - `render_data`: Read-only per-frame snapshot for a renderer
//! - `scene`: Default level layout and particle spewing

pub mod error;
pub mod input;
pub mod render_data;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Padding between the arena edge and the position clamp
    pub const BOUNDARY_PADDING: f32 = 0.05;
    /// Half-extent every live particle position is clamped into
    pub const BOUNDARY_LIMIT: f32 = 1.0 - BOUNDARY_PADDING;

    /// Distance from a boundary at which a particle counts as touching it
    pub const BOUNDARY_THICKNESS: f32 = 1e-3;
    /// Contact nudge along the boundary normal, in multiples of the thickness
    pub const CONTACT_OFFSET_SCALE: f32 = 3.0;

    /// Default global gravity (arena units/s²)
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -0.123);
    /// Default velocity multiplier applied after a bounce
    pub const DEFAULT_RESTITUTION: f32 = 0.7;
    /// Default per-axis velocity limit
    pub const DEFAULT_MAX_VELOCITY: f32 = 1.678;
    /// Default mass for the next placed planet
    pub const DEFAULT_PLANET_MASS: f32 = 0.33;
    /// Frames slower than this rate are simulated with a capped dt
    pub const DEFAULT_MIN_UPDATE_RATE: f32 = 60.0;

    /// Impact energy lost per second on each boundary endpoint
    pub const IMPACT_DECAY_RATE: f32 = 50.0;
    /// Ceiling for decayed impact energy
    pub const IMPACT_ENERGY_MAX: f32 = 50.0;

    /// Planets whose `|direction|²` is below this are symmetric attractors
    pub const SYMMETRIC_DIRECTION_EPS: f32 = 1e-4;
    /// Softening added to `r²` in the planet field
    pub const FIELD_SOFTENING: f32 = 1e-5;
    /// `|r × s|` below this treats two segments as parallel
    pub const PARALLEL_EPSILON: f32 = 1e-9;

    /// Default capacities
    pub const MAX_BOUNDARIES: usize = 10;
    pub const MAX_PLANETS: usize = 1000;
    pub const MAX_PARTICLES: usize = 200_000;
}
