//! Deterministic simulation module
//!
//! All particle physics lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - No randomness
//! - Stable iteration order (insertion order for every set)
//! - No rendering or platform dependencies

pub mod collision;
pub mod environment;
pub mod geometry;
pub mod particles;
pub mod planets;
pub mod step;
pub mod tick;
pub mod world;

pub use collision::{Contact, ContactKind, resolve_collisions};
pub use environment::{Boundary, Environment, ImpactEnergy};
pub use geometry::{Aabb, Segment, reflect, segment_intersection, segments_cross};
pub use particles::Particles;
pub use planets::{Planets, field_force, field_sign};
pub use step::{StepStats, step};
pub use tick::{FrameInput, FrameReport, PlanetSpawn, tick};
pub use world::{Goal, World};
