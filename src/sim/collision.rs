//! Collision detection and response between particles and boundaries
//!
//! Each particle is tested against boundaries in insertion order and only the
//! first boundary it touches is resolved in a frame. Two kinds of contact are
//! recognised:
//! - swept: the path from last frame's position to this frame's crosses the
//!   boundary, so the particle is placed at the crossing point
//! - grazing: the particle ends the frame within the boundary thickness, so
//!   this frame's motion is undone
//!
//! Either way the particle is nudged off the surface toward the side it came
//! from, and its velocity is reflected and damped.

use glam::Vec2;

use super::environment::{Boundary, Environment};
use super::geometry::{is_above, length_manhattan, near_segment, reflect, segment_intersection};
use super::particles::Particles;
use crate::consts::CONTACT_OFFSET_SCALE;

/// How a particle touched a boundary this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactKind {
    /// Motion crossed the boundary at `point`
    Swept { point: Vec2 },
    /// Particle ended the frame resting against the boundary
    Grazing,
}

/// A resolved particle-boundary contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub particle: usize,
    pub boundary: usize,
    pub kind: ContactKind,
}

/// Classify the contact, if any, between one particle's motion and a boundary
pub fn detect_contact(
    previous: Vec2,
    current: Vec2,
    boundary: &Boundary,
    thickness: f32,
) -> Option<ContactKind> {
    let segment = &boundary.segment;
    if let Some(point) = segment_intersection(previous, current, segment.tail, segment.head) {
        return Some(ContactKind::Swept { point });
    }
    if near_segment(segment, boundary.normal, current, thickness) {
        return Some(ContactKind::Grazing);
    }
    None
}

/// Position after a contact: the anchor (crossing point or last position)
/// offset along the normal toward the side `previous` was on
pub fn contact_position(anchor: Vec2, previous: Vec2, boundary: &Boundary, thickness: f32) -> Vec2 {
    let offset = CONTACT_OFFSET_SCALE * thickness;
    if is_above(&boundary.segment, boundary.normal, previous) {
        anchor + boundary.normal * offset
    } else {
        anchor - boundary.normal * offset
    }
}

/// Velocity after bouncing off a surface with unit `normal`
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    reflect(velocity, normal) * restitution
}

/// Rough impact energy of a post-bounce velocity, credited to the boundary
#[inline]
pub fn impact_energy(velocity: Vec2) -> f32 {
    0.5 * length_manhattan(velocity)
}

/// Resolve at most one boundary contact per live particle.
///
/// Particle positions must already be integrated and `positions_previous`
/// must hold the frame's starting positions. `contacts` is cleared and refilled
/// in particle order.
pub fn resolve_collisions(
    particles: &mut Particles,
    env: &mut Environment,
    contacts: &mut Vec<Contact>,
) {
    let restitution = env.restitution;
    let thickness = env.thickness;
    let boundaries = env.boundaries_mut();
    let (previous, positions, velocities) = particles.contact_view_mut();

    contacts.clear();
    for (i, ((prev, pos), vel)) in previous
        .iter()
        .zip(positions.iter_mut())
        .zip(velocities.iter_mut())
        .enumerate()
    {
        for (l, boundary) in boundaries.iter_mut().enumerate() {
            let Some(kind) = detect_contact(*prev, *pos, boundary, thickness) else {
                continue;
            };

            let anchor = match kind {
                ContactKind::Swept { point } => point,
                ContactKind::Grazing => *prev,
            };
            *pos = contact_position(anchor, *prev, boundary, thickness);
            *vel = bounce_velocity(*vel, boundary.normal, restitution);
            boundary.impact.credit(impact_energy(*vel));

            contacts.push(Contact {
                particle: i,
                boundary: l,
                kind,
            });
            break;
        }
    }
}
