//! Fixed-step particle update
//!
//! One call advances every live particle by `dt`, strictly in this order:
//! 1. cache positions and velocities as "previous"
//! 2. integrate with the forces accumulated since the last step
//! 3. resolve at most one boundary contact per particle
//! 4. clamp velocity components to `max_velocity`
//! 5. clamp position components to `BOUNDARY_LIMIT`
//! 6. reset forces to gravity, ready for the next planet pass
//!
//! Forces lag by a frame: planets accumulate into the force buffer before the
//! step, on top of the gravity baseline written at the end of the last one.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, ContactKind, resolve_collisions};
use super::environment::Environment;
use super::particles::Particles;

/// Contact counts from one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    pub swept: u32,
    pub grazing: u32,
}

impl StepStats {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let mut stats = Self::default();
        for contact in contacts {
            match contact.kind {
                ContactKind::Swept { .. } => stats.swept += 1,
                ContactKind::Grazing => stats.grazing += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> u32 {
        self.swept + self.grazing
    }
}

/// Advance all live particles by `dt` against the environment's boundaries.
///
/// `contacts` is scratch space reused across frames; on return it holds the
/// contacts resolved this step.
pub fn step(
    particles: &mut Particles,
    env: &mut Environment,
    dt: f32,
    contacts: &mut Vec<Contact>,
) -> StepStats {
    particles.snapshot_previous();
    particles.integrate(dt);
    resolve_collisions(particles, env, contacts);
    particles.clamp_velocities();
    particles.clamp_positions();
    particles.reset_forces(env.gravity);
    StepStats::from_contacts(contacts)
}
