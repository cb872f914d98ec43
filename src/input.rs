//! Input state and control mapping
//!
//! The host samples raw button state once per frame; `Controls` turns that
//! into edge-detected buttons and then into a `FrameInput` for the simulation.
//!
//! Controls:
//! - Ctrl + click: spawn a single particle
//! - Shift + hold: spew particles (one per frame)
//! - Click: place a planet with the configured mass and polarity
//! - Hold F: drag the first planet (placing one if there are none)

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{FrameInput, PlanetSpawn};

/// A single button with this frame's and last frame's state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub current: bool,
    pub previous: bool,
}

impl ButtonState {
    /// Shift in a newly sampled state
    pub fn update(&mut self, down: bool) {
        self.previous = self.current;
        self.current = down;
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.current
    }

    /// Went down this frame
    #[inline]
    pub fn pressed(&self) -> bool {
        self.current && !self.previous
    }

    /// Went up this frame
    #[inline]
    pub fn released(&self) -> bool {
        !self.current && self.previous
    }
}

/// Raw button levels sampled by the host for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawButtons {
    pub left_mouse: bool,
    pub left_ctrl: bool,
    pub left_shift: bool,
    pub key_f: bool,
}

/// Edge-detected state for every button the toy uses
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub left_mouse: ButtonState,
    pub left_ctrl: ButtonState,
    pub left_shift: ButtonState,
    pub key_f: ButtonState,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every button by one frame
    pub fn update(&mut self, raw: RawButtons) {
        self.left_mouse.update(raw.left_mouse);
        self.left_ctrl.update(raw.left_ctrl);
        self.left_shift.update(raw.left_shift);
        self.key_f.update(raw.key_f);
    }

    /// Map the current buttons to simulation commands.
    ///
    /// `cursor` is in arena coordinates. When `ui_hovered` is set the pointer
    /// belongs to an overlay and nothing is placed.
    pub fn frame_input(&self, cursor: Vec2, ui_hovered: bool, settings: &Settings) -> FrameInput {
        let mut input = FrameInput::default();
        if ui_hovered {
            return input;
        }

        let planet = PlanetSpawn {
            position: cursor,
            direction: settings.next_planet_direction(),
            mass: settings.next_planet_mass,
        };

        if self.left_ctrl.is_down() && self.left_mouse.pressed() {
            input.spawn_particles.push(cursor);
        } else if self.left_shift.is_down() && self.left_mouse.is_down() {
            input.spawn_particles.push(cursor);
        } else if self.left_mouse.pressed() {
            input.spawn_planets.push(planet);
        } else if self.key_f.is_down() {
            input.grab_planet = Some(planet);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampled(frames: &[RawButtons]) -> Controls {
        let mut controls = Controls::new();
        for raw in frames {
            controls.update(*raw);
        }
        controls
    }

    const CLICK: RawButtons = RawButtons {
        left_mouse: true,
        left_ctrl: false,
        left_shift: false,
        key_f: false,
    };

    #[test]
    fn test_button_edges() {
        let mut b = ButtonState::default();
        b.update(true);
        assert!(b.pressed() && b.is_down() && !b.released());
        b.update(true);
        assert!(!b.pressed() && b.is_down());
        b.update(false);
        assert!(b.released() && !b.is_down());
        b.update(false);
        assert!(!b.released());
    }

    #[test]
    fn test_click_places_planet_once() {
        let settings = Settings {
            next_planet_mass: 1.2,
            next_planet_asymmetric: true,
            ..Default::default()
        };
        let cursor = Vec2::new(0.3, -0.2);

        let controls = sampled(&[CLICK]);
        let input = controls.frame_input(cursor, false, &settings);
        assert_eq!(
            input.spawn_planets,
            vec![PlanetSpawn {
                position: cursor,
                direction: Vec2::Y,
                mass: 1.2,
            }]
        );

        // Held, not pressed: nothing new
        let controls = sampled(&[CLICK, CLICK]);
        let input = controls.frame_input(cursor, false, &settings);
        assert!(input.spawn_planets.is_empty());
        assert!(input.spawn_particles.is_empty());
    }

    #[test]
    fn test_ctrl_click_spawns_single_particle() {
        let ctrl_click = RawButtons {
            left_ctrl: true,
            ..CLICK
        };
        let settings = Settings::default();
        let input = sampled(&[ctrl_click]).frame_input(Vec2::ZERO, false, &settings);
        assert_eq!(input.spawn_particles, vec![Vec2::ZERO]);
        assert!(input.spawn_planets.is_empty());

        let input = sampled(&[ctrl_click, ctrl_click]).frame_input(Vec2::ZERO, false, &settings);
        assert!(input.spawn_particles.is_empty());
    }

    #[test]
    fn test_shift_hold_spews_every_frame() {
        let shift_hold = RawButtons {
            left_shift: true,
            ..CLICK
        };
        let settings = Settings::default();
        let controls = sampled(&[shift_hold, shift_hold, shift_hold]);
        let input = controls.frame_input(Vec2::ONE, false, &settings);
        assert_eq!(input.spawn_particles.len(), 1);
    }

    #[test]
    fn test_f_grabs_planet() {
        let f = RawButtons {
            key_f: true,
            ..Default::default()
        };
        let input = sampled(&[f]).frame_input(Vec2::X, false, &Settings::default());
        assert_eq!(input.grab_planet.map(|p| p.position), Some(Vec2::X));
    }

    #[test]
    fn test_each_sampled_button_changes_the_command() {
        let settings = Settings::default();
        let held = |left_mouse, left_ctrl, left_shift, key_f| RawButtons {
            left_mouse,
            left_ctrl,
            left_shift,
            key_f,
        };
        let map = |raw| sampled(&[raw]).frame_input(Vec2::ZERO, false, &settings);

        assert!(map(held(false, false, false, false)).spawn_planets.is_empty());
        assert_eq!(map(held(true, false, false, false)).spawn_planets.len(), 1);
        assert_eq!(map(held(true, true, false, false)).spawn_particles.len(), 1);
        let spew = map(held(true, false, true, false));
        assert_eq!(spew.spawn_particles.len(), 1);
        assert!(spew.spawn_planets.is_empty());
        assert!(map(held(false, false, false, true)).grab_planet.is_some());
    }

    #[test]
    fn test_ui_hover_blocks_placement() {
        let input = sampled(&[CLICK]).frame_input(Vec2::ZERO, true, &Settings::default());
        assert!(input.spawn_planets.is_empty());
    }
}
