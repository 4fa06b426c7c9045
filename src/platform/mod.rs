//! Platform abstraction layer
//!
//! The simulation never talks to a window, a sound card or the OS clock
//! directly. A frontend supplies these four capabilities:
//! - `Clock`: frame pacing and wall time
//! - `InputSource`: held keys, pointer position, discrete events
//! - `AudioOut`: fire-and-forget and looping playback
//! - `Renderer`: sprite and text drawing (see `crate::renderer`)
//!
//! `headless` implements all of them without any device, for tests and the
//! demo binary.

pub mod headless;

use std::collections::HashSet;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::renderer::{Rgb, Sprite};
use crate::sim::geometry::Rect;
use crate::sim::player::MoveKeys;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    D,
    W,
    S,
    Left,
    Right,
    Up,
    Down,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed or quit requested
    Quit,
    KeyDown(KeyCode),
    MouseDown { button: MouseButton, pos: Vec2 },
}

impl MoveKeys {
    /// Directional state from held keys (WASD or arrows)
    pub fn from_held(held: &HashSet<KeyCode>) -> Self {
        let pressed = |a: KeyCode, b: KeyCode| held.contains(&a) || held.contains(&b);
        Self {
            left: pressed(KeyCode::A, KeyCode::Left),
            right: pressed(KeyCode::D, KeyCode::Right),
            up: pressed(KeyCode::W, KeyCode::Up),
            down: pressed(KeyCode::S, KeyCode::Down),
        }
    }
}

/// Frame pacing
pub trait Clock {
    /// Wait out the rest of the frame budget; returns ms since the last tick
    fn tick(&mut self, target_fps: u32) -> u64;
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;
}

pub trait InputSource {
    fn held_keys(&self) -> HashSet<KeyCode>;
    fn pointer_position(&self) -> Vec2;
    /// Events since the last poll, in arrival order
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

pub trait AudioOut {
    fn play_once(&mut self, effect: SoundEffect, volume: f32);
    fn play_loop(&mut self, effect: SoundEffect, volume: f32);
}

/// Drawing surface. Calls between two `present`s make up one frame.
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    fn draw_text(&mut self, text: &str, size: f32, center: Vec2, color: Rgb);
    fn present(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_keys_accept_wasd_and_arrows() {
        let held: HashSet<KeyCode> = [KeyCode::A, KeyCode::Down].into_iter().collect();
        let keys = MoveKeys::from_held(&held);
        assert!(keys.left && keys.down);
        assert!(!keys.right && !keys.up);

        let held: HashSet<KeyCode> = [KeyCode::Right, KeyCode::W, KeyCode::Space]
            .into_iter()
            .collect();
        let keys = MoveKeys::from_held(&held);
        assert!(keys.right && keys.up);
        assert!(!keys.left && !keys.down);

        assert!(!MoveKeys::from_held(&HashSet::new()).any());
    }
}
