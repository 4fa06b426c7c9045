//! Device-free platform backends
//!
//! Used by the demo binary and the integration tests. Nothing here touches a
//! window or a sound card; the recording variants keep what they were asked
//! to do so tests can assert on it.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use glam::Vec2;

use super::{AudioOut, Clock, InputEvent, InputSource, KeyCode, Renderer};
use crate::audio::SoundEffect;
use crate::renderer::{Rgb, Sprite};
use crate::sim::geometry::Rect;

/// Frame budget in whole milliseconds
fn frame_budget_ms(target_fps: u32) -> u64 {
    1000 / u64::from(target_fps.max(1))
}

/// Simulated time: every tick advances by exactly one frame budget
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now_ms: u64,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FixedClock {
    fn tick(&mut self, target_fps: u32) -> u64 {
        let step = frame_budget_ms(target_fps);
        self.now_ms += step;
        step
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Real time: sleeps out the remainder of each frame
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
    last_tick: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn tick(&mut self, target_fps: u32) -> u64 {
        let budget = Duration::from_millis(frame_budget_ms(target_fps));
        let spent = self.last_tick.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        elapsed.as_millis() as u64
    }

    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Input for one scripted frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub held: HashSet<KeyCode>,
    pub pointer: Vec2,
    pub events: Vec<InputEvent>,
}

impl ScriptedFrame {
    /// A frame that only presses `key`
    pub fn key(key: KeyCode) -> Self {
        Self {
            events: vec![InputEvent::KeyDown(key)],
            ..Default::default()
        }
    }

    /// A frame holding `keys` down
    pub fn holding(keys: &[KeyCode]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            events: vec![InputEvent::Quit],
            ..Default::default()
        }
    }
}

/// Replays a queue of frames, then reports an idle player.
///
/// `poll_events` advances to the next frame, so the held keys and pointer of
/// a frame are visible for the rest of that frame.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<ScriptedFrame>,
    current: ScriptedFrame,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
            current: ScriptedFrame::default(),
        }
    }

    pub fn push(&mut self, frame: ScriptedFrame) {
        self.queue.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn held_keys(&self) -> HashSet<KeyCode> {
        self.current.held.clone()
    }

    fn pointer_position(&self) -> Vec2 {
        self.current.pointer
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.current = self.queue.pop_front().unwrap_or_default();
        std::mem::take(&mut self.current.events)
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_sprite(&mut self, _sprite: Sprite, _rect: Rect) {}
    fn draw_text(&mut self, _text: &str, _size: f32, _center: Vec2, _color: Rgb) {}
    fn present(&mut self) {}
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Sprite(Sprite, Rect),
    Text(String),
}

/// Keeps the draw calls of the last presented frame
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pending: Vec<DrawCall>,
    pub last_frame: Vec<DrawCall>,
    pub frames_presented: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text) => Some(text.as_str()),
                DrawCall::Sprite(..) => None,
            })
            .collect()
    }

    /// Number of sprites in the last presented frame matching `pred`
    pub fn count_sprites(&self, pred: impl Fn(&Sprite) -> bool) -> usize {
        self.last_frame
            .iter()
            .filter(|call| matches!(call, DrawCall::Sprite(sprite, _) if pred(sprite)))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.pending.push(DrawCall::Sprite(sprite, rect));
    }

    fn draw_text(&mut self, text: &str, _size: f32, _center: Vec2, _color: Rgb) {
        self.pending.push(DrawCall::Text(text.to_string()));
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioOut for NullAudio {
    fn play_once(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn play_loop(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Playback request log
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<(SoundEffect, f32)>,
    pub looping: Vec<(SoundEffect, f32)>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|(e, _)| *e == effect).count()
    }
}

impl AudioOut for RecordingAudio {
    fn play_once(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }

    fn play_loop(&mut self, effect: SoundEffect, volume: f32) {
        self.looping.push((effect, volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_steps_one_frame() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.tick(60), 16);
        assert_eq!(clock.tick(60), 16);
        assert_eq!(clock.now_ms(), 32);
        assert_eq!(clock.tick(0), 1000);
    }

    #[test]
    fn test_scripted_input_replays_then_idles() {
        let mut input = ScriptedInput::new([
            ScriptedFrame::key(KeyCode::Space),
            ScriptedFrame::holding(&[KeyCode::D]),
        ]);
        assert_eq!(input.poll_events(), vec![InputEvent::KeyDown(KeyCode::Space)]);
        assert!(input.held_keys().is_empty());

        assert!(input.poll_events().is_empty());
        assert!(input.held_keys().contains(&KeyCode::D));

        assert!(input.poll_events().is_empty());
        assert!(input.held_keys().is_empty());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_recording_renderer_keeps_last_frame() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw_text("first", 10.0, Vec2::ZERO, Rgb::WHITE);
        renderer.present();
        renderer.draw_sprite(Sprite::Bullet, Rect::new(0.0, 0.0, 1.0, 1.0));
        renderer.draw_text("second", 10.0, Vec2::ZERO, Rgb::WHITE);
        renderer.present();
        assert_eq!(renderer.texts(), vec!["second"]);
        assert_eq!(renderer.count_sprites(|s| *s == Sprite::Bullet), 1);
        assert_eq!(renderer.frames_presented, 2);
    }
}
