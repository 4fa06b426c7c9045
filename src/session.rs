//! Frame loop
//!
//! Wires the simulation to the platform: one input poll, one tick and one
//! rendered frame per call to `Session::frame`, paced by the clock.

use crate::audio::AudioMixer;
use crate::consts::TARGET_FPS;
use crate::platform::{AudioOut, Clock, InputEvent, InputSource, KeyCode, MouseButton, Renderer};
use crate::renderer::draw_frame;
use crate::settings::Settings;
use crate::sim::player::MoveKeys;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{TickInput, tick};

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The window was closed; stop the loop
    Quit,
}

/// A running game bound to its platform backends
pub struct Session<R, C, I, A>
where
    R: Renderer,
    C: Clock,
    I: InputSource,
    A: AudioOut,
{
    state: GameState,
    renderer: R,
    clock: C,
    input: I,
    audio: AudioMixer<A>,
    autopilot: bool,
    frames: u64,
}

impl<R, C, I, A> Session<R, C, I, A>
where
    R: Renderer,
    C: Clock,
    I: InputSource,
    A: AudioOut,
{
    /// Bind `state` to the backends and start the soundtrack
    pub fn new(
        state: GameState,
        renderer: R,
        clock: C,
        input: I,
        audio: A,
        settings: Settings,
    ) -> Self {
        let mut audio = AudioMixer::new(audio, settings);
        audio.start_music();
        Self {
            state,
            renderer,
            clock,
            input,
            audio,
            autopilot: false,
            frames: 0,
        }
    }

    /// Let the simulation play itself (input events other than quit are ignored)
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    /// Run one frame
    pub fn frame(&mut self) -> FrameOutcome {
        self.clock.tick(TARGET_FPS);

        let mut input = TickInput {
            autopilot: self.autopilot,
            ..Default::default()
        };
        for event in self.input.poll_events() {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit after {} frames", self.frames);
                    return FrameOutcome::Quit;
                }
                InputEvent::KeyDown(KeyCode::Space) => input.start = true,
                InputEvent::KeyDown(_) => {}
                InputEvent::MouseDown { button, pos } => {
                    // Any button picks an upgrade, only the left one fires.
                    // First click of the frame wins.
                    if button == MouseButton::Left || self.state.phase == GamePhase::UpgradePause {
                        input.click.get_or_insert(pos);
                    }
                }
            }
        }
        input.keys = MoveKeys::from_held(&self.input.held_keys());

        tick(&mut self.state, &input);
        for event in self.state.drain_events() {
            self.audio.on_event(&event);
        }

        draw_frame(&mut self.renderer, &self.state, self.clock.now_ms());
        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Run until quit or until `max_frames` frames have been played.
    /// Returns the number of frames played by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let mut played = 0;
        while max_frames.is_none_or(|max| played < max) {
            if self.frame() == FrameOutcome::Quit {
                break;
            }
            played += 1;
        }
        played
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio(&self) -> &A {
        self.audio.output()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Frames played since the session started
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{
        FixedClock, NullRenderer, RecordingAudio, ScriptedFrame, ScriptedInput,
    };

    type TestSession = Session<NullRenderer, FixedClock, ScriptedInput, RecordingAudio>;

    fn session(frames: Vec<ScriptedFrame>) -> TestSession {
        Session::new(
            GameState::new(11),
            NullRenderer,
            FixedClock::new(),
            ScriptedInput::new(frames),
            RecordingAudio::new(),
            Settings::default(),
        )
    }

    #[test]
    fn test_music_starts_with_session() {
        let s = session(vec![]);
        assert_eq!(s.audio().looping.len(), 1);
    }

    #[test]
    fn test_space_starts_run() {
        let mut s = session(vec![ScriptedFrame::key(KeyCode::Space)]);
        assert_eq!(s.frame(), FrameOutcome::Continue);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.clock().now_ms(), 16);
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut s = session(vec![
            ScriptedFrame::default(),
            ScriptedFrame::quit(),
            ScriptedFrame::default(),
        ]);
        assert_eq!(s.run(None), 1);
        assert_eq!(s.frames(), 1);
        assert_eq!(s.input_mut().remaining(), 1);
    }

    #[test]
    fn test_run_respects_frame_budget() {
        let mut s = session(vec![]);
        assert_eq!(s.run(Some(5)), 5);
        assert_eq!(s.state().phase, GamePhase::Welcome);
    }
}
