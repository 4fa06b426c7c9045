//! Sound cues
//!
//! Maps simulation events to sound effects and scales them by the player's
//! volume settings. Playback itself is the frontend's `AudioOut`.

use crate::platform::AudioOut;
use crate::settings::Settings;
use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires a bullet
    Shoot,
    /// Player takes a contact hit
    PlayerDamaged,
    /// Enemy or boss killed
    EnemyDead,
    /// Looping soundtrack
    BackgroundMusic,
}

impl SoundEffect {
    /// Mix level before settings are applied
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.1,
            SoundEffect::PlayerDamaged => 0.2,
            SoundEffect::EnemyDead => 0.2,
            SoundEffect::BackgroundMusic => 0.05,
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(SoundEffect::Shoot),
            GameEvent::PlayerHurt { .. } => Some(SoundEffect::PlayerDamaged),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyDead),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioMixer<A: AudioOut> {
    out: A,
    settings: Settings,
    music_started: bool,
}

impl<A: AudioOut> AudioMixer<A> {
    pub fn new(out: A, settings: Settings) -> Self {
        Self {
            out,
            settings,
            music_started: false,
        }
    }

    /// Start the soundtrack; later calls are ignored
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        let volume = SoundEffect::BackgroundMusic.base_volume() * self.settings.music_gain();
        self.out.play_loop(SoundEffect::BackgroundMusic, volume);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = effect.base_volume() * self.settings.sfx_gain();
        if volume <= 0.0 {
            return;
        }
        self.out.play_once(effect, volume);
    }

    /// Play the cue for `event`, if any
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    pub fn output(&self) -> &A {
        &self.out
    }
}
