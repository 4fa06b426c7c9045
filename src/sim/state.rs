//! Game state and session phases
//!
//! Everything a run needs lives in `GameState`: the player, the current room,
//! in-flight bullets, the progression tier and the seeded RNG. Transitions
//! that touch several of those at once (run reset, level advance, upgrade
//! choice) are methods here so the tick loop only sequences them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Progression;
use super::enemy::EnemyKind;
use super::player::Player;
use super::projectile::Bullet;
use super::room::{Room, RoomParams, Wall, outer_walls};
use super::upgrade::{OFFER_COUNT, UpgradeOffer, roll_offers};
use crate::consts::*;
use crate::playfield_center;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for SPACE
    Welcome,
    /// Active gameplay
    Playing,
    /// Simulation halted while the player picks an upgrade
    UpgradePause,
    /// Run ended, waiting for SPACE to restart
    Dead,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Shot,
    PlayerHurt { health: i32 },
    EnemyKilled { kind: EnemyKind },
    LevelCleared { level: u32 },
    BossRoom { level: u32 },
    UpgradeOffered,
    UpgradeChosen(UpgradeOffer),
    PlayerDied { score: u64, level: u32 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub room: Room,
    pub progression: Progression,
    /// Offers on the table during `UpgradePause`
    pub offers: Option<[UpgradeOffer; OFFER_COUNT]>,
    /// Simulation tick counter (advances only while playing)
    pub time_ticks: u64,
    /// Rooms built since the session started
    pub rooms_generated: u32,
    outer_walls: [Wall; 4],
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with the stock balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session on the welcome screen with a first room ready
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let outer_walls = outer_walls();
        let progression = Progression::new(&tuning);
        let room = Room::generate(&mut rng, &outer_walls, &progression, room_params(&tuning));
        Self {
            seed,
            rng,
            player: Player::new(playfield_center(), tuning.initial_player_speed),
            tuning,
            phase: GamePhase::Welcome,
            bullets: Vec::new(),
            room,
            progression,
            offers: None,
            time_ticks: 0,
            rooms_generated: 1,
            outer_walls,
            events: Vec::new(),
        }
    }

    /// Fresh progression, player and room; the RNG keeps its stream
    pub fn reset_run(&mut self) {
        self.progression = Progression::new(&self.tuning);
        self.player = Player::new(playfield_center(), self.tuning.initial_player_speed);
        self.bullets.clear();
        self.offers = None;
        self.regenerate_room();
    }

    /// SPACE on the welcome or death screen
    pub fn start_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Build the room for the current level
    pub fn regenerate_room(&mut self) {
        self.room = Room::generate(
            &mut self.rng,
            &self.outer_walls,
            &self.progression,
            room_params(&self.tuning),
        );
        self.rooms_generated += 1;
    }

    /// Room cleared: bump the tier, score, rebuild and maybe offer upgrades
    pub fn advance_level(&mut self) {
        let cleared = self.progression.reached_level;
        if self.progression.on_room_cleared() {
            log::debug!("Enemy tier raised to {:?}", self.progression.enemy);
        }
        self.player.add_points(ROOM_CLEAR_POINTS);
        self.events.push(GameEvent::LevelCleared { level: cleared });
        log::info!("Level {} cleared (score {})", cleared, self.player.score);

        self.regenerate_room();
        self.bullets.clear();
        self.player.reset_location();
        self.player.clear_immunity();

        let level = self.progression.reached_level;
        if self.room.boss {
            self.events.push(GameEvent::BossRoom { level });
            log::info!("Boss room at level {}", level);
        }

        if self.progression.upgrade_due(self.tuning.difficulty) {
            self.offers = Some(roll_offers(&mut self.rng, level));
            self.phase = GamePhase::UpgradePause;
            self.events.push(GameEvent::UpgradeOffered);
        }
    }

    /// Apply offer `index` and resume play. Ignored outside the upgrade pause.
    pub fn choose_upgrade(&mut self, index: usize) -> Option<UpgradeOffer> {
        if self.phase != GamePhase::UpgradePause {
            return None;
        }
        let offer = *self.offers.as_ref()?.get(index)?;
        offer.apply(&mut self.player, &mut self.progression);
        self.offers = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::UpgradeChosen(offer));
        log::info!("Upgrade chosen: {} +{}", offer.kind.label(), offer.magnitude);
        Some(offer)
    }

    /// Move the player to the death screen
    pub fn kill_player(&mut self) {
        self.phase = GamePhase::Dead;
        let level = self.progression.reached_level;
        self.events.push(GameEvent::PlayerDied {
            score: self.player.score,
            level,
        });
        log::info!("Player died at level {} with score {}", level, self.player.score);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn room_params(tuning: &Tuning) -> RoomParams {
    RoomParams {
        safe_zone_range: tuning.safe_zone_range,
        max_attempts: tuning.max_placement_attempts,
    }
}
