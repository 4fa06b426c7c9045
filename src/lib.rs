//! Infernal - simulation core of a top-down room-clearing action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, rooms, progression, upgrades)
//! - `session`: Frame loop wiring the simulation to the platform
//! - `platform`: Clock/input/audio/renderer capabilities plus headless backends
//! - `renderer`: Scene composition in terms of sprites and text
//! - `audio`: Sound cues and volume mixing
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameOutcome, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

use crate::sim::geometry::Rect;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Window title shown by the frontend
    pub const WINDOW_TITLE: &str = "Infernal";

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 700.0;
    /// Wall tile edge length
    pub const TILE_SIZE: f32 = 40.0;

    /// Target frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 60;

    /// Entity bounding boxes (match the scaled sprite sizes)
    pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 40.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(36.0, 28.0);
    pub const BOSS_SIZE: Vec2 = Vec2::new(72.0, 56.0);
    pub const BULLET_SIZE: Vec2 = Vec2::new(10.0, 10.0);

    /// Player caps and defaults
    pub const PLAYER_MAX_HEALTH: i32 = 21;
    pub const PLAYER_MAX_DAMAGE: i32 = 10;
    pub const PLAYER_MIN_SHOOT_COOLDOWN: u32 = 1;
    pub const PLAYER_MAX_SPEED: f32 = 15.0;
    pub const PLAYER_INITIAL_HEALTH: i32 = 3;
    pub const PLAYER_INITIAL_DAMAGE: i32 = 1;
    pub const PLAYER_INITIAL_SHOOT_COOLDOWN: u32 = 20;
    /// Health may dip below zero on the killing blow, but never past this
    pub const PLAYER_HEALTH_FLOOR: i32 = -PLAYER_MAX_DAMAGE;
    /// Post-hit immunity (1 second)
    pub const IMMUNITY_TICKS: u32 = TARGET_FPS;

    /// Bullet defaults
    pub const BULLET_MAX_SPEED: f32 = 30.0;
    pub const BULLET_LIFETIME_TICKS: u32 = 60;

    /// Shared enemy tier caps
    pub const ENEMY_MAX_SPEED: f32 = 20.0;
    pub const ENEMY_MAX_DAMAGE: f32 = 5.0;
    pub const ENEMY_MAX_HEALTH: f32 = 60.0;
    /// Random-walk noise added to each direction component
    pub const ENEMY_DIRECTION_NOISE: f32 = 0.5;
    /// Frames between direction re-plans (inclusive range)
    pub const ENEMY_REPLAN_MIN: i32 = 30;
    pub const ENEMY_REPLAN_MAX: i32 = 90;

    /// Boss tier
    pub const BOSS_LEVEL_INTERVAL: u32 = 4;
    pub const BOSS_BASE_HEALTH: f32 = 30.0;
    pub const BOSS_HEALTH_PER_LEVEL: f32 = 3.0;
    pub const BOSS_BASE_DAMAGE: f32 = 5.0;
    pub const BOSS_MAX_DAMAGE: f32 = 10.0;
    pub const BOSS_DAMAGE_DIVISOR: f32 = 4.0;
    pub const BOSS_BASE_SPEED: f32 = 1.0;
    pub const BOSS_MAX_SPEED: f32 = 20.0;

    /// Progression bumps (applied on odd-indexed room clears)
    pub const ENEMY_HEALTH_INCREASE: f32 = 0.4;
    pub const ENEMY_SPEED_LARGE_INC: f32 = 0.4;
    pub const ENEMY_SPEED_SMALL_INC: f32 = 0.1;
    /// Speed below which the large increment applies
    pub const ENEMY_SPEED_SOFT_CAP: f32 = 5.0;
    pub const ENEMY_DAMAGE_INCREASE: f32 = 0.2;

    /// Score awards
    pub const ENEMY_POINTS: u64 = 5;
    pub const ROOM_CLEAR_POINTS: u64 = 10;

    /// Room generation
    pub const INNER_WALL_MIN: u32 = 3;
    pub const INNER_WALL_VARIATION: u32 = 3;
    /// Inner wall top-left lies in [MARGIN * tile, extent - FAR_MARGIN * tile]
    pub const INNER_WALL_MARGIN_TILES: f32 = 2.0;
    pub const INNER_WALL_FAR_MARGIN_TILES: f32 = 3.0;
    pub const ENEMY_SPAWN_MARGIN_TILES: f32 = 2.0;
    pub const ENEMY_BASE_COUNT: u32 = 1;
    pub const ENEMY_COUNT_VARIATION: u32 = 2;
    /// Enemy safe zone half-extent = wall safe zone half-extent * this
    pub const ENEMY_SAFE_ZONE_MULTIPLIER: f32 = 2.0;

    /// Animation
    pub const ANIMATION_STEP: f32 = 0.1;
    pub const ANIMATION_FRAMES: usize = 2;
}

/// Whole playfield as a rectangle
#[inline]
pub fn playfield() -> Rect {
    Rect::new(0.0, 0.0, consts::PLAYFIELD_WIDTH, consts::PLAYFIELD_HEIGHT)
}

/// Center of the playfield (player spawn point)
#[inline]
pub fn playfield_center() -> Vec2 {
    Vec2::new(
        (consts::PLAYFIELD_WIDTH / 2.0).floor(),
        (consts::PLAYFIELD_HEIGHT / 2.0).floor(),
    )
}

/// Advance a two-frame animation phase, wrapping back to 0
#[inline]
pub fn step_animation(phase: f32) -> f32 {
    let next = phase + consts::ANIMATION_STEP;
    if next >= consts::ANIMATION_FRAMES as f32 {
        0.0
    } else {
        next
    }
}
