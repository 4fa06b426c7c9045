//! Data-driven game balance
//!
//! Starting values for the difficulty tier and the room generator. Defaults
//! reproduce the stock game; a JSON document can override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("safe zone range {0} leaves no room for inner walls")]
    SafeZoneTooLarge(f32),

    #[error("safe zone range {range} leaves no room for enemies (max {max})")]
    EnemyZoneTooLarge { range: f32, max: f32 },

    #[error("placement attempts must be at least 1")]
    NoPlacementAttempts,
}

/// Balance knobs read at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Half-extent of the wall-free square around the spawn point
    pub safe_zone_range: f32,
    /// Starting shared enemy tier
    pub initial_enemy_speed: f32,
    pub initial_enemy_health: f32,
    pub initial_enemy_damage: f32,
    /// Starting global bullet speed
    pub default_bullet_speed: f32,
    /// Starting player movement speed
    pub initial_player_speed: f32,
    /// Upgrade checkpoint fires when (level + 1) % (difficulty + 1) == 0
    pub difficulty: u32,
    /// Rejection-sampling retries per wall/enemy before giving up on it
    pub max_placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            safe_zone_range: 70.0,
            initial_enemy_speed: 1.5,
            initial_enemy_health: 3.0,
            initial_enemy_damage: 1.0,
            default_bullet_speed: 7.0,
            initial_player_speed: 3.0,
            difficulty: 0,
            max_placement_attempts: 500,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the effective balance)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("safe_zone_range", self.safe_zone_range),
            ("initial_enemy_speed", self.initial_enemy_speed),
            ("initial_enemy_health", self.initial_enemy_health),
            ("initial_enemy_damage", self.initial_enemy_damage),
            ("default_bullet_speed", self.default_bullet_speed),
            ("initial_player_speed", self.initial_player_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        // The safe zone must not swallow the whole inner-wall band
        let band =
            PLAYFIELD_WIDTH.min(PLAYFIELD_HEIGHT) / 2.0 - INNER_WALL_MARGIN_TILES * TILE_SIZE;
        if self.safe_zone_range >= band {
            return Err(TuningError::SafeZoneTooLarge(self.safe_zone_range));
        }

        let max = max_enemy_safe_zone_range();
        if self.safe_zone_range > max {
            return Err(TuningError::EnemyZoneTooLarge {
                range: self.safe_zone_range,
                max,
            });
        }

        if self.max_placement_attempts == 0 {
            return Err(TuningError::NoPlacementAttempts);
        }
        Ok(())
    }
}

/// Largest safe zone whose enemy zone still leaves a spawn strip one and a
/// half boss widths wide between it and the spawn margin on each side
pub fn max_enemy_safe_zone_range() -> f32 {
    let strip = PLAYFIELD_WIDTH / 2.0 - ENEMY_SPAWN_MARGIN_TILES * TILE_SIZE - 1.5 * BOSS_SIZE.x;
    strip / ENEMY_SAFE_ZONE_MULTIPLIER
}
