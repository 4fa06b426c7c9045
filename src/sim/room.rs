//! Procedural room generation
//!
//! A room is the playfield border (four outer walls shared by every room of
//! a session), a handful of inner walls and a batch of enemies. Inner walls
//! and enemies are placed by rejection sampling: draw a candidate, keep it
//! only if it stays clear of the spawn safe zone and every wall placed so
//! far. Each object gets a bounded number of draws; an object that cannot
//! be placed is skipped rather than stalling the frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::{Progression, is_boss_level};
use super::enemy::{Enemy, EnemyKind};
use super::geometry::{Bounds, Rect};
use crate::consts::*;
use crate::playfield_center;

/// Rejection sampling gave up on an object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free spot for an inner wall after {attempts} attempts")]
    WallExhausted { attempts: u32 },

    #[error("no free spot for a {kind:?} enemy after {attempts} attempts")]
    EnemyExhausted { kind: EnemyKind, attempts: u32 },
}

/// A static wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

impl Bounds for Wall {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// The four border walls, one tile thick (top, bottom, left, right)
pub fn outer_walls() -> [Wall; 4] {
    [
        Wall::new(0.0, 0.0, PLAYFIELD_WIDTH, TILE_SIZE),
        Wall::new(0.0, PLAYFIELD_HEIGHT - TILE_SIZE, PLAYFIELD_WIDTH, TILE_SIZE),
        Wall::new(0.0, 0.0, TILE_SIZE, PLAYFIELD_HEIGHT),
        Wall::new(PLAYFIELD_WIDTH - TILE_SIZE, 0.0, TILE_SIZE, PLAYFIELD_HEIGHT),
    ]
}

/// Central square kept free of walls
pub fn wall_safe_zone(range: f32) -> Rect {
    Rect::around(playfield_center(), range)
}

/// Larger central square kept free of enemies
pub fn enemy_safe_zone(range: f32) -> Rect {
    Rect::around(playfield_center(), range * ENEMY_SAFE_ZONE_MULTIPLIER)
}

/// Inputs for one generation pass
#[derive(Debug, Clone, Copy)]
pub struct RoomParams {
    /// Half-extent of the wall safe zone
    pub safe_zone_range: f32,
    /// Draws per object before giving up on it
    pub max_attempts: u32,
}

/// One generated room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Outer walls first, then inner walls in placement order
    pub walls: Vec<Wall>,
    pub enemies: Vec<Enemy>,
    /// Level this room was generated for
    pub level: u32,
    pub boss: bool,
    /// Objects skipped because placement ran out of attempts
    pub placement_failures: u32,
    outer_count: usize,
}

impl Room {
    /// Generate a room for the current progression level
    pub fn generate<R: Rng>(
        rng: &mut R,
        outer: &[Wall],
        progression: &Progression,
        params: RoomParams,
    ) -> Self {
        let level = progression.reached_level;
        let boss = is_boss_level(level);
        let mut room = Self {
            walls: outer.to_vec(),
            enemies: Vec::new(),
            level,
            boss,
            placement_failures: 0,
            outer_count: outer.len(),
        };

        let safe_zone = wall_safe_zone(params.safe_zone_range);
        let wall_count = rng.random_range(INNER_WALL_MIN..=INNER_WALL_MIN + INNER_WALL_VARIATION);
        for _ in 0..wall_count {
            match place_wall(rng, &room.walls, &safe_zone, params.max_attempts) {
                Ok(wall) => room.walls.push(wall),
                Err(e) => {
                    log::warn!("Level {}: {}", level, e);
                    room.placement_failures += 1;
                }
            }
        }

        let enemy_zone = enemy_safe_zone(params.safe_zone_range);
        let (kind, enemy_count) = if boss {
            (EnemyKind::Boss, 1)
        } else {
            let base = ENEMY_BASE_COUNT + level / 2;
            (EnemyKind::Normal, rng.random_range(base..=base + ENEMY_COUNT_VARIATION))
        };
        for _ in 0..enemy_count {
            let placed =
                place_enemy(rng, kind, &room.walls, &enemy_zone, progression, params.max_attempts);
            match placed {
                Ok(enemy) => room.enemies.push(enemy),
                Err(e) => {
                    log::warn!("Level {}: {}", level, e);
                    room.placement_failures += 1;
                }
            }
        }

        log::debug!(
            "Generated level {} room: {} inner walls, {} enemies{}",
            level,
            room.inner_walls().len(),
            room.enemies.len(),
            if boss { " (boss)" } else { "" }
        );
        room
    }

    /// Walls generated for this room only
    pub fn inner_walls(&self) -> &[Wall] {
        &self.walls[self.outer_count..]
    }

    /// The shared border walls
    pub fn outer_walls(&self) -> &[Wall] {
        &self.walls[..self.outer_count]
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// Draw inner-wall candidates until one clears the safe zone and all walls
fn place_wall<R: Rng>(
    rng: &mut R,
    walls: &[Wall],
    safe_zone: &Rect,
    max_attempts: u32,
) -> Result<Wall, PlacementError> {
    let tile = TILE_SIZE as i32;
    let margin = (INNER_WALL_MARGIN_TILES * TILE_SIZE) as i32;
    let far = (INNER_WALL_FAR_MARGIN_TILES * TILE_SIZE) as i32;
    let max_x = PLAYFIELD_WIDTH as i32 - far;
    let max_y = PLAYFIELD_HEIGHT as i32 - far;
    let sizes = [tile, tile * 2, tile * 3];

    for _ in 0..max_attempts {
        let x = rng.random_range(margin..=max_x);
        let y = rng.random_range(margin..=max_y);
        let w = sizes[rng.random_range(0..sizes.len())];
        let h = sizes[rng.random_range(0..sizes.len())];
        let candidate = Rect::new(x as f32, y as f32, w as f32, h as f32);
        if !candidate.intersects(safe_zone)
            && !walls.iter().any(|wall| candidate.intersects(&wall.rect))
        {
            return Ok(Wall { rect: candidate });
        }
    }
    Err(PlacementError::WallExhausted { attempts: max_attempts })
}

/// Draw enemy centers until the enemy's box clears the zone and all walls
fn place_enemy<R: Rng>(
    rng: &mut R,
    kind: EnemyKind,
    walls: &[Wall],
    safe_zone: &Rect,
    progression: &Progression,
    max_attempts: u32,
) -> Result<Enemy, PlacementError> {
    let margin = (ENEMY_SPAWN_MARGIN_TILES * TILE_SIZE) as i32;
    let max_x = PLAYFIELD_WIDTH as i32 - margin;
    let max_y = PLAYFIELD_HEIGHT as i32 - margin;

    for _ in 0..max_attempts {
        let center = Vec2::new(
            rng.random_range(margin..=max_x) as f32,
            rng.random_range(margin..=max_y) as f32,
        );
        let candidate = Enemy::spawn(kind, center, progression);
        if !candidate.rect.intersects(safe_zone)
            && !walls.iter().any(|wall| candidate.rect.intersects(&wall.rect))
        {
            return Ok(candidate);
        }
    }
    Err(PlacementError::EnemyExhausted { kind, attempts: max_attempts })
}
