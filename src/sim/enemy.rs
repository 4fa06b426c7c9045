//! Enemies: wander toward the player, bounce off walls
//!
//! Normal enemies and the boss share one type and one update path; only the
//! construction-time stats and the bounding box differ by `EnemyKind`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Progression;
use super::geometry::{Axis, Bounds, Rect, direction_to, move_axis};
use crate::consts::*;
use crate::step_animation;

/// Enemy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    /// One per boss room, derived from the boss tier
    Boss,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Normal => ENEMY_SIZE,
            EnemyKind::Boss => BOSS_SIZE,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub vel: Vec2,
    /// Frames until the next direction re-plan (re-plans when <= 0)
    pub replan_timer: i32,
    pub anim_phase: f32,
}

impl Enemy {
    /// Build an enemy of `kind` centered on `center`, reading the current tier
    pub fn spawn(kind: EnemyKind, center: Vec2, progression: &Progression) -> Self {
        let stats = progression.stats_for(kind);
        Self {
            kind,
            rect: Rect::from_center(center, kind.size()),
            health: stats.max_health,
            speed: stats.speed,
            damage: stats.damage,
            vel: Vec2::ZERO,
            replan_timer: 0,
            anim_phase: 0.0,
        }
    }

    /// Advance one frame: re-plan if due, animate, move with wall bounce
    pub fn update<R: Rng, B: Bounds>(&mut self, target: Vec2, walls: &[B], rng: &mut R) {
        if self.replan_timer <= 0 {
            self.replan(target, rng);
        } else {
            self.replan_timer -= 1;
        }

        self.anim_phase = step_animation(self.anim_phase);

        if move_axis(&mut self.rect, Axis::X, self.vel.x, walls) {
            self.vel.x = -self.vel.x;
        }
        if move_axis(&mut self.rect, Axis::Y, self.vel.y, walls) {
            self.vel.y = -self.vel.y;
        }
    }

    /// Pick a new heading: toward `target`, jittered, at the enemy's speed
    fn replan<R: Rng>(&mut self, target: Vec2, rng: &mut R) {
        let toward = direction_to(self.rect.center(), target).unwrap_or(Vec2::ZERO);
        let jitter = Vec2::new(
            rng.random_range(-ENEMY_DIRECTION_NOISE..=ENEMY_DIRECTION_NOISE),
            rng.random_range(-ENEMY_DIRECTION_NOISE..=ENEMY_DIRECTION_NOISE),
        );
        let heading = (toward + jitter).normalize_or_zero();
        self.vel = heading * self.speed;
        self.replan_timer = rng.random_range(ENEMY_REPLAN_MIN..=ENEMY_REPLAN_MAX);
    }

    /// Health is compared in whole points, so 0.6 remaining counts as dead
    pub fn is_dead(&self) -> bool {
        self.health.trunc() <= 0.0
    }

    pub fn take_hit(&mut self, damage: i32) {
        self.health -= damage as f32;
    }

    /// Score awarded for the kill
    pub fn points(&self) -> u64 {
        ENEMY_POINTS
    }

    /// Current two-frame animation index
    pub fn frame(&self) -> usize {
        (self.anim_phase as usize) % ANIMATION_FRAMES
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }
}
