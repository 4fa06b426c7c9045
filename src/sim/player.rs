//! The player character
//!
//! Movement, shooting, damage/immunity and the stat setters the upgrade
//! system drives. Every setter clamps to the player caps.

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Progression;
use super::geometry::{Axis, Bounds, Rect, direction_to, move_axis};
use super::projectile::Bullet;
use crate::consts::*;
use crate::{playfield, playfield_center, step_animation};

/// Blink oscillation while immune
const BLINK_SPEED: f32 = 3.0;
const BLINK_TIME_DIVISOR: f32 = 200.0;
const BLINK_MIN_ALPHA: f32 = 100.0;
const BLINK_MAX_ALPHA: f32 = 255.0;

/// Directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveKeys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Number of held directional keys (each one advances the walk cycle)
    fn held_count(&self) -> usize {
        [self.left, self.right, self.up, self.down]
            .iter()
            .filter(|&&k| k)
            .count()
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub current_health: i32,
    pub max_health: i32,
    pub damage: i32,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Cooldown applied after each shot
    pub shoot_cooldown_set: u32,
    pub immune: bool,
    pub immunity_ticks: u32,
    pub score: u64,
    pub anim_phase: f32,
}

impl Player {
    pub fn new(center: Vec2, speed: f32) -> Self {
        Self {
            rect: Rect::from_center(center, PLAYER_SIZE),
            speed: speed.min(PLAYER_MAX_SPEED),
            current_health: PLAYER_INITIAL_HEALTH,
            max_health: PLAYER_INITIAL_HEALTH,
            damage: PLAYER_INITIAL_DAMAGE,
            shoot_cooldown: 0,
            shoot_cooldown_set: PLAYER_INITIAL_SHOOT_COOLDOWN,
            immune: false,
            immunity_ticks: 0,
            score: 0,
            anim_phase: 0.0,
        }
    }

    /// Per-frame displacement for the held keys, diagonal-normalized
    pub fn displacement(&self, keys: MoveKeys) -> Vec2 {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if keys.left {
            dx = -self.speed;
        }
        if keys.right {
            dx = self.speed;
        }
        if keys.up {
            dy = -self.speed;
        }
        if keys.down {
            dy = self.speed;
        }
        if dx != 0.0 && dy != 0.0 {
            dx *= FRAC_1_SQRT_2;
            dy *= FRAC_1_SQRT_2;
        }
        Vec2::new(dx, dy)
    }

    /// Advance one frame: immunity countdown, movement, cooldown
    pub fn update<B: Bounds>(&mut self, walls: &[B], keys: MoveKeys) {
        if self.immune {
            self.immunity_ticks = self.immunity_ticks.saturating_sub(1);
            if self.immunity_ticks == 0 {
                self.immune = false;
            }
        }

        for _ in 0..keys.held_count() {
            self.anim_phase = step_animation(self.anim_phase);
        }

        let delta = self.displacement(keys);
        move_axis(&mut self.rect, Axis::X, delta.x, walls);
        move_axis(&mut self.rect, Axis::Y, delta.y, walls);
        self.rect.clamp_within(&playfield());

        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }
    }

    /// Fire toward `target` if the cooldown allows.
    ///
    /// Returns `None` while cooling down or when `target` is the player's own
    /// center (no direction to fire in).
    pub fn shoot(&mut self, target: Vec2, bullet_speed: f32) -> Option<Bullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        let origin = self.rect.center();
        let direction = direction_to(origin, target)?;
        self.shoot_cooldown = self.shoot_cooldown_set;
        Some(Bullet::new(origin, direction, bullet_speed))
    }

    /// Take a contact hit from the current room's enemies.
    ///
    /// Returns false (and changes nothing) while immune.
    pub fn take_damage(&mut self, progression: &Progression) -> bool {
        if self.immune {
            return false;
        }
        self.current_health =
            (self.current_health - progression.contact_damage()).max(PLAYER_HEALTH_FLOOR);
        self.immune = true;
        self.immunity_ticks = IMMUNITY_TICKS;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.current_health < 1
    }

    /// Put the player back at the spawn point
    pub fn reset_location(&mut self) {
        self.rect.set_center(playfield_center());
    }

    pub fn clear_immunity(&mut self) {
        self.immune = false;
        self.immunity_ticks = 0;
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    pub fn set_current_health(&mut self, health: i32) {
        self.current_health = health.min(self.max_health);
    }

    /// Raise max health (current health is not topped up)
    pub fn increase_health(&mut self, amount: i32) {
        self.max_health = (self.max_health + amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn set_max_health(&mut self, health: i32) {
        self.max_health = health.min(PLAYER_MAX_HEALTH);
        self.current_health = self.current_health.min(self.max_health);
    }

    pub fn increase_damage(&mut self, amount: i32) {
        self.damage = (self.damage + amount).min(PLAYER_MAX_DAMAGE);
    }

    pub fn set_damage(&mut self, damage: i32) {
        self.damage = damage.min(PLAYER_MAX_DAMAGE);
    }

    pub fn decrease_shoot_cooldown(&mut self, amount: u32) {
        self.shoot_cooldown_set = self
            .shoot_cooldown_set
            .saturating_sub(amount)
            .max(PLAYER_MIN_SHOOT_COOLDOWN);
    }

    pub fn increase_speed(&mut self, amount: f32) {
        self.speed = (self.speed + amount).min(PLAYER_MAX_SPEED);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.min(PLAYER_MAX_SPEED);
    }

    pub fn add_points(&mut self, points: u64) {
        self.score += points;
    }

    /// Sprite opacity at `now_ms`: pulses while immune, opaque otherwise
    pub fn blink_alpha(&self, now_ms: u64) -> u8 {
        if !self.immune {
            return BLINK_MAX_ALPHA as u8;
        }
        let t = now_ms as f32 / BLINK_TIME_DIVISOR;
        let wave = 0.5 + 0.5 * (BLINK_SPEED * t * TAU).sin();
        (BLINK_MIN_ALPHA + (BLINK_MAX_ALPHA - BLINK_MIN_ALPHA) * wave) as u8
    }

    /// Current walk-cycle frame index
    pub fn frame(&self) -> usize {
        (self.anim_phase as usize) % ANIMATION_FRAMES
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }
}
