//! Difficulty tier and level progression
//!
//! All enemies spawned from a given point share one evolving stat block (the
//! tier). It lives here, owned by the game state, instead of in per-enemy
//! fields so that reset points are explicit: a new run builds a fresh
//! `Progression` from the tuning.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::enemy::EnemyKind;

/// Stats an enemy reads when it is constructed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
}

/// True if `level` is a boss room
#[inline]
pub fn is_boss_level(level: u32) -> bool {
    (level + 1) % BOSS_LEVEL_INTERVAL == 0
}

/// Process-wide progression for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Rooms cleared so far (0 in the first room)
    pub reached_level: u32,
    /// Current shared tier for normal enemies
    pub enemy: TierStats,
    /// Speed given to newly fired bullets
    pub bullet_speed: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            reached_level: 0,
            enemy: TierStats {
                max_health: tuning.initial_enemy_health.min(ENEMY_MAX_HEALTH),
                speed: tuning.initial_enemy_speed.min(ENEMY_MAX_SPEED),
                damage: tuning.initial_enemy_damage.min(ENEMY_MAX_DAMAGE),
            },
            bullet_speed: tuning.default_bullet_speed.min(BULLET_MAX_SPEED),
        }
    }

    /// Whether the current room is a boss room
    pub fn in_boss_room(&self) -> bool {
        is_boss_level(self.reached_level)
    }

    /// Boss stats derived from the boss base tier, the shared enemy tier and
    /// the current level
    pub fn boss_stats(&self) -> TierStats {
        let level = self.reached_level as f32;
        TierStats {
            max_health: BOSS_BASE_HEALTH + BOSS_HEALTH_PER_LEVEL * level,
            speed: (BOSS_BASE_SPEED + (self.enemy.speed / 3.0).trunc()).min(BOSS_MAX_SPEED),
            damage: (BOSS_BASE_DAMAGE * (level + 1.0) / BOSS_DAMAGE_DIVISOR).min(BOSS_MAX_DAMAGE),
        }
    }

    /// Stats for a freshly spawned enemy of `kind`
    pub fn stats_for(&self, kind: EnemyKind) -> TierStats {
        match kind {
            EnemyKind::Normal => self.enemy,
            EnemyKind::Boss => self.boss_stats(),
        }
    }

    /// Whole-point damage dealt to the player on contact in the current room
    pub fn contact_damage(&self) -> i32 {
        let damage = if self.in_boss_room() {
            self.boss_stats().damage
        } else {
            self.enemy.damage
        };
        damage.trunc() as i32
    }

    /// Advance past a cleared room.
    ///
    /// The tier is bumped only when the level being left is odd; level 0 and
    /// every other even level leave the tier untouched. Returns true if the
    /// tier changed.
    pub fn on_room_cleared(&mut self) -> bool {
        let bumped = self.reached_level % 2 != 0;
        if bumped {
            self.enemy.max_health =
                (self.enemy.max_health + ENEMY_HEALTH_INCREASE).min(ENEMY_MAX_HEALTH);
            let speed_step = if self.enemy.speed < ENEMY_SPEED_SOFT_CAP {
                ENEMY_SPEED_LARGE_INC
            } else {
                ENEMY_SPEED_SMALL_INC
            };
            self.enemy.speed = (self.enemy.speed + speed_step).min(ENEMY_MAX_SPEED);
            self.enemy.damage = (self.enemy.damage + ENEMY_DAMAGE_INCREASE).min(ENEMY_MAX_DAMAGE);
        }
        self.reached_level += 1;
        bumped
    }

    /// Upgrade checkpoint cadence: every `difficulty + 1` levels. A period
    /// that does not fit in a `u32` never comes due.
    pub fn upgrade_due(&self, difficulty: u32) -> bool {
        match (self.reached_level.checked_add(1), difficulty.checked_add(1)) {
            (Some(level), Some(period)) => level % period == 0,
            _ => false,
        }
    }

    pub fn increase_bullet_speed(&mut self, amount: f32) {
        self.bullet_speed = (self.bullet_speed + amount).min(BULLET_MAX_SPEED);
    }

    pub fn set_bullet_speed(&mut self, speed: f32) {
        self.bullet_speed = speed.min(BULLET_MAX_SPEED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_cadence() {
        let boss_levels: Vec<u32> = (0..16).filter(|&l| is_boss_level(l)).collect();
        assert_eq!(boss_levels, vec![3, 7, 11, 15]);
    }

    #[test]
    fn test_bump_skips_even_levels() {
        let mut p = Progression::new(&Tuning::default());
        let start = p.enemy;

        // Leaving level 0: no bump
        assert!(!p.on_room_cleared());
        assert_eq!(p.enemy, start);
        assert_eq!(p.reached_level, 1);

        // Leaving level 1: bump
        assert!(p.on_room_cleared());
        assert!((p.enemy.max_health - 3.4).abs() < 1e-5);
        assert!((p.enemy.speed - 1.9).abs() < 1e-5);
        assert!((p.enemy.damage - 1.2).abs() < 1e-5);
        assert_eq!(p.reached_level, 2);
    }

    #[test]
    fn test_speed_increment_slows_past_soft_cap() {
        let mut p = Progression::new(&Tuning::default());
        p.reached_level = 1;
        p.enemy.speed = 5.0;
        p.on_room_cleared();
        assert!((p.enemy.speed - 5.1).abs() < 1e-5);
    }

    #[test]
    fn test_tier_caps() {
        let mut p = Progression::new(&Tuning::default());
        for _ in 0..400 {
            p.on_room_cleared();
        }
        assert!(p.enemy.speed <= ENEMY_MAX_SPEED);
        assert!(p.enemy.damage <= ENEMY_MAX_DAMAGE);
        assert!(p.enemy.max_health <= ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_boss_stats() {
        let mut p = Progression::new(&Tuning::default());
        p.reached_level = 3;
        let boss = p.boss_stats();
        assert_eq!(boss.max_health, 39.0);
        assert_eq!(boss.damage, 5.0);
        // 1.5 / 3 truncates to 0
        assert_eq!(boss.speed, 1.0);

        p.reached_level = 11;
        p.enemy.speed = 6.2;
        let boss = p.boss_stats();
        assert_eq!(boss.max_health, 63.0);
        assert_eq!(boss.damage, BOSS_MAX_DAMAGE);
        assert_eq!(boss.speed, 3.0);
    }

    #[test]
    fn test_contact_damage_uses_boss_tier_in_boss_rooms() {
        let mut p = Progression::new(&Tuning::default());
        p.enemy.damage = 1.8;
        assert_eq!(p.contact_damage(), 1);
        p.reached_level = 3;
        assert_eq!(p.contact_damage(), 5);
    }

    #[test]
    fn test_upgrade_due_every_level_by_default() {
        let mut p = Progression::new(&Tuning::default());
        for _ in 0..5 {
            assert!(p.upgrade_due(0));
            p.on_room_cleared();
        }
        p.reached_level = 2;
        assert!(!p.upgrade_due(1));
        p.reached_level = 3;
        assert!(p.upgrade_due(1));
    }

    #[test]
    fn test_upgrade_never_due_at_max_difficulty() {
        let mut p = Progression::new(&Tuning::default());
        for level in [0, 1, 7, u32::MAX - 1, u32::MAX] {
            p.reached_level = level;
            assert!(!p.upgrade_due(u32::MAX));
        }
    }

    #[test]
    fn test_bullet_speed_cap() {
        let mut p = Progression::new(&Tuning::default());
        p.increase_bullet_speed(100.0);
        assert_eq!(p.bullet_speed, BULLET_MAX_SPEED);
        p.set_bullet_speed(9.0);
        assert_eq!(p.bullet_speed, 9.0);
    }
}
