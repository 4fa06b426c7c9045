//! Upgrade checkpoint: three random stat boosts, pick one
//!
//! Each kind maps to one player (or bullet) capability through a `match`,
//! so adding a kind is a compile error until it is wired up everywhere.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Progression;
use super::geometry::Rect;
use super::player::Player;

/// Offers presented per checkpoint
pub const OFFER_COUNT: usize = 3;

/// Upgrade panel layout (screen space)
pub const PANEL_SPACING: f32 = 20.0;
pub const PANEL_WIDTH: f32 = 240.0;
pub const PANEL_HEIGHT: f32 = 550.0;
pub const PANEL_TOP: f32 = 85.0;

/// Effect kinds an offer can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    IncreaseDamage,
    IncreaseHealth,
    Heal,
    DecreaseShootCooldown,
    IncreaseSpeed,
    IncreaseBulletSpeed,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::IncreaseDamage,
        UpgradeKind::IncreaseHealth,
        UpgradeKind::Heal,
        UpgradeKind::DecreaseShootCooldown,
        UpgradeKind::IncreaseSpeed,
        UpgradeKind::IncreaseBulletSpeed,
    ];

    /// Panel caption
    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::IncreaseDamage => "increase damage",
            UpgradeKind::IncreaseHealth => "increase health",
            UpgradeKind::Heal => "heal",
            UpgradeKind::DecreaseShootCooldown => "decrease shoot cooldown",
            UpgradeKind::IncreaseSpeed => "increase speed",
            UpgradeKind::IncreaseBulletSpeed => "increase bullet speed",
        }
    }

    /// Raw (lower, upper) magnitude bounds for `level`, before correction
    pub fn magnitude_bounds(self, level: u32) -> (i32, i32) {
        let l = level as i32;
        let half = l / 2;
        match self {
            UpgradeKind::IncreaseDamage | UpgradeKind::IncreaseHealth => (half.max(1), half.max(2)),
            UpgradeKind::Heal => (half.max(2), l.max(4)),
            UpgradeKind::DecreaseShootCooldown => (half.max(1), half.max(1)),
            UpgradeKind::IncreaseSpeed => (half.max(1), l.max(2)),
            UpgradeKind::IncreaseBulletSpeed => (half.max(1), (l / 3).max(2)),
        }
    }

    /// Inclusive magnitude range for `level`, widened if degenerate
    pub fn magnitude_range(self, level: u32) -> RangeInclusive<i32> {
        let (lower, upper) = self.magnitude_bounds(level);
        balanced_range(lower, upper)
    }
}

/// Inclusive range that always spans at least two values
pub fn balanced_range(lower: i32, upper: i32) -> RangeInclusive<i32> {
    if lower >= upper {
        lower..=lower + 1
    } else {
        lower..=upper
    }
}

/// One stat boost on offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub kind: UpgradeKind,
    pub magnitude: i32,
}

impl UpgradeOffer {
    /// Apply the boost. Bullet speed lives in the shared progression state.
    pub fn apply(&self, player: &mut Player, progression: &mut Progression) {
        let n = self.magnitude;
        match self.kind {
            UpgradeKind::IncreaseDamage => player.increase_damage(n),
            UpgradeKind::IncreaseHealth => player.increase_health(n),
            UpgradeKind::Heal => player.heal(n),
            UpgradeKind::DecreaseShootCooldown => player.decrease_shoot_cooldown(n.max(0) as u32),
            UpgradeKind::IncreaseSpeed => player.increase_speed(n as f32),
            UpgradeKind::IncreaseBulletSpeed => progression.increase_bullet_speed(n as f32),
        }
    }
}

/// Roll three distinct offers for `level`
pub fn roll_offers<R: Rng>(rng: &mut R, level: u32) -> [UpgradeOffer; OFFER_COUNT] {
    let mut pool = UpgradeKind::ALL.to_vec();
    std::array::from_fn(|_| {
        let kind = pool.remove(rng.random_range(0..pool.len()));
        UpgradeOffer {
            kind,
            magnitude: rng.random_range(kind.magnitude_range(level)),
        }
    })
}

/// Screen rectangle of the panel for offer `index`
pub fn offer_panel(index: usize) -> Rect {
    Rect::new(
        PANEL_SPACING + index as f32 * (PANEL_WIDTH + PANEL_SPACING),
        PANEL_TOP,
        PANEL_WIDTH,
        PANEL_HEIGHT,
    )
}

/// Index of the panel under `point`, if any
pub fn offer_at(point: Vec2) -> Option<usize> {
    (0..OFFER_COUNT).find(|&i| offer_panel(i).contains_point(point))
}
