//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only
//! - Stable iteration order (collection order wins ties)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod enemy;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod room;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use difficulty::{Progression, TierStats, is_boss_level};
pub use enemy::{Enemy, EnemyKind};
pub use geometry::{Axis, Bounds, Rect, direction_to, first_overlap, move_axis};
pub use player::{MoveKeys, Player};
pub use projectile::{Bullet, BulletStatus};
pub use room::{PlacementError, Room, RoomParams, Wall, outer_walls};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use upgrade::{UpgradeKind, UpgradeOffer, offer_at, offer_panel, roll_offers};
