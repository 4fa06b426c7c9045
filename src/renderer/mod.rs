//! Scene composition
//!
//! The core does not rasterize anything. It describes each frame as sprite
//! and text draw calls against the `platform::Renderer` trait; a frontend
//! maps `Sprite` to its loaded images and fonts.

pub mod hud;
pub mod scene;

pub use scene::draw_frame;

use crate::sim::upgrade::UpgradeKind;

/// Everything the frontend needs an image for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    /// Tiled wall texture stretched over the wall rect
    Wall,
    /// Walk cycle; the damaged set is used while immune
    Player { frame: usize, damaged: bool, alpha: u8 },
    /// Idle pose on the welcome screen
    PlayerStanding,
    Enemy { frame: usize },
    Boss { frame: usize },
    Bullet,
    HealthBanner,
    HeartFull,
    HeartEmpty,
    /// Translucent bordered panel behind an upgrade offer
    UpgradePanel,
    UpgradeIcon(UpgradeKind),
}

/// Text color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}
