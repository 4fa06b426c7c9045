//! Health bar and upgrade panels

use glam::Vec2;

use super::{Rgb, Sprite};
use crate::platform::Renderer;
use crate::sim::geometry::Rect;
use crate::sim::player::Player;
use crate::sim::upgrade::{OFFER_COUNT, PANEL_WIDTH, UpgradeOffer, offer_panel};

pub const BANNER_RECT: Rect = Rect::new(5.0, 5.0, 800.0, 50.0);
pub const HEART_SIZE: f32 = 40.0;
pub const HEART_START_X: f32 = 10.0;
pub const HEART_Y: f32 = 5.0;
/// Distance between heart slots (1.5 x 25 px)
pub const HEART_SPACING: f32 = 37.5;

const PROMPT_SIZE: f32 = 75.0;
const PROMPT_Y: f32 = 35.0;
const ICON_SIZE: f32 = 56.0;
const ICON_OFFSET_Y: f32 = 70.0;
const LABEL_MAX_SIZE: f32 = 50.0;
const LABEL_MIN_SIZE: f32 = 10.0;
const LABEL_OFFSET_Y: f32 = 70.0;
const LABEL_PADDING: f32 = 10.0;
const MAGNITUDE_SIZE: f32 = 90.0;
const MAGNITUDE_OFFSET_Y: f32 = 175.0;
/// Rough glyph width as a fraction of the font size
const GLYPH_ASPECT: f32 = 0.5;

/// Heart sprites for the current health: full hearts first, then empty ones
/// for the missing points
pub fn heart_layout(current: i32, max: i32) -> Vec<(Sprite, Rect)> {
    let full = current.clamp(0, max.max(0)) as usize;
    let empty = (max.max(0) as usize).saturating_sub(full);
    std::iter::repeat_n(Sprite::HeartFull, full)
        .chain(std::iter::repeat_n(Sprite::HeartEmpty, empty))
        .enumerate()
        .map(|(slot, sprite)| {
            let x = HEART_START_X + slot as f32 * HEART_SPACING;
            (sprite, Rect::new(x, HEART_Y, HEART_SIZE, HEART_SIZE))
        })
        .collect()
}

pub fn draw_health<R: Renderer + ?Sized>(renderer: &mut R, player: &Player) {
    renderer.draw_sprite(Sprite::HealthBanner, BANNER_RECT);
    for (sprite, rect) in heart_layout(player.current_health, player.max_health) {
        renderer.draw_sprite(sprite, rect);
    }
}

/// Largest font size (down to a floor) at which `text` fits in `width`
pub fn fit_text_size(text: &str, width: f32) -> f32 {
    let chars = text.chars().count().max(1) as f32;
    (width / (chars * GLYPH_ASPECT)).clamp(LABEL_MIN_SIZE, LABEL_MAX_SIZE)
}

/// "Choose upgrade" prompt plus one panel per offer
pub fn draw_upgrade_choice<R: Renderer + ?Sized>(
    renderer: &mut R,
    offers: &[UpgradeOffer; OFFER_COUNT],
) {
    let center_x = crate::playfield_center().x;
    renderer.draw_text("Choose upgrade", PROMPT_SIZE, Vec2::new(center_x, PROMPT_Y), Rgb::WHITE);

    for (index, offer) in offers.iter().enumerate() {
        let panel = offer_panel(index);
        let c = panel.center();
        renderer.draw_sprite(Sprite::UpgradePanel, panel);
        renderer.draw_sprite(
            Sprite::UpgradeIcon(offer.kind),
            Rect::from_center(c - Vec2::new(0.0, ICON_OFFSET_Y), Vec2::splat(ICON_SIZE)),
        );

        let label = offer.kind.label();
        let size = fit_text_size(label, PANEL_WIDTH - 2.0 * LABEL_PADDING);
        renderer.draw_text(label, size, c + Vec2::new(0.0, LABEL_OFFSET_Y), Rgb::WHITE);
        renderer.draw_text(
            &offer.magnitude.to_string(),
            MAGNITUDE_SIZE,
            c + Vec2::new(0.0, MAGNITUDE_OFFSET_Y),
            Rgb::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hearts_full_then_empty() {
        let layout = heart_layout(2, 4);
        let sprites: Vec<Sprite> = layout.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sprites,
            vec![Sprite::HeartFull, Sprite::HeartFull, Sprite::HeartEmpty, Sprite::HeartEmpty]
        );
        assert_eq!(layout[0].1.x, 10.0);
        assert_eq!(layout[1].1.x, 47.5);
        assert_eq!(layout[3].1.x, 122.5);
    }

    #[test]
    fn test_negative_health_shows_all_empty() {
        let layout = heart_layout(-4, 3);
        assert_eq!(layout.len(), 3);
        assert!(layout.iter().all(|(s, _)| *s == Sprite::HeartEmpty));
    }

    #[test]
    fn test_long_labels_shrink() {
        let short = fit_text_size("heal", 220.0);
        let long = fit_text_size("decrease shoot cooldown", 220.0);
        assert_eq!(short, LABEL_MAX_SIZE);
        assert!(long < short);
        assert!(long >= LABEL_MIN_SIZE);
    }
}
