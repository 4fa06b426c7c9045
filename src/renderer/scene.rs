//! Per-phase frame composition

use glam::Vec2;

use super::hud::{draw_health, draw_upgrade_choice};
use super::{Rgb, Sprite};
use crate::consts::*;
use crate::platform::Renderer;
use crate::sim::enemy::EnemyKind;
use crate::sim::geometry::Rect;
use crate::sim::state::{GamePhase, GameState};
use crate::{playfield, playfield_center};

/// Background image is drawn slightly left of the origin
const BACKGROUND_OFFSET: Vec2 = Vec2::new(-2.0, 0.0);

const TITLE_SIZE: f32 = 100.0;
const PROMPT_SIZE: f32 = 90.0;
const WELCOME_TITLE_Y: f32 = 70.0;
const WELCOME_PLAYER_OFFSET_Y: f32 = 30.0;
const WELCOME_PLAYER_SCALE: f32 = 1.5;
const WELCOME_PROMPT_OFFSET_Y: f32 = 240.0;
const DEATH_TITLE_OFFSET_Y: f32 = 150.0;
const DEATH_SCORE_OFFSET_Y: f32 = 75.0;
const DEATH_PROMPT_OFFSET_Y: f32 = 50.0;
const DEATH_PROMPT2_OFFSET_Y: f32 = 115.0;

/// Draw and present one frame for the current phase
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, now_ms: u64) {
    let mut background = playfield();
    background.translate(BACKGROUND_OFFSET);
    renderer.draw_sprite(Sprite::Background, background);

    match state.phase {
        GamePhase::Welcome => draw_welcome(renderer),
        GamePhase::Dead => draw_death(renderer, state.player.score),
        GamePhase::Playing => draw_world(renderer, state, now_ms),
        GamePhase::UpgradePause => {
            // The frozen room stays visible behind the panels
            draw_world(renderer, state, now_ms);
            if let Some(offers) = &state.offers {
                draw_upgrade_choice(renderer, offers);
            }
        }
    }

    renderer.present();
}

fn draw_welcome<R: Renderer + ?Sized>(renderer: &mut R) {
    let center = playfield_center();
    renderer.draw_text("WELCOME", TITLE_SIZE, Vec2::new(center.x, WELCOME_TITLE_Y), Rgb::WHITE);
    renderer.draw_sprite(
        Sprite::PlayerStanding,
        Rect::from_center(
            center - Vec2::new(0.0, WELCOME_PLAYER_OFFSET_Y),
            PLAYER_SIZE * WELCOME_PLAYER_SCALE,
        ),
    );
    renderer.draw_text(
        "Press SPACE to begin",
        PROMPT_SIZE,
        center + Vec2::new(0.0, WELCOME_PROMPT_OFFSET_Y),
        Rgb::WHITE,
    );
}

fn draw_death<R: Renderer + ?Sized>(renderer: &mut R, score: u64) {
    let center = playfield_center();
    let line = |offset: f32| Vec2::new(center.x, center.y + offset);
    renderer.draw_text("YOU DIED", TITLE_SIZE, line(-DEATH_TITLE_OFFSET_Y), Rgb::WHITE);
    renderer.draw_text(
        &format!("SCORE: {score}"),
        TITLE_SIZE,
        line(-DEATH_SCORE_OFFSET_Y),
        Rgb::WHITE,
    );
    renderer.draw_text("Press SPACE to", PROMPT_SIZE, line(DEATH_PROMPT_OFFSET_Y), Rgb::WHITE);
    renderer.draw_text("PLAY AGAIN", PROMPT_SIZE, line(DEATH_PROMPT2_OFFSET_Y), Rgb::WHITE);
}

/// Walls, enemies, player, bullets, then the health bar on top
fn draw_world<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, now_ms: u64) {
    for wall in &state.room.walls {
        renderer.draw_sprite(Sprite::Wall, wall.rect);
    }

    for enemy in &state.room.enemies {
        let frame = enemy.frame();
        let sprite = match enemy.kind {
            EnemyKind::Normal => Sprite::Enemy { frame },
            EnemyKind::Boss => Sprite::Boss { frame },
        };
        renderer.draw_sprite(sprite, enemy.rect);
    }

    let player = &state.player;
    renderer.draw_sprite(
        Sprite::Player {
            frame: player.frame(),
            damaged: player.immune,
            alpha: player.blink_alpha(now_ms),
        },
        player.rect,
    );

    for bullet in &state.bullets {
        renderer.draw_sprite(Sprite::Bullet, bullet.rect);
    }

    draw_health(renderer, player);
}
