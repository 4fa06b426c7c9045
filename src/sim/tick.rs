//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame. Input is already reduced to
//! plain data (held keys, an optional click, SPACE) so the tick is
//! deterministic for a given seed and input sequence.

use glam::Vec2;

use super::geometry::first_overlap;
use super::player::MoveKeys;
use super::projectile::BulletStatus;
use super::state::{GameEvent, GamePhase, GameState};
use super::upgrade::{offer_at, offer_panel};

/// Autopilot backs off from enemies closer than this
const AUTOPILOT_FLEE_DISTANCE: f32 = 160.0;
/// Autopilot closes in on enemies farther than this
const AUTOPILOT_CHASE_DISTANCE: f32 = 320.0;
/// Ignore small direction components so the autopilot walks straight lines
const AUTOPILOT_AXIS_DEADZONE: f32 = 0.3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys held this frame
    pub keys: MoveKeys,
    /// Left click this frame, in playfield coordinates
    pub click: Option<Vec2>,
    /// SPACE pressed this frame
    pub start: bool,
    /// Autopilot - the simulation plays itself
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let input = if input.autopilot {
        autopilot(state)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Welcome | GamePhase::Dead => {
            if input.start {
                state.start_run();
            }
        }
        GamePhase::UpgradePause => {
            if let Some(index) = input.click.and_then(offer_at) {
                state.choose_upgrade(index);
            }
        }
        GamePhase::Playing => step_playing(state, &input),
    }
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Shoot before moving so the bullet leaves from where the player stood
    if let Some(target) = input.click {
        let speed = state.progression.bullet_speed;
        if let Some(bullet) = state.player.shoot(target, speed) {
            state.bullets.push(bullet);
            state.push_event(GameEvent::Shot);
        }
    }

    state.player.update(&state.room.walls, input.keys);

    let damage = state.player.damage;
    let walls = &state.room.walls;
    let enemies = &mut state.room.enemies;
    state
        .bullets
        .retain_mut(|bullet| bullet.update(walls, enemies, damage) == BulletStatus::Flying);

    let target = state.player.rect.center();
    for enemy in &mut state.room.enemies {
        enemy.update(target, &state.room.walls, &mut state.rng);
    }

    let mut killed = Vec::new();
    state.room.enemies.retain(|enemy| {
        if enemy.is_dead() {
            killed.push((enemy.kind, enemy.points()));
            false
        } else {
            true
        }
    });
    for (kind, points) in killed {
        state.player.add_points(points);
        state.push_event(GameEvent::EnemyKilled { kind });
    }

    if first_overlap(&state.player.rect, &state.room.enemies).is_some()
        && state.player.take_damage(&state.progression)
    {
        let health = state.player.current_health;
        state.push_event(GameEvent::PlayerHurt { health });
        log::debug!("Player hit, health {}", health);
    }

    if state.player.is_dead() {
        state.kill_player();
    } else if state.room.is_cleared() {
        state.advance_level();
    }
}

/// Build this frame's input from the state alone
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Welcome | GamePhase::Dead => input.start = true,
        GamePhase::UpgradePause => input.click = Some(offer_panel(0).center()),
        GamePhase::Playing => {
            let me = state.player.rect.center();
            let nearest = state.room.enemies.iter().min_by(|a, b| {
                let da = a.rect.center().distance_squared(me);
                let db = b.rect.center().distance_squared(me);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

            if let Some(enemy) = nearest {
                let there = enemy.rect.center();
                input.click = Some(there);

                let distance = me.distance(there);
                let heading = (there - me).normalize_or_zero();
                let steer = if distance < AUTOPILOT_FLEE_DISTANCE {
                    -heading
                } else if distance > AUTOPILOT_CHASE_DISTANCE {
                    heading
                } else {
                    Vec2::ZERO
                };
                input.keys = MoveKeys {
                    left: steer.x < -AUTOPILOT_AXIS_DEADZONE,
                    right: steer.x > AUTOPILOT_AXIS_DEADZONE,
                    up: steer.y < -AUTOPILOT_AXIS_DEADZONE,
                    down: steer.y > AUTOPILOT_AXIS_DEADZONE,
                };
            }
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::playfield_center;
    use crate::sim::enemy::{Enemy, EnemyKind};

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state.drain_events();
        state
    }

    /// Stationary normal enemy centered at `center`
    fn parked_enemy(state: &GameState, center: Vec2) -> Enemy {
        let mut enemy = Enemy::spawn(EnemyKind::Normal, center, &state.progression);
        enemy.speed = 0.0;
        enemy
    }

    #[test]
    fn test_tick_welcome_to_playing() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Welcome);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_shot_kills_enemy_and_awards_points() {
        let mut state = playing_state(1);
        let there = playfield_center() + Vec2::new(50.0, 0.0);
        let mut enemy = parked_enemy(&state, there);
        enemy.health = 1.0;
        let far = parked_enemy(&state, Vec2::new(120.0, 120.0));
        state.room.enemies = vec![enemy, far];

        let click = TickInput {
            click: Some(there),
            ..Default::default()
        };
        tick(&mut state, &click);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::Shot));

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.is_empty());
        assert_eq!(state.room.enemies.len(), 1);
        assert_eq!(state.player.score, ENEMY_POINTS);
        assert!(state.drain_events().contains(&GameEvent::EnemyKilled {
            kind: EnemyKind::Normal
        }));
    }

    #[test]
    fn test_clearing_room_advances_exactly_once() {
        let mut state = playing_state(2);
        let mut enemy = parked_enemy(&state, Vec2::new(120.0, 120.0));
        enemy.health = 0.0;
        state.room.enemies = vec![enemy];
        state.player.rect.x += 20.0;
        let generated = state.rooms_generated;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.progression.reached_level, 1);
        assert_eq!(state.rooms_generated, generated + 1);
        assert_eq!(state.player.rect.center(), playfield_center());
        assert_eq!(state.player.score, ENEMY_POINTS + ROOM_CLEAR_POINTS);
        assert_eq!(state.phase, GamePhase::UpgradePause);

        // The pause halts the simulation
        let ticks = state.time_ticks;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.progression.reached_level, 1);
        assert_eq!(state.rooms_generated, generated + 1);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_click_on_panel_resumes_play() {
        let mut state = playing_state(3);
        state.room.enemies.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::UpgradePause);

        // Clicking between panels does nothing
        let miss = TickInput {
            click: Some(Vec2::new(270.0, 300.0)),
            ..Default::default()
        };
        tick(&mut state, &miss);
        assert_eq!(state.phase, GamePhase::UpgradePause);

        let hit = TickInput {
            click: Some(offer_panel(1).center()),
            ..Default::default()
        };
        tick(&mut state, &hit);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::UpgradeChosen(_)))
        );
    }

    #[test]
    fn test_contact_damage_then_immunity() {
        let mut state = playing_state(4);
        let enemy = parked_enemy(&state, playfield_center());
        state.room.enemies = vec![enemy];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.current_health, 2);
        assert!(state.player.immune);
        assert!(state.drain_events().contains(&GameEvent::PlayerHurt { health: 2 }));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.current_health, 2);
    }

    #[test]
    fn test_death_and_restart() {
        let mut state = playing_state(5);
        state.player.current_health = 1;
        state.progression.reached_level = 2;
        let enemy = parked_enemy(&state, playfield_center());
        state.room.enemies = vec![enemy];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerDied { level: 2, .. }))
        );

        // Dead state ignores movement and clicks
        let click = TickInput {
            click: Some(Vec2::new(100.0, 100.0)),
            ..Default::default()
        };
        tick(&mut state, &click);
        assert_eq!(state.phase, GamePhase::Dead);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.current_health, PLAYER_INITIAL_HEALTH);
        assert_eq!(state.progression.reached_level, 0);
    }

    #[test]
    fn test_autopilot_plays() {
        let mut state = GameState::new(9);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        for _ in 0..600 {
            tick(&mut state, &input);
        }
        assert!(state.time_ticks > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player.score, state2.player.score);
        assert_eq!(state1.player.rect, state2.player.rect);
        assert_eq!(state1.progression, state2.progression);
        assert_eq!(state1.room.enemies.len(), state2.room.enemies.len());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
