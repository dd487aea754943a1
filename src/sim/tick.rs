//! Fixed timestep simulation tick
//!
//! One entry point advances the whole game by a frame: state machine
//! dispatch, spawning, motion, collisions, then difficulty. Only `Playing`
//! advances the simulation; every other phase renders a static frame.

use glam::Vec2;

use super::collision;
use super::input::{Action, ActionSet};
use super::motion;
use super::spawner;
use super::state::{Bullet, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick. `held` reflects latest key state; `pause_pressed`
/// is a one-shot cleared by the driver after processing.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: ActionSet,
    pub pause_pressed: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause_pressed {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    // Pausing short-circuits the step; nothing below may run, so entity
    // state is bit-identical across paused frames.
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt_ms = dt * 1000.0;
    state.anim_phase_ms += dt_ms;

    state.shake *= 0.9;
    if state.shake < 0.05 {
        state.shake = 0.0;
    }

    spawner::update(state, dt_ms);
    motion::update(state, &input.held, dt);

    state.shoot_cooldown_ms = (state.shoot_cooldown_ms - dt_ms).max(0.0);
    if input.held.is_pressed(Action::Fire) && state.shoot_cooldown_ms == 0.0 {
        shoot(state);
        state.shoot_cooldown_ms = SHOOT_COOLDOWN_MS;
    }

    collision::resolve(state);
    advance_wave_if_due(state);
}

/// Fire a volley. Bullet count equals the power level, spread in a fixed
/// fan; damage is frozen at the player's current level.
fn shoot(state: &mut GameState) {
    let level = state.player.bullet_level.min(MAX_BULLET_LEVEL);
    let count = level as i32;
    let spread = if count > 1 { 0.2 } else { 0.0 };
    let color = match level {
        1 => "#ffffff",
        2 => "#00ffaa",
        _ => "#ffaa00",
    };

    for i in 0..count {
        let offset = (i as f32 - (count - 1) as f32 / 2.0) * spread;
        state.bullets.push(Bullet {
            pos: Vec2::new(
                state.player.pos.x + offset * 20.0,
                state.player.pos.y - PLAYER_H / 2.0,
            ),
            damage: level as i32,
            color,
        });
    }

    // Muzzle flash
    let flash_pos = state.player.pos + Vec2::new(0.0, -30.0);
    state.push_explosion(flash_pos, 8.0, "#ffffff", 0.3);
}

/// Monotonic wave progression: one step per frame when the score crosses the
/// current threshold. Raises enemy speed, tightens the spawn delay to its
/// floor, and announces the new wave.
fn advance_wave_if_due(state: &mut GameState) {
    if state.score >= state.wave * WAVE_SCORE_STEP {
        state.wave += 1;
        state.enemy_speed += ENEMY_SPEED_INCREMENT;
        state.spawn_delay_ms = (state.spawn_delay_ms - SPAWN_DELAY_STEP_MS).max(SPAWN_DELAY_FLOOR_MS);
        state.push_text(
            Vec2::new(PLAYFIELD_W / 2.0, 100.0),
            format!("WAVE {}", state.wave),
            "#ffaa00",
        );
        log::info!(
            "Wave {} (enemy speed {:.0} px/s, spawn delay {:.0} ms)",
            state.wave,
            state.enemy_speed,
            state.spawn_delay_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind};

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.begin_game();
        state
    }

    fn basic_enemy(pos: Vec2) -> Enemy {
        Enemy {
            pos,
            size: 30.0,
            speed: 120.0,
            health: 1,
            max_health: 1,
            value: 10,
            kind: EnemyKind::Basic,
            color: "#ff4444",
        }
    }

    fn fire_input() -> TickInput {
        let mut input = TickInput::default();
        input.held.press(Action::Fire);
        input
    }

    #[test]
    fn test_title_screen_does_not_tick() {
        let mut state = GameState::new(1);
        let input = TickInput::default();
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.anim_phase_ms, 0.0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = playing_state(1);
        let input = TickInput {
            pause_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_freezes_entity_positions_bit_identical() {
        let mut state = playing_state(5);
        state.enemies.push(basic_enemy(Vec2::new(200.0, 100.0)));
        state.enemies.push(basic_enemy(Vec2::new(600.0, 50.0)));

        // Run a few live frames, then pause
        let mut moving = fire_input();
        moving.held.press(Action::MoveLeft);
        for _ in 0..10 {
            tick(&mut state, &moving, SIM_DT);
        }
        let pause = TickInput {
            pause_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let player_pos = state.player.pos;
        let enemy_pos: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        let bullet_pos: Vec<Vec2> = state.bullets.iter().map(|b| b.pos).collect();
        let phase_ms = state.anim_phase_ms;

        // Held input must not leak through while paused
        for _ in 0..60 {
            tick(&mut state, &moving, SIM_DT);
        }

        assert_eq!(state.player.pos, player_pos);
        assert_eq!(
            state.enemies.iter().map(|e| e.pos).collect::<Vec<_>>(),
            enemy_pos
        );
        assert_eq!(
            state.bullets.iter().map(|b| b.pos).collect::<Vec<_>>(),
            bullet_pos
        );
        assert_eq!(state.anim_phase_ms, phase_ms);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut state = playing_state(1);
        let input = fire_input();

        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.bullets.len(), 1);

        // Next frame is inside the cooldown window
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.bullets.len(), 1);

        // Run past 250 ms; a second volley fires
        for _ in 0..((SHOOT_COOLDOWN_MS / (SIM_DT * 1000.0)) as usize + 1) {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.bullets.len() >= 2);
    }

    #[test]
    fn test_bullet_count_and_damage_follow_power_level() {
        let mut state = playing_state(1);
        state.player.bullet_level = 3;
        let input = fire_input();
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.bullets.len(), 3);
        assert!(state.bullets.iter().all(|b| b.damage == 3));
        // Fan spread: distinct x positions, symmetric around the ship
        let xs: Vec<f32> = state.bullets.iter().map(|b| b.pos.x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
        assert!((xs[1] - state.player.pos.x).abs() < 1e-3);
    }

    #[test]
    fn test_wave_advances_exactly_at_threshold() {
        let mut state = playing_state(1);
        state.score = 99;
        advance_wave_if_due(&mut state);
        assert_eq!(state.wave, 1);

        state.score = 100;
        advance_wave_if_due(&mut state);
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemy_speed, ENEMY_BASE_SPEED + ENEMY_SPEED_INCREMENT);
        assert_eq!(state.spawn_delay_ms, SPAWN_DELAY_START_MS - SPAWN_DELAY_STEP_MS);
        assert!(state.texts.iter().any(|t| t.text == "WAVE 2"));

        // Not again until the next threshold
        advance_wave_if_due(&mut state);
        assert_eq!(state.wave, 2);
    }

    #[test]
    fn test_spawn_delay_clamped_to_floor() {
        let mut state = playing_state(1);
        state.wave = 12;
        state.spawn_delay_ms = 420.0;
        state.score = 1200;
        advance_wave_if_due(&mut state);
        assert_eq!(state.spawn_delay_ms, SPAWN_DELAY_FLOOR_MS);

        state.score = 1300;
        advance_wave_if_due(&mut state);
        assert_eq!(state.spawn_delay_ms, SPAWN_DELAY_FLOOR_MS);
    }

    #[test]
    fn test_full_frame_kill_chain() {
        // A bullet already overlapping an enemy is resolved within one tick:
        // enemy gone, score awarded, explosion spawned.
        let mut state = playing_state(1);
        let pos = Vec2::new(400.0, 200.0);
        let mut enemy = basic_enemy(pos);
        enemy.speed = 0.0;
        state.enemies.push(enemy);
        state.bullets.push(Bullet {
            pos: pos + Vec2::new(0.0, BULLET_SPEED * SIM_DT),
            damage: 1,
            color: "#ffffff",
        });

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert!(!state.explosions.is_empty());
    }

    #[test]
    fn test_determinism_with_same_seed() {
        let mut a = playing_state(777);
        let mut b = playing_state(777);
        let input = fire_input();

        for _ in 0..300 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
        assert_eq!(a.player.pos, b.player.pos);
    }
}
