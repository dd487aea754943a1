//! Per-frame motion step
//!
//! Moves every entity kind and removes anything that leaves the playfield
//! (stars wrap instead). Oscillatory patterns read the accumulated animation
//! phase, never the wall clock.

use glam::Vec2;
use rand::Rng;

use super::input::ActionSet;
use super::state::{EnemyKind, GameState};
use crate::consts::*;

/// Advance all entity positions by one frame. Runs only while playing.
pub fn update(state: &mut GameState, held: &ActionSet, dt: f32) {
    let dt_ms = dt * 1000.0;
    let phase = state.anim_phase_ms;

    move_player(state, held, dt, dt_ms);
    move_enemies(state, phase, dt);
    move_bullets(state, dt);
    move_power_ups(state, phase, dt);
    move_stars(state, dt);

    // Explosions and floating texts age out
    for explosion in &mut state.explosions {
        explosion.life_ms -= dt_ms;
    }
    state.explosions.retain(|e| e.life_ms > 0.0);

    for text in &mut state.texts {
        text.life_ms -= dt_ms;
        text.pos.y -= 60.0 * dt;
    }
    state.texts.retain(|t| t.life_ms > 0.0);
}

fn move_player(state: &mut GameState, held: &ActionSet, dt: f32, dt_ms: f32) {
    let player = &mut state.player;
    player.pos += held.movement() * PLAYER_SPEED * dt;

    // Clamp to playfield, accounting for half the ship size
    player.pos.x = player.pos.x.clamp(PLAYER_W / 2.0, PLAYFIELD_W - PLAYER_W / 2.0);
    player.pos.y = player.pos.y.clamp(PLAYER_H / 2.0, PLAYFIELD_H - PLAYER_H / 2.0);

    if player.invincible {
        player.invincible_ms -= dt_ms;
        if player.invincible_ms <= 0.0 {
            player.invincible = false;
            player.invincible_ms = 0.0;
        }
    }
}

fn move_enemies(state: &mut GameState, phase: f32, dt: f32) {
    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        match enemy.kind {
            EnemyKind::Fast => {
                enemy.pos.x += (phase * 0.002 + i as f32).sin() * 120.0 * dt;
            }
            EnemyKind::Tank => {
                enemy.pos.x += (phase * 0.001 + i as f32).cos() * 30.0 * dt;
            }
            EnemyKind::Basic => {}
        }
        enemy.pos.y += enemy.speed * dt;
    }
    state.enemies.retain(|e| e.pos.y <= PLAYFIELD_H + 100.0);
}

fn move_bullets(state: &mut GameState, dt: f32) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED * dt;
    }
    state.bullets.retain(|b| b.pos.y >= -50.0);
}

fn move_power_ups(state: &mut GameState, phase: f32, dt: f32) {
    for (i, power_up) in state.power_ups.iter_mut().enumerate() {
        power_up.pos.y += POWERUP_FALL_SPEED * dt;
        power_up.pos.x += (phase * 0.002 + i as f32).sin() * 30.0 * dt;
        power_up.rotation += power_up.rotation_speed * dt * 60.0;
    }
    state.power_ups.retain(|p| p.pos.y <= PLAYFIELD_H + 50.0);
}

fn move_stars(state: &mut GameState, dt: f32) {
    // Stars wrap to the top with a fresh random x instead of being removed
    let mut wrapped: Vec<usize> = Vec::new();
    for (i, star) in state.stars.iter_mut().enumerate() {
        star.pos.y += star.speed * dt;
        if star.pos.y > PLAYFIELD_H {
            star.pos.y = 0.0;
            wrapped.push(i);
        }
    }
    for i in wrapped {
        state.stars[i].pos.x = state.rng.random_range(0.0..PLAYFIELD_W);
    }
}
