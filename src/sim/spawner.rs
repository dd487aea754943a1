//! Timer-driven entity spawning
//!
//! Enemies arrive on an accumulating timer whose delay shrinks with the wave;
//! power-ups arrive on an independent timer gated by a small per-frame chance,
//! and also drop from destroyed enemies (see collision).

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Fixed base stats per enemy variant
struct Archetype {
    kind: EnemyKind,
    health: i32,
    value: u32,
    size: f32,
    speed_mult: f32,
    color: &'static str,
}

const ARCHETYPES: [Archetype; 3] = [
    Archetype {
        kind: EnemyKind::Basic,
        health: 1,
        value: 10,
        size: 30.0,
        speed_mult: 1.0,
        color: "#ff4444",
    },
    Archetype {
        kind: EnemyKind::Fast,
        health: 1,
        value: 15,
        size: 25.0,
        speed_mult: 1.5,
        color: "#9370db",
    },
    Archetype {
        kind: EnemyKind::Tank,
        health: 3,
        value: 30,
        size: 50.0,
        speed_mult: 0.7,
        color: "#ff8c00",
    },
];

/// Advance both spawn timers by the frame delta. Runs only while playing.
pub fn update(state: &mut GameState, dt_ms: f32) {
    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms >= state.spawn_delay_ms {
        state.spawn_timer_ms = 0.0;
        spawn_enemy(state);
    }

    state.powerup_timer_ms += dt_ms;
    if state.powerup_timer_ms > POWERUP_TIMER_MS
        && state.rng.random::<f32>() < POWERUP_GATE_CHANCE
    {
        state.powerup_timer_ms = 0.0;
        let x = state.rng.random_range(0.0..PLAYFIELD_W - POWERUP_SIZE) + POWERUP_SIZE / 2.0;
        spawn_power_up_at(state, Vec2::new(x, -POWERUP_SIZE));
    }
}

/// Weighted variant draw tied to the wave: tanks from wave 6, fast from
/// wave 4, basic otherwise.
fn spawn_enemy(state: &mut GameState) {
    let roll: f32 = state.rng.random();
    let archetype = if state.wave > 5 && roll > 0.7 {
        &ARCHETYPES[2]
    } else if state.wave > 3 && roll > 0.5 {
        &ARCHETYPES[1]
    } else {
        &ARCHETYPES[0]
    };

    let x = state.rng.random_range(0.0..PLAYFIELD_W - archetype.size) + archetype.size / 2.0;
    state.enemies.push(Enemy {
        pos: Vec2::new(x, -archetype.size),
        size: archetype.size,
        speed: state.enemy_speed * archetype.speed_mult,
        health: archetype.health,
        max_health: archetype.health,
        value: archetype.value,
        kind: archetype.kind,
        color: archetype.color,
    });
}

/// Spawn a power-up of uniformly random kind at the given position
pub fn spawn_power_up_at(state: &mut GameState, pos: Vec2) {
    let kind = match state.rng.random_range(0..3) {
        0 => PowerUpKind::Health,
        1 => PowerUpKind::Power,
        _ => PowerUpKind::Shield,
    };
    let rotation_speed = state.rng.random_range(0.02..0.07);
    state.power_ups.push(PowerUp {
        pos,
        kind,
        rotation: 0.0,
        rotation_speed,
    });
}
