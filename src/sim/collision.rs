//! Pairwise collision resolution
//!
//! Three passes per frame, in an order that keeps scoring and side effects
//! consistent: player vs enemies, bullets vs enemies, player vs power-ups.
//! All tests use true Euclidean distance between centers; entity counts are
//! small enough that no spatial partitioning is warranted.

use glam::Vec2;
use rand::Rng;

use super::spawner;
use super::state::{GamePhase, GameState, PowerUpKind};
use crate::consts::*;
use crate::distance;

/// True when two circles of combined radius `min_dist` overlap
#[inline]
fn circle_hit(a: Vec2, b: Vec2, min_dist: f32) -> bool {
    distance(a, b) < min_dist
}

/// Run all three collision passes. Runs once per frame after motion, only
/// while playing.
pub fn resolve(state: &mut GameState) {
    player_vs_enemies(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    bullets_vs_enemies(state);
    player_vs_power_ups(state);
}

/// Contact damage uses a forgiving 0.8 factor on the combined half-widths.
/// Skipped entirely while the invincibility window is open.
fn player_vs_enemies(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let mut i = 0;
    while i < state.enemies.len() {
        let min_dist = (PLAYER_W / 2.0 + state.enemies[i].size / 2.0) * 0.8;
        if circle_hit(state.player.pos, state.enemies[i].pos, min_dist) {
            let enemy = state.enemies.remove(i);
            state.push_explosion(enemy.pos, enemy.size, enemy.color, 1.0);
            apply_player_hit(state);
            if state.phase != GamePhase::Playing {
                return;
            }
        } else {
            i += 1;
        }
    }
}

/// Decrement lives, open the invincibility window, and end the run when
/// lives are exhausted.
fn apply_player_hit(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.player.invincible = true;
    state.player.invincible_ms = HIT_INVINCIBILITY_MS;
    state.shake = (state.shake + 10.0).min(15.0);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over at wave {} with score {}", state.wave, state.score);
    }
}

/// A bullet hits at most one enemy per frame and is always consumed on hit,
/// whether or not the enemy died.
fn bullets_vs_enemies(state: &mut GameState) {
    let mut bi = 0;
    while bi < state.bullets.len() {
        let bullet_pos = state.bullets[bi].pos;
        let damage = state.bullets[bi].damage;
        let bullet_color = state.bullets[bi].color;

        let mut hit = false;
        let mut ei = 0;
        while ei < state.enemies.len() {
            let min_dist = BULLET_W / 2.0 + state.enemies[ei].size / 2.0;
            if circle_hit(bullet_pos, state.enemies[ei].pos, min_dist) {
                state.enemies[ei].health -= damage;
                if state.enemies[ei].health <= 0 {
                    let enemy = state.enemies.remove(ei);
                    state.score += enemy.value;
                    state.push_explosion(enemy.pos, enemy.size, enemy.color, 1.5);
                    if state.rng.random::<f32>() < POWERUP_DROP_CHANCE {
                        spawner::spawn_power_up_at(state, enemy.pos);
                    }
                }
                hit = true;
                break;
            }
            ei += 1;
        }

        if hit {
            state.bullets.remove(bi);
            state.push_explosion(bullet_pos, 15.0, bullet_color, 0.5);
        } else {
            bi += 1;
        }
    }
}

fn player_vs_power_ups(state: &mut GameState) {
    let mut i = 0;
    while i < state.power_ups.len() {
        let min_dist = PLAYER_W / 2.0 + POWERUP_SIZE / 2.0;
        if circle_hit(state.player.pos, state.power_ups[i].pos, min_dist) {
            let power_up = state.power_ups.remove(i);
            apply_power_up(state, power_up.kind, power_up.pos);
        } else {
            i += 1;
        }
    }
}

/// Apply a power-up effect, clamped to valid ranges, with a floating
/// acknowledgment and a visual burst at the pickup location.
fn apply_power_up(state: &mut GameState, kind: PowerUpKind, pos: Vec2) {
    match kind {
        PowerUpKind::Health => {
            state.lives = (state.lives + 1).min(MAX_LIVES);
            state.push_text(pos, "+1 LIFE", "#00ff00");
        }
        PowerUpKind::Power => {
            state.player.bullet_level = (state.player.bullet_level + 1).min(MAX_BULLET_LEVEL);
            state.push_text(pos, "POWER UP", "#00aaff");
        }
        PowerUpKind::Shield => {
            // Overwrites any remaining invincibility window
            state.player.invincible = true;
            state.player.invincible_ms = SHIELD_INVINCIBILITY_MS;
            state.push_text(pos, "SHIELD", "#00ff88");
        }
    }
    state.push_explosion(pos, 30.0, kind.color(), 0.8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyKind, PowerUp};

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

    fn bullet_at(pos: Vec2, damage: i32) -> Bullet {
        Bullet {
            pos,
            damage,
            color: "#ffffff",
        }
    }

    fn power_up_on_player(state: &GameState, kind: PowerUpKind) -> PowerUp {
        PowerUp {
            pos: state.player.pos,
            kind,
            rotation: 0.0,
            rotation_speed: 0.03,
        }
    }

    #[test]
    fn test_bullet_destroys_basic_enemy_and_scores() {
        let mut state = playing_state(1);
        let pos = Vec2::new(400.0, 200.0);
        state.enemies.push(basic_enemy(pos));
        state.bullets.push(bullet_at(pos, 1));

        resolve(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert!(!state.explosions.is_empty());
    }

    #[test]
    fn test_bullet_hits_at_most_one_enemy_per_frame() {
        let mut state = playing_state(1);
        let pos = Vec2::new(400.0, 200.0);
        state.enemies.push(basic_enemy(pos));
        state.enemies.push(basic_enemy(pos + Vec2::new(5.0, 0.0)));
        state.bullets.push(bullet_at(pos, 1));

        resolve(&mut state);

        // One enemy died, the other is untouched
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_bullet_consumed_even_when_enemy_survives() {
        let mut state = playing_state(1);
        let pos = Vec2::new(400.0, 200.0);
        let mut tank = basic_enemy(pos);
        tank.health = 3;
        tank.max_health = 3;
        state.enemies.push(tank);
        state.bullets.push(bullet_at(pos, 1));

        resolve(&mut state);

        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_enemy_at_exactly_zero_health_scores_once() {
        let mut state = playing_state(1);
        let pos = Vec2::new(400.0, 200.0);
        let mut enemy = basic_enemy(pos);
        enemy.health = 3;
        state.enemies.push(enemy);
        state.bullets.push(bullet_at(pos, 3));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);

        // Nothing left to score on a second pass
        resolve(&mut state);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_player_hit_costs_life_and_opens_invincibility() {
        let mut state = playing_state(1);
        state.enemies.push(basic_enemy(state.player.pos));

        resolve(&mut state);

        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_ms, HIT_INVINCIBILITY_MS);
        assert!(state.enemies.is_empty());
        assert!(state.shake > 0.0);
    }

    #[test]
    fn test_invincible_player_ignores_contact() {
        let mut state = playing_state(1);
        state.player.invincible = true;
        state.player.invincible_ms = 1000.0;
        state.enemies.push(basic_enemy(state.player.pos));

        resolve(&mut state);

        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_last_life_triggers_game_over() {
        let mut state = playing_state(1);
        state.lives = 1;
        state.enemies.push(basic_enemy(state.player.pos));

        resolve(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_lives_never_go_negative_with_stacked_enemies() {
        let mut state = playing_state(1);
        state.lives = 1;
        state.enemies.push(basic_enemy(state.player.pos));
        state.enemies.push(basic_enemy(state.player.pos));
        state.enemies.push(basic_enemy(state.player.pos));

        resolve(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_health_power_up_caps_at_max_lives() {
        let mut state = playing_state(1);
        state.lives = MAX_LIVES;
        let pickup = power_up_on_player(&state, PowerUpKind::Health);
        state.power_ups.push(pickup);

        resolve(&mut state);

        assert_eq!(state.lives, MAX_LIVES);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.texts.len(), 1);
    }

    #[test]
    fn test_power_level_caps_at_three() {
        let mut state = playing_state(1);
        for _ in 0..3 {
            let pickup = power_up_on_player(&state, PowerUpKind::Power);
            state.power_ups.push(pickup);
            resolve(&mut state);
        }
        assert_eq!(state.player.bullet_level, MAX_BULLET_LEVEL);

        let pickup = power_up_on_player(&state, PowerUpKind::Power);
        state.power_ups.push(pickup);
        resolve(&mut state);
        assert_eq!(state.player.bullet_level, MAX_BULLET_LEVEL);
    }

    #[test]
    fn test_shield_overwrites_remaining_invincibility() {
        let mut state = playing_state(1);
        state.player.invincible = true;
        state.player.invincible_ms = 100.0;
        let pickup = power_up_on_player(&state, PowerUpKind::Shield);
        state.power_ups.push(pickup);

        resolve(&mut state);

        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_ms, SHIELD_INVINCIBILITY_MS);
    }
}
