//! Game state and core entity types
//!
//! Everything the simulation mutates lives here. Session counters are held on
//! an explicit `GameState` passed by reference to each subsystem, never on a
//! global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, last frame rendered dimmed beneath it
    Start,
    /// Active gameplay
    Playing,
    /// Simulation frozen, frame rendered with overlay
    Paused,
    /// Run ended
    GameOver,
}

/// Enemy variants, introduced progressively by wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Power,
    Shield,
}

impl PowerUpKind {
    pub fn color(self) -> &'static str {
        match self {
            PowerUpKind::Health => "#ff4444",
            PowerUpKind::Power => "#00aaff",
            PowerUpKind::Shield => "#00ff88",
        }
    }
}

/// The player's ship. Size is fixed (`PLAYER_W` x `PLAYER_H`).
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub invincible: bool,
    /// Remaining invincibility window in ms
    pub invincible_ms: f32,
    /// Upgrade tier 1-3, controls bullet count and damage
    pub bullet_level: u8,
}

impl Player {
    fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H - 100.0),
            invincible: false,
            invincible_ms: 0.0,
            bullet_level: 1,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    /// Downward speed in px/s, frozen at spawn time
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Points awarded on destruction
    pub value: u32,
    pub kind: EnemyKind,
    pub color: &'static str,
}

/// A player bullet, travels straight up
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    /// Damage equals the player's power level at fire time
    pub damage: i32,
    pub color: &'static str,
}

/// A falling power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub rotation: f32,
    /// Rotation speed in rad per 60 Hz frame
    pub rotation_speed: f32,
}

/// A purely visual explosion, never collides
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining life in ms
    pub life_ms: f32,
    pub max_life_ms: f32,
    pub color: &'static str,
}

/// Background star, wraps vertically and never dies
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Drift speed in px/s
    pub speed: f32,
    /// Phase offset into the shared twinkle oscillation
    pub twinkle_phase: f32,
    pub alpha: f32,
}

/// Floating acknowledgment text (power-up pickups, wave announcements).
/// Drained by the renderer; rises and fades over its lifetime.
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub color: &'static str,
    pub life_ms: f32,
    pub max_life_ms: f32,
}

pub const FLOATING_TEXT_LIFE_MS: f32 = 1000.0;

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG, sole source of randomness in the simulation
    pub rng: Pcg32,
    pub phase: GamePhase,

    // Session counters
    pub score: u32,
    pub lives: u8,
    pub wave: u32,

    // Entities
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub stars: Vec<Star>,
    pub texts: Vec<FloatingText>,

    // Difficulty and timers (all ms-based)
    pub enemy_speed: f32,
    pub spawn_timer_ms: f32,
    pub spawn_delay_ms: f32,
    pub powerup_timer_ms: f32,
    pub shoot_cooldown_ms: f32,

    /// Accumulated animation phase in ms, advanced by frame delta. Replaces
    /// wall-clock reads so oscillation and twinkle are deterministic.
    pub anim_phase_ms: f32,
    /// Screen shake amplitude in px, decays each tick
    pub shake: f32,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = create_stars(&mut rng, STAR_COUNT);
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            score: 0,
            lives: START_LIVES,
            wave: 1,
            player: Player::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            stars,
            texts: Vec::new(),
            enemy_speed: ENEMY_BASE_SPEED,
            spawn_timer_ms: 0.0,
            spawn_delay_ms: SPAWN_DELAY_START_MS,
            powerup_timer_ms: 0.0,
            shoot_cooldown_ms: 0.0,
            anim_phase_ms: 0.0,
            shake: 0.0,
        }
    }

    /// Reset counters and entity collections and enter `Playing`. Identical
    /// from the title screen and from game over. Stars persist across games.
    pub fn begin_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = START_LIVES;
        self.wave = 1;
        self.player = Player::new();
        self.enemies.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.texts.clear();
        self.enemy_speed = ENEMY_BASE_SPEED;
        self.spawn_timer_ms = 0.0;
        self.spawn_delay_ms = SPAWN_DELAY_START_MS;
        self.powerup_timer_ms = 0.0;
        self.shoot_cooldown_ms = 0.0;
        self.shake = 0.0;
        log::info!("New game started (seed {})", self.seed);
    }

    /// Spawn a visual explosion. Intensity scales lifetime; big ones shake
    /// the screen.
    pub fn push_explosion(&mut self, pos: Vec2, size: f32, color: &'static str, intensity: f32) {
        let life = 500.0 * intensity;
        self.explosions.push(Explosion {
            pos,
            radius: size * 0.5,
            life_ms: life,
            max_life_ms: life,
            color,
        });
        if intensity > 1.0 {
            self.shake = (self.shake + 5.0 * intensity).min(15.0);
        }
    }

    /// Queue a floating acknowledgment text
    pub fn push_text(&mut self, pos: Vec2, text: impl Into<String>, color: &'static str) {
        self.texts.push(FloatingText {
            pos,
            text: text.into(),
            color,
            life_ms: FLOATING_TEXT_LIFE_MS,
            max_life_ms: FLOATING_TEXT_LIFE_MS,
        });
    }
}

fn create_stars(rng: &mut Pcg32, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random_range(0.0..PLAYFIELD_W),
                rng.random_range(0.0..PLAYFIELD_H),
            ),
            size: rng.random_range(1.0..4.0),
            // 0.2-0.7 px per 60 Hz frame
            speed: rng.random_range(12.0..42.0),
            twinkle_phase: rng.random_range(0.0..std::f32::consts::TAU),
            alpha: rng.random_range(0.3..0.8),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_title_screen() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.wave, 1);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_begin_game_resets_everything() {
        let mut state = GameState::new(42);
        state.begin_game();

        // Dirty the session, then reset again
        state.score = 500;
        state.lives = 1;
        state.wave = 6;
        state.player.bullet_level = 3;
        state.enemy_speed = 200.0;
        state.spawn_delay_ms = 400.0;
        state.bullets.push(Bullet {
            pos: Vec2::new(10.0, 10.0),
            damage: 3,
            color: "#ffffff",
        });

        state.begin_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.wave, 1);
        assert_eq!(state.player.bullet_level, 1);
        assert_eq!(state.enemy_speed, ENEMY_BASE_SPEED);
        assert_eq!(state.spawn_delay_ms, SPAWN_DELAY_START_MS);
        assert!(state.bullets.is_empty());
        // Starfield survives the reset
        assert_eq!(state.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_big_explosion_shakes_screen() {
        let mut state = GameState::new(1);
        state.push_explosion(Vec2::new(100.0, 100.0), 30.0, "#ff4444", 1.5);
        assert!(state.shake > 0.0);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life_ms, 750.0);

        // Small explosions don't shake
        let mut quiet = GameState::new(1);
        quiet.push_explosion(Vec2::new(0.0, 0.0), 8.0, "#ffffff", 0.3);
        assert_eq!(quiet.shake, 0.0);
    }
}
