//! Space Defender - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, difficulty)
//! - `renderer`: Immediate-mode 2D canvas rendering
//! - `settings`: Visual preferences persisted in LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the display refresh the
    /// original balance was tuned against)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions (fixed-size canvas)
    pub const PLAYFIELD_W: f32 = 800.0;
    pub const PLAYFIELD_H: f32 = 600.0;

    /// Player ship
    pub const PLAYER_W: f32 = 40.0;
    pub const PLAYER_H: f32 = 60.0;
    /// Player speed in px/s (6 px per 60 Hz frame)
    pub const PLAYER_SPEED: f32 = 360.0;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Bullets
    pub const BULLET_W: f32 = 6.0;
    pub const BULLET_H: f32 = 20.0;
    /// Bullet speed in px/s (12 px per frame)
    pub const BULLET_SPEED: f32 = 720.0;
    pub const MAX_BULLET_LEVEL: u8 = 3;
    pub const SHOOT_COOLDOWN_MS: f32 = 250.0;

    /// Enemies
    /// Base enemy speed in px/s (2 px per frame)
    pub const ENEMY_BASE_SPEED: f32 = 120.0;
    /// Speed added to the base per wave (0.2 px per frame)
    pub const ENEMY_SPEED_INCREMENT: f32 = 12.0;
    pub const SPAWN_DELAY_START_MS: f32 = 1000.0;
    pub const SPAWN_DELAY_STEP_MS: f32 = 50.0;
    pub const SPAWN_DELAY_FLOOR_MS: f32 = 400.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 25.0;
    /// Power-up fall speed in px/s (2 px per frame)
    pub const POWERUP_FALL_SPEED: f32 = 120.0;
    /// Ambient spawn timer threshold before the per-frame gate applies
    pub const POWERUP_TIMER_MS: f32 = 8000.0;
    /// Per-frame spawn chance once the timer threshold is exceeded
    pub const POWERUP_GATE_CHANCE: f32 = 0.02;
    /// Drop chance on enemy death
    pub const POWERUP_DROP_CHANCE: f32 = 0.2;

    /// Invincibility windows
    pub const HIT_INVINCIBILITY_MS: f32 = 2000.0;
    pub const SHIELD_INVINCIBILITY_MS: f32 = 5000.0;

    /// Score threshold multiplier for wave advancement
    pub const WAVE_SCORE_STEP: u32 = 100;

    /// Background starfield
    pub const STAR_COUNT: usize = 150;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: glam::Vec2, b: glam::Vec2) -> f32 {
    (a - b).length()
}
