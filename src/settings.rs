//! Visual settings persisted across sessions
//!
//! Settings only affect presentation; the simulation never reads them, so
//! toggling them cannot change gameplay outcomes.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "space_defender_settings";

/// Rendering quality knobs grouped into a preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityPreset {
    /// Draw the scrolling starfield background
    pub starfield_enabled: bool,
    /// Draw the ambient nebula blobs
    pub nebula_enabled: bool,
    /// Cap on simultaneously drawn explosion particles
    pub max_particles: usize,
}

impl Default for QualityPreset {
    fn default() -> Self {
        Self {
            starfield_enabled: true,
            nebula_enabled: true,
            max_particles: 200,
        }
    }
}

impl QualityPreset {
    pub fn low() -> Self {
        Self {
            starfield_enabled: false,
            nebula_enabled: false,
            max_particles: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen shake amplitude scale, 0.0 disables
    pub screen_shake: f32,
    /// Accessibility toggle that suppresses shake and flash effects
    pub reduced_motion: bool,
    pub quality: QualityPreset,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: 1.0,
            reduced_motion: false,
            quality: QualityPreset::default(),
        }
    }
}

impl Settings {
    /// Shake scale after the reduced-motion override
    pub fn effective_screen_shake(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            self.screen_shake
        }
    }

    /// Load from LocalStorage, falling back to defaults on any failure
    /// (missing key, corrupt JSON, storage unavailable).
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt stored settings: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to persist settings");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }

    /// Native builds have no persistent store; settings are per-process.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
