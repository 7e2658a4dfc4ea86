//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web, defaults elsewhere.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_BULLETS, DEFAULT_MAX_ENEMIES, GRAVITY};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Most enemies alive at once (spawns are skipped beyond this)
    pub max_enemies: usize,
    /// Most bullets in flight at once (shots are dropped beyond this)
    pub max_bullets: usize,
    /// Downward acceleration on bullets (m/s²)
    pub gravity: f32,
    /// Fixed RNG seed (None = caller supplies one, usually the clock)
    pub seed: Option<u64>,

    // === HUD ===
    /// Off-screen enemy warnings
    pub threat_cues: bool,

    // === Feedback ===
    // Stored for the page, which plays sound and drives the controllers.
    // The simulation never reads these.
    /// Controller vibration on shots and hits
    pub haptics: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no enemy spin, steady proximity warning)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_enemies: DEFAULT_MAX_ENEMIES,
            max_bullets: DEFAULT_MAX_BULLETS,
            gravity: GRAVITY,
            seed: None,

            threat_cues: true,

            haptics: true,
            sfx_volume: 1.0,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Clamp values into usable ranges
    pub fn validated(mut self) -> Self {
        self.max_enemies = self.max_enemies.max(1);
        self.max_bullets = self.max_bullets.max(1);
        if !self.gravity.is_finite() {
            log::warn!("Invalid gravity {}, using default", self.gravity);
            self.gravity = GRAVITY;
        }
        self.sfx_volume = if self.sfx_volume.is_finite() {
            self.sfx_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ar_shooter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings.validated();
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings not saved (storage rejected write)");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_clamps() {
        let settings = Settings {
            max_enemies: 0,
            max_bullets: 0,
            gravity: f32::NAN,
            sfx_volume: 3.0,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.max_enemies, 1);
        assert_eq!(settings.max_bullets, 1);
        assert_eq!(settings.gravity, GRAVITY);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"max_enemies": 8}"#).unwrap();
        assert_eq!(settings.max_enemies, 8);
        assert_eq!(settings.max_bullets, DEFAULT_MAX_BULLETS);
        assert!(settings.threat_cues);
    }

    #[test]
    fn test_feedback_preferences_pass_through_to_page() {
        let settings: Settings =
            serde_json::from_str(r#"{"haptics": false, "sfx_volume": 0.25}"#).unwrap();
        let settings = settings.validated();
        assert!(!settings.haptics);
        assert_eq!(settings.sfx_volume, 0.25);

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.haptics);
        assert_eq!(back.sfx_volume, 0.25);
    }
}
