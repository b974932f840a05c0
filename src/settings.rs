//! Game settings and preferences
//!
//! Persisted in LocalStorage. Besides cosmetic options these pick the
//! simulation policies (turning, spawning, camera) for the next run.

use serde::{Deserialize, Serialize};

use crate::consts::COUNTDOWN_MS;
use crate::sim::{FrameModel, SimConfig, SpawnModel, TurnModel};

/// Named policy bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Snappy turning on a fixed screen
    Classic,
    /// Turning with momentum on a fixed screen
    Smooth,
    /// Turning with momentum in an endless world, camera on the rocket
    #[default]
    Endless,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Smooth => "Smooth",
            Preset::Endless => "Endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "smooth" => Some(Preset::Smooth),
            "endless" => Some(Preset::Endless),
            _ => None,
        }
    }

    pub fn turn_model(&self) -> TurnModel {
        match self {
            Preset::Classic => TurnModel::Instant,
            Preset::Smooth | Preset::Endless => TurnModel::Inertial,
        }
    }

    pub fn frame(&self) -> FrameModel {
        match self {
            Preset::Classic | Preset::Smooth => FrameModel::ScreenFixed,
            Preset::Endless => FrameModel::CameraFollow,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub preset: Preset,

    // === Simulation ===
    pub turn_model: TurnModel,
    pub spawn_model: SpawnModel,
    pub frame: FrameModel,
    /// Show the "get ready" countdown before each run
    pub countdown: bool,

    // === HUD ===
    /// Show FPS counter
    #[serde(default)]
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self {
            preset,
            turn_model: TurnModel::default(),
            spawn_model: SpawnModel::Interval,
            frame: FrameModel::default(),
            countdown: true,
            show_fps: false,
        };
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates preset-dependent settings)
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.turn_model = preset.turn_model();
        self.frame = preset.frame();
    }

    /// Configuration for the next run
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            turn_model: self.turn_model,
            spawn_model: self.spawn_model,
            frame: self.frame,
            countdown_ms: if self.countdown { COUNTDOWN_MS } else { 0.0 },
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rocket_drift_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
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
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
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
    fn test_preset_round_trip_names() {
        for preset in [Preset::Classic, Preset::Smooth, Preset::Endless] {
            assert_eq!(Preset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Preset::from_str("ENDLESS"), Some(Preset::Endless));
        assert_eq!(Preset::from_str("turbo"), None);
    }

    #[test]
    fn test_classic_preset_config() {
        let config = Settings::from_preset(Preset::Classic).sim_config();
        assert_eq!(config.turn_model, TurnModel::Instant);
        assert_eq!(config.frame, FrameModel::ScreenFixed);
        assert_eq!(config.spawn_model, SpawnModel::Interval);
        assert_eq!(config.countdown_ms, COUNTDOWN_MS);
    }

    #[test]
    fn test_countdown_toggle() {
        let mut settings = Settings::default();
        settings.countdown = false;
        assert_eq!(settings.sim_config().countdown_ms, 0.0);
    }

    #[test]
    fn test_settings_json_defaults_missing_hud_fields() {
        let json = r#"{"preset":"Smooth","turn_model":"Inertial","spawn_model":"Probabilistic","frame":"ScreenFixed","countdown":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.preset, Preset::Smooth);
        assert_eq!(settings.spawn_model, SpawnModel::Probabilistic);
        assert!(!settings.show_fps);
    }
}
