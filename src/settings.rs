//! Game settings and preferences
//!
//! Read-only: loaded once when the game mounts and never written back.
//! Court geometry and speeds are compile-time constants, not settings.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keys for paddle movement and closing the game
    pub keys: KeyBindings,
    /// Draw the dashed net down the middle
    pub show_center_line: bool,
    /// Fixed RNG seed (for reproducible serves); random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            show_center_line: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "calc_pong_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "CALC_PONG_SETTINGS";

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `CALC_PONG_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Can't read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
