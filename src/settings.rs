//! Host preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file on native.
//! Physics tuning is not here: it lives in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::TIME_SCALES;
use crate::error::SettingsError;

/// Preferences the host applies around the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Time-scale index the clock starts at (0 = 1x, 1 = 10x, 2 = 100x)
    pub time_scale_index: usize,
    /// Show the history panel
    pub show_history: bool,
    /// Skip star glow and planet atmosphere halos
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            time_scale_index: 0,
            show_history: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "trisolaris_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "TRISOLARIS_SETTINGS";

    /// Parse settings JSON; unknown time-scale indices fall back to 1x
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.time_scale_index >= TIME_SCALES.len() {
            log::warn!(
                "Time scale index {} out of range, using 1x",
                settings.time_scale_index
            );
            settings.time_scale_index = 0;
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Load from the file named by `TRISOLARIS_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // Native settings are read-only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.time_scale_index, 0);
        assert!(s.show_history);
    }

    #[test]
    fn test_out_of_range_time_scale() {
        let s = Settings::from_json(r#"{ "time_scale_index": 9 }"#).unwrap();
        assert_eq!(s.time_scale_index, 0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            seed: Some(7),
            time_scale_index: 2,
            show_history: false,
            reduced_motion: true,
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(s, back);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
