//! Game settings and preferences
//!
//! Browser builds persist these in LocalStorage. Native builds read a JSON
//! file named by the `SKY_HOP_SETTINGS` environment variable.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Draw the background grid
    pub show_grid: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Session ===
    /// Fixed RNG seed; a time-based seed is used when unset
    pub seed: Option<u64>,
    /// Directory (or URL prefix) holding the sprite images
    pub asset_dir: String,

    // === Native headless run ===
    /// Frames simulated before exiting
    pub headless_frames: u32,
    /// Write the final frame here as PNG
    pub screenshot_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_fps: false,

            seed: None,
            asset_dir: "assets".to_string(),

            headless_frames: 1800,
            screenshot_path: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "sky_hop_settings";

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const ENV_VAR: &'static str = "SKY_HOP_SETTINGS";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
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
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
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

    /// Load settings from the file named by `SKY_HOP_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load_from(std::path::Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Read a settings file. Unreadable or malformed files fall back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring corrupt settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings back to the `SKY_HOP_SETTINGS` file (no-op when unset)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            return;
        };
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_grid);
        assert!(!settings.show_fps);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.asset_dir, "assets");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42, "show_fps": true}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.show_fps);
        assert!(settings.show_grid);
        assert_eq!(settings.headless_frames, 1800);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            screenshot_path: Some("out.png".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_from(std::path::Path::new("/nonexistent/sky-hop.json"));
        assert_eq!(settings, Settings::default());
    }
}
