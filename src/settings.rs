//! User settings stored as settings.json in the app data directory

use crate::constants::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Table preferences
    pub rows_per_page: u32,
    pub multi_select: bool,

    // Last active view ("artworks" | "customers")
    pub last_view: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            rows_per_page: DEFAULT_PAGE_SIZE,
            multi_select: true,
            last_view: "artworks".to_string(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"rows_per_page": 25}"#).unwrap();
        assert_eq!(settings.rows_per_page, 25);
        assert!(settings.multi_select);
        assert_eq!(settings.last_view, "artworks");
    }

    #[test]
    fn round_trips_through_json() {
        let mut settings = Settings::default();
        settings.rows_per_page = 50;
        settings.multi_select = false;
        settings.last_view = "customers".to_string();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows_per_page, 50);
        assert!(!back.multi_select);
        assert_eq!(back.last_view, "customers");
    }
}
