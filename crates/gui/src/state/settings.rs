//! Tool settings
//!
//! Defaults for a session. They are read from `settings.json` in the platform
//! config directory when present; the session itself never writes them back.

use serde::{Deserialize, Serialize};
use shared::Precision;

use super::toggles::TogglePolicy;
use crate::annotations::DEFAULT_PREFIX;

/// Tool window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "PPC".to_string(),
            width: 430.0,
            height: 170.0,
        }
    }
}

/// Viewport label settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSettings {
    /// Font size in points
    pub font_size: f32,
    /// Label text color RGB
    pub color: [u8; 3],
    /// Draw a dot at each anchor
    pub show_anchor: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: [255, 220, 90],
            show_anchor: true,
        }
    }
}

/// All tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Initial number of decimal places (1-5)
    #[serde(default)]
    pub precision: Precision,
    /// Name prefix of created annotations
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// How the mode checkboxes interact
    #[serde(default)]
    pub toggle_policy: TogglePolicy,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub labels: LabelSettings,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            prefix: default_prefix(),
            toggle_policy: TogglePolicy::default(),
            window: WindowSettings::default(),
            labels: LabelSettings::default(),
        }
    }
}

impl ToolSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "ppc", "ppc") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {}", config_path.display());
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {e}", config_path.display());
                    }
                }
            }
        }
        Self::default()
    }

    /// Parse settings, filling anything missing with defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Settings parse error: {e}"))
    }
}
