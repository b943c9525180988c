//! Application settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{AssemblyRevision, PhoneModel};

use crate::ai::gemini;
use crate::i18n::Lang;

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Lang,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Lang::default(),
        }
    }
}

/// Assembly shown at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblySettings {
    pub revision: AssemblyRevision,
    pub model: PhoneModel,
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Draw the floor grid under the assembly
    pub show_grid: bool,
    /// Slow idle sway of the assembly
    pub idle_sway: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [229, 231, 235],
            show_grid: true,
            idle_sway: true,
        }
    }
}

/// Allowed delay between two polls of a video operation, in seconds
pub const POLL_INTERVAL_SECS: std::ops::RangeInclusive<u64> = 1..=60;

/// Generative backend settings. The API key itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSettings {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub video_model: String,
    pub image_model: String,
    pub edit_model: String,
    pub analysis_model: String,
    /// Seconds between polls of a video operation
    pub poll_interval_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            video_model: gemini::DEFAULT_VIDEO_MODEL.to_string(),
            image_model: gemini::DEFAULT_IMAGE_MODEL.to_string(),
            edit_model: gemini::DEFAULT_EDIT_MODEL.to_string(),
            analysis_model: gemini::DEFAULT_ANALYSIS_MODEL.to_string(),
            poll_interval_secs: 5,
        }
    }
}

impl AiSettings {
    /// Poll delay, kept within [`POLL_INTERVAL_SECS`] whatever the file says
    pub fn poll_interval(&self) -> Duration {
        let secs = self
            .poll_interval_secs
            .clamp(*POLL_INTERVAL_SECS.start(), *POLL_INTERVAL_SECS.end());
        Duration::from_secs(secs)
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub assembly: AssemblySettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub ai: AiSettings,
}

impl AppSettings {
    /// `settings.json` in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "solarframe", "solarframe")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
