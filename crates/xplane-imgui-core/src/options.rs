//! Configuration options for the overlay.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration for the overlay plugin.
///
/// Loaded from a JSON file next to the plugin binary when one exists;
/// every field falls back to its default, so partial files are fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Human-readable plugin name, also used for the log file and the menu
    /// entry.
    pub plugin_name: String,

    /// Pixel size for UI fonts.
    pub font_size_px: f32,

    /// Optional TrueType file loaded in addition to the built-in font.
    pub font_file: Option<PathBuf>,

    /// Whether to apply the dark UI style.
    pub dark_style: bool,

    /// Where the UI library persists its window layout; `None` disables
    /// persistence.
    pub layout_file: Option<PathBuf>,

    /// Log level filter: "error", "warn", "info", "debug", or "trace".
    pub log_level: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            plugin_name: "XPlane ImGui".to_string(),
            font_size_px: 13.0,
            font_file: None,
            dark_style: true,
            layout_file: None,
            log_level: "debug".to_string(),
        }
    }
}

impl OverlayOptions {
    /// Reads options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Writes options as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reads options from `path` if it exists, falling back to defaults on
    /// a missing or malformed file (malformed files are logged).
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(options) => options,
            Err(err) => {
                warn!("ignoring options file {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let options = OverlayOptions::default();
        assert_eq!(options.plugin_name, "XPlane ImGui");
        assert!(options.font_size_px > 0.0);
        assert!(options.dark_style);
        assert!(options.layout_file.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut options = OverlayOptions::default();
        options.plugin_name = "Test Overlay".to_string();
        options.font_size_px = 18.0;
        options.layout_file = Some(PathBuf::from("layout.ini"));

        let json = serde_json::to_string(&options).unwrap();
        let back: OverlayOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.plugin_name, "Test Overlay");
        assert_eq!(back.font_size_px, 18.0);
        assert_eq!(back.layout_file, Some(PathBuf::from("layout.ini")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let back: OverlayOptions = serde_json::from_str(r#"{"plugin_name":"Partial"}"#).unwrap();
        assert_eq!(back.plugin_name, "Partial");
        assert_eq!(back.font_size_px, OverlayOptions::default().font_size_px);
        assert_eq!(back.log_level, "debug");
    }
}
