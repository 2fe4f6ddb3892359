//! Client settings

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Undo depth used when nothing else is configured
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Client settings, read from the platform config dir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Number of undo snapshots kept
    pub history_depth: usize,
    /// Width of the square new objects are scattered over (centered on origin)
    pub placement_spread: f64,
    /// Offset applied to duplicated objects
    pub duplicate_offset: [f64; 3],
    /// Initial environment preset of the viewer
    pub environment: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            placement_spread: 10.0,
            duplicate_offset: [1.5, 0.0, 1.5],
            environment: "city".to_string(),
        }
    }
}

impl ClientSettings {
    /// Load settings from the platform config dir, or defaults
    pub fn load() -> Self {
        directories::ProjectDirs::from("com", "scene-builder", "scene-builder")
            .and_then(|dirs| Self::load_from(&dirs.config_dir().join("settings.json")))
            .unwrap_or_default()
    }

    /// Settings stored at `path`; `None` when missing or unreadable
    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {e}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: ClientSettings = serde_json::from_str(r#"{"history_depth": 4}"#).unwrap();
        assert_eq!(settings.history_depth, 4);
        assert_eq!(settings.duplicate_offset, [1.5, 0.0, 1.5]);
        assert_eq!(settings.environment, "city");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(ClientSettings::load_from(&path), None);

        std::fs::write(&path, r#"{"placement_spread": 4.0}"#).unwrap();
        let settings = ClientSettings::load_from(&path).unwrap();
        assert_eq!(settings.placement_spread, 4.0);
        assert_eq!(settings.history_depth, DEFAULT_HISTORY_DEPTH);

        std::fs::write(&path, "{broken").unwrap();
        assert_eq!(ClientSettings::load_from(&path), None);
    }
}
