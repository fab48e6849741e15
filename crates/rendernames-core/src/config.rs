//! Application configuration (`rendernames.config.json`).
//!
//! Every field has a default, so a missing file is not an error. A file that exists
//! but does not parse is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RenderNamesError, Result};
use crate::target::DEFAULT_FALLBACK_DIR;
use crate::ticker::DEFAULT_PREVIEW_INTERVAL;

/// Default config file name in the working directory.
pub const CONFIG_FILE: &str = "rendernames.config.json";

/// Application-wide settings shared by the CLI and host integrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where user presets live. `None` uses the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets_dir: Option<PathBuf>,
    /// Base directory when neither a custom base path nor a host output path is set.
    pub fallback_output_dir: String,
    /// Seconds between background preview refreshes.
    pub preview_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            presets_dir: None,
            fallback_output_dir: DEFAULT_FALLBACK_DIR.to_string(),
            preview_interval_secs: DEFAULT_PREVIEW_INTERVAL.as_secs(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| RenderNamesError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| RenderNamesError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(config)
    }

    /// Load from a JSON file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| RenderNamesError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolved presets directory.
    ///
    /// Uses the configured path, else `<config dir>/rendernames/presets`, else `./presets`
    /// when the platform has no config directory.
    pub fn presets_dir(&self) -> PathBuf {
        if let Some(dir) = &self.presets_dir {
            return dir.clone();
        }
        dirs_next::config_dir()
            .map(|d| d.join("rendernames").join("presets"))
            .unwrap_or_else(|| PathBuf::from("presets"))
    }

    /// Preview refresh period. Zero is bumped to one second.
    pub fn preview_interval(&self) -> Duration {
        Duration::from_secs(self.preview_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.fallback_output_dir, "//renders/");
        assert_eq!(config.preview_interval(), Duration::from_secs(5));
        assert!(config.presets_dir().ends_with("presets"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = AppConfig {
            presets_dir: Some(dir.path().join("my-presets")),
            fallback_output_dir: "/mnt/renders/".into(),
            preview_interval_secs: 2,
        };
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.presets_dir(), dir.path().join("my-presets"));
    }

    #[test]
    fn test_config_missing_and_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert_eq!(AppConfig::load_or_default(&path).unwrap(), AppConfig::default());
        assert!(matches!(
            AppConfig::load(&path),
            Err(RenderNamesError::ConfigNotFound { .. })
        ));

        std::fs::write(&path, r#"{ "preview_interval_secs": 0 }"#).unwrap();
        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.fallback_output_dir, "//renders/");
        assert_eq!(config.preview_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(RenderNamesError::ConfigParse { .. })
        ));
    }
}
