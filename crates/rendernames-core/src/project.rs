//! Persistence for project state between CLI invocations.
//!
//! A project file holds the global settings, every known scene (settings plus the last
//! observed render context) and the active scene name. Previews are stored but are
//! re-rendered when the state is loaded into a [`Synchronizer`](crate::sync::Synchronizer).

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RenderNamesError, Result};
use crate::settings::SyncedSettings;
use crate::sync::Scene;

/// Default project file name in the working directory.
pub const PROJECT_FILE: &str = "rendernames.project.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectState {
    #[serde(default)]
    pub global: SyncedSettings,
    #[serde(default)]
    pub scenes: IndexMap<String, Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_scene: Option<String>,
}

impl ProjectState {
    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| RenderNamesError::ProjectNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| RenderNamesError::ProjectParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a project file, or start empty if it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project file, starting empty");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write the project file as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| RenderNamesError::ProjectParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), scenes = self.scenes.len(), "project saved");
        Ok(())
    }
}
