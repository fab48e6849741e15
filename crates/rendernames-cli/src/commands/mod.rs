//! CLI command implementations for rendernames.
//!
//! Each module corresponds to a subcommand (`rendernames <command>`).

pub mod apply;
pub mod preset;
pub mod preview;
pub mod render;
pub mod scene;
pub mod set;
pub mod validate;
pub mod variables;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rendernames_core::config::AppConfig;
use rendernames_core::presets::PresetLibrary;
use rendernames_core::project::ProjectState;
use rendernames_core::sync::Synchronizer;
use rendernames_store::JsonDirStore;

/// Loaded project file plus app config, shared by every command.
pub struct Session {
    pub project_path: PathBuf,
    pub config: AppConfig,
    pub sync: Synchronizer,
}

impl Session {
    /// Load config and project state. A missing project file starts an empty project.
    pub fn open(project_path: &Path, config_path: &Path) -> Result<Self> {
        let config = AppConfig::load_or_default(config_path)?;
        let state = ProjectState::load_or_default(project_path)?;
        Ok(Self {
            project_path: project_path.to_path_buf(),
            config,
            sync: Synchronizer::from_state(state),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.sync.to_state().save(&self.project_path)?;
        Ok(())
    }

    pub fn library(&self) -> PresetLibrary<JsonDirStore> {
        PresetLibrary::new(JsonDirStore::new(self.config.presets_dir()))
    }

    /// The named scene, or the active one when `scene` is `None`.
    pub fn scene_name(&self, scene: Option<String>) -> Result<String> {
        match scene {
            Some(name) => {
                self.sync
                    .scene(&name)
                    .with_context(|| format!("unknown scene '{name}' (add it with `rendernames scene add`)"))?;
                Ok(name)
            }
            None => self
                .sync
                .active()
                .map(str::to_string)
                .context("no scene given and no active scene set"),
        }
    }
}
