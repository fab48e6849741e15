use std::path::{Path, PathBuf};

use rendernames_core::error::{RenderNamesError, Result};
use rendernames_core::presets::{Preset, PresetStore};
use tracing::{debug, warn};

use crate::{sanitize_filename, PRESET_EXTENSION};

/// Preset store backed by a directory of JSON files.
///
/// The directory is created on first save; a missing directory lists as empty.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let stem = sanitize_filename(name);
        if stem.is_empty() {
            return Err(RenderNamesError::InvalidPresetName(name.to_string()));
        }
        Ok(self.dir.join(format!("{stem}.{PRESET_EXTENSION}")))
    }
}

pub(crate) fn read_preset(path: &Path) -> Result<Preset> {
    let contents = std::fs::read_to_string(path).map_err(|e| RenderNamesError::PresetRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| RenderNamesError::PresetParse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_preset(path: &Path, preset: &Preset) -> Result<()> {
    let write_err = |e| RenderNamesError::PresetWrite {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(preset).map_err(|e| RenderNamesError::PresetParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(write_err)
}

impl PresetStore for JsonDirStore {
    fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "skipping unreadable preset entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(PRESET_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn save(&mut self, name: &str, preset: &Preset) -> Result<()> {
        let path = self.path_for(name)?;
        write_preset(&path, preset)?;
        debug!(preset = name, path = %path.display(), "preset written");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Preset> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(RenderNamesError::PresetNotFound(name.to_string()));
        }
        read_preset(&path)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(RenderNamesError::PresetNotFound(name.to_string()));
        }
        std::fs::remove_file(&path)?;
        debug!(preset = name, path = %path.display(), "preset deleted");
        Ok(())
    }
}
