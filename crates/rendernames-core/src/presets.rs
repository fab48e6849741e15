//! Preset model, built-in presets and the preset store contract.
//!
//! A [`Preset`] is a named snapshot of the synced settings. Built-in presets are
//! constants addressed with the [`BUILTIN_PREFIX`]; everything else goes through a
//! [`PresetStore`]. [`PresetLibrary`] does the prefix dispatch so callers never hand a
//! built-in name to the backing store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderNamesError, Result};
use crate::settings::{FramePadding, SceneSettings, SettingsUpdate, SyncedSettings};

/// Current preset file format version.
pub const PRESET_VERSION: u32 = 1;

/// Names starting with this prefix resolve to the built-in table.
pub const BUILTIN_PREFIX: &str = "__builtin__";

/// Names of the built-in presets, in display order.
pub const BUILTIN_NAMES: [&str; 5] = ["simple", "professional", "archival", "by_camera", "minimal"];

/// A preset snapshot as stored on disk.
///
/// Every settings field is optional on read: a field missing from the JSON leaves the
/// target setting untouched when the preset is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_base_path: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_per_scene: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_per_camera: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_per_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_blend_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitize_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_padding: Option<i64>,
}

fn default_version() -> u32 {
    PRESET_VERSION
}

impl Default for Preset {
    /// A preset that touches nothing.
    fn default() -> Self {
        Self {
            version: PRESET_VERSION,
            template: None,
            use_base_path: None,
            base_path: None,
            folder_per_scene: None,
            folder_per_camera: None,
            folder_per_date: None,
            use_blend_root: None,
            sanitize_names: None,
            lowercase: None,
            frame_padding: None,
        }
    }
}

impl Preset {
    /// Snapshot every synced field.
    pub fn capture(synced: &SyncedSettings) -> Self {
        Self {
            version: PRESET_VERSION,
            template: Some(synced.template.clone()),
            use_base_path: Some(synced.use_base_path),
            base_path: Some(synced.base_path.clone()),
            folder_per_scene: Some(synced.folder_per_scene),
            folder_per_camera: Some(synced.folder_per_camera),
            folder_per_date: Some(synced.folder_per_date),
            use_blend_root: Some(synced.use_blend_root),
            sanitize_names: Some(synced.sanitize_names),
            lowercase: Some(synced.lowercase),
            frame_padding: Some(synced.frame_padding.get() as i64),
        }
    }

    /// Field assignments this preset makes, folder toggles first and template last.
    ///
    /// An empty template is skipped so a preset can never blank a scene's template.
    pub fn updates(&self) -> Vec<SettingsUpdate> {
        let mut out = Vec::with_capacity(10);
        out.extend(self.folder_per_scene.map(SettingsUpdate::FolderPerScene));
        out.extend(self.folder_per_camera.map(SettingsUpdate::FolderPerCamera));
        out.extend(self.folder_per_date.map(SettingsUpdate::FolderPerDate));
        out.extend(self.use_blend_root.map(SettingsUpdate::UseBlendRoot));
        out.extend(self.use_base_path.map(SettingsUpdate::UseBasePath));
        out.extend(self.base_path.clone().map(SettingsUpdate::BasePath));
        out.extend(self.sanitize_names.map(SettingsUpdate::SanitizeNames));
        out.extend(self.lowercase.map(SettingsUpdate::Lowercase));
        out.extend(self.frame_padding.map(SettingsUpdate::FramePadding));
        out.extend(
            self.template
                .clone()
                .filter(|t| !t.is_empty())
                .map(SettingsUpdate::Template),
        );
        out
    }

    /// Apply as plain data, without any propagation. Returns the number of fields changed.
    pub fn apply_to(&self, settings: &mut SceneSettings) -> usize {
        self.updates()
            .into_iter()
            .filter(|u| settings.apply(u.clone()))
            .count()
    }

    /// The preset as a full synced record layered over `base`.
    pub fn over(&self, base: &SyncedSettings) -> SyncedSettings {
        let mut scratch = SceneSettings {
            synced: base.clone(),
            ..SceneSettings::default()
        };
        self.apply_to(&mut scratch);
        scratch.synced
    }
}

fn builtin(
    template: &str,
    folder_per_scene: bool,
    folder_per_camera: bool,
    folder_per_date: bool,
    use_blend_root: bool,
    frame_padding: u8,
) -> Preset {
    Preset::capture(&SyncedSettings {
        template: template.into(),
        base_path: String::new(),
        use_base_path: false,
        folder_per_scene,
        folder_per_camera,
        folder_per_date,
        use_blend_root,
        sanitize_names: true,
        lowercase: false,
        frame_padding: FramePadding::new(frame_padding as i64),
    })
}

/// Look up a built-in preset by its bare name (`simple`, `professional`, ...).
pub fn builtin_preset(name: &str) -> Option<Preset> {
    let preset = match name {
        "simple" => builtin("{{scene}}_{{frame}}", false, false, false, false, 4),
        "professional" => builtin(
            "{{blend_file}}/{{date}}/{{scene}}_{{camera}}/{{frame}}",
            true,
            true,
            true,
            true,
            4,
        ),
        "archival" => builtin(
            "{{datetime}}/{{blend_file}}_{{scene}}_{{frame}}",
            false,
            false,
            true,
            false,
            5,
        ),
        "by_camera" => builtin("{{camera}}/{{scene}}_{{frame}}", false, true, false, false, 4),
        "minimal" => builtin("{{scene}}_{{frame}}", false, false, false, false, 4),
        _ => return None,
    };
    Some(preset)
}

/// `__builtin__<name>` for a bare built-in name.
pub fn builtin_key(name: &str) -> String {
    format!("{BUILTIN_PREFIX}{name}")
}

/// Title used in menus: `by_camera` → `By Camera`.
pub fn display_name(name: &str) -> String {
    let bare = name.strip_prefix(BUILTIN_PREFIX).unwrap_or(name);
    bare.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Key-value storage for user presets.
///
/// Implementations never see built-in names; [`PresetLibrary`] filters them out.
pub trait PresetStore {
    /// Stored preset names, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Create or overwrite `name`.
    fn save(&mut self, name: &str, preset: &Preset) -> Result<()>;

    /// Fetch `name`, or [`RenderNamesError::PresetNotFound`].
    fn load(&self, name: &str) -> Result<Preset>;

    /// Remove `name`, or [`RenderNamesError::PresetNotFound`].
    fn delete(&mut self, name: &str) -> Result<()>;
}

/// In-memory store, for hosts without persistence and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStore {
    presets: BTreeMap<String, Preset>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.presets.keys().cloned().collect())
    }

    fn save(&mut self, name: &str, preset: &Preset) -> Result<()> {
        self.presets.insert(name.to_string(), preset.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Preset> {
        self.presets
            .get(name)
            .cloned()
            .ok_or_else(|| RenderNamesError::PresetNotFound(name.to_string()))
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.presets
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RenderNamesError::PresetNotFound(name.to_string()))
    }
}

/// Built-in table in front of a user preset store.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary<S> {
    store: S,
}

impl<S: PresetStore> PresetLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_builtin(name: &str) -> bool {
        name.starts_with(BUILTIN_PREFIX)
    }

    /// Built-in keys (prefixed) in display order.
    pub fn builtin_names() -> Vec<String> {
        BUILTIN_NAMES.iter().map(|n| builtin_key(n)).collect()
    }

    /// User preset names from the store.
    pub fn list(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    pub fn load(&self, name: &str) -> Result<Preset> {
        if let Some(bare) = name.strip_prefix(BUILTIN_PREFIX) {
            return builtin_preset(bare)
                .ok_or_else(|| RenderNamesError::PresetNotFound(name.to_string()));
        }
        debug!(preset = name, "loading user preset");
        self.store.load(name)
    }

    pub fn save(&mut self, name: &str, preset: &Preset) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RenderNamesError::InvalidPresetName(name.to_string()));
        }
        if Self::is_builtin(name) {
            return Err(RenderNamesError::BuiltinPresetReadOnly(name.to_string()));
        }
        debug!(preset = name, "saving user preset");
        self.store.save(name, preset)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        if Self::is_builtin(name) {
            return Err(RenderNamesError::BuiltinPresetReadOnly(name.to_string()));
        }
        debug!(preset = name, "deleting user preset");
        self.store.delete(name)
    }
}
