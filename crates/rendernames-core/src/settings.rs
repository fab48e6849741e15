//! Per-scene settings records and the synced field subset shared with global mode.
//!
//! Mutation here is pure data: [`SceneSettings::apply`] changes one field and reports
//! whether anything changed. Propagation and derivation live in [`crate::sync`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::templates::{FolderLayout, DEFAULT_TEMPLATE};

/// Digits used to zero-pad frame numbers. Always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct FramePadding(u8);

impl FramePadding {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    /// Clamp any integer into the valid padding range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for FramePadding {
    fn default() -> Self {
        Self(4)
    }
}

impl From<i64> for FramePadding {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<FramePadding> for u8 {
    fn from(value: FramePadding) -> Self {
        value.0
    }
}

impl fmt::Display for FramePadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-value policies the renderer applies to resolved variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub frame_padding: FramePadding,
    pub sanitize_names: bool,
    pub lowercase: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_padding: FramePadding::default(),
            sanitize_names: true,
            lowercase: false,
        }
    }
}

/// Fields shared between a scene and the global record when global mode is on.
///
/// This is also exactly the field set a preset captures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncedSettings {
    pub template: String,
    pub base_path: String,
    pub use_base_path: bool,
    pub folder_per_scene: bool,
    pub folder_per_camera: bool,
    pub folder_per_date: bool,
    pub use_blend_root: bool,
    pub sanitize_names: bool,
    pub lowercase: bool,
    pub frame_padding: FramePadding,
}

impl Default for SyncedSettings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.into(),
            base_path: String::new(),
            use_base_path: false,
            folder_per_scene: false,
            folder_per_camera: false,
            folder_per_date: false,
            use_blend_root: true,
            sanitize_names: true,
            lowercase: false,
            frame_padding: FramePadding::default(),
        }
    }
}

impl SyncedSettings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            frame_padding: self.frame_padding,
            sanitize_names: self.sanitize_names,
            lowercase: self.lowercase,
        }
    }

    /// Current folder toggles.
    pub fn folder_layout(&self) -> FolderLayout {
        FolderLayout {
            use_blend_root: self.use_blend_root,
            folder_per_scene: self.folder_per_scene,
            folder_per_camera: self.folder_per_camera,
            folder_per_date: self.folder_per_date,
        }
    }

    /// Whether anything the preview depends on differs from `other`.
    pub fn render_differs(&self, other: &Self) -> bool {
        self.template != other.template || self.render_options() != other.render_options()
    }
}

/// One settings record per scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Master toggle; a disabled scene keeps the host's own output path.
    pub enabled: bool,
    #[serde(flatten)]
    pub synced: SyncedSettings,
    /// Ask the host to append the format's file extension.
    pub include_extension: bool,
    pub use_global_settings: bool,
    /// Last rendered preview. Derived, never authoritative.
    pub preview: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            synced: SyncedSettings::default(),
            include_extension: true,
            use_global_settings: false,
            preview: String::new(),
        }
    }
}

/// Names of the user-editable fields, used for change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Enabled,
    Template,
    BasePath,
    UseBasePath,
    FolderPerScene,
    FolderPerCamera,
    FolderPerDate,
    UseBlendRoot,
    SanitizeNames,
    Lowercase,
    FramePadding,
    IncludeExtension,
    UseGlobalSettings,
}

impl SettingsField {
    pub const ALL: [Self; 13] = [
        Self::Enabled,
        Self::Template,
        Self::BasePath,
        Self::UseBasePath,
        Self::FolderPerScene,
        Self::FolderPerCamera,
        Self::FolderPerDate,
        Self::UseBlendRoot,
        Self::SanitizeNames,
        Self::Lowercase,
        Self::FramePadding,
        Self::IncludeExtension,
        Self::UseGlobalSettings,
    ];

    /// Snake-case name as used in preset JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Template => "template",
            Self::BasePath => "base_path",
            Self::UseBasePath => "use_base_path",
            Self::FolderPerScene => "folder_per_scene",
            Self::FolderPerCamera => "folder_per_camera",
            Self::FolderPerDate => "folder_per_date",
            Self::UseBlendRoot => "use_blend_root",
            Self::SanitizeNames => "sanitize_names",
            Self::Lowercase => "lowercase",
            Self::FramePadding => "frame_padding",
            Self::IncludeExtension => "include_extension",
            Self::UseGlobalSettings => "use_global_settings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Part of the shared subset mirrored in global mode.
    pub fn is_synced(self) -> bool {
        !matches!(
            self,
            Self::Enabled | Self::IncludeExtension | Self::UseGlobalSettings
        )
    }

    /// One of the folder toggles that drive template derivation.
    pub fn is_folder_flag(self) -> bool {
        matches!(
            self,
            Self::UseBlendRoot | Self::FolderPerScene | Self::FolderPerCamera | Self::FolderPerDate
        )
    }

    /// Changes the rendered preview.
    pub fn affects_preview(self) -> bool {
        matches!(
            self,
            Self::Template | Self::SanitizeNames | Self::Lowercase | Self::FramePadding
        )
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsUpdate {
    Enabled(bool),
    Template(String),
    BasePath(String),
    UseBasePath(bool),
    FolderPerScene(bool),
    FolderPerCamera(bool),
    FolderPerDate(bool),
    UseBlendRoot(bool),
    SanitizeNames(bool),
    Lowercase(bool),
    FramePadding(i64),
    IncludeExtension(bool),
    UseGlobalSettings(bool),
}

/// A textual value could not be converted for the named field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value '{value}' for {field}")]
pub struct InvalidFieldValue {
    pub field: SettingsField,
    pub value: String,
}

impl SettingsUpdate {
    pub fn field(&self) -> SettingsField {
        match self {
            Self::Enabled(_) => SettingsField::Enabled,
            Self::Template(_) => SettingsField::Template,
            Self::BasePath(_) => SettingsField::BasePath,
            Self::UseBasePath(_) => SettingsField::UseBasePath,
            Self::FolderPerScene(_) => SettingsField::FolderPerScene,
            Self::FolderPerCamera(_) => SettingsField::FolderPerCamera,
            Self::FolderPerDate(_) => SettingsField::FolderPerDate,
            Self::UseBlendRoot(_) => SettingsField::UseBlendRoot,
            Self::SanitizeNames(_) => SettingsField::SanitizeNames,
            Self::Lowercase(_) => SettingsField::Lowercase,
            Self::FramePadding(_) => SettingsField::FramePadding,
            Self::IncludeExtension(_) => SettingsField::IncludeExtension,
            Self::UseGlobalSettings(_) => SettingsField::UseGlobalSettings,
        }
    }

    /// Parse a command-line style `value` for `field`.
    pub fn parse(field: SettingsField, value: &str) -> Result<Self, InvalidFieldValue> {
        let invalid = || InvalidFieldValue {
            field,
            value: value.to_string(),
        };
        let flag = || match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(invalid()),
        };

        Ok(match field {
            SettingsField::Enabled => Self::Enabled(flag()?),
            SettingsField::Template => Self::Template(value.to_string()),
            SettingsField::BasePath => Self::BasePath(value.to_string()),
            SettingsField::UseBasePath => Self::UseBasePath(flag()?),
            SettingsField::FolderPerScene => Self::FolderPerScene(flag()?),
            SettingsField::FolderPerCamera => Self::FolderPerCamera(flag()?),
            SettingsField::FolderPerDate => Self::FolderPerDate(flag()?),
            SettingsField::UseBlendRoot => Self::UseBlendRoot(flag()?),
            SettingsField::SanitizeNames => Self::SanitizeNames(flag()?),
            SettingsField::Lowercase => Self::Lowercase(flag()?),
            SettingsField::FramePadding => {
                Self::FramePadding(value.trim().parse().map_err(|_| invalid())?)
            }
            SettingsField::IncludeExtension => Self::IncludeExtension(flag()?),
            SettingsField::UseGlobalSettings => Self::UseGlobalSettings(flag()?),
        })
    }
}

impl SceneSettings {
    /// Assign one field. Returns `true` if the stored value changed.
    ///
    /// Frame padding is clamped into range here, at the boundary.
    pub fn apply(&mut self, update: SettingsUpdate) -> bool {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        let s = &mut self.synced;
        match update {
            SettingsUpdate::Enabled(v) => set(&mut self.enabled, v),
            SettingsUpdate::Template(v) => set(&mut s.template, v),
            SettingsUpdate::BasePath(v) => set(&mut s.base_path, v),
            SettingsUpdate::UseBasePath(v) => set(&mut s.use_base_path, v),
            SettingsUpdate::FolderPerScene(v) => set(&mut s.folder_per_scene, v),
            SettingsUpdate::FolderPerCamera(v) => set(&mut s.folder_per_camera, v),
            SettingsUpdate::FolderPerDate(v) => set(&mut s.folder_per_date, v),
            SettingsUpdate::UseBlendRoot(v) => set(&mut s.use_blend_root, v),
            SettingsUpdate::SanitizeNames(v) => set(&mut s.sanitize_names, v),
            SettingsUpdate::Lowercase(v) => set(&mut s.lowercase, v),
            SettingsUpdate::FramePadding(v) => set(&mut s.frame_padding, FramePadding::new(v)),
            SettingsUpdate::IncludeExtension(v) => set(&mut self.include_extension, v),
            SettingsUpdate::UseGlobalSettings(v) => set(&mut self.use_global_settings, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_padding_clamps() {
        assert_eq!(FramePadding::new(0).get(), 1);
        assert_eq!(FramePadding::new(-12).get(), 1);
        assert_eq!(FramePadding::new(5).get(), 5);
        assert_eq!(FramePadding::new(99).get(), 8);
    }

    #[test]
    fn test_frame_padding_clamped_on_deserialize() {
        let synced: SyncedSettings = serde_json::from_str(r#"{"frame_padding": 42}"#).unwrap();
        assert_eq!(synced.frame_padding.get(), 8);
    }

    #[test]
    fn test_defaults() {
        let settings = SceneSettings::default();
        assert!(settings.enabled);
        assert!(settings.include_extension);
        assert!(!settings.use_global_settings);
        assert_eq!(settings.synced.template, "{{scene}}_{{frame}}");
        assert!(settings.synced.use_blend_root);
        assert!(settings.synced.sanitize_names);
        assert_eq!(settings.synced.frame_padding.get(), 4);
    }

    #[test]
    fn test_apply_reports_change() {
        let mut settings = SceneSettings::default();
        assert!(settings.apply(SettingsUpdate::Lowercase(true)));
        assert!(!settings.apply(SettingsUpdate::Lowercase(true)));
        assert!(settings.apply(SettingsUpdate::FramePadding(20)));
        assert_eq!(settings.synced.frame_padding.get(), 8);
        assert!(!settings.apply(SettingsUpdate::FramePadding(9)));
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in SettingsField::ALL {
            assert_eq!(SettingsField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(SettingsField::from_name("preview"), None);
    }

    #[test]
    fn test_parse_update() {
        assert_eq!(
            SettingsUpdate::parse(SettingsField::FolderPerScene, "on").unwrap(),
            SettingsUpdate::FolderPerScene(true)
        );
        assert_eq!(
            SettingsUpdate::parse(SettingsField::FramePadding, " 6 ").unwrap(),
            SettingsUpdate::FramePadding(6)
        );
        let err = SettingsUpdate::parse(SettingsField::Lowercase, "maybe").unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'maybe' for lowercase");
    }

    #[test]
    fn test_synced_subset() {
        let synced: Vec<_> = SettingsField::ALL
            .into_iter()
            .filter(|f| f.is_synced())
            .collect();
        assert_eq!(synced.len(), 10);
        assert!(!SettingsField::Enabled.is_synced());
        assert!(SettingsField::FolderPerDate.is_folder_flag());
        assert!(!SettingsField::BasePath.affects_preview());
    }
}
