//! Single-file preset import and export.

use std::path::{Path, PathBuf};

use rendernames_core::error::{RenderNamesError, Result};
use rendernames_core::presets::Preset;
use tracing::info;

use crate::dir::{read_preset, write_preset};
use crate::PRESET_EXTENSION;

/// Read a preset file. The preset name is the file stem.
pub fn import_preset(path: &Path) -> Result<(String, Preset)> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RenderNamesError::InvalidPresetName(path.display().to_string()))?
        .to_string();
    let preset = read_preset(path)?;
    info!(preset = %name, path = %path.display(), "preset imported");
    Ok((name, preset))
}

/// Write a preset to `path`, appending `.json` if it has another or no extension.
///
/// Returns the path actually written.
pub fn export_preset(path: &Path, preset: &Preset) -> Result<PathBuf> {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PRESET_EXTENSION));
    let path = if has_ext {
        path.to_path_buf()
    } else {
        let mut os = path.as_os_str().to_os_string();
        os.push(".");
        os.push(PRESET_EXTENSION);
        PathBuf::from(os)
    };
    write_preset(&path, preset)?;
    info!(path = %path.display(), "preset exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendernames_core::presets::builtin_preset;

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let preset = builtin_preset("professional").unwrap();

        let written = export_preset(&dir.path().join("out").join("studio"), &preset).unwrap();
        assert_eq!(written, dir.path().join("out").join("studio.json"));

        let (name, imported) = import_preset(&written).unwrap();
        assert_eq!(name, "studio");
        assert_eq!(imported, preset);
    }

    #[test]
    fn test_export_keeps_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Shot.JSON");
        let written = export_preset(&target, &Preset::default()).unwrap();
        assert_eq!(written, target);

        let written = export_preset(&dir.path().join("v1.2"), &Preset::default()).unwrap();
        assert_eq!(written, dir.path().join("v1.2.json"));
    }

    #[test]
    fn test_import_partial_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("partial.json");
        std::fs::write(&partial, r#"{ "lowercase": true, "frame_padding": 12 }"#).unwrap();
        let (_, preset) = import_preset(&partial).unwrap();
        assert_eq!(preset.lowercase, Some(true));
        assert_eq!(preset.frame_padding, Some(12));
        assert!(preset.template.is_none());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "not json").unwrap();
        assert!(matches!(
            import_preset(&broken),
            Err(RenderNamesError::PresetParse { .. })
        ));
        assert!(matches!(
            import_preset(&dir.path().join("missing.json")),
            Err(RenderNamesError::PresetRead { .. })
        ));
    }
}
