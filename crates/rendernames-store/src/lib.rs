//! JSON file preset storage for rendernames.
//!
//! [`JsonDirStore`] keeps one `<name>.json` file per user preset in a directory. Preset
//! names are mapped to file names with [`sanitize_filename`], so two names that differ
//! only in forbidden characters share a file. Built-in presets never reach the store;
//! wrap it in a [`PresetLibrary`](rendernames_core::presets::PresetLibrary) to get them.
//!
//! [`import_preset`] and [`export_preset`] move single presets in and out of arbitrary
//! paths, outside the store directory.

mod dir;
mod transfer;

pub use dir::JsonDirStore;
pub use transfer::{export_preset, import_preset};

/// File extension for preset files.
pub const PRESET_EXTENSION: &str = "json";

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a preset name safe to use as a file stem.
///
/// Forbidden and control characters become `_`, then leading and trailing dots and
/// spaces are trimmed. May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    replaced.trim_matches(|c| c == '.' || c == ' ').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Preset"), "My Preset");
        assert_eq!(sanitize_filename("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename("  .hidden. "), "hidden");
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
        assert_eq!(sanitize_filename("..."), "");
    }
}
