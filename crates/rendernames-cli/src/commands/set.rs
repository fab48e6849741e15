use std::path::Path;

use anyhow::{Context, Result};

use rendernames_core::settings::{SettingsField, SettingsUpdate};

use crate::commands::Session;
use crate::output;

/// Change one field, letting the synchronizer propagate it.
pub async fn run(
    project_path: &Path,
    config_path: &Path,
    scene: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    let mut session = Session::open(project_path, config_path)?;
    let name = session.scene_name(Some(scene.to_string()))?;

    let field = SettingsField::from_name(field).with_context(|| {
        let known: Vec<&str> = SettingsField::ALL.iter().map(|f| f.as_str()).collect();
        format!("unknown field '{field}' (expected one of: {})", known.join(", "))
    })?;
    let update = SettingsUpdate::parse(field, value)?;

    let changed = session.sync.set(&name, update)?;
    session.save()?;

    if !changed {
        output::print_warning(&format!("{field} is already '{value}' on '{name}'"));
        return Ok(());
    }
    output::print_success(&format!("{field} updated on '{name}'"));

    let Some(scene) = session.sync.scene(&name) else {
        return Ok(());
    };
    output::print_key_value("Template", &scene.settings.synced.template);
    output::print_key_value("Preview", &scene.settings.preview);

    if scene.settings.use_global_settings {
        let others: Vec<&str> = session
            .sync
            .global_scenes()
            .into_iter()
            .filter(|s| *s != name)
            .collect();
        if !others.is_empty() {
            output::print_key_value("Synced to", &others.join(", "));
        }
    }

    Ok(())
}
