use std::path::Path;

use anyhow::Result;

use crate::commands::Session;
use crate::output;

/// Re-render a scene's preview against the current clock and print it.
pub async fn run(project_path: &Path, config_path: &Path, scene: Option<String>) -> Result<()> {
    let mut session = Session::open(project_path, config_path)?;
    let name = session.scene_name(scene)?;

    let mut ctx = session
        .sync
        .scene(&name)
        .map(|s| s.context.clone())
        .unwrap_or_default();
    ctx.touch();
    session.sync.update_context(&name, ctx)?;

    let Some(scene) = session.sync.scene(&name) else {
        return Ok(());
    };
    let settings = &scene.settings;
    output::print_key_value("Scene", &name);
    output::print_key_value("Template", &settings.synced.template);
    output::print_key_value("Preview", &settings.preview);
    if settings.use_global_settings {
        output::print_key_value("Mode", "global");
    }

    session.save()?;
    Ok(())
}
