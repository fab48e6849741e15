use std::path::Path;

use anyhow::Result;

use rendernames_core::context::RenderContext;
use rendernames_core::settings::RenderOptions;

use crate::commands::Session;

/// Render an ad-hoc template against a scene's context and naming options.
///
/// With no scene given and no active scene, renders against a default context.
pub async fn run(
    project_path: &Path,
    config_path: &Path,
    template: &str,
    scene: Option<String>,
) -> Result<()> {
    let session = Session::open(project_path, config_path)?;

    let (mut ctx, opts) = if scene.is_none() && session.sync.active().is_none() {
        (RenderContext::default(), RenderOptions::default())
    } else {
        let name = session.scene_name(scene)?;
        let scene = session.sync.scene(&name).cloned().unwrap_or_default();
        (scene.context, scene.settings.synced.render_options())
    };
    ctx.touch();

    let engine = session.sync.engine();
    if let Err(err) = engine.validate(template) {
        tracing::info!(error = %err, "rendering a template that does not validate");
    }
    println!("{}", engine.render(template, &ctx, &opts));

    Ok(())
}
