use std::path::Path;

use anyhow::{Context, Result};

use rendernames_core::context::RenderContext;

use crate::commands::Session;
use crate::output;
use crate::SceneAction;

pub async fn run(project_path: &Path, config_path: &Path, action: SceneAction) -> Result<()> {
    let mut session = Session::open(project_path, config_path)?;

    match action {
        SceneAction::Add {
            name,
            context,
            blend_file,
            camera,
            frame_start,
            frame_end,
            output_path,
            activate,
        } => {
            let mut ctx = match context {
                Some(path) => {
                    let contents = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading context file {}", path.display()))?;
                    serde_json::from_str::<RenderContext>(&contents)
                        .with_context(|| format!("parsing context file {}", path.display()))?
                }
                None => session
                    .sync
                    .scene(&name)
                    .map(|s| s.context.clone())
                    .unwrap_or_default(),
            };
            ctx.scene = name.clone();
            if blend_file.is_some() {
                ctx.blend_file = blend_file;
            }
            if camera.is_some() {
                ctx.camera = camera;
            }
            if let Some(start) = frame_start {
                ctx.frame_start = start;
            }
            if let Some(end) = frame_end {
                ctx.frame_end = end;
            }
            if let Some(path) = output_path {
                ctx.output_path = path;
            }
            ctx.touch();

            let existed = session.sync.scene(&name).is_some();
            if existed {
                session.sync.update_context(&name, ctx)?;
            } else {
                session.sync.observe_scene(&name, ctx);
            }
            if activate || session.sync.active().is_none() {
                session.sync.set_active(Some(&name))?;
            }
            session.save()?;

            let verb = if existed { "Updated" } else { "Added" };
            output::print_success(&format!("{verb} scene '{name}'"));
            if let Some(scene) = session.sync.scene(&name) {
                output::print_key_value("Preview", &scene.settings.preview);
            }
        }
        SceneAction::List => {
            output::print_header("rendernames scenes");
            let active = session.sync.active().map(str::to_string);
            for name in session.sync.scene_names() {
                let Some(scene) = session.sync.scene(name) else {
                    continue;
                };
                let marker = if active.as_deref() == Some(name) { "*" } else { " " };
                let mode = if scene.settings.use_global_settings {
                    "global"
                } else {
                    "local"
                };
                let state = if scene.settings.enabled { "" } else { " (disabled)" };
                println!(
                    "{marker} {name} [{mode}]{state}  {}",
                    console::style(&scene.settings.preview).dim()
                );
            }
        }
        SceneAction::Activate { name } => {
            session.sync.set_active(Some(&name))?;
            session.save()?;
            output::print_success(&format!("Active scene: {name}"));
        }
        SceneAction::Remove { name } => {
            session
                .sync
                .remove_scene(&name)
                .with_context(|| format!("unknown scene '{name}'"))?;
            session.save()?;
            output::print_success(&format!("Removed scene '{name}'"));
        }
    }

    Ok(())
}
