use std::path::Path;

use anyhow::Result;

use crate::commands::Session;
use crate::output;

/// Print the output path and extension flag the host should apply before rendering.
///
/// Prints nothing (and says so) when the scene is disabled or has no template.
pub async fn run(
    project_path: &Path,
    config_path: &Path,
    scene: Option<String>,
    json: bool,
) -> Result<()> {
    let session = Session::open(project_path, config_path)?;
    let name = session.scene_name(scene)?;

    let target = session
        .sync
        .render_target(&name, &session.config.fallback_output_dir)?;

    match (target, json) {
        (Some(target), true) => println!("{}", serde_json::to_string_pretty(&target)?),
        (Some(target), false) => {
            output::print_key_value("Output path", &target.path);
            output::print_key_value(
                "File extension",
                if target.use_file_extension { "yes" } else { "no" },
            );
        }
        (None, true) => println!("null"),
        (None, false) => {
            output::print_warning(&format!(
                "Scene '{name}' is disabled or has no template; the host keeps its own output path"
            ));
        }
    }

    Ok(())
}
