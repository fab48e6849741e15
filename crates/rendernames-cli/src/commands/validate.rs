use std::path::Path;

use anyhow::{bail, Result};

use crate::commands::Session;
use crate::output;

/// Validate a template given on the command line, or a scene's stored template.
pub async fn run(
    project_path: &Path,
    config_path: &Path,
    template: Option<String>,
    scene: Option<String>,
) -> Result<()> {
    let session = Session::open(project_path, config_path)?;
    let template = match template {
        Some(t) => t,
        None => {
            let name = session.scene_name(scene)?;
            session
                .sync
                .scene(&name)
                .map(|s| s.settings.synced.template.clone())
                .unwrap_or_default()
        }
    };

    match session.sync.engine().validate(&template) {
        Ok(()) => {
            output::print_success(&format!("Template is valid: {template}"));
            Ok(())
        }
        Err(err) => {
            output::print_error(&err.to_string());
            bail!("invalid template");
        }
    }
}
