use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use rendernames_core::ticker::PreviewTicker;

use crate::commands::Session;
use crate::output;

/// Refresh the active scene's preview on the configured interval until Ctrl-C.
pub async fn run(project_path: &Path, config_path: &Path, scene: Option<String>) -> Result<()> {
    let mut session = Session::open(project_path, config_path)?;
    let name = session.scene_name(scene)?;
    session.sync.set_active(Some(&name))?;

    let interval = session.config.preview_interval();
    output::print_header(&format!("rendernames watch: {name}"));
    output::print_key_value("Interval", &format!("{}s", interval.as_secs()));
    if let Some(scene) = session.sync.scene(&name) {
        output::print_key_value("Preview", &scene.settings.preview);
    }

    let sync = Arc::new(Mutex::new(session.sync));
    let mut ticker = PreviewTicker::new(interval);
    let shared = Arc::clone(&sync);
    ticker.start(move || {
        let mut sync = shared
            .lock()
            .map_err(|_| anyhow!("project state lock poisoned"))?;
        let changed = sync.refresh_active_preview();
        if changed {
            let preview = sync
                .active()
                .and_then(|a| sync.scene(a))
                .map(|s| s.settings.preview.clone())
                .unwrap_or_default();
            output::print_key_value("Preview", &preview);
        }
        Ok(changed)
    });

    tokio::signal::ctrl_c().await?;
    ticker.stop();
    println!();

    let sync = sync
        .lock()
        .map_err(|_| anyhow!("project state lock poisoned"))?;
    sync.to_state().save(project_path)?;
    output::print_success("Stopped watching");

    Ok(())
}
