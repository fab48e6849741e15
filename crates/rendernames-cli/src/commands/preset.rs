use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use rendernames_core::presets::{builtin_key, builtin_preset, display_name, PresetLibrary, PresetStore};
use rendernames_store::{export_preset, import_preset};

use crate::commands::Session;
use crate::output;
use crate::PresetAction;

pub async fn run(project_path: &Path, config_path: &Path, action: PresetAction) -> Result<()> {
    let mut session = Session::open(project_path, config_path)?;
    let mut library = session.library();

    match action {
        PresetAction::List => {
            output::print_header("rendernames presets");
            println!("\nBuilt-in");
            for key in PresetLibrary::<rendernames_store::JsonDirStore>::builtin_names() {
                output::print_key_value(&key, &display_name(&key));
            }
            println!("\nUser ({})", library.store().dir().display());
            let user = library.list()?;
            if user.is_empty() {
                println!("  (none)");
            }
            for name in user {
                println!("  {name}");
            }
            println!();
        }
        PresetAction::Save { name, scene } => {
            let scene = session.scene_name(scene)?;
            let preset = session.sync.capture_preset(&scene)?;
            library.save(&name, &preset)?;
            output::print_success(&format!("Saved preset '{name}' from scene '{scene}'"));
        }
        PresetAction::Load { name, scene } => {
            let scene = session.scene_name(scene)?;
            let key = match name {
                Some(name) => resolve_name(&library, &name)?,
                None => pick(&library)?,
            };
            session.sync.load_preset(&scene, &key, &library)?;
            session.save()?;
            output::print_success(&format!("Loaded preset '{}' into '{scene}'", display_name(&key)));
            if let Some(s) = session.sync.scene(&scene) {
                output::print_key_value("Template", &s.settings.synced.template);
                output::print_key_value("Preview", &s.settings.preview);
            }
        }
        PresetAction::Delete { name } => {
            library.delete(&name)?;
            output::print_success(&format!("Deleted preset '{name}'"));
        }
        PresetAction::Import { path } => {
            let (name, preset) = import_preset(&path)?;
            library.save(&name, &preset)?;
            output::print_success(&format!("Imported preset '{name}'"));
        }
        PresetAction::Export { path, scene } => {
            let scene = session.scene_name(scene)?;
            let preset = session.sync.capture_preset(&scene)?;
            let written = export_preset(&path, &preset)?;
            output::print_success(&format!("Exported '{scene}' to {}", written.display()));
        }
    }

    Ok(())
}

/// Accept bare built-in names (`archival`) unless a user preset shadows them.
fn resolve_name<S: PresetStore>(library: &PresetLibrary<S>, name: &str) -> Result<String> {
    if PresetLibrary::<S>::is_builtin(name) || builtin_preset(name).is_none() {
        return Ok(name.to_string());
    }
    if library.list()?.iter().any(|n| n == name) {
        return Ok(name.to_string());
    }
    Ok(builtin_key(name))
}

fn pick<S: PresetStore>(library: &PresetLibrary<S>) -> Result<String> {
    let mut keys = PresetLibrary::<S>::builtin_names();
    keys.extend(library.list()?);
    let labels: Vec<String> = keys
        .iter()
        .map(|k| {
            if PresetLibrary::<S>::is_builtin(k) {
                format!("{} (built-in)", display_name(k))
            } else {
                k.clone()
            }
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Select preset")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(keys.swap_remove(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendernames_core::presets::MemoryPresetStore;

    #[test]
    fn test_resolve_bare_builtin_name() {
        let mut library = PresetLibrary::new(MemoryPresetStore::new());
        assert_eq!(resolve_name(&library, "archival").unwrap(), "__builtin__archival");
        assert_eq!(resolve_name(&library, "__builtin__simple").unwrap(), "__builtin__simple");
        assert_eq!(resolve_name(&library, "mine").unwrap(), "mine");

        let preset = builtin_preset("minimal").unwrap();
        library.save("archival", &preset).unwrap();
        assert_eq!(resolve_name(&library, "archival").unwrap(), "archival");
    }
}
