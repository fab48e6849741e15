//! rendernames CLI: template-driven render output naming.
//!
//! Acts as a minimal host for the core library. Scenes, their settings and their last
//! known render context live in a JSON project file; every command loads it, runs one
//! operation through the [`rendernames_core::sync::Synchronizer`] and saves it back.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rendernames_core::config::CONFIG_FILE;
use rendernames_core::project::PROJECT_FILE;

#[derive(Parser)]
#[command(
    name = "rendernames",
    about = "Template-driven render output naming with global/per-scene settings sync",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the project state file
    #[arg(long, global = true, env = "RENDERNAMES_PROJECT", default_value = PROJECT_FILE)]
    project: PathBuf,

    /// Path to rendernames.config.json
    #[arg(long, global = true, env = "RENDERNAMES_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the template variables
    Variables {
        /// Print name/description pairs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a template for syntax errors and unknown variables
    Validate {
        /// Template to check (defaults to the scene's template)
        template: Option<String>,

        /// Scene whose template to check
        #[arg(long, short)]
        scene: Option<String>,
    },

    /// Render a template against a scene's context without storing it
    Render {
        template: String,

        /// Scene supplying the context and naming options (defaults to the active scene)
        #[arg(long, short)]
        scene: Option<String>,
    },

    /// Manage scenes in the project file
    Scene {
        #[command(subcommand)]
        action: SceneAction,
    },

    /// Change one settings field on a scene
    Set {
        /// Scene to change
        scene: String,

        /// Field name, e.g. template, lowercase, frame_padding, use_global_settings
        field: String,

        /// New value (booleans accept true/false, yes/no, on/off, 1/0)
        value: String,
    },

    /// Re-render and print a scene's preview
    Preview {
        /// Scene to preview (defaults to the active scene)
        scene: Option<String>,
    },

    /// Print the output path the host should use for the next render
    Apply {
        /// Scene to render (defaults to the active scene)
        scene: Option<String>,

        /// Print the target as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage naming presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Keep refreshing the active scene's preview until Ctrl-C
    Watch {
        /// Scene to watch (defaults to the active scene)
        scene: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SceneAction {
    /// Register a scene, or update its render context if it exists
    Add {
        name: String,

        /// JSON file with a full render context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Project file path or name
        #[arg(long)]
        blend_file: Option<String>,

        /// Active camera
        #[arg(long)]
        camera: Option<String>,

        #[arg(long)]
        frame_start: Option<i32>,

        #[arg(long)]
        frame_end: Option<i32>,

        /// Host's current output path
        #[arg(long)]
        output_path: Option<String>,

        /// Make this the active scene
        #[arg(long)]
        activate: bool,
    },

    /// List scenes with their mode and preview
    List,

    /// Make a scene the active one
    Activate { name: String },

    /// Forget a scene
    Remove { name: String },
}

#[derive(Subcommand)]
pub enum PresetAction {
    /// List built-in and user presets
    List,

    /// Save a scene's synced settings as a user preset
    Save {
        name: String,

        /// Scene to capture (defaults to the active scene)
        #[arg(long, short)]
        scene: Option<String>,
    },

    /// Apply a preset to a scene (prompts if no name is given)
    Load {
        name: Option<String>,

        /// Scene to change (defaults to the active scene)
        #[arg(long, short)]
        scene: Option<String>,
    },

    /// Delete a user preset
    Delete { name: String },

    /// Copy a preset file into the preset directory, named after its file stem
    Import { path: PathBuf },

    /// Write a scene's synced settings to a preset file
    Export {
        path: PathBuf,

        /// Scene to capture (defaults to the active scene)
        #[arg(long, short)]
        scene: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Variables { json } => {
            commands::variables::run(json).await?;
        }
        Commands::Validate { template, scene } => {
            commands::validate::run(&cli.project, &cli.config, template, scene).await?;
        }
        Commands::Render { template, scene } => {
            commands::render::run(&cli.project, &cli.config, &template, scene).await?;
        }
        Commands::Scene { action } => {
            commands::scene::run(&cli.project, &cli.config, action).await?;
        }
        Commands::Set {
            scene,
            field,
            value,
        } => {
            commands::set::run(&cli.project, &cli.config, &scene, &field, &value).await?;
        }
        Commands::Preview { scene } => {
            commands::preview::run(&cli.project, &cli.config, scene).await?;
        }
        Commands::Apply { scene, json } => {
            commands::apply::run(&cli.project, &cli.config, scene, json).await?;
        }
        Commands::Preset { action } => {
            commands::preset::run(&cli.project, &cli.config, action).await?;
        }
        Commands::Watch { scene } => {
            commands::watch::run(&cli.project, &cli.config, scene).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::parse_from([
            "rendernames",
            "--project",
            "shots.json",
            "set",
            "Scene",
            "frame_padding",
            "6",
        ]);
        assert_eq!(cli.project, PathBuf::from("shots.json"));
        assert!(matches!(cli.command, Commands::Set { ref field, .. } if field == "frame_padding"));
    }

    #[test]
    fn test_parse_preset_load_without_name() {
        let cli = Cli::parse_from(["rendernames", "preset", "load", "-s", "Shot"]);
        match cli.command {
            Commands::Preset {
                action: PresetAction::Load { name, scene },
            } => {
                assert!(name.is_none());
                assert_eq!(scene.as_deref(), Some("Shot"));
            }
            _ => panic!("expected preset load"),
        }
    }
}
