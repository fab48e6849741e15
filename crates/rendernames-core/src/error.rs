//! Unified error types for the rendernames toolkit.
//!
//! Template validation and variable resolution have their own narrow error types
//! ([`crate::templates::ValidationError`], [`crate::variables::ResolveError`]) because
//! neither is ever allowed to escape a render call. Everything that can legitimately
//! fail for the caller (config, presets, project state) lands here.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during rendernames operations.
#[derive(Error, Debug)]
pub enum RenderNamesError {
    // --- Configuration ---

    /// The configuration file could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Presets ---

    /// No built-in or stored preset has this name.
    #[error("preset '{0}' not found")]
    PresetNotFound(String),

    /// A preset file exists but could not be read.
    #[error("failed to read preset at {path}")]
    PresetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A preset file is not a valid preset JSON object.
    #[error("failed to parse preset at {path}")]
    PresetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A preset could not be written.
    #[error("failed to write preset to {path}")]
    PresetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Built-in presets are constants and cannot be saved over or deleted.
    #[error("preset '{0}' is built-in and read-only")]
    BuiltinPresetReadOnly(String),

    /// The preset name is empty or sanitizes to nothing.
    #[error("invalid preset name: '{0}'")]
    InvalidPresetName(String),

    // --- Project state ---

    /// The project file does not exist.
    #[error("project file not found at {path}")]
    ProjectNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project file exists but contains invalid JSON.
    #[error("failed to parse project at {path}")]
    ProjectParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No scene with this name is registered with the synchronizer.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, RenderNamesError>`.
pub type Result<T> = std::result::Result<T, RenderNamesError>;
