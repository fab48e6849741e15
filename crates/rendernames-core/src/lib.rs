//! Core library for the rendernames toolkit.
//!
//! Expands `{{variable}}` templates into render output paths and keeps per-scene naming
//! settings in step with a single global record. The host integration feeds in plain
//! [`context::RenderContext`] snapshots and reads back [`target::RenderTarget`]s; nothing
//! here talks to the host directly.
//!
//! - [`templates`]: parsing, validation, rendering and sanitization
//! - [`variables`]: the variable registry and built-in resolvers
//! - [`sync`]: the global/local settings synchronizer
//! - [`presets`]: named snapshots of the synced settings and the [`presets::PresetStore`] contract
//!
//! Preset files on disk are handled by [`rendernames_store`](https://docs.rs/rendernames-store).

pub mod config;
pub mod context;
pub mod error;
pub mod presets;
pub mod project;
pub mod settings;
pub mod sync;
pub mod target;
pub mod templates;
pub mod ticker;
pub mod variables;
