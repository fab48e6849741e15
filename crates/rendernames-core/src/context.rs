//! Read-only snapshot of the host project state that variable resolvers consume.
//!
//! The host integration builds a [`RenderContext`] before each render call. Nothing in
//! this crate ever reaches back into the host: the struct is plain data, serializable
//! so a project file can carry one per scene.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Engine identifiers the sample resolver knows about.
pub const ENGINE_CYCLES: &str = "CYCLES";
pub const ENGINE_EEVEE: &str = "BLENDER_EEVEE";
pub const ENGINE_EEVEE_NEXT: &str = "BLENDER_EEVEE_NEXT";

/// Vendor prefix stripped from engine ids by the `engine` variable.
pub const ENGINE_VENDOR_PREFIX: &str = "blender_";

/// EEVEE sample count reported when the host does not expose one.
pub const DEFAULT_EEVEE_SAMPLES: u32 = 64;

/// Cycles sample count reported when the host does not expose one.
pub const DEFAULT_CYCLES_SAMPLES: u32 = 4096;

/// Everything a resolver may read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    /// Scene display name.
    pub scene: String,
    /// Project file path or base name; `None` while the project is unsaved.
    pub blend_file: Option<String>,
    pub frame_start: i32,
    pub frame_end: i32,
    /// Active camera name, if the scene has one.
    pub camera: Option<String>,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub fps: u32,
    /// Output format code as the host spells it (`PNG`, `OPEN_EXR`, ...).
    pub file_format: String,
    /// Render engine identifier (`CYCLES`, `BLENDER_EEVEE_NEXT`, ...).
    pub engine: String,
    /// Cycles render samples; `None` falls back to [`DEFAULT_CYCLES_SAMPLES`].
    pub cycles_samples: Option<u32>,
    /// EEVEE TAA render samples; `None` falls back to [`DEFAULT_EEVEE_SAMPLES`].
    pub eevee_samples: Option<u32>,
    /// Host's current output path, used as the default base directory.
    pub output_path: String,
    /// Wall clock at the moment the snapshot was taken.
    pub timestamp: NaiveDateTime,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            scene: "Scene".into(),
            blend_file: None,
            frame_start: 1,
            frame_end: 250,
            camera: Some("Camera".into()),
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            fps: 24,
            file_format: "PNG".into(),
            engine: ENGINE_EEVEE_NEXT.into(),
            cycles_samples: None,
            eevee_samples: None,
            output_path: "/tmp/".into(),
            timestamp: Local::now().naive_local(),
        }
    }
}

impl RenderContext {
    /// A default context for the named scene, stamped with the current time.
    pub fn for_scene(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            ..Self::default()
        }
    }

    /// Re-stamp the snapshot with the current wall clock.
    pub fn touch(&mut self) {
        self.timestamp = Local::now().naive_local();
    }

    /// Project file base name without directory or extension.
    pub fn blend_stem(&self) -> Option<&str> {
        let path = self.blend_file.as_deref().filter(|p| !p.is_empty())?;
        let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let stem = match base.rfind('.') {
            Some(0) | None => base,
            Some(idx) => &base[..idx],
        };
        Some(stem)
    }

    /// Sample count for the current engine, `None` when the engine is not recognized.
    pub fn samples(&self) -> Option<u32> {
        match self.engine.as_str() {
            ENGINE_CYCLES => Some(self.cycles_samples.unwrap_or(DEFAULT_CYCLES_SAMPLES)),
            ENGINE_EEVEE | ENGINE_EEVEE_NEXT => {
                Some(self.eevee_samples.unwrap_or(DEFAULT_EEVEE_SAMPLES))
            }
            _ => None,
        }
    }
}
