//! Variable registry: the fixed table of `{{name}}` substitutions.
//!
//! Each [`VariableDescriptor`] pairs a name with a description, a display category and a
//! pure resolver over a [`RenderContext`]. The built-in table is process-wide and
//! read-only ([`VariableRegistry::builtin`]); hosts that need extra variables build their
//! own registry from it with [`VariableRegistry::with`].

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::context::{RenderContext, ENGINE_VENDOR_PREFIX};
use crate::settings::RenderOptions;

/// A resolver failed; the renderer replaces the placeholder with `[name]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A context field needed by the resolver is unusable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

/// Signature every resolver implements.
pub type Resolver = fn(&RenderContext, &RenderOptions) -> Result<String, ResolveError>;

/// Grouping used when listing variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SceneProject,
    Frame,
    DateTime,
    Camera,
    Resolution,
    Render,
    Custom,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::SceneProject => "Scene & Project",
            Self::Frame => "Frame",
            Self::DateTime => "Date & Time",
            Self::Camera => "Camera",
            Self::Resolution => "Resolution",
            Self::Render => "Render",
            Self::Custom => "Custom",
        }
    }
}

/// One registered variable.
#[derive(Debug, Clone)]
pub struct VariableDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub resolve: Resolver,
}

/// Ordered name → descriptor table.
#[derive(Debug, Clone)]
pub struct VariableRegistry {
    vars: IndexMap<&'static str, VariableDescriptor>,
}

static BUILTIN: Lazy<VariableRegistry> = Lazy::new(VariableRegistry::new);

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableRegistry {
    /// A fresh copy of the built-in table.
    pub fn new() -> Self {
        let mut vars = IndexMap::new();
        for desc in builtin_descriptors() {
            vars.insert(desc.name, desc);
        }
        Self { vars }
    }

    /// The shared built-in registry.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Add or replace a descriptor, keeping the original position on replace.
    pub fn with(mut self, desc: VariableDescriptor) -> Self {
        self.vars.insert(desc.name, desc);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VariableDescriptor> {
        self.vars.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vars.keys().copied()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.vars.values()
    }

    /// Ordered name → description mapping.
    pub fn describe(&self) -> IndexMap<&'static str, &'static str> {
        self.vars
            .values()
            .map(|d| (d.name, d.description))
            .collect()
    }

    /// Descriptors grouped by category, categories in first-seen order.
    pub fn by_category(&self) -> IndexMap<Category, Vec<&VariableDescriptor>> {
        let mut groups: IndexMap<Category, Vec<&VariableDescriptor>> = IndexMap::new();
        for desc in self.vars.values() {
            groups.entry(desc.category).or_default().push(desc);
        }
        groups
    }

    /// Resolve `name`; `None` if the name is not registered.
    pub fn resolve(
        &self,
        name: &str,
        ctx: &RenderContext,
        opts: &RenderOptions,
    ) -> Option<Result<String, ResolveError>> {
        self.vars.get(name).map(|d| (d.resolve)(ctx, opts))
    }
}

/// Zero-pad like Python's `str.zfill`: the sign stays in front and counts toward width.
pub fn zero_pad(value: i32, width: usize) -> String {
    format!("{value:0width$}")
}

fn builtin_descriptors() -> Vec<VariableDescriptor> {
    use Category::*;

    fn var(
        name: &'static str,
        description: &'static str,
        category: Category,
        resolve: Resolver,
    ) -> VariableDescriptor {
        VariableDescriptor {
            name,
            description,
            category,
            resolve,
        }
    }

    vec![
        var("scene", "Current scene name", SceneProject, |ctx, _| {
            Ok(ctx.scene.clone())
        }),
        var(
            "blend_file",
            "Blend file name (without .blend)",
            SceneProject,
            |ctx, _| Ok(ctx.blend_stem().unwrap_or("untitled").to_string()),
        ),
        // `frame` is kept as an alias of `frame_start`; hosts append the real frame number.
        var(
            "frame",
            "Start frame (hosts usually append the frame number themselves)",
            Frame,
            |ctx, opts| Ok(zero_pad(ctx.frame_start, opts.frame_padding.get())),
        ),
        var("frame_start", "First frame of range", Frame, |ctx, opts| {
            Ok(zero_pad(ctx.frame_start, opts.frame_padding.get()))
        }),
        var("frame_end", "Last frame of range", Frame, |ctx, opts| {
            Ok(zero_pad(ctx.frame_end, opts.frame_padding.get()))
        }),
        var(
            "frame_range",
            "Frame range (start-end) with padding applied",
            Frame,
            |ctx, opts| {
                let width = opts.frame_padding.get();
                Ok(format!(
                    "{}-{}",
                    zero_pad(ctx.frame_start, width),
                    zero_pad(ctx.frame_end, width)
                ))
            },
        ),
        var("date", "Current date (YYYY-MM-DD)", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%Y-%m-%d").to_string())
        }),
        var("time", "Current time (HH-MM-SS)", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%H-%M-%S").to_string())
        }),
        var("datetime", "Date and time combined", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%Y-%m-%d_%H-%M-%S").to_string())
        }),
        var("year", "Current year", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%Y").to_string())
        }),
        var("month", "Current month", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%m").to_string())
        }),
        var("day", "Current day", DateTime, |ctx, _| {
            Ok(ctx.timestamp.format("%d").to_string())
        }),
        var("camera", "Active camera name", Camera, |ctx, _| {
            Ok(ctx.camera.clone().unwrap_or_else(|| "no_camera".into()))
        }),
        var("resolution", "Resolution (WxH)", Resolution, |ctx, _| {
            Ok(format!("{}x{}", ctx.resolution_x, ctx.resolution_y))
        }),
        var("width", "Resolution width", Resolution, |ctx, _| {
            Ok(ctx.resolution_x.to_string())
        }),
        var("height", "Resolution height", Resolution, |ctx, _| {
            Ok(ctx.resolution_y.to_string())
        }),
        var("percent", "Resolution percentage", Resolution, |ctx, _| {
            Ok(ctx.resolution_percentage.to_string())
        }),
        var("fps", "Frames per second", Render, |ctx, _| Ok(ctx.fps.to_string())),
        var("format", "Output format (PNG, JPEG, etc.)", Render, |ctx, _| {
            Ok(ctx.file_format.to_lowercase())
        }),
        var("engine", "Render engine (cycles, eevee, etc.)", Render, |ctx, _| {
            Ok(ctx.engine.to_lowercase().replace(ENGINE_VENDOR_PREFIX, ""))
        }),
        var("samples", "Render samples", Render, |ctx, _| {
            Ok(ctx
                .samples()
                .map_or_else(|| "n/a".to_string(), |n| n.to_string()))
        }),
    ]
}
