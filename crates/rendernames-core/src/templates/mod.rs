//! Template system for render output naming.
//!
//! A template is literal text with `{{name}}` placeholders, where `name` matches `\w+`.
//! There is no nesting, no whitespace inside the braces and no escaping. Templates are
//! re-parsed on every call; they are short and parsing is a single regex scan.
//!
//! - [`parser`] splits a template into [`parser::Segment`]s and validates it.
//! - [`renderer`] substitutes placeholders through a [`crate::variables::VariableRegistry`].
//! - [`sanitize`] makes a resolved value safe to use as a path component.
//!
//! ## Usage
//!
//! ```
//! use rendernames_core::context::RenderContext;
//! use rendernames_core::settings::RenderOptions;
//! use rendernames_core::templates::TemplateEngine;
//!
//! let engine = TemplateEngine::new();
//! let ctx = RenderContext::for_scene("Scene");
//! let out = engine.render("{{scene}}_{{frame}}", &ctx, &RenderOptions::default());
//! assert_eq!(out, "Scene_0001");
//! ```

pub mod parser;
pub mod renderer;
pub mod sanitize;

pub use parser::{parse, Segment, ValidationError};
pub use renderer::TemplateEngine;
pub use sanitize::sanitize;

/// Template a new scene starts with.
pub const DEFAULT_TEMPLATE: &str = "{{scene}}_{{frame}}";

/// Template restored by the "reset" action.
pub const RESET_TEMPLATE: &str = "{{scene}}_";

/// `{{name}}` for a variable name.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Append `{{name}}` to `template`, separated by `_` unless the template is empty
/// or already ends at a folder boundary.
pub fn append_placeholder(template: &str, name: &str) -> String {
    let mut out = template.to_string();
    if !out.is_empty() && !out.ends_with('/') {
        out.push('_');
    }
    out.push_str(&placeholder(name));
    out
}

/// Folder toggles that drive the derived template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderLayout {
    pub use_blend_root: bool,
    pub folder_per_scene: bool,
    pub folder_per_camera: bool,
    pub folder_per_date: bool,
}

impl FolderLayout {
    /// Build the template the toggles describe.
    ///
    /// Segments, in order: `{{blend_file}}`, `{{scene}}`, `{{camera}}`, `{{date}}` (each
    /// only when its toggle is set), then a `{{scene}}_` file prefix unless the scene
    /// already has its own folder, in which case the last segment is empty. Joined by `/`.
    pub fn template(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if self.use_blend_root {
            parts.push("{{blend_file}}");
        }
        if self.folder_per_scene {
            parts.push("{{scene}}");
        }
        if self.folder_per_camera {
            parts.push("{{camera}}");
        }
        if self.folder_per_date {
            parts.push("{{date}}");
        }
        parts.push(if self.folder_per_scene { "" } else { "{{scene}}_" });
        parts.join("/")
    }
}
