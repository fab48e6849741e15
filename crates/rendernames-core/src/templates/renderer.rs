//! Placeholder substitution against a variable registry.
//!
//! Rendering never fails. Unknown placeholders pass through verbatim (braces included)
//! so a half-edited template still previews, and a resolver error turns into a visible
//! `[name]` token instead of aborting the render.

use tracing::{debug, trace};

use crate::context::RenderContext;
use crate::settings::RenderOptions;
use crate::templates::parser::{self, Segment, ValidationError};
use crate::templates::sanitize::sanitize;
use crate::variables::VariableRegistry;

/// Template renderer bound to a variable registry.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEngine<'r> {
    registry: &'r VariableRegistry,
}

impl TemplateEngine<'static> {
    /// Engine over the built-in variable table.
    pub fn new() -> Self {
        Self {
            registry: VariableRegistry::builtin(),
        }
    }
}

impl Default for TemplateEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> TemplateEngine<'r> {
    /// Engine over a custom registry.
    pub fn with_registry(registry: &'r VariableRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r VariableRegistry {
        self.registry
    }

    /// Validate `template` against this engine's registry.
    pub fn validate(&self, template: &str) -> Result<(), ValidationError> {
        parser::validate(template, self.registry)
    }

    /// Substitute every placeholder in `template`.
    ///
    /// Sanitize and lowercase policies apply to resolved values only; literal text is
    /// copied as-is.
    pub fn render(&self, template: &str, ctx: &RenderContext, opts: &RenderOptions) -> String {
        let mut out = String::with_capacity(template.len() * 2);
        for segment in parser::parse(template) {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, raw } => {
                    match self.registry.resolve(name, ctx, opts) {
                        None => {
                            trace!(variable = name, "unknown variable left in place");
                            out.push_str(raw);
                        }
                        Some(Err(err)) => {
                            debug!(variable = name, error = %err, "variable failed to resolve");
                            out.push('[');
                            out.push_str(name);
                            out.push(']');
                        }
                        Some(Ok(value)) => out.push_str(&apply_policies(value, opts)),
                    }
                }
            }
        }
        out
    }
}

fn apply_policies(value: String, opts: &RenderOptions) -> String {
    let value = if opts.sanitize_names {
        sanitize(&value)
    } else {
        value
    };
    if opts.lowercase {
        value.to_lowercase()
    } else {
        value
    }
}
