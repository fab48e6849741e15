//! Final output path assembly for the host's render job.
//!
//! The rendered template is relative; it is joined onto a base directory chosen in this
//! order: the custom base path (when enabled and non-empty), the directory part of the
//! host's current output path, then a fallback directory (`//renders/` by default,
//! which hosts like Blender read as relative to the project file).

use serde::Serialize;

use crate::context::RenderContext;
use crate::settings::SceneSettings;
use crate::templates::TemplateEngine;

/// Base directory used when nothing else is configured.
pub const DEFAULT_FALLBACK_DIR: &str = "//renders/";

/// What the host should apply before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTarget {
    /// Full output path prefix.
    pub path: String,
    /// Whether the host should append the output format's file extension.
    pub use_file_extension: bool,
}

/// Directory part of a path, like `os.path.dirname`; empty when there is none.
pub fn dirname(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => {
            let dir = &path[..idx];
            // Keep roots like `/` or `//` intact.
            if dir.chars().all(|c| c == '/' || c == '\\') {
                &path[..=idx]
            } else {
                dir
            }
        }
        None => "",
    }
}

/// Join a base directory and a relative path with a single separator.
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() {
        return rel.to_string();
    }
    if rel.starts_with('/') || base.ends_with('/') || base.ends_with('\\') {
        return format!("{base}{}", rel.trim_start_matches('/'));
    }
    format!("{base}/{rel}")
}

/// Pick the base directory for `settings`.
pub fn base_directory<'a>(
    settings: &'a SceneSettings,
    host_output_path: &'a str,
    fallback_dir: &'a str,
) -> &'a str {
    let synced = &settings.synced;
    if synced.use_base_path && !synced.base_path.is_empty() {
        return &synced.base_path;
    }
    match dirname(host_output_path) {
        "" => fallback_dir,
        dir => dir,
    }
}

/// Render the output target for a scene, or `None` if the scene opts out.
pub fn render_target(
    engine: &TemplateEngine<'_>,
    settings: &SceneSettings,
    ctx: &RenderContext,
    fallback_dir: &str,
) -> Option<RenderTarget> {
    if !settings.enabled || settings.synced.template.is_empty() {
        return None;
    }
    let rendered = engine.render(
        &settings.synced.template,
        ctx,
        &settings.synced.render_options(),
    );
    let base = base_directory(settings, &ctx.output_path, fallback_dir);
    Some(RenderTarget {
        path: join(base, &rendered),
        use_file_extension: settings.include_extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("//renders/shot_"), "//renders");
        assert_eq!(dirname("/tmp/"), "/tmp");
        assert_eq!(dirname("/out"), "/");
        assert_eq!(dirname(r"C:\renders\x"), r"C:\renders");
        assert_eq!(dirname("shot"), "");
        assert_eq!(dirname(""), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("//renders/", "a/b"), "//renders/a/b");
        assert_eq!(join("/tmp", "a"), "/tmp/a");
        assert_eq!(join("", "a"), "a");
        assert_eq!(join(r"D:\out\", "a"), r"D:\out\a");
    }

    #[test]
    fn test_base_directory_priority() {
        let mut settings = SceneSettings::default();
        assert_eq!(
            base_directory(&settings, "/proj/out/frame_", DEFAULT_FALLBACK_DIR),
            "/proj/out"
        );
        assert_eq!(base_directory(&settings, "", DEFAULT_FALLBACK_DIR), "//renders/");
        assert_eq!(
            base_directory(&settings, "frame_", DEFAULT_FALLBACK_DIR),
            "//renders/"
        );

        settings.synced.base_path = "/mnt/farm".into();
        assert_eq!(
            base_directory(&settings, "/proj/out/frame_", DEFAULT_FALLBACK_DIR),
            "/proj/out"
        );
        settings.synced.use_base_path = true;
        assert_eq!(
            base_directory(&settings, "/proj/out/frame_", DEFAULT_FALLBACK_DIR),
            "/mnt/farm"
        );
        settings.synced.base_path.clear();
        assert_eq!(
            base_directory(&settings, "/proj/out/frame_", DEFAULT_FALLBACK_DIR),
            "/proj/out"
        );
    }

    #[test]
    fn test_render_target() {
        let engine = TemplateEngine::new();
        let mut settings = SceneSettings::default();
        let mut ctx = RenderContext::for_scene("Shot 01");
        ctx.output_path = "/tmp/".into();

        let target = render_target(&engine, &settings, &ctx, DEFAULT_FALLBACK_DIR).unwrap();
        assert_eq!(target.path, "/tmp/Shot_01_0001");
        assert!(target.use_file_extension);

        settings.include_extension = false;
        let target = render_target(&engine, &settings, &ctx, DEFAULT_FALLBACK_DIR).unwrap();
        assert!(!target.use_file_extension);
    }

    #[test]
    fn test_render_target_opt_out() {
        let engine = TemplateEngine::new();
        let ctx = RenderContext::for_scene("A");
        let mut settings = SceneSettings::default();
        settings.enabled = false;
        assert!(render_target(&engine, &settings, &ctx, DEFAULT_FALLBACK_DIR).is_none());

        settings.enabled = true;
        settings.synced.template.clear();
        assert!(render_target(&engine, &settings, &ctx, DEFAULT_FALLBACK_DIR).is_none());
    }
}
