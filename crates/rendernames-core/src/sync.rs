//! Two-tier settings synchronization between scenes and the global record.
//!
//! Each scene is either local or in global mode (`use_global_settings`). While a scene is
//! in global mode its synced fields mirror [`Synchronizer::global`]:
//!
//! - switching a scene to global mode seeds the global record from that scene, then
//!   broadcasts it to every other scene already in global mode;
//! - any synced-field change on a global-mode scene is written through to the global
//!   record and broadcast to the *other* global-mode scenes;
//! - switching back to local keeps the scene's last values and stops the broadcasts.
//!
//! Field mutation ([`SceneSettings::apply`]) and its consequences
//! ([`Synchronizer::handle_field_changed`]) are separate steps. [`Synchronizer::set`]
//! does both. While a bulk update is in progress (preset load, broadcast into a scene)
//! all consequences are suspended, including the preview render, so a half-applied
//! record is never propagated or rendered. Bulk updates nest; leaving one restores the
//! previous depth rather than clearing the flag.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::context::RenderContext;
use crate::error::{RenderNamesError, Result};
use crate::presets::{Preset, PresetLibrary, PresetStore};
use crate::project::ProjectState;
use crate::settings::{SceneSettings, SettingsField, SettingsUpdate, SyncedSettings};
use crate::target::{self, RenderTarget};
use crate::templates::{self, TemplateEngine, RESET_TEMPLATE};

/// One scene: its settings record and the latest host snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub settings: SceneSettings,
    #[serde(default)]
    pub context: RenderContext,
}

/// Owns every scene record, the single global record and the bulk-update guard.
#[derive(Debug)]
pub struct Synchronizer {
    engine: TemplateEngine<'static>,
    global: SyncedSettings,
    scenes: IndexMap<String, Scene>,
    active: Option<String>,
    bulk_depth: usize,
    previews_rendered: u64,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronizer {
    pub fn new() -> Self {
        Self::with_engine(TemplateEngine::new())
    }

    /// Use a custom engine, e.g. one over an extended variable registry.
    pub fn with_engine(engine: TemplateEngine<'static>) -> Self {
        Self {
            engine,
            global: SyncedSettings::default(),
            scenes: IndexMap::new(),
            active: None,
            bulk_depth: 0,
            previews_rendered: 0,
        }
    }

    /// Rebuild from persisted state. Stored previews are discarded and re-rendered.
    pub fn from_state(state: ProjectState) -> Self {
        let mut sync = Self::new();
        sync.global = state.global;
        sync.scenes = state.scenes;
        sync.active = state.active_scene.filter(|a| sync.scenes.contains_key(a));
        let names: Vec<String> = sync.scenes.keys().cloned().collect();
        for name in names {
            // Scene is known to exist; nothing else can fail here.
            let _ = sync.refresh_preview(&name);
        }
        sync
    }

    pub fn to_state(&self) -> ProjectState {
        ProjectState {
            global: self.global.clone(),
            scenes: self.scenes.clone(),
            active_scene: self.active.clone(),
        }
    }

    pub fn engine(&self) -> TemplateEngine<'static> {
        self.engine
    }

    pub fn global(&self) -> &SyncedSettings {
        &self.global
    }

    /// Total preview renders performed so far.
    pub fn previews_rendered(&self) -> u64 {
        self.previews_rendered
    }

    // --- Scene registry ---

    /// Register a scene with default settings, or return the existing one.
    pub fn observe_scene(&mut self, name: &str, context: RenderContext) -> &Scene {
        if !self.scenes.contains_key(name) {
            debug!(scene = name, "observed new scene");
            self.scenes.insert(
                name.to_string(),
                Scene {
                    settings: SceneSettings::default(),
                    context,
                },
            );
            let _ = self.refresh_preview(name);
        }
        &self.scenes[name]
    }

    /// Forget a scene. Returns the removed record.
    pub fn remove_scene(&mut self, name: &str) -> Option<Scene> {
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        self.scenes.shift_remove(name)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Scenes currently in global mode, in registration order.
    pub fn global_scenes(&self) -> Vec<&str> {
        self.scenes
            .iter()
            .filter(|(_, s)| s.settings.use_global_settings)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Raw access to a scene's settings. Changes made here trigger nothing.
    pub fn settings_mut(&mut self, name: &str) -> Result<&mut SceneSettings> {
        self.scene_mut(name).map(|s| &mut s.settings)
    }

    fn scene_mut(&mut self, name: &str) -> Result<&mut Scene> {
        self.scenes
            .get_mut(name)
            .ok_or_else(|| RenderNamesError::UnknownScene(name.to_string()))
    }

    pub fn set_active(&mut self, name: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            if !self.scenes.contains_key(name) {
                return Err(RenderNamesError::UnknownScene(name.to_string()));
            }
        }
        self.active = name.map(str::to_string);
        Ok(())
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Replace a scene's render snapshot and re-render its preview.
    pub fn update_context(&mut self, name: &str, context: RenderContext) -> Result<()> {
        self.scene_mut(name)?.context = context;
        self.refresh_preview(name)?;
        Ok(())
    }

    // --- Bulk-update guard ---

    pub fn is_applying_bulk(&self) -> bool {
        self.bulk_depth > 0
    }

    /// Run `f` with field-change side effects suspended.
    pub fn with_bulk_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.bulk_depth;
        self.bulk_depth += 1;
        let out = f(self);
        self.bulk_depth = previous;
        out
    }

    // --- Field changes ---

    /// Assign a field and run its consequences. Returns whether the value changed.
    pub fn set(&mut self, name: &str, update: SettingsUpdate) -> Result<bool> {
        let field = update.field();
        let changed = self.settings_mut(name)?.apply(update);
        if changed {
            self.handle_field_changed(name, field)?;
        }
        Ok(changed)
    }

    /// React to `field` having changed on scene `name`.
    ///
    /// Derives the template from the folder toggles, refreshes the preview and
    /// propagates synced fields in global mode. Does nothing during a bulk update.
    pub fn handle_field_changed(&mut self, name: &str, field: SettingsField) -> Result<()> {
        if self.is_applying_bulk() {
            trace!(scene = name, %field, "bulk update in progress, change deferred");
            return Ok(());
        }

        let settings = &mut self.scene_mut(name)?.settings;
        let mut preview_dirty = field.affects_preview();

        if field.is_folder_flag() {
            let derived = settings.synced.folder_layout().template();
            if derived != settings.synced.template {
                debug!(scene = name, template = %derived, "template derived from folder toggles");
                settings.synced.template = derived;
                preview_dirty = true;
            }
        }

        let in_global = settings.use_global_settings;

        if preview_dirty {
            self.refresh_preview(name)?;
        }

        match field {
            SettingsField::UseGlobalSettings if in_global => {
                debug!(scene = name, "scene switched to global settings");
                self.publish(name)?;
            }
            SettingsField::UseGlobalSettings => {
                debug!(scene = name, "scene switched to local settings");
            }
            f if f.is_synced() && in_global => self.publish(name)?,
            _ => {}
        }
        Ok(())
    }

    /// Copy `source`'s synced fields into the global record and broadcast.
    fn publish(&mut self, source: &str) -> Result<()> {
        self.global = self.scene_mut(source)?.settings.synced.clone();
        self.broadcast(Some(source));
        Ok(())
    }

    /// Push the global record into every global-mode scene except `skip`.
    fn broadcast(&mut self, skip: Option<&str>) {
        let snapshot = self.global.clone();
        let targets: Vec<String> = self
            .scenes
            .iter()
            .filter(|(n, s)| s.settings.use_global_settings && Some(n.as_str()) != skip)
            .map(|(n, _)| n.clone())
            .collect();

        for target in targets {
            let render_changed = self.with_bulk_update(|sync| {
                let Some(scene) = sync.scenes.get_mut(&target) else {
                    return false;
                };
                let differs = scene.settings.synced.render_differs(&snapshot);
                scene.settings.synced = snapshot.clone();
                differs
            });
            trace!(scene = %target, render_changed, "global settings broadcast");
            if render_changed {
                let _ = self.refresh_preview(&target);
            }
        }
    }

    /// Replace the global record directly and broadcast it to all global-mode scenes.
    pub fn set_global(&mut self, global: SyncedSettings) {
        self.global = global;
        self.broadcast(None);
    }

    // --- Template commands ---

    pub fn insert_variable(&mut self, name: &str, variable: &str) -> Result<bool> {
        let current = &self.settings_mut(name)?.synced.template;
        let template = templates::append_placeholder(current, variable);
        self.set(name, SettingsUpdate::Template(template))
    }

    pub fn reset_template(&mut self, name: &str) -> Result<bool> {
        self.set(name, SettingsUpdate::Template(RESET_TEMPLATE.into()))
    }

    pub fn clear_template(&mut self, name: &str) -> Result<bool> {
        self.set(name, SettingsUpdate::Template(String::new()))
    }

    // --- Presets ---

    /// Snapshot a scene's synced fields.
    pub fn capture_preset(&self, name: &str) -> Result<Preset> {
        let scene = self
            .scenes
            .get(name)
            .ok_or_else(|| RenderNamesError::UnknownScene(name.to_string()))?;
        Ok(Preset::capture(&scene.settings.synced))
    }

    /// Resolve `preset_name` through `library` and apply it to scene `name`.
    ///
    /// The preset is fully loaded before anything is touched, so a failed load leaves
    /// the scene unchanged.
    pub fn load_preset<S: PresetStore>(
        &mut self,
        name: &str,
        preset_name: &str,
        library: &PresetLibrary<S>,
    ) -> Result<()> {
        if !self.scenes.contains_key(name) {
            return Err(RenderNamesError::UnknownScene(name.to_string()));
        }
        let preset = library.load(preset_name)?;
        debug!(scene = name, preset = preset_name, "applying preset");
        self.apply_preset(name, &preset)
    }

    /// Apply `preset` as one bulk update, then render once and propagate once.
    pub fn apply_preset(&mut self, name: &str, preset: &Preset) -> Result<()> {
        let updates = preset.updates();
        self.with_bulk_update(|sync| -> Result<()> {
            for update in updates {
                sync.set(name, update)?;
            }
            Ok(())
        })?;

        if self.is_applying_bulk() {
            return Ok(());
        }
        self.refresh_preview(name)?;
        if self.scene_mut(name)?.settings.use_global_settings {
            self.publish(name)?;
        }
        Ok(())
    }

    // --- Rendering ---

    /// Render a scene's template into its preview. Returns whether the preview changed.
    ///
    /// Suspended during bulk updates.
    pub fn refresh_preview(&mut self, name: &str) -> Result<bool> {
        if self.is_applying_bulk() {
            return Ok(false);
        }
        let engine = self.engine;
        let scene = self.scene_mut(name)?;
        let rendered = engine.render(
            &scene.settings.synced.template,
            &scene.context,
            &scene.settings.synced.render_options(),
        );
        self.previews_rendered += 1;

        let scene = self.scene_mut(name)?;
        if scene.settings.preview == rendered {
            return Ok(false);
        }
        trace!(scene = name, preview = %rendered, "preview updated");
        scene.settings.preview = rendered;
        Ok(true)
    }

    /// Periodic refresh of the active scene's preview against the current clock.
    ///
    /// No active scene, an unknown or disabled scene, or an empty template are not
    /// errors; the tick simply does nothing.
    pub fn refresh_active_preview(&mut self) -> bool {
        let Some(name) = self.active.clone() else {
            return false;
        };
        let Some(scene) = self.scenes.get_mut(&name) else {
            return false;
        };
        if !scene.settings.enabled || scene.settings.synced.template.is_empty() {
            return false;
        }
        scene.context.touch();
        self.refresh_preview(&name).unwrap_or(false)
    }

    /// Where the host should write renders for scene `name`, stamped with the current time.
    ///
    /// `None` when the scene is disabled or has no template; the host keeps its own path.
    /// The stored context is left as is.
    pub fn render_target(&self, name: &str, fallback_dir: &str) -> Result<Option<RenderTarget>> {
        let scene = self
            .scenes
            .get(name)
            .ok_or_else(|| RenderNamesError::UnknownScene(name.to_string()))?;
        let mut context = scene.context.clone();
        context.touch();
        Ok(target::render_target(
            &self.engine,
            &scene.settings,
            &context,
            fallback_dir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{builtin_key, MemoryPresetStore};
    use crate::settings::FramePadding;

    fn sync_with(names: &[&str]) -> Synchronizer {
        let mut sync = Synchronizer::new();
        for name in names {
            sync.observe_scene(name, RenderContext::for_scene(*name));
        }
        sync
    }

    fn template(sync: &Synchronizer, name: &str) -> String {
        sync.scene(name).unwrap().settings.synced.template.clone()
    }

    #[test]
    fn test_observe_creates_defaults_once() {
        let mut sync = sync_with(&["A"]);
        assert_eq!(sync.scene("A").unwrap().settings.preview, "A_0001");
        sync.set("A", SettingsUpdate::Lowercase(true)).unwrap();
        sync.observe_scene("A", RenderContext::for_scene("A"));
        assert!(sync.scene("A").unwrap().settings.synced.lowercase);
    }

    #[test]
    fn test_unknown_scene() {
        let mut sync = Synchronizer::new();
        assert!(matches!(
            sync.set("nope", SettingsUpdate::Lowercase(true)),
            Err(RenderNamesError::UnknownScene(_))
        ));
        assert!(sync.set_active(Some("nope")).is_err());
    }

    #[test]
    fn test_global_broadcast_reaches_global_scenes_only() {
        let mut sync = sync_with(&["A", "B", "C"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();

        sync.set("A", SettingsUpdate::Template("{{camera}}/{{scene}}".into()))
            .unwrap();

        assert_eq!(template(&sync, "B"), "{{camera}}/{{scene}}");
        assert_eq!(sync.global().template, "{{camera}}/{{scene}}");
        assert_eq!(template(&sync, "C"), "{{scene}}_{{frame}}");
        assert_eq!(sync.scene("B").unwrap().settings.preview, "Camera/B");
    }

    #[test]
    fn test_switch_to_global_seeds_from_scene() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::FramePadding(6)).unwrap();
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        assert_eq!(sync.global().frame_padding, FramePadding::new(6));
        // A keeps its own values at the moment of the switch.
        assert_eq!(sync.scene("A").unwrap().settings.synced.frame_padding.get(), 6);

        // B joins later and seeds the global record with its own values,
        // which then flow to A.
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        assert_eq!(sync.global().frame_padding.get(), 4);
        assert_eq!(sync.scene("A").unwrap().settings.synced.frame_padding.get(), 4);
    }

    #[test]
    fn test_switch_to_local_stops_broadcasts() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(false)).unwrap();

        sync.set("A", SettingsUpdate::Lowercase(true)).unwrap();
        assert!(!sync.scene("B").unwrap().settings.synced.lowercase);
        assert!(sync.global().lowercase);
    }

    #[test]
    fn test_local_changes_do_not_touch_global() {
        let mut sync = sync_with(&["A"]);
        sync.set("A", SettingsUpdate::BasePath("/renders".into()))
            .unwrap();
        assert_eq!(sync.global().base_path, "");
    }

    #[test]
    fn test_non_synced_fields_stay_local() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("A", SettingsUpdate::Enabled(false)).unwrap();
        sync.set("A", SettingsUpdate::IncludeExtension(false)).unwrap();
        let b = &sync.scene("B").unwrap().settings;
        assert!(b.enabled);
        assert!(b.include_extension);
    }

    #[test]
    fn test_folder_toggle_derives_template() {
        let mut sync = sync_with(&["A"]);
        sync.set("A", SettingsUpdate::UseBlendRoot(false)).unwrap();
        assert_eq!(template(&sync, "A"), "{{scene}}_");

        sync.set("A", SettingsUpdate::FolderPerScene(true)).unwrap();
        assert_eq!(template(&sync, "A"), "{{scene}}/");

        sync.set("A", SettingsUpdate::FolderPerScene(false)).unwrap();
        assert_eq!(template(&sync, "A"), "{{scene}}_");
    }

    #[test]
    fn test_folder_toggle_ignores_unrelated_fields() {
        let mut sync = sync_with(&["A"]);
        sync.set("A", SettingsUpdate::Template("custom/{{scene}}".into()))
            .unwrap();
        sync.set("A", SettingsUpdate::Lowercase(true)).unwrap();
        sync.set("A", SettingsUpdate::FolderPerScene(true)).unwrap();
        sync.set("A", SettingsUpdate::FolderPerScene(false)).unwrap();
        // use_blend_root defaults to true.
        assert_eq!(template(&sync, "A"), "{{blend_file}}/{{scene}}_");
    }

    #[test]
    fn test_folder_toggle_propagates_in_global_mode() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("A", SettingsUpdate::FolderPerCamera(true)).unwrap();
        let b = &sync.scene("B").unwrap().settings.synced;
        assert!(b.folder_per_camera);
        assert_eq!(b.template, "{{blend_file}}/{{camera}}/{{scene}}_");
    }

    #[test]
    fn test_raw_mutation_has_no_side_effects() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        let before = sync.previews_rendered();
        sync.settings_mut("A")
            .unwrap()
            .apply(SettingsUpdate::Template("raw".into()));
        assert_eq!(template(&sync, "B"), "{{scene}}_{{frame}}");
        assert_eq!(sync.previews_rendered(), before);

        sync.handle_field_changed("A", SettingsField::Template).unwrap();
        assert_eq!(template(&sync, "B"), "raw");
    }

    #[test]
    fn test_preset_load_renders_once() {
        let mut sync = sync_with(&["A"]);
        let library = PresetLibrary::new(MemoryPresetStore::new());
        let before = sync.previews_rendered();

        sync.load_preset("A", &builtin_key("professional"), &library)
            .unwrap();

        assert_eq!(sync.previews_rendered(), before + 1);
        let settings = &sync.scene("A").unwrap().settings;
        assert_eq!(
            settings.synced.template,
            "{{blend_file}}/{{date}}/{{scene}}_{{camera}}/{{frame}}"
        );
        assert!(settings.synced.folder_per_scene);
        assert!(settings.preview.starts_with("untitled/"));
        assert!(!sync.is_applying_bulk());
    }

    #[test]
    fn test_preset_template_survives_folder_flags() {
        // The folder toggles would derive a different template; the preset's wins.
        let mut sync = sync_with(&["A"]);
        let preset = crate::presets::builtin_preset("by_camera").unwrap();
        sync.apply_preset("A", &preset).unwrap();
        assert_eq!(template(&sync, "A"), "{{camera}}/{{scene}}_{{frame}}");
    }

    #[test]
    fn test_preset_load_failure_leaves_scene_unchanged() {
        let mut sync = sync_with(&["A"]);
        let library = PresetLibrary::new(MemoryPresetStore::new());
        let before = sync.scene("A").unwrap().clone();
        assert!(sync.load_preset("A", "missing", &library).is_err());
        assert_eq!(sync.scene("A").unwrap(), &before);
    }

    #[test]
    fn test_preset_load_in_global_mode_broadcasts_once() {
        let mut sync = sync_with(&["A", "B", "C"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set("B", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        let preset = crate::presets::builtin_preset("archival").unwrap();
        sync.apply_preset("A", &preset).unwrap();
        assert_eq!(
            template(&sync, "B"),
            "{{datetime}}/{{blend_file}}_{{scene}}_{{frame}}"
        );
        assert_eq!(sync.scene("B").unwrap().settings.synced.frame_padding.get(), 5);
        assert_eq!(template(&sync, "C"), "{{scene}}_{{frame}}");
    }

    #[test]
    fn test_bulk_guard_nests() {
        let mut sync = sync_with(&["A"]);
        sync.with_bulk_update(|outer| {
            outer.with_bulk_update(|inner| assert!(inner.is_applying_bulk()));
            assert!(outer.is_applying_bulk());
            // Suppressed: no derivation while the outer update is open.
            outer
                .set("A", SettingsUpdate::FolderPerDate(true))
                .unwrap();
        });
        assert!(!sync.is_applying_bulk());
        assert_eq!(template(&sync, "A"), "{{scene}}_{{frame}}");
    }

    #[test]
    fn test_broadcast_does_not_echo() {
        let mut sync = sync_with(&["A", "B", "C"]);
        for n in ["A", "B", "C"] {
            sync.set(n, SettingsUpdate::UseGlobalSettings(true)).unwrap();
        }
        let before = sync.previews_rendered();
        sync.set("A", SettingsUpdate::Template("{{scene}}".into()))
            .unwrap();
        // A once for its own change, B and C once each from the broadcast.
        assert_eq!(sync.previews_rendered(), before + 3);
    }

    #[test]
    fn test_template_commands() {
        let mut sync = sync_with(&["A"]);
        sync.clear_template("A").unwrap();
        assert_eq!(template(&sync, "A"), "");
        sync.insert_variable("A", "scene").unwrap();
        sync.insert_variable("A", "camera").unwrap();
        assert_eq!(template(&sync, "A"), "{{scene}}_{{camera}}");
        sync.reset_template("A").unwrap();
        assert_eq!(template(&sync, "A"), "{{scene}}_");
        assert_eq!(sync.scene("A").unwrap().settings.preview, "A_");
    }

    #[test]
    fn test_refresh_active_preview_tolerates_missing_state() {
        let mut sync = sync_with(&["A"]);
        assert!(!sync.refresh_active_preview());

        sync.set_active(Some("A")).unwrap();
        sync.set("A", SettingsUpdate::Enabled(false)).unwrap();
        assert!(!sync.refresh_active_preview());

        sync.set("A", SettingsUpdate::Enabled(true)).unwrap();
        sync.clear_template("A").unwrap();
        assert!(!sync.refresh_active_preview());

        sync.remove_scene("A");
        assert_eq!(sync.active(), None);
        assert!(!sync.refresh_active_preview());
    }

    #[test]
    fn test_refresh_active_preview_only_writes_changes() {
        let mut sync = sync_with(&["A"]);
        sync.set_active(Some("A")).unwrap();
        // Static template: the clock does not matter, nothing changes.
        assert!(!sync.refresh_active_preview());
    }

    #[test]
    fn test_update_context_refreshes_preview() {
        let mut sync = sync_with(&["A"]);
        let mut ctx = RenderContext::for_scene("A");
        ctx.frame_start = 12;
        sync.update_context("A", ctx).unwrap();
        assert_eq!(sync.scene("A").unwrap().settings.preview, "A_0012");
    }

    #[test]
    fn test_state_roundtrip() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        sync.set_active(Some("B")).unwrap();
        let state = sync.to_state();
        let restored = Synchronizer::from_state(state.clone());
        assert_eq!(restored.to_state(), state);
        assert_eq!(restored.active(), Some("B"));
        assert_eq!(restored.global_scenes(), vec!["A"]);
    }

    #[test]
    fn test_set_global_broadcasts_to_all() {
        let mut sync = sync_with(&["A", "B"]);
        sync.set("A", SettingsUpdate::UseGlobalSettings(true)).unwrap();
        let mut global = sync.global().clone();
        global.lowercase = true;
        sync.set_global(global);
        assert!(sync.scene("A").unwrap().settings.synced.lowercase);
        assert!(!sync.scene("B").unwrap().settings.synced.lowercase);
    }

    #[test]
    fn test_render_target_uses_current_date() {
        let mut sync = sync_with(&["Shot"]);
        let mut ctx = RenderContext::for_scene("Shot");
        ctx.output_path = "/out/x".into();
        ctx.timestamp = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        sync.update_context("Shot", ctx.clone()).unwrap();
        sync.set("Shot", SettingsUpdate::Template("{{date}}/{{scene}}".into()))
            .unwrap();

        let before = chrono::Local::now().format("%Y-%m-%d").to_string();
        let target = sync.render_target("Shot", "//renders/").unwrap().unwrap();
        let after = chrono::Local::now().format("%Y-%m-%d").to_string();

        assert!(
            target.path == format!("/out/{before}/Shot") || target.path == format!("/out/{after}/Shot"),
            "unexpected path {}",
            target.path
        );
        assert_eq!(sync.scene("Shot").unwrap().context, ctx);
    }
}
