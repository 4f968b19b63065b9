//! Effect preset catalog.
//!
//! Loads named visual-effect presets from a directory of JSON files once at
//! process start. Loading is tolerant: a malformed file is skipped with a
//! warning, a malformed field degrades to its default, and the built-in
//! `zoom_in_center` preset is always present, so `resolve` never fails.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use kenburns_models::{EffectPreset, RawEffectPreset, DEFAULT_EFFECT_ID};

/// Immutable catalog of validated effect presets.
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    presets: HashMap<String, EffectPreset>,
}

impl EffectCatalog {
    /// Load presets from `*.json` files in `dir`.
    ///
    /// Files are visited in sorted order so a duplicate `id` resolves
    /// deterministically (later file wins). Never fails: an unreadable
    /// directory yields a catalog containing only the built-in default.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut presets = HashMap::new();

        let mut paths: Vec<_> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect(),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "effects directory unreadable, using built-in preset only");
                Vec::new()
            }
        };
        paths.sort();

        for path in paths {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable preset file");
                    continue;
                }
            };
            let raw: RawEffectPreset = match serde_json::from_str(&text) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed preset file");
                    continue;
                }
            };

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_EFFECT_ID.to_string());
            let preset = raw.normalize(&stem);
            debug!(id = %preset.id, "loaded effect preset");
            presets.insert(preset.id.clone(), preset);
        }

        presets
            .entry(DEFAULT_EFFECT_ID.to_string())
            .or_insert_with(EffectPreset::builtin_default);

        Self { presets }
    }

    /// Build a catalog holding only the built-in default preset.
    pub fn builtin() -> Self {
        let mut presets = HashMap::new();
        presets.insert(
            DEFAULT_EFFECT_ID.to_string(),
            EffectPreset::builtin_default(),
        );
        Self { presets }
    }

    /// Resolve a requested name, falling back to the default preset when the
    /// name is unknown. Never fails.
    pub fn resolve(&self, name: &str) -> &EffectPreset {
        self.presets
            .get(name)
            .unwrap_or_else(|| &self.presets[DEFAULT_EFFECT_ID])
    }

    /// Whether `name` exists in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// All presets, sorted by id for stable listings.
    pub fn presets(&self) -> Vec<&EffectPreset> {
        let mut list: Vec<_> = self.presets.values().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    /// Number of loaded presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kenburns_models::{ZoomDirection, MAX_ZOOM_RATE};
    use std::fs;

    #[test]
    fn empty_dir_yields_builtin_default() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = EffectCatalog::load(dir.path());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(DEFAULT_EFFECT_ID));
    }

    #[test]
    fn missing_dir_yields_builtin_default() {
        let catalog = EffectCatalog::load("/nonexistent/effects");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("anything").id, DEFAULT_EFFECT_ID);
    }

    #[test]
    fn malformed_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"{"id": "pan_right", "pan_start": [0.2, 0.5], "pan_end": [0.8, 0.5]}"#,
        )
        .unwrap();

        let catalog = EffectCatalog::load(dir.path());
        assert!(catalog.contains("pan_right"));
        assert!(catalog.contains(DEFAULT_EFFECT_ID));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn fields_are_clamped_at_load_time() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("wild.json"),
            r#"{"id": "wild", "zoom_rate": 2.0, "pan_start": [5.0, -5.0], "pan_end": [0.5, 0.5]}"#,
        )
        .unwrap();

        let catalog = EffectCatalog::load(dir.path());
        let preset = catalog.resolve("wild");
        assert_eq!(preset.zoom_rate, MAX_ZOOM_RATE);
        assert_eq!(preset.pan_start.x, 1.0);
        assert_eq!(preset.pan_start.y, 0.0);
    }

    #[test]
    fn id_defaults_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("drift_up.json"), r#"{"zoom_direction": "out"}"#).unwrap();

        let catalog = EffectCatalog::load(dir.path());
        let preset = catalog.resolve("drift_up");
        assert_eq!(preset.id, "drift_up");
        assert_eq!(preset.zoom_direction, ZoomDirection::Out);
    }

    #[test]
    fn unknown_name_resolves_to_default_idempotently() {
        let catalog = EffectCatalog::builtin();
        let a = catalog.resolve("no-such-effect");
        let b = catalog.resolve("no-such-effect");
        assert_eq!(a, b);
        assert_eq!(a.id, DEFAULT_EFFECT_ID);
    }

    #[test]
    fn presets_are_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"id": "b"}"#).unwrap();
        fs::write(dir.path().join("a.json"), r#"{"id": "a"}"#).unwrap();

        let catalog = EffectCatalog::load(dir.path());
        let ids: Vec<_> = catalog.presets().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", DEFAULT_EFFECT_ID]);
    }
}
