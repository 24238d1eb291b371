use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("preset manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    presets: HashMap<String, PresetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PresetEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        duration: Option<f32>,
    },
}

impl Manifest {
    fn preset(&self, name: &str) -> Result<&PresetEntry> {
        self.presets
            .get(name)
            .ok_or_else(|| anyhow!("unknown preset fixture '{name}'"))
    }
}

impl PresetEntry {
    fn relative(&self) -> &str {
        match self {
            PresetEntry::Path(path) | PresetEntry::Detailed { path, .. } => path,
        }
    }

    fn duration(&self) -> Option<f32> {
        match self {
            PresetEntry::Path(_) => None,
            PresetEntry::Detailed { duration, .. } => *duration,
        }
    }

    /// Location on disk; manifest paths are relative to the `fixtures/` dir.
    fn location(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(self.relative())
    }

    fn text(&self) -> Result<String> {
        let location = self.location();
        fs::read_to_string(&location)
            .with_context(|| format!("cannot read preset {}", location.display()))
    }

    fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let text = self.text()?;
        serde_json::from_str(&text)
            .with_context(|| format!("preset {} is not valid for this type", self.relative()))
    }
}

/// Procedural option presets, one JSON document per driver transition.
pub mod presets {
    use super::*;

    /// Every preset name in the manifest, sorted.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.presets.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        MANIFEST.preset(name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        MANIFEST.preset(name)?.parse()
    }

    /// Animation duration the preset was authored for, if the manifest
    /// records one.
    pub fn duration(name: &str) -> Result<Option<f32>> {
        Ok(MANIFEST.preset(name)?.duration())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(MANIFEST.preset(name)?.location())
    }
}
