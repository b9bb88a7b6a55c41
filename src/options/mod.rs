//! Viewer configuration with TOML preset support.
//!
//! Initial display settings, spin, label and measurement appearance, remote
//! endpoints and keybindings are consolidated here. Options serialize
//! to/from TOML so a deployment can override any part of them.

mod display;
mod fetch;
mod labels;
mod measurement;
mod spin;

use std::path::Path;

pub use display::{Background, ColorScheme, DisplayOptions, StyleId};
pub use fetch::FetchOptions;
pub use labels::LabelOptions;
pub use measurement::MeasurementOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use spin::{SpinAxis, SpinOptions};

use crate::error::MolviewError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[labels]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ViewerOptions {
    /// Initial style, coloring and background.
    pub display: DisplayOptions,
    /// Continuous rotation parameters.
    pub spin: SpinOptions,
    /// Atom label overlay.
    pub labels: LabelOptions,
    /// Distance indicator appearance.
    pub measurement: MeasurementOptions,
    /// Remote database endpoints.
    #[schemars(skip)]
    pub fetch: FetchOptions,
    /// Keyboard shortcuts.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl ViewerOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewerOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, MolviewError> {
        toml::from_str(content)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolviewError> {
        let content = std::fs::read_to_string(path).map_err(MolviewError::Io)?;
        Self::from_toml(&content)
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, MolviewError> {
        toml::to_string_pretty(self)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolviewError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolviewError::Io)?;
        }
        std::fs::write(path, content).map_err(MolviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
