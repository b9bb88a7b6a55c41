use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Labels", inline)]
#[serde(default)]
/// Atom label overlay. Labels are the expensive part of the library's
/// overlay pass, so their number is capped and hydrogens are skipped.
pub struct LabelOptions {
    /// Maximum number of atom labels shown at once.
    #[schemars(title = "Max Labels", range(min = 1, max = 500))]
    pub max_labels: usize,
    /// Label font size in pixels.
    #[schemars(title = "Font Size", range(min = 6.0, max = 32.0), extend("step" = 1.0))]
    pub font_size: f32,
    /// Label text color.
    #[schemars(skip)]
    pub font_color: String,
    /// Label box background color.
    #[schemars(skip)]
    pub background_color: String,
    /// Label box opacity.
    #[schemars(title = "Background Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub background_opacity: f32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            max_labels: 50,
            font_size: 12.0,
            font_color: "#ffffff".into(),
            background_color: "#000000".into(),
            background_opacity: 0.6,
        }
    }
}
