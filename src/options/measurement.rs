use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Measurement", inline)]
#[serde(default)]
/// Look of the distance indicator drawn between two picked atoms.
pub struct MeasurementOptions {
    /// Cylinder radius in Angstroms.
    #[schemars(title = "Indicator Radius", range(min = 0.02, max = 0.5), extend("step" = 0.01))]
    pub radius: f32,
    /// Indicator color.
    #[schemars(skip)]
    pub color: String,
    /// Draw the indicator dashed.
    #[schemars(title = "Dashed")]
    pub dashed: bool,
}

impl Default for MeasurementOptions {
    fn default() -> Self {
        Self {
            radius: 0.08,
            color: "#ffd166".into(),
            dashed: true,
        }
    }
}
