use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Axis the model turns around while spinning.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SpinAxis {
    /// Horizontal screen axis.
    X,
    /// Vertical screen axis.
    #[default]
    Y,
    /// Axis pointing out of the screen.
    Z,
}

impl SpinAxis {
    /// Axis name as understood by the rendering library.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Spin", inline)]
#[serde(default)]
/// Continuous rotation parameters. The animation itself runs inside the
/// rendering library.
pub struct SpinOptions {
    /// Rotation axis.
    #[schemars(title = "Axis")]
    pub axis: SpinAxis,
    /// Rotation speed multiplier.
    #[schemars(title = "Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub speed: f32,
}

impl Default for SpinOptions {
    fn default() -> Self {
        Self {
            axis: SpinAxis::Y,
            speed: 1.0,
        }
    }
}
