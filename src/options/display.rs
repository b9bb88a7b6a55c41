use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Atom/bond representation.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleId {
    /// Sticks for bonds.
    #[default]
    Stick,
    /// Space-filling van der Waals spheres.
    Sphere,
    /// Thin lines for bonds.
    Line,
    /// Secondary-structure cartoon (proteins).
    Cartoon,
    /// Small spheres joined by thin sticks.
    BallAndStick,
}

impl StyleId {
    /// Every style, in button order.
    pub const ALL: [Self; 5] = [
        Self::Stick,
        Self::Sphere,
        Self::Line,
        Self::Cartoon,
        Self::BallAndStick,
    ];

    /// Stable string id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Stick => "stick",
            Self::Sphere => "sphere",
            Self::Line => "line",
            Self::Cartoon => "cartoon",
            Self::BallAndStick => "ball_and_stick",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Stick => "Stick",
            Self::Sphere => "Sphere",
            Self::Line => "Line",
            Self::Cartoon => "Cartoon",
            Self::BallAndStick => "Ball & Stick",
        }
    }

    /// Parse an id, falling back to the default style for unknown ids.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .unwrap_or_else(|| {
                log::warn!("unknown style {id:?}, using {}", Self::default().id());
                Self::default()
            })
    }

    /// Style object for the rendering library, colored with `colors`.
    #[must_use]
    pub fn style_json(self, colors: ColorScheme) -> Value {
        let (key, value) = colors.style_field();
        let colored = |mut spec: Value| {
            spec[key] = Value::from(value);
            spec
        };

        match self {
            Self::Stick => json!({ "stick": colored(json!({ "radius": 0.15 })) }),
            Self::Sphere => json!({ "sphere": colored(json!({ "scale": 1.0 })) }),
            Self::Line => json!({ "line": colored(json!({ "linewidth": 2 })) }),
            Self::Cartoon => json!({ "cartoon": colored(json!({})) }),
            Self::BallAndStick => json!({
                "stick": colored(json!({ "radius": 0.1 })),
                "sphere": colored(json!({ "scale": 0.25 })),
            }),
        }
    }
}

/// How atoms are colored.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// CPK/Jmol element colors.
    #[default]
    Element,
    /// Element colors with green carbons.
    Carbon,
    /// One color per chain.
    Chain,
    /// Rainbow along the atom order.
    Spectrum,
}

impl ColorScheme {
    /// Every scheme, in button order.
    pub const ALL: [Self; 4] =
        [Self::Element, Self::Carbon, Self::Chain, Self::Spectrum];

    /// Stable string id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Carbon => "carbon",
            Self::Chain => "chain",
            Self::Spectrum => "spectrum",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::Carbon => "Green Carbon",
            Self::Chain => "Chain",
            Self::Spectrum => "Spectrum",
        }
    }

    /// Parse an id, falling back to element coloring for unknown ids.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .unwrap_or_else(|| {
                log::warn!("unknown color scheme {id:?}, using {}", Self::default().id());
                Self::default()
            })
    }

    /// The key/value pair this scheme contributes to a style object.
    #[must_use]
    pub fn style_field(self) -> (&'static str, &'static str) {
        match self {
            Self::Element => ("colorscheme", "Jmol"),
            Self::Carbon => ("colorscheme", "greenCarbon"),
            Self::Chain => ("colorscheme", "chain"),
            Self::Spectrum => ("color", "spectrum"),
        }
    }
}

/// Viewport background.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Dark navy.
    #[default]
    Dark,
    /// Light gray.
    Light,
    /// Pure black.
    Black,
    /// Pure white.
    White,
}

impl Background {
    /// Every background, in button order.
    pub const ALL: [Self; 4] =
        [Self::Dark, Self::Light, Self::Black, Self::White];

    /// Stable string id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Black => "Black",
            Self::White => "White",
        }
    }

    /// CSS hex color handed to the rendering library.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Dark => "#1a1a2e",
            Self::Light => "#e8e8ee",
            Self::Black => "#000000",
            Self::White => "#ffffff",
        }
    }

    /// Parse an id, falling back to the dark background for unknown ids.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.id() == id)
            .unwrap_or_else(|| {
                log::warn!("unknown background {id:?}, using {}", Self::default().id());
                Self::default()
            })
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Initial style, coloring and background of a new session.
pub struct DisplayOptions {
    /// Atom/bond representation.
    #[schemars(title = "Style")]
    pub style: StyleId,
    /// Atom coloring.
    #[schemars(title = "Color Scheme")]
    pub color_scheme: ColorScheme,
    /// Viewport background.
    #[schemars(title = "Background")]
    pub background: Background,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for style in StyleId::ALL {
            assert_eq!(StyleId::from_id(style.id()), style);
        }
        for scheme in ColorScheme::ALL {
            assert_eq!(ColorScheme::from_id(scheme.id()), scheme);
        }
        for bg in Background::ALL {
            assert_eq!(Background::from_id(bg.id()), bg);
        }
    }

    #[test]
    fn unknown_ids_fall_back_to_defaults() {
        assert_eq!(StyleId::from_id("wireframe"), StyleId::Stick);
        assert_eq!(ColorScheme::from_id(""), ColorScheme::Element);
        assert_eq!(Background::from_id("purple"), Background::Dark);
    }

    #[test]
    fn stick_style_carries_color_scheme() {
        let style = StyleId::Stick.style_json(ColorScheme::Carbon);
        assert_eq!(style["stick"]["radius"], 0.15);
        assert_eq!(style["stick"]["colorscheme"], "greenCarbon");
    }

    #[test]
    fn spectrum_uses_color_key() {
        let style = StyleId::Cartoon.style_json(ColorScheme::Spectrum);
        assert_eq!(style["cartoon"]["color"], "spectrum");
        assert!(style["cartoon"].get("colorscheme").is_none());
    }

    #[test]
    fn ball_and_stick_has_both_representations() {
        let style = StyleId::BallAndStick.style_json(ColorScheme::Element);
        assert_eq!(style["sphere"]["scale"], 0.25);
        assert_eq!(style["stick"]["colorscheme"], "Jmol");
    }
}
