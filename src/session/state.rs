use crate::measure::LabeledAtom;
use crate::options::{Background, ColorScheme, DisplayOptions, StyleId};

/// Lifecycle of a session.
///
/// `Ready` is only ever reached once per session; after `Disposed` a new
/// session has to be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Constructed, no surface requested yet.
    #[default]
    Uninitialized,
    /// Waiting for the rendering library to become available.
    Initializing,
    /// Surface attached, all operations available.
    Ready,
    /// Surface released.
    Disposed,
}

/// What the molecule selector currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MoleculeSelection {
    /// Nothing loaded yet.
    #[default]
    None,
    /// A catalog preset, by id.
    Preset(&'static str),
    /// A structure found through search, by PDB code.
    Custom(String),
}

impl MoleculeSelection {
    /// Selector value: the preset id, `"custom"`, or empty.
    #[must_use]
    pub fn selector_value(&self) -> &str {
        match self {
            Self::None => "",
            Self::Preset(id) => id,
            Self::Custom(_) => "custom",
        }
    }

    /// The active custom identifier, if the selection came from search.
    #[must_use]
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Custom(id) => Some(id),
            _ => None,
        }
    }
}

/// Reactive view state read by the presentation layer.
///
/// One per session; only the session mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Currently displayed structure.
    pub molecule: MoleculeSelection,
    /// Current representation.
    pub style: StyleId,
    /// Current coloring.
    pub color_scheme: ColorScheme,
    /// Current background.
    pub background: Background,
    /// Whether the model is spinning.
    pub spin: bool,
    /// Whether atom labels are shown.
    pub labels: bool,
    /// Whether a remote load is in flight.
    pub loading: bool,
    /// Last user-facing lookup error.
    pub search_error: Option<String>,
    /// Whether the shortcut help overlay is open.
    pub show_help: bool,
    /// Last clicked atom, for the info card.
    pub selected_atom: Option<LabeledAtom>,
    /// Atom count of the displayed structure.
    pub atom_count: usize,
}

impl ViewState {
    /// Initial state for the given display defaults.
    #[must_use]
    pub fn new(display: &DisplayOptions) -> Self {
        Self {
            style: display.style,
            color_scheme: display.color_scheme,
            background: display.background,
            ..Self::default()
        }
    }
}
