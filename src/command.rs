//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a GUI
//! button or a programmatic call, is represented as a `ViewerCommand`.
//! Consumers construct commands and pass them to
//! [`ViewerSession::execute`](crate::session::ViewerSession::execute).

/// A discrete operation the session can perform.
///
/// The session never cares *how* a command was triggered:
///
/// ```ignore
/// session.execute(ViewerCommand::ToggleSpin)?;
/// session.execute(ViewerCommand::SetStyle { id: "sphere".into() })?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Fit the camera to the loaded structure.
    ResetView,

    /// Start/stop continuous rotation.
    ToggleSpin,

    // ── Loading ─────────────────────────────────────────────────────
    /// Load a preset by catalog id.
    LoadPreset {
        /// Catalog id (`"caffeine"`).
        id: String,
    },

    /// Load a preset by catalog position (number keys).
    LoadPresetAt {
        /// Zero-based catalog index.
        index: usize,
    },

    /// Look up a PDB id typed by the user.
    Search {
        /// Raw user input.
        query: String,
    },

    // ── Appearance ──────────────────────────────────────────────────
    /// Change the atom/bond representation.
    SetStyle {
        /// Style id; unknown ids fall back to the default.
        id: String,
    },

    /// Change atom coloring.
    SetColorScheme {
        /// Color scheme id; unknown ids fall back to the default.
        id: String,
    },

    /// Change the viewport background.
    SetBackground {
        /// Background id; unknown ids fall back to the default.
        id: String,
    },

    /// Show/hide atom labels.
    ToggleLabels,

    // ── Measurement ─────────────────────────────────────────────────
    /// Arm or disarm distance measurement.
    ToggleMeasure,

    /// Forget the current measurement and remove its indicator.
    ClearMeasurement,

    // ── Misc ────────────────────────────────────────────────────────
    /// Save a PNG snapshot of the viewport.
    Screenshot,

    /// Show/hide the keyboard help overlay.
    ToggleHelp,
}
