use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::command::ViewerCommand;

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound (discrete actions).
///
/// Serde serializes as `snake_case` so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// r = "reset_view"
/// 1 = { load_preset = 0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Fit the camera to the structure.
    ResetView,
    /// Start/stop continuous rotation.
    ToggleSpin,
    /// Load the preset at this catalog position.
    LoadPreset(usize),
    /// Save a PNG snapshot.
    Screenshot,
    /// Arm/disarm distance measurement.
    ToggleMeasure,
    /// Show/hide atom labels.
    ToggleLabels,
    /// Show/hide the shortcut help.
    ToggleHelp,
    /// Clear the current measurement.
    ClearMeasurement,
}

impl KeyCommandTag {
    /// Convert to the corresponding [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ResetView => ViewerCommand::ResetView,
            Self::ToggleSpin => ViewerCommand::ToggleSpin,
            Self::LoadPreset(index) => ViewerCommand::LoadPresetAt { index },
            Self::Screenshot => ViewerCommand::Screenshot,
            Self::ToggleMeasure => ViewerCommand::ToggleMeasure,
            Self::ToggleLabels => ViewerCommand::ToggleLabels,
            Self::ToggleHelp => ViewerCommand::ToggleHelp,
            Self::ClearMeasurement => ViewerCommand::ClearMeasurement,
        }
    }

    /// Text shown in the help overlay.
    #[must_use]
    pub fn description(self) -> String {
        match self {
            Self::ResetView => "Reset view".into(),
            Self::ToggleSpin => "Toggle spin".into(),
            Self::LoadPreset(index) => format!("Load preset {}", index + 1),
            Self::Screenshot => "Save screenshot".into(),
            Self::ToggleMeasure => "Toggle measure mode".into(),
            Self::ToggleLabels => "Toggle atom labels".into(),
            Self::ToggleHelp => "Toggle this help".into(),
            Self::ClearMeasurement => "Clear measurement".into(),
        }
    }
}

/// Maps key strings to [`KeyCommandTag`]s.
///
/// Key strings are browser `KeyboardEvent.key` values (`"r"`, `"1"`, `" "`,
/// `"?"`). Matching is case-insensitive: keys are stored and looked up in
/// lowercase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: lowercase key string → command tag.
    #[serde(deserialize_with = "lowercase_keys")]
    bindings: HashMap<String, KeyCommandTag>,
}

fn lowercase_keys<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, KeyCommandTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, KeyCommandTag>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect())
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("r".into(), KeyCommandTag::ResetView),
            ("s".into(), KeyCommandTag::ToggleSpin),
            ("1".into(), KeyCommandTag::LoadPreset(0)),
            ("2".into(), KeyCommandTag::LoadPreset(1)),
            ("3".into(), KeyCommandTag::LoadPreset(2)),
            ("4".into(), KeyCommandTag::LoadPreset(3)),
            (" ".into(), KeyCommandTag::Screenshot),
            ("m".into(), KeyCommandTag::ToggleMeasure),
            ("l".into(), KeyCommandTag::ToggleLabels),
            ("?".into(), KeyCommandTag::ToggleHelp),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the tag bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyCommandTag> {
        self.bindings.get(&key.to_lowercase()).copied()
    }

    /// Bind `key` to `tag`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: &str, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.to_lowercase(), tag);
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &str) {
        let _ = self.bindings.remove(&key.to_lowercase());
    }

    /// All bindings sorted by key, for the help overlay.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, KeyCommandTag)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(key, tag)| (display_key(key), *tag))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Printable name of a key string.
fn display_key(key: &str) -> String {
    match key {
        " " => "Space".into(),
        k if k.chars().count() == 1 => k.to_uppercase(),
        k => k.to_owned(),
    }
}

/// Where keyboard focus was when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Page body, the viewer canvas or a button.
    #[default]
    Viewer,
    /// A text-entry field (search box); shortcuts are suppressed.
    TextField,
}

impl FocusTarget {
    /// Classify an element by its tag name and editability.
    #[must_use]
    pub fn from_element(tag_name: &str, content_editable: bool) -> Self {
        if content_editable
            || tag_name.eq_ignore_ascii_case("input")
            || tag_name.eq_ignore_ascii_case("textarea")
            || tag_name.eq_ignore_ascii_case("select")
        {
            Self::TextField
        } else {
            Self::Viewer
        }
    }
}

/// Converts key presses into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```
/// use molview::input::{FocusTarget, KeyDispatcher};
/// use molview::ViewerCommand;
///
/// let dispatcher = KeyDispatcher::new();
/// assert_eq!(
///     dispatcher.handle_key_press("S", FocusTarget::Viewer),
///     Some(ViewerCommand::ToggleSpin)
/// );
/// assert_eq!(dispatcher.handle_key_press("s", FocusTarget::TextField), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyDispatcher {
    key_bindings: KeyBindings,
}

impl KeyDispatcher {
    /// Create a dispatcher with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self { key_bindings }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press and return the bound command, unless focus is in
    /// a text field.
    #[must_use]
    pub fn handle_key_press(
        &self,
        key: &str,
        focus: FocusTarget,
    ) -> Option<ViewerCommand> {
        if focus == FocusTarget::TextField {
            return None;
        }
        let command = self.key_bindings.lookup(key).map(KeyCommandTag::to_command);
        if let Some(cmd) = &command {
            log::debug!("key {key:?} -> {cmd:?}");
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let d = KeyDispatcher::new();
        let press = |k| d.handle_key_press(k, FocusTarget::Viewer);
        assert_eq!(press("r"), Some(ViewerCommand::ResetView));
        assert_eq!(press("s"), Some(ViewerCommand::ToggleSpin));
        assert_eq!(press("1"), Some(ViewerCommand::LoadPresetAt { index: 0 }));
        assert_eq!(press("4"), Some(ViewerCommand::LoadPresetAt { index: 3 }));
        assert_eq!(press(" "), Some(ViewerCommand::Screenshot));
        assert_eq!(press("m"), Some(ViewerCommand::ToggleMeasure));
        assert_eq!(press("l"), Some(ViewerCommand::ToggleLabels));
        assert_eq!(press("?"), Some(ViewerCommand::ToggleHelp));
        assert_eq!(press("5"), None);
        assert_eq!(press("x"), None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let d = KeyDispatcher::new();
        assert_eq!(
            d.handle_key_press("L", FocusTarget::Viewer),
            Some(ViewerCommand::ToggleLabels)
        );
        assert_eq!(
            d.handle_key_press("R", FocusTarget::Viewer),
            Some(ViewerCommand::ResetView)
        );
    }

    #[test]
    fn suppressed_in_text_fields() {
        let d = KeyDispatcher::new();
        for key in ["r", "s", "1", " ", "m", "l", "?"] {
            assert_eq!(d.handle_key_press(key, FocusTarget::TextField), None);
        }
    }

    #[test]
    fn focus_from_element() {
        assert_eq!(
            FocusTarget::from_element("INPUT", false),
            FocusTarget::TextField
        );
        assert_eq!(
            FocusTarget::from_element("textarea", false),
            FocusTarget::TextField
        );
        assert_eq!(
            FocusTarget::from_element("div", true),
            FocusTarget::TextField
        );
        assert_eq!(
            FocusTarget::from_element("CANVAS", false),
            FocusTarget::Viewer
        );
    }

    #[test]
    fn rebinding() {
        let mut d = KeyDispatcher::new();
        d.key_bindings_mut().bind("C", KeyCommandTag::ClearMeasurement);
        d.key_bindings_mut().unbind("?");
        assert_eq!(
            d.handle_key_press("c", FocusTarget::Viewer),
            Some(ViewerCommand::ClearMeasurement)
        );
        assert_eq!(d.handle_key_press("?", FocusTarget::Viewer), None);
    }

    #[test]
    fn help_entries_are_printable() {
        let entries = KeyBindings::default().entries();
        assert_eq!(entries.len(), 10);
        assert!(entries
            .iter()
            .any(|(k, t)| k == "Space" && *t == KeyCommandTag::Screenshot));
        assert!(entries
            .iter()
            .any(|(k, t)| k == "M" && *t == KeyCommandTag::ToggleMeasure));
        assert_eq!(KeyCommandTag::LoadPreset(1).description(), "Load preset 2");
    }

    #[test]
    fn bindings_from_toml() {
        let toml_str = r#"
[bindings]
"X" = "toggle_spin"
"9" = { load_preset = 2 }
"#;
        let bindings: KeyBindings = toml::from_str(toml_str).unwrap();
        assert_eq!(bindings.lookup("X"), Some(KeyCommandTag::ToggleSpin));
        assert_eq!(bindings.lookup("9"), Some(KeyCommandTag::LoadPreset(2)));
        assert_eq!(bindings.lookup("r"), None);
    }
}
