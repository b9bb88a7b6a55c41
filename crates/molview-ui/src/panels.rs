//! Presentation components. Everything here only reads view state through
//! a [`Viewer`] handle and issues [`ViewerCommand`]s.

use dioxus::prelude::*;
use molview::catalog::Catalog;
use molview::input::KeyBindings;
use molview::measure::{format_distance, MeasurePhase};
use molview::options::{Background, ColorScheme, StyleId};
use molview::search::EXAMPLE_IDS;
use molview::session::MoleculeSelection;
use molview::ViewerCommand;

use crate::bridge::Viewer;

#[component]
pub fn Header(compare: Signal<bool>) -> Element {
    let subtitle = if compare() { "Comparison" } else { "Interactive 3D viewer" };
    rsx! {
        header { class: "app-header",
            h1 { "molview" }
            span { class: "subtitle", "{subtitle}" }
        }
    }
}

/// One button per catalog preset.
#[component]
pub fn MoleculeButtons(viewer: Viewer) -> Element {
    let view = viewer.view();
    let selected = view.molecule.selector_value().to_owned();
    rsx! {
        div { class: "button-group molecules",
            for preset in Catalog::builtin().presets() {
                button {
                    class: if selected == preset.id { "active" } else { "" },
                    disabled: view.loading,
                    onclick: move |_| viewer.run(ViewerCommand::LoadPreset {
                        id: preset.id.to_owned(),
                    }),
                    {preset.name}
                }
            }
        }
    }
}

#[component]
pub fn MoleculeInfo(viewer: Viewer) -> Element {
    let view = viewer.view();
    let atoms = view.atom_count;
    let body = match &view.molecule {
        MoleculeSelection::Preset(id) => match Catalog::builtin().lookup(id) {
            Some(preset) => rsx! {
                h2 { {preset.name} }
                dl {
                    dt { "Formula" }
                    dd { {preset.formula} }
                    dt { "Weight" }
                    dd { {format!("{:.2} g/mol", preset.weight)} }
                    dt { "Atoms" }
                    dd { "{atoms}" }
                }
                p { class: "description", {preset.description} }
            },
            None => rsx! {},
        },
        MoleculeSelection::Custom(code) => rsx! {
            h2 { "PDB {code}" }
            dl {
                dt { "Atoms" }
                dd { "{atoms}" }
            }
        },
        MoleculeSelection::None => rsx! {
            p { class: "muted", "No structure loaded" }
        },
    };
    rsx! {
        section { class: "info-card",
            if view.loading {
                p { class: "loading", "Loading structure..." }
            }
            {body}
        }
    }
}

/// Style, color and background button groups.
#[component]
pub fn AppearanceControls(viewer: Viewer) -> Element {
    let view = viewer.view();
    rsx! {
        div { class: "appearance",
            label { "Style" }
            div { class: "button-group",
                for style in StyleId::ALL {
                    button {
                        class: if view.style == style { "active" } else { "" },
                        onclick: move |_| viewer.run(ViewerCommand::SetStyle {
                            id: style.id().to_owned(),
                        }),
                        {style.label()}
                    }
                }
            }
            label { "Color" }
            div { class: "button-group",
                for scheme in ColorScheme::ALL {
                    button {
                        class: if view.color_scheme == scheme { "active" } else { "" },
                        onclick: move |_| viewer.run(ViewerCommand::SetColorScheme {
                            id: scheme.id().to_owned(),
                        }),
                        {scheme.label()}
                    }
                }
            }
            label { "Background" }
            div { class: "button-group",
                for background in Background::ALL {
                    button {
                        class: if view.background == background { "swatch active" } else { "swatch" },
                        style: format!("background: {}", background.hex()),
                        title: background.label(),
                        onclick: move |_| viewer.run(ViewerCommand::SetBackground {
                            id: background.id().to_owned(),
                        }),
                    }
                }
            }
        }
    }
}

#[component]
pub fn Toolbar(viewer: Viewer, compare: Signal<bool>) -> Element {
    let view = viewer.view();
    let measuring = viewer.measurement().mode();
    rsx! {
        div { class: "toolbar",
            button {
                class: if view.spin { "active" } else { "" },
                onclick: move |_| viewer.run(ViewerCommand::ToggleSpin),
                "Spin"
            }
            button {
                class: if view.labels { "active" } else { "" },
                onclick: move |_| viewer.run(ViewerCommand::ToggleLabels),
                "Labels"
            }
            button {
                class: if measuring { "active" } else { "" },
                onclick: move |_| viewer.run(ViewerCommand::ToggleMeasure),
                "Measure"
            }
            button {
                onclick: move |_| viewer.run(ViewerCommand::Screenshot),
                "Screenshot"
            }
            button {
                onclick: move |_| viewer.run(ViewerCommand::ResetView),
                "Reset view"
            }
            button {
                onclick: move |_| compare.set(true),
                "Compare"
            }
        }
    }
}

/// PDB id search with one-click examples.
#[component]
pub fn SearchBar(viewer: Viewer) -> Element {
    let mut query = use_signal(String::new);
    let view = viewer.view();
    let search = move |raw: String| viewer.run(ViewerCommand::Search { query: raw });

    rsx! {
        div { class: "search",
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    search(query());
                },
                input {
                    r#type: "text",
                    class: "text-input",
                    placeholder: "PDB ID (e.g. 1CRN)",
                    maxlength: "8",
                    value: "{query}",
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
                button { r#type: "submit", disabled: view.loading, "Search" }
            }
            div { class: "examples",
                for id in EXAMPLE_IDS {
                    button {
                        class: "link",
                        onclick: move |_| {
                            query.set(id.to_owned());
                            search(id.to_owned());
                        },
                        "{id}"
                    }
                }
            }
            if let Some(error) = &view.search_error {
                p { class: "error", "{error}" }
            }
        }
    }
}

#[component]
pub fn MeasurementPanel(viewer: Viewer) -> Element {
    let measurement = viewer.measurement();
    let status = match measurement.phase() {
        MeasurePhase::Idle => "Press M or Measure to start",
        MeasurePhase::Armed => "Click the first atom",
        MeasurePhase::FirstSelected => "Click the second atom",
    };
    rsx! {
        section { class: "measurement",
            h3 { "Distance" }
            p { class: "muted", "{status}" }
            if let Some(distance) = measurement.distance() {
                p { class: "distance", {format_distance(distance)} }
                button {
                    onclick: move |_| viewer.run(ViewerCommand::ClearMeasurement),
                    "Clear"
                }
            }
        }
    }
}

/// Last clicked atom.
#[component]
pub fn AtomCard(viewer: Viewer) -> Element {
    let view = viewer.view();
    let Some(atom) = view.selected_atom else {
        return rsx! {};
    };
    let p = atom.position;
    rsx! {
        section { class: "atom-card",
            h3 { {atom.describe()} }
            p { class: "coords", {format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)} }
        }
    }
}

#[component]
pub fn HelpModal(viewer: Viewer, bindings: KeyBindings) -> Element {
    if !viewer.view().show_help {
        return rsx! {};
    }
    rsx! {
        div { class: "modal-backdrop",
            onclick: move |_| viewer.run(ViewerCommand::ToggleHelp),
            div { class: "modal",
                h2 { "Keyboard shortcuts" }
                table {
                    for (key, tag) in bindings.entries() {
                        tr {
                            td { kbd { "{key}" } }
                            td { {tag.description()} }
                        }
                    }
                }
            }
        }
    }
}
