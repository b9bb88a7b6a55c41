//! Dioxus web app for the molview browser viewer.
//!
//! Compiled to WASM. Each mounted view owns its own viewer session; the
//! comparison view owns two. 3Dmol.js is loaded on demand by the first
//! viewer that mounts.

mod bridge;
mod panels;

use std::rc::Rc;

use bridge::{Comparison, KeyListener, Session, Viewer};
use dioxus::prelude::*;
use molview::compare::Side;
use molview::input::KeyDispatcher;
use molview::options::{StyleId, ViewerOptions};
use panels::{
    AppearanceControls, AtomCard, Header, HelpModal, MeasurementPanel,
    MoleculeButtons, MoleculeInfo, SearchBar, Toolbar,
};

const MAIN_CONTAINER: &str = "viewer-main";
const LEFT_CONTAINER: &str = "viewer-left";
const RIGHT_CONTAINER: &str = "viewer-right";

fn main() {
    molview::web::init_logging();
    dioxus::launch(app);
}

fn app() -> Element {
    let compare: Signal<bool> = use_signal(|| false);

    rsx! {
        Header { compare }
        if compare() {
            CompareView { compare }
        } else {
            MainView { compare }
        }
    }
}

/// The single viewer with all controls.
#[component]
fn MainView(compare: Signal<bool>) -> Element {
    let session = use_signal(|| Session::new(ViewerOptions::default()));
    let viewer = Viewer::Single(session);
    let bindings = session.peek().options().keybindings.clone();

    // Dropped (and the listener removed) when this view unmounts.
    let _keys = use_hook(|| {
        Rc::new(KeyListener::register(
            viewer,
            KeyDispatcher::with_key_bindings(bindings.clone()),
        ))
    });

    rsx! {
        main { class: "layout",
            aside { class: "sidebar",
                MoleculeButtons { viewer }
                MoleculeInfo { viewer }
                SearchBar { viewer }
                AppearanceControls { viewer }
            }
            div { class: "stage",
                Toolbar { viewer, compare }
                div {
                    id: MAIN_CONTAINER,
                    class: "viewer",
                    onmounted: move |_| viewer.mount(MAIN_CONTAINER, "caffeine"),
                }
                if !viewer.is_ready() {
                    p { class: "muted overlay", "Loading viewer..." }
                }
            }
            aside { class: "sidebar",
                MeasurementPanel { viewer }
                AtomCard { viewer }
            }
            HelpModal { viewer, bindings }
        }
    }
}

/// Two independent viewers side by side.
#[component]
fn CompareView(compare: Signal<bool>) -> Element {
    let mut comparison =
        use_signal(|| Comparison::new(&ViewerOptions::default()));
    let summary = comparison.read().summary().map(|s| {
        format!(
            "{} ({}) vs {} ({}): {:+.2} g/mol",
            s.left.name,
            s.left.formula,
            s.right.name,
            s.right.formula,
            s.weight_difference()
        )
    });

    rsx! {
        div { class: "compare",
            div { class: "toolbar",
                for style in StyleId::ALL {
                    button {
                        onclick: move |_| {
                            if let Err(e) = comparison.write().set_style(style.id()) {
                                log::warn!("{e}");
                            }
                        },
                        {style.label()}
                    }
                }
                button {
                    onclick: move |_| {
                        comparison.write().dispose();
                        compare.set(false);
                    },
                    "Close"
                }
            }
            div { class: "compare-panels",
                ComparePanel {
                    viewer: Viewer::Panel(comparison, Side::Left),
                    container: LEFT_CONTAINER,
                    initial: "caffeine",
                }
                ComparePanel {
                    viewer: Viewer::Panel(comparison, Side::Right),
                    container: RIGHT_CONTAINER,
                    initial: "aspirin",
                }
            }
            if let Some(summary) = summary {
                p { class: "compare-summary", "{summary}" }
            }
        }
    }
}

#[component]
fn ComparePanel(
    viewer: Viewer,
    container: &'static str,
    initial: &'static str,
) -> Element {
    rsx! {
        div { class: "compare-panel",
            MoleculeButtons { viewer }
            div {
                id: container,
                class: "viewer",
                onmounted: move |_| viewer.mount(container, initial),
            }
            MoleculeInfo { viewer }
            MeasurementPanel { viewer }
        }
    }
}
