//! Glue between the DOM, 3Dmol.js and the viewer sessions.
//!
//! A [`Viewer`] is a copyable handle to one session held in a Dioxus
//! signal: either the single main session, or one panel of a
//! [`ComparisonView`]. Commands go through [`Viewer::run`]; remote loads
//! are fetched on a local task and handed back with `complete_load`.

use std::rc::Rc;

use dioxus::prelude::*;
use molview::compare::{ComparisonView, Side};
use molview::input::KeyDispatcher;
use molview::measure::{LabeledAtom, MeasurementState};
use molview::session::{LoadTicket, ViewState};
use molview::web::{self, ClickSink, ThreeDmolSurface};
use molview::{MolviewError, ViewerCommand, ViewerSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub type Session = ViewerSession<ThreeDmolSurface>;
pub type Comparison = ComparisonView<ThreeDmolSurface>;

/// Handle to one mounted viewer session.
#[derive(Clone, Copy, PartialEq)]
pub enum Viewer {
    /// The main (single) viewer.
    Single(Signal<Session>),
    /// One side of the comparison view.
    Panel(Signal<Comparison>, Side),
}

impl Viewer {
    /// Run `f` on the session. `None` once the owning component is gone
    /// (e.g. a fetch finishing after the comparison view was closed).
    fn update<R>(self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let result = match self {
            Self::Single(mut session) => {
                session.try_write().ok().map(|mut session| f(&mut session))
            }
            Self::Panel(mut compare, side) => compare
                .try_write()
                .ok()
                .map(|mut compare| f(compare.session_mut(side))),
        };
        if result.is_none() {
            log::debug!("viewer session no longer mounted");
        }
        result
    }

    /// Snapshot of the view state. Subscribes the calling component.
    pub fn view(self) -> ViewState {
        match self {
            Self::Single(session) => session.read().view().clone(),
            Self::Panel(compare, side) => {
                compare.read().session(side).view().clone()
            }
        }
    }

    /// Snapshot of the measurement state. Subscribes the calling component.
    pub fn measurement(self) -> MeasurementState {
        match self {
            Self::Single(session) => session.read().measurement().clone(),
            Self::Panel(compare, side) => {
                compare.read().session(side).measurement().clone()
            }
        }
    }

    /// Whether the surface is attached.
    pub fn is_ready(self) -> bool {
        match self {
            Self::Single(session) => session.read().is_ready(),
            Self::Panel(compare, side) => compare.read().session(side).is_ready(),
        }
    }

    /// Run a command; remote loads continue in the background.
    pub fn run(self, command: ViewerCommand) {
        match self.update(|session| session.execute(command)) {
            None | Some(Ok(None)) => {}
            Some(Ok(Some(ticket))) => {
                wasm_bindgen_futures::spawn_local(self.resolve(ticket));
            }
            // Already recorded in the view state for display.
            Some(Err(e)) if e.is_user_facing() => log::debug!("{e}"),
            Some(Err(e)) => log::warn!("command failed: {e}"),
        }
    }

    async fn resolve(self, ticket: LoadTicket) {
        let Some(fetch) = self.update(|session| session.options().fetch.clone())
        else {
            return;
        };
        let fetched = web::fetch_text(ticket.remote(), &fetch).await;
        match self.update(|session| session.complete_load(ticket, fetched)) {
            Some(Ok(Some(report))) => {
                log::debug!("{} atoms displayed", report.atom_count);
            }
            None | Some(Ok(None)) => {}
            Some(Err(e)) => log::warn!("{e}"),
        }
    }

    fn on_atom(self, atom: LabeledAtom) {
        if let Some(Err(e)) = self.update(|session| session.on_atom_clicked(atom)) {
            log::warn!("atom click ignored: {e}");
        }
    }

    fn attach(self, surface: Result<ThreeDmolSurface, MolviewError>) -> bool {
        let attached = surface.and_then(|surface| {
            self.update(|session| session.attach_surface(surface))
                .unwrap_or(Err(MolviewError::Disposed))
        });
        match attached {
            Ok(()) => true,
            Err(e) => {
                log::warn!("viewer not available: {e}");
                false
            }
        }
    }

    /// Create the 3Dmol viewer inside `container_id`, then load
    /// `initial_preset`. Call from the container's `onmounted`.
    pub fn mount(self, container_id: &'static str, initial_preset: &'static str) {
        let Some(container) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            log::error!("viewer container #{container_id} missing");
            return;
        };
        let Some(background) = self.update(|session| session.view().background)
        else {
            return;
        };
        let sink: ClickSink = Rc::new(move |atom| self.on_atom(atom));

        wasm_bindgen_futures::spawn_local(async move {
            let surface = ThreeDmolSurface::create(container, background, sink).await;
            if self.attach(surface) {
                self.run(ViewerCommand::LoadPreset {
                    id: initial_preset.to_owned(),
                });
            }
        });
    }
}

// ── Keyboard ─────────────────────────────────────────────────────────────

/// Window `keydown` listener, removed again when dropped.
pub struct KeyListener {
    closure: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl KeyListener {
    /// Forward shortcut keys to `viewer`, ignoring keys typed into text
    /// fields.
    pub fn register(viewer: Viewer, dispatcher: KeyDispatcher) -> Option<Self> {
        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |evt: web_sys::KeyboardEvent| {
                if evt.ctrl_key() || evt.meta_key() || evt.alt_key() {
                    return;
                }
                let focus = web::focus_of(&evt);
                if let Some(command) = dispatcher.handle_key_press(&evt.key(), focus) {
                    // Space would otherwise scroll the page.
                    evt.prevent_default();
                    viewer.run(command);
                }
            },
        );
        let window = web_sys::window()?;
        if let Err(e) = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            log::error!("failed to add keydown listener: {e:?}");
            return None;
        }
        Some(Self { closure })
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "keydown",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
