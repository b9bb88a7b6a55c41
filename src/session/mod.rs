//! One viewer session per mounted view.
//!
//! A [`ViewerSession`] exclusively owns one [`RenderSurface`] and all state
//! that sits in front of it. There are no module-level singletons: two
//! sessions (e.g. the panels of [`ComparisonView`](crate::compare::ComparisonView))
//! share nothing.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized -> Initializing -> Ready -> Disposed
//! ```
//!
//! [`ViewerSession::initialize`] awaits a one-shot future that yields the
//! surface once the rendering library is available. Every operation that
//! touches the surface fails with [`MolviewError::NotReady`] before that and
//! with [`MolviewError::Disposed`] after [`ViewerSession::dispose`].
//!
//! # Loading
//!
//! Inline presets load synchronously. Remote structures are split in two:
//! the session hands out a [`LoadTicket`], the host downloads the text and
//! passes it back through [`ViewerSession::complete_load`]. Each new load
//! bumps a generation counter and a ticket is honored at most once, by the
//! session that issued it, for the most recent load only.

mod load;
mod state;
mod view;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

pub use load::{LoadReport, LoadStart, LoadTarget, LoadTicket};
pub use state::{MoleculeSelection, SessionPhase, ViewState};

use crate::catalog::{Catalog, MoleculeDescriptor};
use crate::command::ViewerCommand;
use crate::error::MolviewError;
use crate::measure::MeasurementState;
use crate::options::ViewerOptions;
use crate::surface::RenderSurface;

/// View state, measurement and the rendering surface of one mounted viewer.
pub struct ViewerSession<S: RenderSurface> {
    surface: Option<S>,
    phase: SessionPhase,
    options: ViewerOptions,
    catalog: &'static Catalog,
    view: ViewState,
    measurement: MeasurementState,
    id: u64,
    generation: u64,
    pending: Option<u64>,
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Borrow the surface if the session is ready.
///
/// Free function so callers can keep borrowing other session fields.
fn ready<S>(
    phase: SessionPhase,
    surface: &mut Option<S>,
) -> Result<&mut S, MolviewError> {
    match (phase, surface.as_mut()) {
        (SessionPhase::Ready, Some(surface)) => Ok(surface),
        (SessionPhase::Disposed, _) => Err(MolviewError::Disposed),
        _ => Err(MolviewError::NotReady),
    }
}

impl<S: RenderSurface> ViewerSession<S> {
    /// Session over the built-in catalog, not yet bound to a surface.
    #[must_use]
    pub fn new(options: ViewerOptions) -> Self {
        Self::with_catalog(options, Catalog::builtin())
    }

    /// Session over a custom catalog.
    #[must_use]
    pub fn with_catalog(options: ViewerOptions, catalog: &'static Catalog) -> Self {
        Self {
            surface: None,
            phase: SessionPhase::Uninitialized,
            view: ViewState::new(&options.display),
            options,
            catalog,
            measurement: MeasurementState::new(),
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            pending: None,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Wait for the rendering library and attach the surface it yields.
    ///
    /// A failed ready future (the library never became available) is
    /// logged and leaves the session uninitialized, so a later attempt can
    /// retry. Calling this on a ready session is a no-op.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Disposed`] if the session was disposed, otherwise
    /// whatever the ready future failed with.
    #[allow(clippy::future_not_send)]
    pub async fn initialize<F>(&mut self, ready: F) -> Result<(), MolviewError>
    where
        F: Future<Output = Result<S, MolviewError>>,
    {
        match self.phase {
            SessionPhase::Disposed => return Err(MolviewError::Disposed),
            SessionPhase::Ready => return Ok(()),
            SessionPhase::Uninitialized | SessionPhase::Initializing => {}
        }
        self.phase = SessionPhase::Initializing;
        log::debug!("viewer session waiting for rendering library");

        match ready.await {
            Ok(surface) => self.attach_surface(surface),
            Err(e) => {
                log::warn!("rendering surface unavailable: {e}");
                self.phase = SessionPhase::Uninitialized;
                Err(e)
            }
        }
    }

    /// Attach an already-created surface and become ready.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Disposed`] if the session was disposed; the surface
    /// is released immediately in that case.
    pub fn attach_surface(&mut self, mut surface: S) -> Result<(), MolviewError> {
        if self.phase == SessionPhase::Disposed {
            surface.release();
            return Err(MolviewError::Disposed);
        }
        if let Some(mut previous) = self.surface.take() {
            previous.release();
        }
        surface.set_background(self.view.background);
        surface.render();
        self.surface = Some(surface);
        self.phase = SessionPhase::Ready;
        log::debug!("viewer session ready");
        Ok(())
    }

    /// Release the surface. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.phase == SessionPhase::Disposed {
            return;
        }
        self.pending = None;
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        self.view.loading = false;
        self.phase = SessionPhase::Disposed;
        log::debug!("viewer session disposed");
    }

    fn surface_mut(&mut self) -> Result<&mut S, MolviewError> {
        ready(self.phase, &mut self.surface)
    }

    fn ensure_ready(&mut self) -> Result<(), MolviewError> {
        self.surface_mut().map(|_| ())
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether surface operations are available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    /// State read by the presentation layer.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Measurement state machine.
    #[must_use]
    pub fn measurement(&self) -> &MeasurementState {
        &self.measurement
    }

    /// Options this session was created with.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Catalog presets are loaded from.
    #[must_use]
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Descriptor of the displayed preset, if a preset is displayed.
    #[must_use]
    pub fn current_preset(&self) -> Option<&'static MoleculeDescriptor> {
        match self.view.molecule {
            MoleculeSelection::Preset(id) => self.catalog.lookup(id),
            _ => None,
        }
    }

    /// The attached surface.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    // ── Commands ───────────────────────────────────────────────────────

    /// Run one command. Returns a ticket when the command started a remote
    /// load that the host has to fetch.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub fn execute(
        &mut self,
        command: ViewerCommand,
    ) -> Result<Option<LoadTicket>, MolviewError> {
        log::debug!("execute {command:?}");
        match command {
            ViewerCommand::ResetView => self.reset_view()?,
            ViewerCommand::ToggleSpin => self.toggle_spin()?,
            ViewerCommand::LoadPreset { id } => {
                return self.load_preset(&id).map(LoadStart::into_ticket);
            }
            ViewerCommand::LoadPresetAt { index } => {
                let catalog = self.catalog;
                match catalog.by_index(index) {
                    Some(preset) => {
                        return self
                            .load_preset(preset.id)
                            .map(LoadStart::into_ticket);
                    }
                    None => log::debug!("no preset at index {index}"),
                }
            }
            ViewerCommand::Search { query } => {
                return self.search_remote(&query).map(Some);
            }
            ViewerCommand::SetStyle { id } => self.set_style(&id)?,
            ViewerCommand::SetColorScheme { id } => self.set_color_scheme(&id)?,
            ViewerCommand::SetBackground { id } => self.set_background(&id)?,
            ViewerCommand::ToggleLabels => self.toggle_labels()?,
            ViewerCommand::ToggleMeasure => self.toggle_measure_mode()?,
            ViewerCommand::ClearMeasurement => self.clear_measurement()?,
            ViewerCommand::Screenshot => self.export_image()?,
            ViewerCommand::ToggleHelp => self.toggle_help(),
        }
        Ok(None)
    }
}

impl<S: RenderSurface> Drop for ViewerSession<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<S: RenderSurface> std::fmt::Debug for ViewerSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerSession")
            .field("phase", &self.phase)
            .field("view", &self.view)
            .field("measurement", &self.measurement)
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceCall};

    pub(crate) fn ready_session() -> ViewerSession<RecordingSurface> {
        let mut session = ViewerSession::new(ViewerOptions::default());
        pollster::block_on(
            session.initialize(async { Ok(RecordingSurface::new()) }),
        )
        .unwrap();
        session
    }

    pub(crate) fn calls(session: &ViewerSession<RecordingSurface>) -> &[SurfaceCall] {
        &session.surface().unwrap().calls
    }

    #[test]
    fn starts_uninitialized() {
        let mut session: ViewerSession<RecordingSurface> =
            ViewerSession::new(ViewerOptions::default());
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert!(matches!(
            session.set_style("sphere"),
            Err(MolviewError::NotReady)
        ));
        assert!(matches!(
            session.load_preset("ethanol"),
            Err(MolviewError::NotReady)
        ));
    }

    #[test]
    fn initialize_applies_background() {
        let session = ready_session();
        assert!(session.is_ready());
        assert_eq!(
            calls(&session),
            [
                SurfaceCall::Background(session.view().background),
                SurfaceCall::Render
            ]
        );
    }

    #[test]
    fn failed_ready_future_allows_retry() {
        let mut session: ViewerSession<RecordingSurface> =
            ViewerSession::new(ViewerOptions::default());
        let err = pollster::block_on(session.initialize(async {
            Err(MolviewError::LibraryUnavailable("$3Dmol missing".into()))
        }))
        .unwrap_err();
        assert!(matches!(err, MolviewError::LibraryUnavailable(_)));
        assert_eq!(session.phase(), SessionPhase::Uninitialized);

        pollster::block_on(
            session.initialize(async { Ok(RecordingSurface::new()) }),
        )
        .unwrap();
        assert!(session.is_ready());
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut session = ready_session();
        session.dispose();
        session.dispose();
        assert_eq!(session.phase(), SessionPhase::Disposed);
        assert!(session.surface().is_none());
        assert!(matches!(
            session.load_preset("ethanol"),
            Err(MolviewError::Disposed)
        ));
        assert!(matches!(session.toggle_spin(), Err(MolviewError::Disposed)));
    }

    #[test]
    fn disposed_session_never_becomes_ready() {
        let mut session = ready_session();
        session.dispose();
        let err = pollster::block_on(
            session.initialize(async { Ok(RecordingSurface::new()) }),
        )
        .unwrap_err();
        assert!(matches!(err, MolviewError::Disposed));
        assert!(matches!(
            session.attach_surface(RecordingSurface::new()),
            Err(MolviewError::Disposed)
        ));
        assert_eq!(session.phase(), SessionPhase::Disposed);
    }

    #[test]
    fn execute_number_key_loads_by_catalog_order() {
        let mut session = ready_session();
        let ticket = session
            .execute(ViewerCommand::LoadPresetAt { index: 3 })
            .unwrap();
        assert!(ticket.is_none());
        assert_eq!(session.view().molecule, MoleculeSelection::Preset("ethanol"));
        assert_eq!(session.view().atom_count, 9);

        let ticket = session
            .execute(ViewerCommand::LoadPresetAt { index: 0 })
            .unwrap();
        assert!(ticket.is_some());
    }

    #[test]
    fn execute_out_of_range_index_is_noop() {
        let mut session = ready_session();
        session.surface.as_mut().unwrap().reset_calls();
        let ticket = session
            .execute(ViewerCommand::LoadPresetAt { index: 9 })
            .unwrap();
        assert!(ticket.is_none());
        assert!(calls(&session).is_empty());
    }

    #[test]
    fn execute_search_returns_ticket() {
        let mut session = ready_session();
        let ticket = session
            .execute(ViewerCommand::Search { query: "1ubq".into() })
            .unwrap()
            .unwrap();
        assert_eq!(ticket.remote().label(), "1UBQ");
        assert!(session.view().loading);
    }

    #[test]
    fn execute_help_toggles_overlay() {
        let mut session = ready_session();
        let _ = session.execute(ViewerCommand::ToggleHelp).unwrap();
        assert!(session.view().show_help);
        let _ = session.execute(ViewerCommand::ToggleHelp).unwrap();
        assert!(!session.view().show_help);
    }

    #[test]
    fn current_preset_follows_selection() {
        let mut session = ready_session();
        assert!(session.current_preset().is_none());
        let _ = session.load_preset("ethanol").unwrap();
        assert_eq!(session.current_preset().unwrap().formula, "C₂H₆O");
    }
}
