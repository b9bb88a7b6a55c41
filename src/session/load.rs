use std::time::Duration;

use web_time::Instant;

use super::{ready, MoleculeSelection, ViewerSession};
use crate::catalog::{RemoteId, StructureFormat, StructureSource};
use crate::error::MolviewError;
use crate::fetch;
use crate::options::{FetchOptions, LabelOptions};
use crate::search::SearchGateway;
use crate::surface::{LabelSpec, RenderSurface};

/// What a pending remote load will display once it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    /// A catalog preset backed by a remote id.
    Preset(&'static str),
    /// A PDB code typed into search.
    Search(String),
}

impl LoadTarget {
    fn selection(&self) -> MoleculeSelection {
        match self {
            Self::Preset(id) => MoleculeSelection::Preset(id),
            Self::Search(code) => MoleculeSelection::Custom(code.clone()),
        }
    }
}

/// Handle for a remote load the host has to fetch.
///
/// [`ViewerSession::complete_load`] honors a ticket once, and only on the
/// session that issued it while it is still that session's latest load.
#[derive(Debug, Clone)]
#[must_use = "a load ticket has to be fetched and completed"]
pub struct LoadTicket {
    session: u64,
    generation: u64,
    remote: RemoteId,
    target: LoadTarget,
    started: Instant,
}

impl LoadTicket {
    /// Remote id to download.
    pub fn remote(&self) -> &RemoteId {
        &self.remote
    }

    /// What the load will display.
    pub fn target(&self) -> &LoadTarget {
        &self.target
    }

    /// Format of the downloaded text.
    pub fn format(&self) -> StructureFormat {
        fetch::remote_format(&self.remote)
    }

    /// Download URL under `options`.
    pub fn url(&self, options: &FetchOptions) -> String {
        fetch::remote_url(&self.remote, options)
    }
}

/// Outcome of a finished load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// What is now displayed.
    pub molecule: MoleculeSelection,
    /// Atoms parsed by the surface.
    pub atom_count: usize,
    /// Labels placed (zero when labels are off).
    pub label_count: usize,
    /// Time from request to display.
    pub elapsed: Duration,
}

/// Result of starting a preset load.
#[derive(Debug)]
pub enum LoadStart {
    /// The structure was inline and is displayed.
    Loaded(LoadReport),
    /// The structure is remote; fetch it and call
    /// [`ViewerSession::complete_load`].
    Fetch(LoadTicket),
    /// Nothing was loaded (unknown id, or unusable inline data).
    Skipped,
}

impl LoadStart {
    /// The ticket, if the load still has to be fetched.
    #[must_use]
    pub fn into_ticket(self) -> Option<LoadTicket> {
        match self {
            Self::Fetch(ticket) => Some(ticket),
            Self::Loaded(_) | Self::Skipped => None,
        }
    }
}

/// Replace labels with one per non-hydrogen atom, up to the configured cap.
pub(super) fn place_labels<S: RenderSurface>(
    surface: &mut S,
    options: &LabelOptions,
) -> usize {
    surface.remove_labels();
    let labels: Vec<LabelSpec> = surface
        .atoms()
        .iter()
        .filter(|atom| !atom.is_hydrogen())
        .take(options.max_labels)
        .map(|atom| LabelSpec::for_atom(atom, options))
        .collect();
    for label in &labels {
        surface.add_label(label);
    }
    labels.len()
}

impl<S: RenderSurface> ViewerSession<S> {
    /// Load a catalog preset.
    ///
    /// Unknown ids are a no-op. Inline presets are displayed before this
    /// returns; malformed inline data is logged and the load skipped.
    /// Remote presets return a ticket to fetch.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn load_preset(&mut self, id: &str) -> Result<LoadStart, MolviewError> {
        self.ensure_ready()?;
        let catalog = self.catalog;
        let Some(preset) = catalog.lookup(id) else {
            log::debug!("unknown preset {id:?}, nothing to load");
            return Ok(LoadStart::Skipped);
        };

        let started = Instant::now();
        let generation = self.begin_load()?;

        match &preset.source {
            StructureSource::Inline => {
                let inline = catalog.inline_structure();
                let surface = ready(self.phase, &mut self.surface)?;
                match surface.load_structure(inline.data, inline.format) {
                    Ok(0) => {
                        log::error!("inline structure for {} has no atoms", preset.id);
                        self.abandon_load();
                        Ok(LoadStart::Skipped)
                    }
                    Ok(count) => self
                        .finish_load(count, MoleculeSelection::Preset(preset.id), started)
                        .map(LoadStart::Loaded),
                    Err(e) => {
                        log::error!("failed to load inline structure for {}: {e}", preset.id);
                        self.abandon_load();
                        Ok(LoadStart::Skipped)
                    }
                }
            }
            StructureSource::Remote(remote) => {
                self.view.loading = true;
                self.pending = Some(generation);
                log::info!("Requesting {} for preset {}", remote.label(), preset.id);
                Ok(LoadStart::Fetch(LoadTicket {
                    session: self.id,
                    generation,
                    remote: remote.clone(),
                    target: LoadTarget::Preset(preset.id),
                    started,
                }))
            }
        }
    }

    /// Validate a typed PDB id and start loading it.
    ///
    /// # Errors
    ///
    /// [`MolviewError::InvalidFormat`] if the input is not a 4-character
    /// alphanumeric code. Nothing changes except the recorded search error.
    pub fn search_remote(&mut self, raw: &str) -> Result<LoadTicket, MolviewError> {
        self.ensure_ready()?;
        let remote = match SearchGateway::validate(raw) {
            Ok(remote) => remote,
            Err(e) => {
                self.view.search_error = Some(SearchGateway::message_for(&e));
                return Err(e);
            }
        };
        let code = match &remote {
            RemoteId::Pdb(code) => code.clone(),
            RemoteId::PubChem(cid) => cid.to_string(),
        };

        let started = Instant::now();
        let generation = self.begin_load()?;
        self.view.loading = true;
        self.pending = Some(generation);
        log::info!("Searching {}", remote.label());
        Ok(LoadTicket {
            session: self.id,
            generation,
            remote,
            target: LoadTarget::Search(code),
            started,
        })
    }

    /// Hand the fetched text of a ticket back to the session.
    ///
    /// Returns `Ok(None)` when the ticket is stale: issued by another
    /// session, already completed, or superseded by a newer load or
    /// [`cancel_pending`](Self::cancel_pending).
    ///
    /// # Errors
    ///
    /// The fetch error, or [`MolviewError::NotFound`] when the text parses
    /// to zero atoms. Either way loading stops, the user-facing error is
    /// recorded and the displayed molecule reference is kept.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, MolviewError>,
    ) -> Result<Option<LoadReport>, MolviewError> {
        if ticket.session != self.id || self.pending != Some(ticket.generation) {
            log::debug!("dropping stale load of {}", ticket.remote);
            return Ok(None);
        }
        self.pending = None;
        let data = match fetched {
            Ok(data) => data,
            Err(e) => return Err(self.fail_load(e)),
        };

        let format = ticket.format();
        let surface = ready(self.phase, &mut self.surface)?;
        let count = surface.load_structure(&data, format).unwrap_or_else(|e| {
            log::warn!("{} did not parse as {}: {e}", ticket.remote, format.as_str());
            0
        });
        if count == 0 {
            return Err(self.fail_load(MolviewError::NotFound(ticket.remote.label())));
        }

        self.finish_load(count, ticket.target.selection(), ticket.started)
            .map(Some)
    }

    /// Invalidate any outstanding ticket.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("pending load cancelled");
        }
        self.view.loading = false;
    }

    /// Reset per-structure state before a new load. Returns the new
    /// generation.
    fn begin_load(&mut self) -> Result<u64, MolviewError> {
        ready(self.phase, &mut self.surface)?.clear();
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.measurement.reset();
        self.view.selected_atom = None;
        self.view.search_error = None;
        self.view.atom_count = 0;
        Ok(self.generation)
    }

    /// The surface was cleared for a load that produced nothing.
    fn abandon_load(&mut self) {
        self.view.molecule = MoleculeSelection::None;
        self.view.loading = false;
    }

    fn finish_load(
        &mut self,
        atom_count: usize,
        molecule: MoleculeSelection,
        started: Instant,
    ) -> Result<LoadReport, MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        surface.set_style(self.view.style, self.view.color_scheme);
        surface.enable_picking();
        surface.zoom_to_fit();
        if self.view.spin {
            surface.set_spin(Some(&self.options.spin));
        }
        let label_count = if self.view.labels {
            place_labels(surface, &self.options.labels)
        } else {
            0
        };
        surface.render();

        self.view.loading = false;
        self.view.molecule = molecule.clone();
        self.view.atom_count = atom_count;

        let elapsed = started.elapsed();
        log::info!(
            "Loaded {:?} ({atom_count} atoms) in {:.1}ms",
            molecule,
            elapsed.as_secs_f64() * 1000.0
        );
        Ok(LoadReport {
            molecule,
            atom_count,
            label_count,
            elapsed,
        })
    }

    fn fail_load(&mut self, error: MolviewError) -> MolviewError {
        log::warn!("load failed: {error}");
        self.view.loading = false;
        self.view.search_error = Some(SearchGateway::message_for(&error));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{calls, ready_session};
    use super::*;
    use crate::surface::recording::{pdb_with_atoms, SurfaceCall};

    const SDF_TWO_ATOMS: &str = "2519\n  -OEChem-\n\n  2  1  0     0  0  0  0  0  0999 V2000\n    1.0000    0.0000    0.0000 O   0  0\n    0.0000    0.0000    0.0000 C   0  0\nM  END\n$$$$\n";

    #[test]
    fn ethanol_loads_inline() {
        let mut session = ready_session();
        let LoadStart::Loaded(report) = session.load_preset("ethanol").unwrap()
        else {
            panic!("ethanol should load without a fetch");
        };
        assert_eq!(report.atom_count, 9);
        assert_eq!(report.molecule, MoleculeSelection::Preset("ethanol"));
        assert!(!session.view().loading);
        assert!(calls(&session).contains(&SurfaceCall::Load(StructureFormat::Xyz, 9)));
        assert!(calls(&session).contains(&SurfaceCall::EnablePicking));
        assert!(calls(&session).contains(&SurfaceCall::ZoomToFit));
    }

    #[test]
    fn unknown_preset_is_noop() {
        let mut session = ready_session();
        session.surface.as_mut().unwrap().reset_calls();
        assert!(matches!(
            session.load_preset("unobtainium").unwrap(),
            LoadStart::Skipped
        ));
        assert!(calls(&session).is_empty());
        assert_eq!(session.view().molecule, MoleculeSelection::None);
    }

    #[test]
    fn remote_preset_goes_through_ticket() {
        let mut session = ready_session();
        let ticket = session.load_preset("caffeine").unwrap().into_ticket().unwrap();
        assert!(session.view().loading);
        assert_eq!(ticket.format(), StructureFormat::Sdf);
        assert!(ticket.url(&FetchOptions::default()).contains("/cid/2519/"));

        let report = session
            .complete_load(ticket, Ok(SDF_TWO_ATOMS.into()))
            .unwrap()
            .unwrap();
        assert_eq!(report.atom_count, 2);
        assert_eq!(session.view().molecule, MoleculeSelection::Preset("caffeine"));
        assert!(!session.view().loading);
    }

    #[test]
    fn search_records_custom_id() {
        let mut session = ready_session();
        let ticket = session.search_remote("  1crn ").unwrap();
        assert_eq!(ticket.target(), &LoadTarget::Search("1CRN".into()));
        let report = session
            .complete_load(ticket, Ok(pdb_with_atoms(46)))
            .unwrap()
            .unwrap();
        assert_eq!(report.atom_count, 46);
        assert_eq!(session.view().molecule.custom_id(), Some("1CRN"));
        assert_eq!(session.view().molecule.selector_value(), "custom");
    }

    #[test]
    fn invalid_search_changes_nothing_but_error() {
        let mut session = ready_session();
        let _ = session.load_preset("ethanol").unwrap();
        let generation = session.generation;
        session.surface.as_mut().unwrap().reset_calls();

        let err = session.search_remote("abcde").unwrap_err();
        assert!(matches!(err, MolviewError::InvalidFormat(_)));
        assert!(session.view().search_error.is_some());
        assert!(!session.view().loading);
        assert_eq!(session.view().molecule, MoleculeSelection::Preset("ethanol"));
        assert_eq!(session.generation, generation);
        assert!(calls(&session).is_empty());
    }

    #[test]
    fn zero_atoms_is_not_found() {
        let mut session = ready_session();
        let _ = session.load_preset("ethanol").unwrap();
        let ticket = session.search_remote("9zzz").unwrap();
        assert!(session.view().loading);

        let err = session
            .complete_load(ticket, Ok("HEADER    EMPTY\nEND\n".into()))
            .unwrap_err();
        assert!(matches!(err, MolviewError::NotFound(ref id) if id == "9ZZZ"));
        assert!(!session.view().loading);
        assert!(session.view().search_error.as_deref().unwrap().contains("9ZZZ"));
        assert_eq!(session.view().molecule, MoleculeSelection::Preset("ethanol"));
    }

    #[test]
    fn fetch_failure_stops_loading() {
        let mut session = ready_session();
        let ticket = session.search_remote("1bna").unwrap();
        let err = session
            .complete_load(ticket, Err(MolviewError::Fetch("offline".into())))
            .unwrap_err();
        assert!(matches!(err, MolviewError::Fetch(_)));
        assert!(!session.view().loading);
        assert!(session.view().search_error.is_some());
    }

    #[test]
    fn latest_request_wins() {
        let mut session = ready_session();
        let first = session.search_remote("1crn").unwrap();
        let second = session.search_remote("1ubq").unwrap();

        // The slower first response arrives last and must be ignored.
        let report = session
            .complete_load(second, Ok(pdb_with_atoms(30)))
            .unwrap()
            .unwrap();
        assert_eq!(report.molecule, MoleculeSelection::Custom("1UBQ".into()));
        assert!(session
            .complete_load(first, Ok(pdb_with_atoms(12)))
            .unwrap()
            .is_none());
        assert_eq!(session.view().molecule.custom_id(), Some("1UBQ"));
        assert_eq!(session.view().atom_count, 30);
    }

    #[test]
    fn ticket_completes_only_once() {
        let mut session = ready_session();
        let ticket = session.search_remote("1crn").unwrap();
        let replay = ticket.clone();
        let _ = session
            .complete_load(ticket, Ok(pdb_with_atoms(12)))
            .unwrap()
            .unwrap();

        assert!(session
            .complete_load(replay, Ok(pdb_with_atoms(12)))
            .unwrap()
            .is_none());
        assert_eq!(session.surface().unwrap().atoms.len(), 12);
        assert_eq!(session.view().atom_count, 12);
        assert_eq!(
            calls(&session)
                .iter()
                .filter(|c| matches!(c, SurfaceCall::Load(..)))
                .count(),
            1
        );
    }

    #[test]
    fn rejected_inline_load_clears_selection() {
        let mut session = ready_session();
        let _ = session.load_preset("ethanol").unwrap();
        let pending = session.search_remote("1crn").unwrap();
        assert!(session.view().loading);

        session.surface.as_mut().unwrap().reject_loads = true;
        assert!(matches!(
            session.load_preset("ethanol").unwrap(),
            LoadStart::Skipped
        ));
        assert_eq!(session.view().molecule, MoleculeSelection::None);
        assert!(!session.view().loading);

        session.surface.as_mut().unwrap().reject_loads = false;
        assert!(session
            .complete_load(pending, Ok(pdb_with_atoms(12)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn cancel_makes_ticket_stale() {
        let mut session = ready_session();
        let ticket = session.search_remote("4hhb").unwrap();
        session.cancel_pending();
        assert!(!session.view().loading);
        assert!(session
            .complete_load(ticket, Ok(pdb_with_atoms(10)))
            .unwrap()
            .is_none());
        assert_eq!(session.view().molecule, MoleculeSelection::None);
    }

    #[test]
    fn dispose_drops_pending_completion() {
        let mut session = ready_session();
        let ticket = session.search_remote("4hhb").unwrap();
        session.dispose();
        assert!(session
            .complete_load(ticket, Ok(pdb_with_atoms(10)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn new_load_clears_measurement_and_selection() {
        let mut session = ready_session();
        let _ = session.load_preset("ethanol").unwrap();
        session.enable_measure_mode().unwrap();
        let atom = session.surface().unwrap().atoms[0].clone();
        let _ = session.on_atom_clicked(atom).unwrap();
        assert!(session.view().selected_atom.is_some());

        let _ = session.load_preset("ethanol").unwrap();
        assert!(session.view().selected_atom.is_none());
        assert!(!session.measurement().mode());
        assert!(session.measurement().first_point().is_none());
    }

    #[test]
    fn labels_are_capped_and_skip_hydrogens() {
        let mut session = ready_session();
        let ticket = session.search_remote("1crn").unwrap();
        let _ = session
            .complete_load(ticket, Ok(pdb_with_atoms(150)))
            .unwrap();
        session.toggle_labels().unwrap();

        let surface = session.surface().unwrap();
        assert!(surface.label_count() <= 50);
        assert_eq!(surface.labels.len(), 50);
        assert!(surface.labels.iter().all(|l| l.text != "H"));
    }

    #[test]
    fn labels_and_spin_survive_reload() {
        let mut session = ready_session();
        session.toggle_labels().unwrap();
        session.toggle_spin().unwrap();
        let LoadStart::Loaded(report) = session.load_preset("ethanol").unwrap()
        else {
            panic!("ethanol should load inline");
        };
        // Ethanol has three heavy atoms.
        assert_eq!(report.label_count, 3);
        assert!(session.surface().unwrap().spinning);
    }
}
