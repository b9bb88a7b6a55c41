use super::load::place_labels;
use super::{ready, MoleculeSelection, ViewerSession};
use crate::error::MolviewError;
use crate::measure::{LabeledAtom, MeasureEffect};
use crate::options::{Background, ColorScheme, StyleId};
use crate::surface::{CylinderSpec, RenderSurface};

impl<S: RenderSurface> ViewerSession<S> {
    // ── Appearance ─────────────────────────────────────────────────────

    /// Switch representation. Unknown ids fall back to `stick`.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn set_style(&mut self, id: &str) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        self.view.style = StyleId::from_id(id);
        surface.set_style(self.view.style, self.view.color_scheme);
        surface.render();
        Ok(())
    }

    /// Switch coloring. Unknown ids fall back to `element`.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn set_color_scheme(&mut self, id: &str) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        self.view.color_scheme = ColorScheme::from_id(id);
        surface.set_style(self.view.style, self.view.color_scheme);
        surface.render();
        Ok(())
    }

    /// Switch background. Unknown ids fall back to `dark`.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn set_background(&mut self, id: &str) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        self.view.background = Background::from_id(id);
        surface.set_background(self.view.background);
        surface.render();
        Ok(())
    }

    /// Start or stop continuous rotation.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn toggle_spin(&mut self) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        self.view.spin = !self.view.spin;
        surface.set_spin(self.view.spin.then_some(&self.options.spin));
        log::debug!("spin {}", if self.view.spin { "on" } else { "off" });
        Ok(())
    }

    /// Show or hide atom labels.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn toggle_labels(&mut self) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        self.view.labels = !self.view.labels;
        if self.view.labels {
            let placed = place_labels(surface, &self.options.labels);
            log::debug!("placed {placed} labels");
        } else {
            surface.remove_labels();
        }
        surface.render();
        Ok(())
    }

    /// Save a PNG of the viewport, named after the displayed molecule.
    ///
    /// # Errors
    ///
    /// Readiness errors, or whatever the surface reports.
    pub fn export_image(&mut self) -> Result<(), MolviewError> {
        let file_name = match &self.view.molecule {
            MoleculeSelection::None => "molecule.png".to_owned(),
            MoleculeSelection::Preset(id) => format!("{id}.png"),
            MoleculeSelection::Custom(code) => {
                format!("{}.png", code.to_lowercase())
            }
        };
        let surface = ready(self.phase, &mut self.surface)?;
        surface.save_snapshot(&file_name)?;
        log::info!("Saved snapshot {file_name}");
        Ok(())
    }

    /// Fit the camera to the loaded structure.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn reset_view(&mut self) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        surface.zoom_to_fit();
        surface.render();
        Ok(())
    }

    /// Show or hide the shortcut overlay.
    pub fn toggle_help(&mut self) {
        self.view.show_help = !self.view.show_help;
    }

    // ── Measurement ────────────────────────────────────────────────────

    /// Arm distance measurement.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn enable_measure_mode(&mut self) -> Result<(), MolviewError> {
        self.ensure_ready()?;
        self.measurement.enable();
        Ok(())
    }

    /// Disarm distance measurement, dropping a pending first atom.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn disable_measure_mode(&mut self) -> Result<(), MolviewError> {
        self.ensure_ready()?;
        self.measurement.disable();
        Ok(())
    }

    /// Flip measure mode.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn toggle_measure_mode(&mut self) -> Result<(), MolviewError> {
        if self.measurement.mode() {
            self.disable_measure_mode()
        } else {
            self.enable_measure_mode()
        }
    }

    /// Forget the measurement and remove its indicator.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn clear_measurement(&mut self) -> Result<(), MolviewError> {
        self.ensure_ready()?;
        let effect = self.measurement.clear();
        self.apply_measure_effect(&effect)
    }

    /// An atom was picked on the surface.
    ///
    /// The atom always becomes the selected atom; while measuring it also
    /// advances the measurement.
    ///
    /// # Errors
    ///
    /// [`MolviewError::NotReady`] / [`MolviewError::Disposed`].
    pub fn on_atom_clicked(
        &mut self,
        atom: LabeledAtom,
    ) -> Result<MeasureEffect, MolviewError> {
        self.ensure_ready()?;
        log::debug!("picked {}", atom.describe());
        let effect = self.measurement.on_point_clicked(&atom);
        self.view.selected_atom = Some(atom);
        self.apply_measure_effect(&effect)?;
        Ok(effect)
    }

    fn apply_measure_effect(
        &mut self,
        effect: &MeasureEffect,
    ) -> Result<(), MolviewError> {
        let surface = ready(self.phase, &mut self.surface)?;
        match effect {
            MeasureEffect::None => return Ok(()),
            MeasureEffect::FirstPointSet | MeasureEffect::RemoveIndicator => {
                surface.remove_shapes();
            }
            MeasureEffect::DrawIndicator { from, to, .. } => {
                surface.add_cylinder(&CylinderSpec::between(
                    from,
                    to,
                    &self.options.measurement,
                ));
            }
        }
        surface.render();
        Ok(())
    }
}
