//! The seam between the viewer and the external rendering library.
//!
//! Everything the viewer asks of the library goes through [`RenderSurface`]:
//! loading structure text, styling, overlays, camera fitting, rotation and
//! snapshots. Parsing, picking and drawing all happen on the other side.

#[cfg(test)]
pub(crate) mod recording;

use crate::catalog::StructureFormat;
use crate::error::MolviewError;
use crate::measure::{LabeledAtom, Point3};
use crate::options::{
    Background, ColorScheme, LabelOptions, MeasurementOptions, SpinOptions,
    StyleId,
};

/// Text overlay anchored at a point in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    /// Label text.
    pub text: String,
    /// Anchor position.
    pub position: Point3,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color (CSS).
    pub font_color: String,
    /// Box color (CSS).
    pub background_color: String,
    /// Box opacity.
    pub background_opacity: f32,
}

impl LabelSpec {
    /// Label for an atom, styled from the label options.
    #[must_use]
    pub fn for_atom(atom: &LabeledAtom, options: &LabelOptions) -> Self {
        Self {
            text: atom.elem.clone(),
            position: atom.position,
            font_size: options.font_size,
            font_color: options.font_color.clone(),
            background_color: options.background_color.clone(),
            background_opacity: options.background_opacity,
        }
    }
}

/// Cylinder overlay between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderSpec {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
    /// Radius in Angstroms.
    pub radius: f32,
    /// Color (CSS).
    pub color: String,
    /// Whether to draw dashed.
    pub dashed: bool,
}

impl CylinderSpec {
    /// Distance indicator between two atoms.
    #[must_use]
    pub fn between(
        from: &LabeledAtom,
        to: &LabeledAtom,
        options: &MeasurementOptions,
    ) -> Self {
        Self {
            start: from.position,
            end: to.position,
            radius: options.radius,
            color: options.color.clone(),
            dashed: options.dashed,
        }
    }
}

/// One rendering-library viewer bound to one on-page container.
///
/// Implementations are exclusively owned by a
/// [`ViewerSession`](crate::session::ViewerSession). Clicks on atoms are not
/// returned from any method here: once [`enable_picking`](Self::enable_picking)
/// is called the implementation forwards picked atoms to its host, which
/// hands them to
/// [`ViewerSession::on_atom_clicked`](crate::session::ViewerSession::on_atom_clicked).
pub trait RenderSurface {
    /// Remove all models, shapes and labels.
    fn clear(&mut self);

    /// Parse `data` into a new model. Returns the number of atoms parsed.
    fn load_structure(
        &mut self,
        data: &str,
        format: StructureFormat,
    ) -> Result<usize, MolviewError>;

    /// Atoms of the currently loaded model(s).
    fn atoms(&self) -> Vec<LabeledAtom>;

    /// Apply a representation and coloring to every atom.
    fn set_style(&mut self, style: StyleId, colors: ColorScheme);

    /// Set the viewport background.
    fn set_background(&mut self, background: Background);

    /// (Re-)register the atom click callback on the current model.
    fn enable_picking(&mut self);

    /// Fit the camera to the loaded model.
    fn zoom_to_fit(&mut self);

    /// Add a text label.
    fn add_label(&mut self, label: &LabelSpec);

    /// Remove every label.
    fn remove_labels(&mut self);

    /// Add a cylinder shape.
    fn add_cylinder(&mut self, cylinder: &CylinderSpec);

    /// Remove every shape.
    fn remove_shapes(&mut self);

    /// Start continuous rotation, or stop it with `None`.
    fn set_spin(&mut self, spin: Option<&SpinOptions>);

    /// Redraw.
    fn render(&mut self);

    /// Rasterize the viewport and hand it to the user as `file_name`.
    fn save_snapshot(&mut self, file_name: &str) -> Result<(), MolviewError>;

    /// Release the graphics context. Called once, from dispose.
    fn release(&mut self);
}
