//! In-memory [`RenderSurface`] that records every call, for tests.
//!
//! The PDB, SDF and XYZ readers below are minimal stand-ins for the
//! library's parsers: they pick out element and coordinates, nothing more.

use std::fmt::Write as _;

use glam::DVec3;

use super::{CylinderSpec, LabelSpec, RenderSurface};
use crate::catalog::StructureFormat;
use crate::error::MolviewError;
use crate::measure::LabeledAtom;
use crate::options::{Background, ColorScheme, SpinOptions, StyleId};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Clear,
    Load(StructureFormat, usize),
    Style(StyleId, ColorScheme),
    Background(Background),
    EnablePicking,
    ZoomToFit,
    AddLabel(String),
    RemoveLabels,
    AddCylinder,
    RemoveShapes,
    Spin(bool),
    Render,
    Snapshot(String),
    Release,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub atoms: Vec<LabeledAtom>,
    pub labels: Vec<LabelSpec>,
    pub cylinders: Vec<CylinderSpec>,
    pub spinning: bool,
    /// Make every `load_structure` fail.
    pub reject_loads: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: &SurfaceCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn label_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::AddLabel(_)))
            .count()
    }

    pub fn reset_calls(&mut self) {
        self.calls.clear();
    }
}

fn parse_xyz(data: &str) -> Result<Vec<LabeledAtom>, MolviewError> {
    let mut lines = data.lines();
    let declared: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or_else(|| MolviewError::StructureLoad("bad xyz header".into()))?;
    let atoms = lines
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let f: Vec<_> = line.split_whitespace().collect();
            let coord = |i: usize| {
                f.get(i).and_then(|v| v.parse::<f64>().ok()).ok_or_else(
                    || MolviewError::StructureLoad(format!("bad xyz line {line:?}")),
                )
            };
            Ok(LabeledAtom::new(
                f.first().copied().unwrap_or_default(),
                DVec3::new(coord(1)?, coord(2)?, coord(3)?),
            ))
        })
        .collect::<Result<Vec<_>, MolviewError>>()?;
    if atoms.len() != declared {
        return Err(MolviewError::StructureLoad("xyz atom count mismatch".into()));
    }
    Ok(atoms)
}

fn parse_pdb(data: &str) -> Vec<LabeledAtom> {
    data.lines()
        .filter(|l| l.starts_with("ATOM") || l.starts_with("HETATM"))
        .filter_map(|line| {
            let col = |a: usize, b: usize| line.get(a..b).map(str::trim);
            let x = col(30, 38)?.parse().ok()?;
            let y = col(38, 46)?.parse().ok()?;
            let z = col(46, 54)?.parse().ok()?;
            let mut atom = LabeledAtom::new(col(76, 78)?, DVec3::new(x, y, z));
            atom.serial = col(6, 11).and_then(|s| s.parse().ok());
            atom.resn = col(17, 20).map(str::to_owned);
            atom.chain = col(21, 22).map(str::to_owned);
            atom.resi = col(22, 26).and_then(|s| s.parse().ok());
            Some(atom)
        })
        .collect()
}

fn parse_sdf(data: &str) -> Vec<LabeledAtom> {
    let mut lines = data.lines().skip(3);
    let count: usize = lines
        .next()
        .and_then(|l| l.get(0..3))
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    lines
        .take(count)
        .filter_map(|line| {
            let f: Vec<_> = line.split_whitespace().collect();
            let p = |i: usize| f.get(i).and_then(|v| v.parse::<f64>().ok());
            Some(LabeledAtom::new(*f.get(3)?, DVec3::new(p(0)?, p(1)?, p(2)?)))
        })
        .collect()
}

/// PDB text with `n` atoms; every third atom is a hydrogen.
pub(crate) fn pdb_with_atoms(n: usize) -> String {
    let mut out = String::from("HEADER    TEST STRUCTURE\n");
    for i in 0..n {
        let elem = if i % 3 == 2 { "H" } else { "C" };
        let _ = writeln!(
            out,
            "ATOM  {:>5} {:<4} ALA A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00          {:>2}",
            i + 1,
            elem,
            i / 10 + 1,
            i as f64 * 1.5,
            0.0,
            0.0,
            elem
        );
    }
    out.push_str("END\n");
    out
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.atoms.clear();
        self.labels.clear();
        self.cylinders.clear();
        self.calls.push(SurfaceCall::Clear);
    }

    fn load_structure(
        &mut self,
        data: &str,
        format: StructureFormat,
    ) -> Result<usize, MolviewError> {
        if self.reject_loads {
            return Err(MolviewError::StructureLoad("rejected".into()));
        }
        let atoms = match format {
            StructureFormat::Xyz => parse_xyz(data)?,
            StructureFormat::Pdb => parse_pdb(data),
            StructureFormat::Sdf => parse_sdf(data),
        };
        let n = atoms.len();
        self.atoms.extend(atoms);
        self.calls.push(SurfaceCall::Load(format, n));
        Ok(n)
    }

    fn atoms(&self) -> Vec<LabeledAtom> {
        self.atoms.clone()
    }

    fn set_style(&mut self, style: StyleId, colors: ColorScheme) {
        self.calls.push(SurfaceCall::Style(style, colors));
    }

    fn set_background(&mut self, background: Background) {
        self.calls.push(SurfaceCall::Background(background));
    }

    fn enable_picking(&mut self) {
        self.calls.push(SurfaceCall::EnablePicking);
    }

    fn zoom_to_fit(&mut self) {
        self.calls.push(SurfaceCall::ZoomToFit);
    }

    fn add_label(&mut self, label: &LabelSpec) {
        self.labels.push(label.clone());
        self.calls.push(SurfaceCall::AddLabel(label.text.clone()));
    }

    fn remove_labels(&mut self) {
        self.labels.clear();
        self.calls.push(SurfaceCall::RemoveLabels);
    }

    fn add_cylinder(&mut self, cylinder: &CylinderSpec) {
        self.cylinders.push(cylinder.clone());
        self.calls.push(SurfaceCall::AddCylinder);
    }

    fn remove_shapes(&mut self) {
        self.cylinders.clear();
        self.calls.push(SurfaceCall::RemoveShapes);
    }

    fn set_spin(&mut self, spin: Option<&SpinOptions>) {
        self.spinning = spin.is_some();
        self.calls.push(SurfaceCall::Spin(self.spinning));
    }

    fn render(&mut self) {
        self.calls.push(SurfaceCall::Render);
    }

    fn save_snapshot(&mut self, file_name: &str) -> Result<(), MolviewError> {
        self.calls.push(SurfaceCall::Snapshot(file_name.to_owned()));
        Ok(())
    }

    fn release(&mut self) {
        self.calls.push(SurfaceCall::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pdb_parses() {
        let atoms = parse_pdb(&pdb_with_atoms(12));
        assert_eq!(atoms.len(), 12);
        assert_eq!(atoms[2].elem, "H");
        assert_eq!(atoms[3].position.x, 4.5);
        assert_eq!(atoms[0].resn.as_deref(), Some("ALA"));
    }

    #[test]
    fn sdf_counts_line() {
        let sdf = "2244\n  -OEChem-\n\n  2  1  0     0  0  0  0  0  0999 V2000\n    1.0000    0.0000    0.0000 O   0  0\n    0.0000    0.0000    0.0000 C   0  0\nM  END\n$$$$\n";
        let atoms = parse_sdf(sdf);
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].elem, "O");
    }
}
