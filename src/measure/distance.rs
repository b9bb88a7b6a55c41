use std::fmt::Write as _;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A point in model space, in Angstroms.
pub type Point3 = DVec3;

/// An atom as reported by the rendering surface.
///
/// The viewer never builds these itself outside of tests; they arrive from
/// the surface's click callback or atom listing and are only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAtom", into = "RawAtom")]
pub struct LabeledAtom {
    /// Position in Angstroms.
    pub position: Point3,
    /// Element symbol (`"C"`, `"H"`, `"Fe"`).
    pub elem: String,
    /// Residue name, if the format carries one.
    pub resn: Option<String>,
    /// Residue sequence number.
    pub resi: Option<i32>,
    /// Chain identifier.
    pub chain: Option<String>,
    /// Atom serial number.
    pub serial: Option<u32>,
}

impl LabeledAtom {
    /// Atom with only a position and an element.
    #[must_use]
    pub fn new(elem: impl Into<String>, position: Point3) -> Self {
        Self {
            position,
            elem: elem.into(),
            resn: None,
            resi: None,
            chain: None,
            serial: None,
        }
    }

    /// Whether the element is hydrogen (or deuterium).
    #[must_use]
    pub fn is_hydrogen(&self) -> bool {
        let elem = self.elem.trim();
        elem.eq_ignore_ascii_case("H") || elem.eq_ignore_ascii_case("D")
    }

    /// Short description for the selected-atom card, e.g. `C #12 ALA 42:A`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.elem.clone();
        if let Some(serial) = self.serial {
            let _ = write!(out, " #{serial}");
        }
        if let Some(resn) = &self.resn {
            let _ = write!(out, " {resn}");
            if let Some(resi) = self.resi {
                let _ = write!(out, " {resi}");
            }
        }
        if let Some(chain) = self.chain.as_deref().filter(|c| !c.is_empty()) {
            let _ = write!(out, ":{chain}");
        }
        out
    }
}

/// Wire shape of an atom object: the library reports coordinates as flat
/// `x`, `y`, `z` fields next to the annotations.
#[derive(Serialize, Deserialize)]
struct RawAtom {
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    elem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resi: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    serial: Option<u32>,
}

impl From<RawAtom> for LabeledAtom {
    fn from(raw: RawAtom) -> Self {
        Self {
            position: DVec3::new(raw.x, raw.y, raw.z),
            elem: raw.elem,
            resn: raw.resn,
            resi: raw.resi,
            chain: raw.chain,
            serial: raw.serial,
        }
    }
}

impl From<LabeledAtom> for RawAtom {
    fn from(atom: LabeledAtom) -> Self {
        Self {
            x: atom.position.x,
            y: atom.position.y,
            z: atom.position.z,
            elem: atom.elem,
            resn: atom.resn,
            resi: atom.resi,
            chain: atom.chain,
            serial: atom.serial,
        }
    }
}

/// Euclidean distance between two atoms, in the surface's units.
///
/// No rounding happens here; see [`format_distance`] for display.
#[must_use]
pub fn distance(a: &LabeledAtom, b: &LabeledAtom) -> f64 {
    let d = b.position - a.position;
    (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
}

/// Display form of a distance: three decimals and the Angstrom sign.
#[must_use]
pub fn format_distance(d: f64) -> String {
    format!("{d:.3} Å")
}
