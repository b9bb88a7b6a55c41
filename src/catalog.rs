//! Built-in preset molecules.
//!
//! The catalog is static configuration: four small molecules, three of which
//! are fetched from PubChem and one (`ethanol`) that ships as inline XYZ data
//! so the viewer has something to show without network access.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Text format of structure data handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureFormat {
    /// Protein Data Bank flat file.
    Pdb,
    /// MDL structure-data file (PubChem 3D conformers).
    Sdf,
    /// Plain XYZ coordinates.
    Xyz,
}

impl StructureFormat {
    /// Format name as understood by the rendering library.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdb => "pdb",
            Self::Sdf => "sdf",
            Self::Xyz => "xyz",
        }
    }
}

/// Identifier of a structure in a public remote database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteId {
    /// Four-character RCSB PDB code, stored uppercase.
    Pdb(String),
    /// PubChem compound id.
    PubChem(u32),
}

impl RemoteId {
    /// Short human-readable identifier (`1CRN`, `CID 2519`).
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Pdb(code) => code.clone(),
            Self::PubChem(cid) => format!("CID {cid}"),
        }
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdb(code) => write!(f, "pdb:{code}"),
            Self::PubChem(cid) => write!(f, "cid:{cid}"),
        }
    }
}

/// Where a preset's structure comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// Fetch from a remote database.
    Remote(RemoteId),
    /// Use the catalog's inline fallback structure.
    Inline,
}

/// One preset molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeDescriptor {
    /// Internal unique key (`"caffeine"`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Remote identifier or the inline sentinel.
    pub source: StructureSource,
    /// Chemical formula, display string with subscripts.
    pub formula: &'static str,
    /// Molecular weight in g/mol.
    pub weight: f64,
    /// One-line description for the info card.
    pub description: &'static str,
}

impl MoleculeDescriptor {
    /// Whether this preset uses the inline fallback structure.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.source, StructureSource::Inline)
    }
}

/// Structure text bundled with the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineStructure {
    /// Raw structure text.
    pub data: &'static str,
    /// Format of `data`.
    pub format: StructureFormat,
}

/// Ethanol, CH3-CH2-OH, 9 atoms.
const ETHANOL_XYZ: &str = "9
ethanol
C    1.1879   -0.3829    0.0000
C    0.0000    0.5526    0.0000
O   -1.1867   -0.2472    0.0000
H    2.1232    0.1782    0.0000
H    1.1586   -1.0216    0.8850
H    1.1586   -1.0216   -0.8850
H    0.0354    1.1950    0.8900
H    0.0354    1.1950   -0.8900
H   -1.9308    0.3613    0.0000
";

/// Read-only table of preset molecules, indexed by id.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<MoleculeDescriptor>,
    index: FxHashMap<&'static str, usize>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(vec![
        MoleculeDescriptor {
            id: "caffeine",
            name: "Caffeine",
            source: StructureSource::Remote(RemoteId::PubChem(2519)),
            formula: "C₈H₁₀N₄O₂",
            weight: 194.19,
            description: "Central nervous system stimulant found in coffee and tea.",
        },
        MoleculeDescriptor {
            id: "aspirin",
            name: "Aspirin",
            source: StructureSource::Remote(RemoteId::PubChem(2244)),
            formula: "C₉H₈O₄",
            weight: 180.16,
            description: "Acetylsalicylic acid, a common analgesic and anti-inflammatory.",
        },
        MoleculeDescriptor {
            id: "glucose",
            name: "Glucose",
            source: StructureSource::Remote(RemoteId::PubChem(5793)),
            formula: "C₆H₁₂O₆",
            weight: 180.16,
            description: "Simple sugar and primary energy source of living cells.",
        },
        MoleculeDescriptor {
            id: "ethanol",
            name: "Ethanol",
            source: StructureSource::Inline,
            formula: "C₂H₆O",
            weight: 46.07,
            description: "Two-carbon alcohol; bundled so it loads without a network request.",
        },
    ])
});

impl Catalog {
    /// Build a catalog from entries. Later duplicates of an id are ignored.
    #[must_use]
    pub fn new(entries: Vec<MoleculeDescriptor>) -> Self {
        let mut index = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            let _ = index.entry(entry.id).or_insert(i);
        }
        Self { entries, index }
    }

    /// The built-in preset table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Look up a preset by id.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&MoleculeDescriptor> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Preset at `index` in catalog order (used by the `1`-`4` keys).
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&MoleculeDescriptor> {
        self.entries.get(index)
    }

    /// All presets in catalog order.
    #[must_use]
    pub fn presets(&self) -> &[MoleculeDescriptor] {
        &self.entries
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fallback structure used by presets with [`StructureSource::Inline`].
    #[must_use]
    pub fn inline_structure(&self) -> InlineStructure {
        InlineStructure {
            data: ETHANOL_XYZ,
            format: StructureFormat::Xyz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caffeine_descriptor() {
        let caffeine = Catalog::builtin().lookup("caffeine").unwrap();
        assert_eq!(caffeine.formula, "C₈H₁₀N₄O₂");
        assert_eq!(caffeine.weight, 194.19);
        assert_eq!(
            caffeine.source,
            StructureSource::Remote(RemoteId::PubChem(2519))
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(Catalog::builtin().lookup("unknown").is_none());
    }

    #[test]
    fn presets_in_key_order() {
        let ids: Vec<_> =
            Catalog::builtin().presets().iter().map(|m| m.id).collect();
        assert_eq!(ids, ["caffeine", "aspirin", "glucose", "ethanol"]);
        assert_eq!(Catalog::builtin().by_index(3).unwrap().id, "ethanol");
        assert!(Catalog::builtin().by_index(4).is_none());
    }

    #[test]
    fn only_ethanol_is_inline() {
        let inline: Vec<_> = Catalog::builtin()
            .presets()
            .iter()
            .filter(|m| m.is_inline())
            .map(|m| m.id)
            .collect();
        assert_eq!(inline, ["ethanol"]);
    }

    #[test]
    fn inline_structure_has_nine_atoms() {
        let inline = Catalog::builtin().inline_structure();
        assert_eq!(inline.format, StructureFormat::Xyz);
        let header: usize =
            inline.data.lines().next().unwrap().trim().parse().unwrap();
        let atom_lines = inline.data.lines().skip(2).count();
        assert_eq!(header, 9);
        assert_eq!(atom_lines, 9);
    }

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let first = Catalog::builtin().presets()[0].clone();
        let mut second = first.clone();
        second.name = "Shadow";
        let catalog = Catalog::new(vec![first, second]);
        assert_eq!(catalog.lookup("caffeine").unwrap().name, "Caffeine");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn remote_id_labels() {
        assert_eq!(RemoteId::Pdb("1CRN".into()).label(), "1CRN");
        assert_eq!(RemoteId::PubChem(2244).label(), "CID 2244");
        assert_eq!(RemoteId::PubChem(2244).to_string(), "cid:2244");
    }
}
