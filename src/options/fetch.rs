use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Remote structure database endpoints. `{id}` is replaced by the
/// identifier (uppercase PDB code or PubChem compound id).
pub struct FetchOptions {
    /// RCSB PDB download URL template.
    pub pdb_url: String,
    /// PubChem 3D SDF download URL template.
    pub pubchem_url: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            pdb_url: "https://files.rcsb.org/download/{id}.pdb".into(),
            pubchem_url: "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid/{id}/SDF?record_type=3d".into(),
        }
    }
}
