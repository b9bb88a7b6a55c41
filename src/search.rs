//! Validation in front of remote structure lookups.
//!
//! The only independent logic here is the format check (exactly four ASCII
//! alphanumerics after trimming and uppercasing) and picking the message the
//! user sees when a lookup fails.

use crate::catalog::RemoteId;
use crate::error::MolviewError;

/// Identifiers offered as one-click examples next to the search box.
pub const EXAMPLE_IDS: [&str; 4] = ["1CRN", "1UBQ", "4HHB", "1BNA"];

/// Length of an RCSB PDB code.
const PDB_CODE_LEN: usize = 4;

/// Stateless validator for user-typed PDB ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchGateway;

impl SearchGateway {
    /// Trim surrounding whitespace and uppercase ASCII letters.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_ascii_uppercase()
    }

    /// Normalize and check the input, returning the remote id to fetch.
    pub fn validate(raw: &str) -> Result<RemoteId, MolviewError> {
        let code = Self::normalize(raw);
        if code.len() == PDB_CODE_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            Ok(RemoteId::Pdb(code))
        } else {
            log::debug!("rejected search input {raw:?}");
            Err(MolviewError::InvalidFormat(code))
        }
    }

    /// Message shown to the user for a failed lookup.
    #[must_use]
    pub fn message_for(error: &MolviewError) -> String {
        match error {
            MolviewError::InvalidFormat(_) => {
                "Please enter a valid 4-character PDB ID (e.g. 1CRN).".into()
            }
            MolviewError::NotFound(id) => {
                format!("Structure \"{id}\" was not found. Please check the ID and try again.")
            }
            MolviewError::Fetch(_) => {
                "Could not reach the structure database. Please try again.".into()
            }
            _ => "Something went wrong while loading the structure.".into(),
        }
    }
}
