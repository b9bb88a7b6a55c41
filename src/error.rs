//! Crate-level error types.

use std::fmt;

/// Errors produced by the molview crate.
#[derive(Debug)]
pub enum MolviewError {
    /// Search input is not exactly four ASCII alphanumeric characters.
    /// Carries the normalized input.
    InvalidFormat(String),
    /// The remote database answered, but the structure has no atoms.
    /// Carries the requested identifier.
    NotFound(String),
    /// A rendering-surface call was made before the surface became ready.
    NotReady,
    /// The session has been disposed and owns no surface anymore.
    Disposed,
    /// The external rendering library never became available.
    LibraryUnavailable(String),
    /// The rendering surface rejected structure data.
    StructureLoad(String),
    /// Transport-level failure while fetching a remote structure.
    Fetch(String),
    /// A browser API call threw.
    Browser(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for MolviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(input) => {
                write!(f, "invalid structure id {input:?}: expected 4 alphanumeric characters")
            }
            Self::NotFound(id) => write!(f, "structure {id} not found"),
            Self::NotReady => write!(f, "rendering surface is not ready"),
            Self::Disposed => write!(f, "viewer session has been disposed"),
            Self::LibraryUnavailable(msg) => {
                write!(f, "rendering library unavailable: {msg}")
            }
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::Fetch(msg) => write!(f, "fetch error: {msg}"),
            Self::Browser(msg) => write!(f, "browser error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for MolviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl MolviewError {
    /// Whether this error is meant to be shown to the user (as opposed to
    /// being logged only).
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_) | Self::NotFound(_) | Self::Fetch(_)
        )
    }
}
