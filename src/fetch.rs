//! Remote structure download.
//!
//! The session never performs I/O itself. A remote load hands out a
//! [`LoadTicket`](crate::session::LoadTicket); the host resolves it with
//! [`fetch_blocking`] (native, feature `fetch`) or
//! `web::fetch_text` (browser, feature `web`) and passes the text back.

use crate::catalog::{RemoteId, StructureFormat};
#[cfg(feature = "fetch")]
use crate::error::MolviewError;
use crate::options::FetchOptions;

/// Download URL for a remote id.
#[must_use]
pub fn remote_url(remote: &RemoteId, options: &FetchOptions) -> String {
    match remote {
        RemoteId::Pdb(code) => options.pdb_url.replace("{id}", code),
        RemoteId::PubChem(cid) => {
            options.pubchem_url.replace("{id}", &cid.to_string())
        }
    }
}

/// Format of the text served for a remote id.
#[must_use]
pub fn remote_format(remote: &RemoteId) -> StructureFormat {
    match remote {
        RemoteId::Pdb(_) => StructureFormat::Pdb,
        RemoteId::PubChem(_) => StructureFormat::Sdf,
    }
}

/// Suggested file name when saving a downloaded structure.
#[must_use]
pub fn file_name(remote: &RemoteId) -> String {
    match remote {
        RemoteId::Pdb(code) => format!("{}.pdb", code.to_lowercase()),
        RemoteId::PubChem(cid) => format!("cid_{cid}.sdf"),
    }
}

/// Download a structure, blocking the calling thread.
///
/// HTTP 404 maps to [`MolviewError::NotFound`]; everything else that goes
/// wrong on the wire is [`MolviewError::Fetch`].
#[cfg(feature = "fetch")]
pub fn fetch_blocking(
    remote: &RemoteId,
    options: &FetchOptions,
) -> Result<String, MolviewError> {
    let url = remote_url(remote, options);
    log::info!("Downloading {} from {url}...", remote.label());

    let response = ureq::get(&url).call().map_err(|e| match e {
        ureq::Error::StatusCode(404) => MolviewError::NotFound(remote.label()),
        other => MolviewError::Fetch(format!(
            "failed to download {}: {other}",
            remote.label()
        )),
    })?;

    response.into_body().read_to_string().map_err(|e| {
        MolviewError::Fetch(format!("failed to read response: {e}"))
    })
}
