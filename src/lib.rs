// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Browser molecular viewer built on top of an external rendering library.
//!
//! molview does not render anything itself. It owns the view state that sits
//! in front of a 3D molecular rendering surface (3Dmol.js in the browser):
//! which molecule is shown, in which style and colors, whether the model
//! spins or carries labels, and the two-click distance measurement.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - one per mounted viewer, owns the surface
//! - [`surface::RenderSurface`] - the seam to the rendering library
//! - [`catalog::Catalog`] - built-in preset molecules
//! - [`measure`] - distance calculator and measurement state machine
//! - [`input::KeyDispatcher`] - keyboard shortcuts
//! - [`search::SearchGateway`] - PDB id validation
//! - [`compare::ComparisonView`] - two independent sessions side by side
//! - [`options::ViewerOptions`] - TOML-backed configuration
//!
//! # Data flow
//!
//! User input (key press, click, form submit) becomes a
//! [`ViewerCommand`], which the session executes against its surface. Remote
//! structures are fetched outside the session: a load hands back a
//! [`session::LoadTicket`], the host fetches the text (see [`fetch`]) and
//! passes it to [`session::ViewerSession::complete_load`]. Tickets carry the
//! issuing session's id and a generation number: only the most recent
//! request of that session is applied, and only once.

pub mod catalog;
pub mod command;
pub mod compare;
pub mod error;
pub mod fetch;
pub mod input;
pub mod measure;
pub mod options;
pub mod search;
pub mod session;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;

pub use command::ViewerCommand;
pub use error::MolviewError;
pub use session::ViewerSession;
