//! Atom picking data, the distance calculator and the two-click
//! measurement state machine.

mod distance;
mod state;

pub use distance::{distance, format_distance, LabeledAtom, Point3};
pub use state::{MeasureEffect, MeasurePhase, MeasurementState};
