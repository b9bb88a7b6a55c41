use super::distance::{distance, LabeledAtom};

/// Where the measurement machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurePhase {
    /// Measure mode off.
    Idle,
    /// Measure mode on, waiting for the first atom.
    Armed,
    /// First atom picked, waiting for the second.
    FirstSelected,
}

/// Side effect the owner of the rendering surface has to perform after a
/// transition.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureEffect {
    /// Nothing to draw or remove.
    None,
    /// The first atom of a pair was recorded; any previous indicator is
    /// stale.
    FirstPointSet,
    /// A measurement completed: draw an indicator between the two atoms.
    DrawIndicator {
        /// First picked atom.
        from: LabeledAtom,
        /// Second picked atom.
        to: LabeledAtom,
        /// Distance between them.
        distance: f64,
    },
    /// Remove any drawn indicator.
    RemoveIndicator,
}

/// One-shot two-click distance measurement.
///
/// Enabling arms the machine; the first click records an atom; the second
/// click computes the distance and turns measure mode back off. A new
/// measurement needs re-arming.
///
/// A completed distance always comes with an empty first point, and a
/// pending first point only exists while the mode is on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementState {
    mode: bool,
    first_point: Option<LabeledAtom>,
    distance: Option<f64>,
}

impl MeasurementState {
    /// Idle state: mode off, nothing selected, no distance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether measure mode is on.
    #[must_use]
    pub fn mode(&self) -> bool {
        self.mode
    }

    /// The pending first atom, if one was picked.
    #[must_use]
    pub fn first_point(&self) -> Option<&LabeledAtom> {
        self.first_point.as_ref()
    }

    /// Distance of the last completed measurement.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MeasurePhase {
        match (self.mode, &self.first_point) {
            (false, _) => MeasurePhase::Idle,
            (true, None) => MeasurePhase::Armed,
            (true, Some(_)) => MeasurePhase::FirstSelected,
        }
    }

    /// `Idle -> Armed`. No effect in other phases.
    pub fn enable(&mut self) {
        if !self.mode {
            log::debug!("measure mode armed");
        }
        self.mode = true;
    }

    /// Any phase `-> Idle`, dropping a pending first atom.
    pub fn disable(&mut self) {
        self.mode = false;
        self.first_point = None;
    }

    /// Feed a picked atom into the machine.
    pub fn on_point_clicked(&mut self, atom: &LabeledAtom) -> MeasureEffect {
        match self.phase() {
            MeasurePhase::Idle => MeasureEffect::None,
            MeasurePhase::Armed => {
                // Starting a new pair retires the previous result.
                self.distance = None;
                self.first_point = Some(atom.clone());
                MeasureEffect::FirstPointSet
            }
            MeasurePhase::FirstSelected => {
                let Some(from) = self.first_point.take() else {
                    return MeasureEffect::None;
                };
                let d = distance(&from, atom);
                self.distance = Some(d);
                self.mode = false;
                log::debug!("measured {d} between {} and {}", from.elem, atom.elem);
                MeasureEffect::DrawIndicator {
                    from,
                    to: atom.clone(),
                    distance: d,
                }
            }
        }
    }

    /// Forget the distance and any pending first atom. Mode is unchanged.
    pub fn clear(&mut self) -> MeasureEffect {
        self.distance = None;
        self.first_point = None;
        MeasureEffect::RemoveIndicator
    }

    /// Back to the initial idle state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
