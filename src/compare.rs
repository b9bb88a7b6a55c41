//! Side-by-side comparison of two presets.
//!
//! Each panel is a full [`ViewerSession`] with its own surface and
//! measurement state. Nothing is shared between them; operations that
//! affect both panels are simply issued twice.

use std::future::Future;

use crate::catalog::MoleculeDescriptor;
use crate::error::MolviewError;
use crate::options::ViewerOptions;
use crate::session::{LoadStart, ViewerSession};
use crate::surface::RenderSurface;

/// Which comparison panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left panel.
    Left,
    /// Right panel.
    Right,
}

/// Side-by-side facts about the two displayed presets.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    /// Preset in the left panel.
    pub left: &'static MoleculeDescriptor,
    /// Preset in the right panel.
    pub right: &'static MoleculeDescriptor,
}

impl ComparisonSummary {
    /// Right weight minus left weight, g/mol.
    #[must_use]
    pub fn weight_difference(&self) -> f64 {
        self.right.weight - self.left.weight
    }
}

/// Two independent viewer sessions.
#[derive(Debug)]
pub struct ComparisonView<S: RenderSurface> {
    left: ViewerSession<S>,
    right: ViewerSession<S>,
}

impl<S: RenderSurface> ComparisonView<S> {
    /// Both panels start from the same options.
    #[must_use]
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            left: ViewerSession::new(options.clone()),
            right: ViewerSession::new(options.clone()),
        }
    }

    /// Initialize both panels, left first.
    ///
    /// # Errors
    ///
    /// The first panel that fails to become ready.
    #[allow(clippy::future_not_send)]
    pub async fn initialize<L, R>(
        &mut self,
        left_ready: L,
        right_ready: R,
    ) -> Result<(), MolviewError>
    where
        L: Future<Output = Result<S, MolviewError>>,
        R: Future<Output = Result<S, MolviewError>>,
    {
        self.left.initialize(left_ready).await?;
        self.right.initialize(right_ready).await
    }

    /// One panel.
    #[must_use]
    pub fn session(&self, side: Side) -> &ViewerSession<S> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// One panel, mutably.
    pub fn session_mut(&mut self, side: Side) -> &mut ViewerSession<S> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Load a preset into each panel.
    ///
    /// # Errors
    ///
    /// Readiness errors from either panel.
    pub fn load_pair(
        &mut self,
        left_id: &str,
        right_id: &str,
    ) -> Result<(LoadStart, LoadStart), MolviewError> {
        let left = self.left.load_preset(left_id)?;
        let right = self.right.load_preset(right_id)?;
        Ok((left, right))
    }

    /// Apply one representation to both panels.
    ///
    /// # Errors
    ///
    /// Readiness errors from either panel.
    pub fn set_style(&mut self, id: &str) -> Result<(), MolviewError> {
        self.left.set_style(id)?;
        self.right.set_style(id)
    }

    /// Names, formulas and weight difference, once both panels show a
    /// preset.
    #[must_use]
    pub fn summary(&self) -> Option<ComparisonSummary> {
        Some(ComparisonSummary {
            left: self.left.current_preset()?,
            right: self.right.current_preset()?,
        })
    }

    /// Release both surfaces. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.left.dispose();
        self.right.dispose();
    }
}
