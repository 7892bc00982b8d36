use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, ValueScale};

/// In-memory viewport state for one rendering session.
///
/// Mutated exclusively by the zoom/brush gesture paths. The generation
/// counter versions the viewport: transition-end continuations compare
/// against it and discard work scheduled under a superseded viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    domain: (i64, i64),
    zoom_active: bool,
    cull_window: Option<(usize, usize)>,
    generation: u64,
}

impl ViewportState {
    #[must_use]
    pub fn new(full_domain: (i64, i64)) -> Self {
        Self {
            domain: full_domain,
            zoom_active: false,
            cull_window: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn domain(self) -> (i64, i64) {
        self.domain
    }

    #[must_use]
    pub fn zoom_active(self) -> bool {
        self.zoom_active
    }

    #[must_use]
    pub fn cull_window(self) -> Option<(usize, usize)> {
        self.cull_window
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }

    /// Applies a zoom selection; keeps the previous cull window so the
    /// animated transition renders from a superset of the new domain.
    pub fn apply_zoom(&mut self, domain: (i64, i64)) -> u64 {
        self.domain = domain;
        self.zoom_active = true;
        self.bump_generation()
    }

    /// Resets to the full extent and clears windowed culling.
    pub fn reset(&mut self, full_domain: (i64, i64)) -> u64 {
        self.domain = full_domain;
        self.zoom_active = false;
        self.cull_window = None;
        self.bump_generation()
    }

    pub fn set_cull_window(&mut self, window: Option<(usize, usize)>) {
        self.cull_window = window;
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Shared scale objects for one mount.
///
/// Constructed once, then mutated in place on every render pass so any
/// in-flight animated transition reads consistent endpoints. Only the scale
/// manager writes this; panels are read-only consumers within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    pub time: TimeScale,
    pub value: ValueScale,
    pub scrubber: TimeScale,
}
