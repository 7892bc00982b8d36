//! Drag-select zoom gesture over the main panel.
//!
//! Selections track only the horizontal axis. On release, both edges are
//! inverted through the time scale and snapped to real item timestamps by
//! a centered nearest-index search, so the resulting domain always consists
//! of dataset timestamps and downstream bisection stays exact.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PlotRect, TimeScale, bisect_center_f64};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushPhase {
    Idle,
    Selecting,
    Zoomed,
}

/// Outcome of releasing a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushOutcome {
    /// Empty or degenerate selection; the domain is unchanged.
    Unchanged,
    /// Both edges snapped to item timestamps; apply as the new domain.
    Zoom { domain: (i64, i64) },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBrushController {
    phase: BrushPhase,
    // Phase to fall back to when a release resolves to nothing.
    resume_phase: BrushPhase,
    origin_x: f64,
    current_x: f64,
}

impl Default for ZoomBrushController {
    fn default() -> Self {
        Self {
            phase: BrushPhase::Idle,
            resume_phase: BrushPhase::Idle,
            origin_x: 0.0,
            current_x: 0.0,
        }
    }
}

impl ZoomBrushController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(self) -> BrushPhase {
        self.phase
    }

    /// Current selection extent in pixels, left to right, while selecting.
    #[must_use]
    pub fn selection(self) -> Option<(f64, f64)> {
        match self.phase {
            BrushPhase::Selecting => Some((
                self.origin_x.min(self.current_x),
                self.origin_x.max(self.current_x),
            )),
            _ => None,
        }
    }

    pub fn begin(&mut self, x: f64, plot: PlotRect) {
        let x = x.clamp(plot.left, plot.right);
        if self.phase != BrushPhase::Selecting {
            self.resume_phase = self.phase;
        }
        self.phase = BrushPhase::Selecting;
        self.origin_x = x;
        self.current_x = x;
    }

    pub fn update(&mut self, x: f64, plot: PlotRect) {
        if self.phase == BrushPhase::Selecting {
            self.current_x = x.clamp(plot.left, plot.right);
        }
    }

    /// Releases the selection and resolves it against real data.
    pub fn end(
        &mut self,
        x: f64,
        plot: PlotRect,
        timestamps: &[i64],
        time_scale: &TimeScale,
    ) -> ChartResult<BrushOutcome> {
        if self.phase != BrushPhase::Selecting {
            return Ok(BrushOutcome::Unchanged);
        }
        self.update(x, plot);
        let (left, right) = (
            self.origin_x.min(self.current_x),
            self.origin_x.max(self.current_x),
        );

        if right <= left || timestamps.is_empty() {
            self.phase = self.resume_phase;
            return Ok(BrushOutcome::Unchanged);
        }

        let start_time = time_scale.pixel_to_time(left)?;
        let end_time = time_scale.pixel_to_time(right)?;
        let start_index = bisect_center_f64(timestamps, start_time);
        let end_index = bisect_center_f64(timestamps, end_time);

        match (start_index, end_index) {
            (Some(start), Some(end)) if start != end => {
                let domain = (timestamps[start], timestamps[end]);
                self.phase = BrushPhase::Zoomed;
                debug!(start, end, "brush selection snapped to item indices");
                Ok(BrushOutcome::Zoom { domain })
            }
            // Both edges on the same item would make a degenerate scale.
            _ => {
                self.phase = self.resume_phase;
                Ok(BrushOutcome::Unchanged)
            }
        }
    }

    /// Double-click reset; valid from any phase.
    pub fn reset(&mut self) {
        self.phase = BrushPhase::Idle;
        self.resume_phase = BrushPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushOutcome, BrushPhase, ZoomBrushController};
    use crate::core::{PlotRect, TimeScale};

    fn plot() -> PlotRect {
        PlotRect::new(0.0, 0.0, 1_000.0, 400.0)
    }

    fn scale() -> TimeScale {
        TimeScale::new(0, 99 * 60_000, 0.0, 1_000.0).expect("valid scale")
    }

    fn timestamps() -> Vec<i64> {
        (0..100).map(|i| i * 60_000).collect()
    }

    #[test]
    fn release_snaps_both_edges_to_item_timestamps() {
        let timestamps = timestamps();
        let mut brush = ZoomBrushController::new();
        brush.begin(51.0, plot());
        brush.update(402.0, plot());
        let outcome = brush
            .end(402.0, plot(), &timestamps, &scale())
            .expect("end");

        match outcome {
            BrushOutcome::Zoom { domain } => {
                assert!(timestamps.contains(&domain.0));
                assert!(timestamps.contains(&domain.1));
                assert_eq!(brush.phase(), BrushPhase::Zoomed);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn empty_selection_is_unchanged() {
        let timestamps = timestamps();
        let mut brush = ZoomBrushController::new();
        brush.begin(300.0, plot());
        let outcome = brush
            .end(300.0, plot(), &timestamps, &scale())
            .expect("end");
        assert_eq!(outcome, BrushOutcome::Unchanged);
        assert_eq!(brush.phase(), BrushPhase::Idle);
    }

    #[test]
    fn zero_width_snap_is_unchanged() {
        let timestamps = timestamps();
        let mut brush = ZoomBrushController::new();
        // Two pixels mapping to the same nearest item (index 50 for both;
        // 500.0 would sit exactly on the tie midpoint and snap lower).
        brush.begin(505.0, plot());
        let outcome = brush
            .end(505.5, plot(), &timestamps, &scale())
            .expect("end");
        assert_eq!(outcome, BrushOutcome::Unchanged);
        assert_eq!(brush.phase(), BrushPhase::Idle);
    }

    #[test]
    fn degenerate_release_returns_to_the_prior_phase() {
        let timestamps = timestamps();
        let mut brush = ZoomBrushController::new();
        brush.begin(51.0, plot());
        brush
            .end(402.0, plot(), &timestamps, &scale())
            .expect("end");
        assert_eq!(brush.phase(), BrushPhase::Zoomed);

        // A no-op selection while zoomed must not drop back to Idle.
        brush.begin(505.0, plot());
        let outcome = brush
            .end(505.5, plot(), &timestamps, &scale())
            .expect("end");
        assert_eq!(outcome, BrushOutcome::Unchanged);
        assert_eq!(brush.phase(), BrushPhase::Zoomed);

        brush.reset();
        assert_eq!(brush.phase(), BrushPhase::Idle);
    }

    #[test]
    fn selection_is_clamped_to_the_plot() {
        let mut brush = ZoomBrushController::new();
        brush.begin(-50.0, plot());
        brush.update(2_000.0, plot());
        assert_eq!(brush.selection(), Some((0.0, 1_000.0)));
    }
}
