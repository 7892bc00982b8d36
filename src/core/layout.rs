use serde::{Deserialize, Serialize};

use crate::core::{PlotRect, Viewport};
use crate::error::{ChartError, ChartResult};

pub const CONTINUOUS_STROKE_WIDTH: f64 = 1.5;
pub const LANE_HEIGHT: f64 = 50.0;
pub const LANE_GAP: f64 = 20.0;
pub const MARKER_RADIUS: f64 = 3.0;
pub const FOCUS_MARKER_RADIUS: f64 = 4.0;
pub const SCRUBBER_MARGIN_TOP: f64 = 30.0;
pub const SCRUBBER_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|margin| margin.is_finite() && *margin >= 0.0)
    }
}

/// Pixel geometry for every panel, derived once per mount from the viewport,
/// the margins and the number of discrete swimlanes.
///
/// Vertically, top to bottom: continuous plot, lane gap, discrete lanes,
/// time axis baseline, scrubber margin, scrubber strip, bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub viewport: Viewport,
    pub continuous: PlotRect,
    pub discrete: PlotRect,
    pub lane_count: usize,
    /// Y of the time axis baseline under the discrete lanes.
    pub axis_y: f64,
    pub scrubber: PlotRect,
}

impl PanelLayout {
    pub fn compute(viewport: Viewport, margins: Margins, lane_count: usize) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !margins.is_valid() {
            return Err(ChartError::InvalidData(
                "margins must be finite and >= 0".to_owned(),
            ));
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let left = margins.left;
        let right = width - margins.right;

        let scrubber_bottom = height - margins.bottom;
        let scrubber_top = scrubber_bottom - SCRUBBER_HEIGHT;
        let axis_y = scrubber_top - SCRUBBER_MARGIN_TOP;
        let discrete_bottom = axis_y;
        let discrete_top = discrete_bottom - lane_count as f64 * LANE_HEIGHT;
        let continuous_bottom = discrete_top - LANE_GAP;

        let continuous = PlotRect::new(left, margins.top, right, continuous_bottom);
        let discrete = PlotRect::new(left, discrete_top, right, discrete_bottom);
        let scrubber = PlotRect::new(left, scrubber_top, right, scrubber_bottom);

        if right <= left || continuous_bottom <= margins.top {
            return Err(ChartError::InvalidData(
                "viewport is too small for the configured margins and lanes".to_owned(),
            ));
        }

        Ok(Self {
            viewport,
            continuous,
            discrete,
            lane_count,
            axis_y,
            scrubber,
        })
    }

    /// Vertical center of one swimlane; lane 0 sits at the bottom of the
    /// discrete block and lanes stack upward.
    #[must_use]
    pub fn lane_center(&self, lane_index: usize) -> f64 {
        self.discrete.bottom - (lane_index as f64 + 0.5) * LANE_HEIGHT
    }
}
