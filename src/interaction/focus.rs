//! Pointer focus tracking over the main panel.
//!
//! Hit-testing runs a centered bisection over the full, unfiltered
//! timestamp sequence; filtering by domain would make the tooltip skip to
//! the wrong neighbor near the viewport edges.

use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, bisect_center_f64};
use crate::error::ChartResult;

/// Resolved focus target for a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusSnap {
    /// Index of the nearest item in the dataset.
    pub index: usize,
    /// Pixel position of that item's timestamp on the main time scale.
    pub snapped_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusTooltipController {
    visible: bool,
}

impl FocusTooltipController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.visible
    }

    /// Resolves the nearest item for a pointer at `x`. Returns `None` on an
    /// empty dataset.
    pub fn pointer_move(
        &mut self,
        x: f64,
        timestamps: &[i64],
        time_scale: &TimeScale,
    ) -> ChartResult<Option<FocusSnap>> {
        let query = time_scale.pixel_to_time(x)?;
        let Some(index) = bisect_center_f64(timestamps, query) else {
            return Ok(None);
        };

        self.visible = true;
        Ok(Some(FocusSnap {
            index,
            snapped_x: time_scale.time_to_pixel(timestamps[index])?,
        }))
    }

    /// Hides the focus layer; the caller emits the leave notification.
    pub fn pointer_leave(&mut self) {
        self.visible = false;
    }
}
