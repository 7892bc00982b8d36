use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Time axis model over epoch-millisecond timestamps.
///
/// `full_*` tracks the raw data extent, `visible_*` the current viewport
/// domain. The pixel range is set from panel layout and kept alongside the
/// domain so every consumer maps through identical endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    full_start: i64,
    full_end: i64,
    visible_start: i64,
    visible_end: i64,
    pixel_start: f64,
    pixel_end: f64,
}

impl TimeScale {
    /// Creates a scale with matching full and visible domains.
    pub fn new(start: i64, end: i64, pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        if start >= end {
            return Err(ChartError::InvalidData(
                "time scale domain must be a non-empty ascending interval".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start >= pixel_end {
            return Err(ChartError::InvalidData(
                "time scale pixel range must be finite and ascending".to_owned(),
            ));
        }

        Ok(Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
            pixel_start,
            pixel_end,
        })
    }

    /// Fits the full domain from a sorted timestamp sequence.
    pub fn from_timestamps(
        timestamps: &[i64],
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        let (&first, &last) = match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ChartError::InvalidData(
                    "time scale cannot be built from empty data".to_owned(),
                ));
            }
        };
        // A single-item dataset still needs a non-degenerate domain.
        let end = if last > first { last } else { first + 1 };
        Self::new(first, end, pixel_start, pixel_end)
    }

    #[must_use]
    pub fn full_extent(self) -> (i64, i64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn domain(self) -> (i64, i64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    #[must_use]
    pub fn is_full_extent(self) -> bool {
        self.visible_start == self.full_start && self.visible_end == self.full_end
    }

    /// Narrows the visible domain. The new domain is clamped to the full
    /// extent so zoom can never escape the data.
    pub fn set_visible_domain(&mut self, start: i64, end: i64) -> ChartResult<()> {
        if start >= end {
            return Err(ChartError::InvalidData(
                "visible domain must be a non-empty ascending interval".to_owned(),
            ));
        }
        self.visible_start = start.max(self.full_start);
        self.visible_end = end.min(self.full_end);
        if self.visible_start >= self.visible_end {
            self.visible_start = self.full_start;
            self.visible_end = self.full_end;
        }
        Ok(())
    }

    pub fn reset_visible_to_full(&mut self) {
        self.visible_start = self.full_start;
        self.visible_end = self.full_end;
    }

    /// Updates the pixel range after a relayout without touching the domain.
    pub fn set_pixel_range(&mut self, pixel_start: f64, pixel_end: f64) -> ChartResult<()> {
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start >= pixel_end {
            return Err(ChartError::InvalidData(
                "time scale pixel range must be finite and ascending".to_owned(),
            ));
        }
        self.pixel_start = pixel_start;
        self.pixel_end = pixel_end;
        Ok(())
    }

    pub fn time_to_pixel(self, timestamp: i64) -> ChartResult<f64> {
        self.visible_linear()?.domain_to_pixel(timestamp as f64)
    }

    /// Inverts a pixel to a fractional epoch-millisecond value.
    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        self.visible_linear()?.pixel_to_domain(pixel)
    }

    fn visible_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(
            self.visible_start as f64,
            self.visible_end as f64,
            self.pixel_start,
            self.pixel_end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TimeScale;

    #[test]
    fn visible_domain_controls_mapping() {
        let mut scale = TimeScale::new(0, 10_000, 0.0, 1_000.0).expect("valid scale");
        scale.set_visible_domain(2_000, 6_000).expect("set domain");

        assert_eq!(scale.time_to_pixel(2_000).expect("left"), 0.0);
        assert_eq!(scale.time_to_pixel(6_000).expect("right"), 1_000.0);
    }

    #[test]
    fn visible_domain_is_clamped_to_full_extent() {
        let mut scale = TimeScale::new(0, 10_000, 0.0, 1_000.0).expect("valid scale");
        scale.set_visible_domain(-5_000, 20_000).expect("set domain");
        assert_eq!(scale.domain(), (0, 10_000));
        assert!(scale.is_full_extent());
    }

    #[test]
    fn reset_restores_full_extent() {
        let mut scale = TimeScale::new(0, 10_000, 0.0, 1_000.0).expect("valid scale");
        scale.set_visible_domain(1_000, 2_000).expect("set domain");
        scale.reset_visible_to_full();
        assert_eq!(scale.domain(), (0, 10_000));
    }

    #[test]
    fn single_item_extent_is_widened() {
        let scale = TimeScale::from_timestamps(&[5_000], 0.0, 100.0).expect("valid scale");
        assert_eq!(scale.full_extent(), (5_000, 5_001));
    }

    #[test]
    fn empty_timestamps_are_rejected() {
        assert!(TimeScale::from_timestamps(&[], 0.0, 100.0).is_err());
    }
}
