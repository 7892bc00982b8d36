use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Smallest value-axis ceiling; keeps the axis readable when all visible
/// values are near zero.
pub const VALUE_FLOOR: f64 = 10.0;

/// Value axis for the continuous panel, mapped onto an inverted Y pixel
/// range: domain minimum at the bottom pixel, maximum at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    max: f64,
    pixel_top: f64,
    pixel_bottom: f64,
}

impl ValueScale {
    pub fn new(max: f64, pixel_top: f64, pixel_bottom: f64) -> ChartResult<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale maximum must be finite and > 0".to_owned(),
            ));
        }
        if !pixel_top.is_finite() || !pixel_bottom.is_finite() || pixel_top >= pixel_bottom {
            return Err(ChartError::InvalidData(
                "value scale pixel range must be finite with top above bottom".to_owned(),
            ));
        }

        Ok(Self {
            max,
            pixel_top,
            pixel_bottom,
        })
    }

    /// Autoscaled ceiling over the currently visible values:
    /// `max(VALUE_FLOOR, 1 + max(values))`, ignoring gaps.
    #[must_use]
    pub fn headroom_max(visible_values: impl IntoIterator<Item = f64>) -> f64 {
        visible_values
            .into_iter()
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .max()
            .map_or(VALUE_FLOOR, |max| (1.0 + max.into_inner()).max(VALUE_FLOOR))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (0.0, self.max)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_bottom, self.pixel_top)
    }

    /// Replaces the ceiling in place so consumers holding the shared scale
    /// state observe the update on the next read.
    pub fn update(&mut self, max: f64, pixel_top: f64, pixel_bottom: f64) -> ChartResult<()> {
        *self = Self::new(max, pixel_top, pixel_bottom)?;
        Ok(())
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        self.linear()?.domain_to_pixel(value)
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        self.linear()?.pixel_to_domain(pixel)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(0.0, self.max, self.pixel_bottom, self.pixel_top)
    }
}
