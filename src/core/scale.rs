use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Linear mapping from a numeric domain onto an explicit pixel range.
///
/// The range may be descending, which is how inverted vertical axes are
/// expressed (domain minimum at the bottom pixel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite()
            || !domain_end.is_finite()
            || domain_start == domain_end
        {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-degenerate".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-degenerate".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn round_trip_within_tolerance() {
        let scale = LinearScale::new(10.0, 110.0, 40.0, 960.0).expect("valid scale");
        let original = 42.5;
        let px = scale.domain_to_pixel(original).expect("to pixel");
        let recovered = scale.pixel_to_domain(px).expect("from pixel");
        assert!((recovered - original).abs() <= 1e-9);
    }

    #[test]
    fn descending_range_inverts_axis() {
        let scale = LinearScale::new(0.0, 100.0, 600.0, 0.0).expect("valid scale");
        assert_eq!(scale.domain_to_pixel(0.0).expect("bottom"), 600.0);
        assert_eq!(scale.domain_to_pixel(100.0).expect("top"), 0.0);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new(5.0, 5.0, 0.0, 100.0).is_err());
        assert!(LinearScale::new(0.0, 1.0, 20.0, 20.0).is_err());
    }
}
