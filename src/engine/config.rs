use serde::{Deserialize, Serialize};

use crate::core::{Margins, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_TICK_INTERVAL_MS: i64 = 60_000;
pub const DEFAULT_TRANSITION_MS: u64 = 500;

/// Host-supplied engine configuration.
///
/// `tick_interval_ms` is the nominal spacing of the data (one minute by
/// default); the scrubber scale extends the last timestamp by one interval
/// so the final sample occupies a full slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub tick_interval_ms: i64,
    pub transition_ms: u64,
}

impl RenderConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margins: Margins::new(20.0, 30.0, 30.0, 40.0),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: i64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Transition duration for animated re-renders; `0` disables animation.
    #[must_use]
    pub fn with_transition_ms(mut self, transition_ms: u64) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.margins.is_valid() {
            return Err(ChartError::InvalidData(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if self.tick_interval_ms <= 0 {
            return Err(ChartError::InvalidData(
                "tick interval must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderConfig;

    #[test]
    fn defaults_validate() {
        assert!(RenderConfig::new(960, 540).validate().is_ok());
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert!(RenderConfig::new(0, 540).validate().is_err());
    }

    #[test]
    fn non_positive_tick_interval_is_rejected() {
        let config = RenderConfig::new(960, 540).with_tick_interval_ms(0);
        assert!(config.validate().is_err());
    }
}
