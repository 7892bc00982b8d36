//! Pointer-driven interaction: zoom brushing, focus tracking, and the
//! subscription bus that broadcasts interaction outcomes.

mod events;
mod focus;
mod zoom_brush;

pub use events::{ChartEvent, EventBus, SubscriptionId};
pub use focus::{FocusSnap, FocusTooltipController};
pub use zoom_brush::{BrushOutcome, BrushPhase, ZoomBrushController};
