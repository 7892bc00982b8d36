//! timechart-rs: interactive multi-panel time-series chart engine.
//!
//! The engine consumes a sorted, timestamped dataset and a set of series
//! extractors, and maintains a retained vector scene: continuous line panels,
//! discrete event swimlanes, a timeline overview/scrubber, a zoom brush and a
//! pointer-driven focus layer. Hosts supply a [`scene::Renderer`] backend and
//! drive animation with explicit timestamps; the engine owns no clock, no
//! I/O surface and no persistence.

pub mod core;
pub mod data;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod panels;
pub mod scene;
pub mod telemetry;

pub use engine::{ChartEngine, RenderConfig};
pub use error::{ChartError, ChartResult};
