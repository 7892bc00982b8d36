//! Engine assembly: configuration, viewport/scale state, render pass
//! scheduling and the public [`ChartEngine`] facade.

mod config;
#[allow(clippy::module_inception)]
mod engine;
mod scale_manager;
mod scheduler;
mod state;

pub use config::{DEFAULT_TICK_INTERVAL_MS, DEFAULT_TRANSITION_MS, RenderConfig};
pub use engine::ChartEngine;
pub use scale_manager::ScaleManager;
pub use scheduler::RenderScheduler;
pub use state::{ScaleState, ViewportState};
