mod animation;
mod frame;
mod node;
mod null_renderer;
mod primitives;

pub use animation::{RenderMode, TransitionSet, apply_layer, interpolate_shape};
pub use frame::RenderFrame;
pub use node::{NodeKey, Scene, SceneLayer, SceneNode};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CircleShape, Color, LineShape, PathShape, RectShape, Shape, TextHAlign, TextShape,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
