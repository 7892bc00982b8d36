use crate::error::ChartResult;
use crate::scene::{RenderFrame, Renderer, Shape};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_shape_count: usize,
    pub last_path_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_shape_count = frame.shapes.len();
        self.last_path_count = frame.count_of(|shape| matches!(shape, Shape::Path(_)));
        self.last_circle_count = frame.count_of(|shape| matches!(shape, Shape::Circle(_)));
        self.last_text_count = frame.count_of(|shape| matches!(shape, Shape::Text(_)));
        self.frames_rendered += 1;
        Ok(())
    }
}
