//! Render pass orchestration over the retained scene.
//!
//! A pass rebuilds the data-driven layers in a fixed order (grid, axes,
//! continuous lines, discrete markers, scrubber) and diffs each against the
//! scene. `Focus` and `Brush` nodes are written directly by the interaction
//! paths and are never swept by a pass.

use crate::core::{PanelLayout, Viewport};
use crate::data::ChartDataset;
use crate::engine::{ScaleState, ViewportState};
use crate::error::ChartResult;
use crate::panels;
use crate::scene::{
    NodeKey, RenderFrame, RenderMode, Scene, SceneLayer, Shape, TransitionSet, apply_layer,
};

/// Owns the retained scene and its in-flight transitions.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    scene: Scene,
    transitions: TransitionSet,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn has_pending_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    #[must_use]
    pub fn has_generation(&self, generation: u64) -> bool {
        self.transitions.has_generation(generation)
    }

    /// Rebuilds every data-driven layer for the current scale state.
    #[allow(clippy::too_many_arguments)]
    pub fn run_pass(
        &mut self,
        dataset: &ChartDataset,
        timestamps: &[i64],
        scales: &ScaleState,
        viewport: &ViewportState,
        layout: &PanelLayout,
        tick_interval_ms: i64,
        playback_cursor: Option<i64>,
        mode: RenderMode,
        now_ms: u64,
        transition_ms: u64,
    ) -> ChartResult<()> {
        let generation = viewport.generation();

        let grid = panels::axis::build_grid(scales, layout)?;
        self.apply(SceneLayer::Grid, grid, mode, now_ms, transition_ms, generation);

        let axis = panels::axis::build_axis(scales, layout, tick_interval_ms)?;
        self.apply(SceneLayer::Axis, axis, mode, now_ms, transition_ms, generation);

        self.run_continuous_pass(
            dataset, timestamps, scales, viewport, layout, mode, now_ms, transition_ms,
        )?;

        let discrete = panels::discrete::build(dataset, scales, layout)?;
        self.apply(
            SceneLayer::Discrete,
            discrete,
            mode,
            now_ms,
            transition_ms,
            generation,
        );

        let scrubber =
            panels::scrubber::build(scales, viewport, layout, tick_interval_ms, playback_cursor)?;
        self.apply(
            SceneLayer::Scrubber,
            scrubber,
            mode,
            now_ms,
            transition_ms,
            generation,
        );

        Ok(())
    }

    /// Rebuilds only the continuous layer; used for the post-transition
    /// cull-window refinement redraw.
    #[allow(clippy::too_many_arguments)]
    pub fn run_continuous_pass(
        &mut self,
        dataset: &ChartDataset,
        timestamps: &[i64],
        scales: &ScaleState,
        viewport: &ViewportState,
        layout: &PanelLayout,
        mode: RenderMode,
        now_ms: u64,
        transition_ms: u64,
    ) -> ChartResult<()> {
        let continuous = panels::continuous::build(dataset, timestamps, scales, viewport, layout)?;
        self.apply(
            SceneLayer::Continuous,
            continuous,
            mode,
            now_ms,
            transition_ms,
            viewport.generation(),
        );
        Ok(())
    }

    /// Updates only the playback cursor node; cursor moves must not disturb
    /// transitions in flight on the other scrubber nodes.
    pub fn run_playback_cursor_pass(
        &mut self,
        scales: &ScaleState,
        viewport: &ViewportState,
        layout: &PanelLayout,
        playback_cursor: Option<i64>,
        now_ms: u64,
        transition_ms: u64,
    ) -> ChartResult<()> {
        let key = NodeKey::new(SceneLayer::Scrubber, panels::scrubber::PLAYBACK_CURSOR_KEY);
        let Some((key, shape)) =
            panels::scrubber::playback_cursor_node(scales, layout, playback_cursor)?
        else {
            self.transitions.cancel(&key);
            self.scene.remove(&key);
            return Ok(());
        };

        // First appearance draws in place; subsequent moves glide.
        match self.scene.get(&key) {
            Some(node) if node.shape != shape && transition_ms > 0 => {
                let from = node.shape.clone();
                self.scene.set_visible(&key, true);
                self.transitions.begin(
                    key,
                    from,
                    shape,
                    now_ms,
                    transition_ms,
                    viewport.generation(),
                );
            }
            _ => {
                self.transitions.cancel(&key);
                self.scene.set_shape(key, shape);
            }
        }
        Ok(())
    }

    /// Steps every active transition to `now_ms`; returns how many settled.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        self.transitions.advance(now_ms, &mut self.scene)
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
        self.scene = Scene::new();
    }

    #[must_use]
    pub fn frame(&self, viewport: Viewport) -> RenderFrame {
        self.scene.to_frame(viewport)
    }

    fn apply(
        &mut self,
        layer: SceneLayer,
        target: Vec<(NodeKey, Shape)>,
        mode: RenderMode,
        now_ms: u64,
        transition_ms: u64,
        generation: u64,
    ) {
        apply_layer(
            &mut self.scene,
            &mut self.transitions,
            layer,
            target,
            mode,
            now_ms,
            transition_ms,
            generation,
        );
    }
}
