//! Engine facade: owns the dataset, scales, retained scene, interaction
//! controllers and the renderer, and exposes the host-facing API.
//!
//! All timing is explicit. Gesture entry points that can start an animation
//! take a `now_ms` host timestamp, and the host drives animation frames by
//! calling [`ChartEngine::advance`] with later timestamps. The engine never
//! reads a clock.

use tracing::debug;

use crate::core::{PanelLayout, layout::FOCUS_MARKER_RADIUS};
use crate::data::ChartDataset;
use crate::engine::{
    RenderConfig, RenderScheduler, ScaleManager, ScaleState, ViewportState,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    BrushOutcome, ChartEvent, EventBus, FocusTooltipController, SubscriptionId,
    ZoomBrushController,
};
use crate::panels;
use crate::scene::{
    CircleShape, Color, LineShape, NodeKey, RectShape, RenderFrame, RenderMode, Renderer, Scene,
    SceneLayer, Shape, TextHAlign, TextShape,
};

const BRUSH_OVERLAY_KEY: &str = "selection-overlay";
const FOCUS_GUIDE_KEY: &str = "guide";
const PLACEHOLDER_KEY: &str = "empty-placeholder";

const BRUSH_OVERLAY_FILL: Color = Color::rgba(0.47, 0.47, 0.47, 0.3);
const FOCUS_GUIDE_COLOR: Color = Color::from_rgb8(0xcc, 0xcc, 0xcc);
const FOCUS_MARKER_FILL: Color = Color::rgb(1.0, 1.0, 1.0);
const PLACEHOLDER_COLOR: Color = Color::from_rgb8(0x99, 0x99, 0x99);

/// Per-mount state derived from the dataset and viewport.
#[derive(Debug, Clone, Copy)]
struct Mounted {
    layout: PanelLayout,
    scales: ScaleState,
    viewport: ViewportState,
}

/// Interactive multi-panel time-series chart.
pub struct ChartEngine<R: Renderer> {
    config: RenderConfig,
    renderer: R,
    dataset: ChartDataset,
    timestamps: Vec<i64>,
    mounted: Option<Mounted>,
    scheduler: RenderScheduler,
    brush: ZoomBrushController,
    focus: FocusTooltipController,
    events: EventBus,
    playback_cursor: Option<i64>,
    /// Viewport generation awaiting its post-transition cull refinement.
    pending_refinement: Option<u64>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(config: RenderConfig, renderer: R) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            renderer,
            dataset: ChartDataset::default(),
            timestamps: Vec::new(),
            mounted: None,
            scheduler: RenderScheduler::new(),
            brush: ZoomBrushController::new(),
            focus: FocusTooltipController::new(),
            events: EventBus::new(),
            playback_cursor: None,
            pending_refinement: None,
        })
    }

    /// Replaces the dataset. Discards any mounted state; call
    /// [`ChartEngine::mount`] afterwards to build and draw the new scene.
    pub fn set_data(&mut self, dataset: ChartDataset) -> ChartResult<()> {
        dataset.validate()?;
        self.timestamps = dataset.timestamps();
        self.dataset = dataset;
        self.mounted = None;
        self.pending_refinement = None;
        self.brush.reset();
        self.focus.pointer_leave();
        self.scheduler.clear();
        Ok(())
    }

    /// Builds scales and layout for the current dataset and draws the first
    /// frame without animation. An empty dataset mounts as a placeholder.
    pub fn mount(&mut self, now_ms: u64) -> ChartResult<()> {
        let layout = PanelLayout::compute(
            self.config.viewport(),
            self.config.margins,
            self.dataset.discrete.len(),
        )?;

        if self.dataset.is_empty() {
            self.scheduler.clear();
            let viewport = self.config.viewport();
            let (timeline_key, timeline_shape) = panels::scrubber::timeline_node(&layout);
            self.scheduler.scene_mut().set_shape(timeline_key, timeline_shape);
            self.scheduler.scene_mut().set_shape(
                NodeKey::new(SceneLayer::Axis, PLACEHOLDER_KEY),
                Shape::Text(TextShape::new(
                    "no data",
                    f64::from(viewport.width) / 2.0,
                    f64::from(viewport.height) / 2.0,
                    12.0,
                    PLACEHOLDER_COLOR,
                    TextHAlign::Center,
                )),
            );
            self.mounted = None;
            return self.render();
        }

        let scales = ScaleManager::build(
            &self.timestamps,
            &self.dataset,
            &layout,
            self.config.tick_interval_ms,
        )?;
        let viewport = ViewportState::new(scales.time.full_extent());

        self.scheduler.clear();
        self.scheduler.run_pass(
            &self.dataset,
            &self.timestamps,
            &scales,
            &viewport,
            &layout,
            self.config.tick_interval_ms,
            self.playback_cursor,
            RenderMode::Instant,
            now_ms,
            0,
        )?;

        self.mounted = Some(Mounted {
            layout,
            scales,
            viewport,
        });
        self.render()
    }

    /// Flattens the retained scene and hands the frame to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.scheduler.frame(self.config.viewport());
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.scheduler.frame(self.config.viewport())
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.scheduler.scene()
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn zoom_active(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|mounted| mounted.viewport.zoom_active())
    }

    #[must_use]
    pub fn visible_domain(&self) -> Option<(i64, i64)> {
        self.mounted.as_ref().map(|mounted| mounted.viewport.domain())
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ChartEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Pointer moved over the main panel: snap to the nearest item, show
    /// the guide line and one marker per continuous series.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        let Some(snap) = self
            .focus
            .pointer_move(x, &self.timestamps, &mounted.scales.time)?
        else {
            return Ok(());
        };

        let scene = self.scheduler.scene_mut();
        scene.set_shape(
            NodeKey::new(SceneLayer::Focus, FOCUS_GUIDE_KEY),
            Shape::Line(
                LineShape::new(
                    snap.snapped_x,
                    mounted.layout.continuous.top,
                    snap.snapped_x,
                    mounted.layout.axis_y,
                    1.0,
                    FOCUS_GUIDE_COLOR,
                )
                .with_dash(6.0, 2.0),
            ),
        );

        let item = &self.dataset.items[snap.index];
        for series in &self.dataset.continuous {
            let key = NodeKey::new(SceneLayer::Focus, format!("point-{}", series.title));
            match series.extract(item) {
                Some(value) => {
                    let cy = mounted.scales.value.value_to_pixel(value)?;
                    scene.set_shape(
                        key,
                        Shape::Circle(
                            CircleShape::new(
                                snap.snapped_x,
                                cy,
                                FOCUS_MARKER_RADIUS,
                                FOCUS_MARKER_FILL,
                            )
                            .with_stroke(series.color, 1.5),
                        ),
                    );
                }
                // No marker inside a gap.
                None => {
                    scene.remove(&key);
                }
            }
        }

        self.events.emit(&ChartEvent::PointerMoved {
            pixel: (x, y),
            index: snap.index,
        });
        self.render()
    }

    /// Pointer left the main panel: clear the focus layer.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if self.mounted.is_none() {
            return Ok(());
        }
        self.focus.pointer_leave();
        self.clear_focus_layer();
        self.events.emit(&ChartEvent::PointerLeft);
        self.render()
    }

    pub fn brush_start(&mut self, x: f64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        self.brush.begin(x, mounted.layout.continuous);
        self.sync_brush_overlay(&mounted)?;
        self.render()
    }

    pub fn brush_move(&mut self, x: f64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        self.brush.update(x, mounted.layout.continuous);
        self.sync_brush_overlay(&mounted)?;
        self.render()
    }

    /// Releases the selection. A selection spanning at least two distinct
    /// items becomes the new visible domain with an animated transition.
    pub fn brush_end(&mut self, x: f64, now_ms: u64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        let outcome = self.brush.end(
            x,
            mounted.layout.continuous,
            &self.timestamps,
            &mounted.scales.time,
        )?;
        self.scheduler
            .scene_mut()
            .remove(&NodeKey::new(SceneLayer::Brush, BRUSH_OVERLAY_KEY));

        match outcome {
            BrushOutcome::Unchanged => self.render(),
            BrushOutcome::Zoom { domain } => self.apply_domain(domain, true, now_ms),
        }
    }

    /// Double-click reset to the full extent. A no-op when not zoomed.
    pub fn double_click(&mut self, now_ms: u64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        self.brush.reset();
        if !mounted.viewport.zoom_active() {
            return Ok(());
        }
        let full = mounted.scales.time.full_extent();
        self.apply_domain(full, false, now_ms)
    }

    /// Pointer moved over the timeline strip: show the readout cursor and
    /// the second-resolution time label.
    pub fn scrubber_pointer_move(&mut self, x: f64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        let nodes = panels::scrubber::hover_nodes(&mounted.scales, &mounted.layout, x)?;
        let scene = self.scheduler.scene_mut();
        for (key, shape) in nodes {
            scene.set_shape(key, shape);
        }
        self.render()
    }

    pub fn scrubber_pointer_leave(&mut self) -> ChartResult<()> {
        if self.mounted.is_none() {
            return Ok(());
        }
        let scene = self.scheduler.scene_mut();
        scene.remove(&NodeKey::new(
            SceneLayer::Focus,
            panels::scrubber::POINTER_CURSOR_KEY,
        ));
        scene.remove(&NodeKey::new(
            SceneLayer::Focus,
            panels::scrubber::POINTER_LABEL_KEY,
        ));
        self.render()
    }

    /// Click on the timeline strip: notify subscribers with the clicked
    /// timestamp, then reset any active zoom.
    pub fn scrubber_click(&mut self, x: f64, now_ms: u64) -> ChartResult<()> {
        let mounted = self.require_mounted()?;
        let timestamp = panels::scrubber::pointer_timestamp(&mounted.scales, x)?;
        self.events.emit(&ChartEvent::TimelineClicked { timestamp });
        self.double_click(now_ms)
    }

    /// Moves (or clears) the playback cursor on the timeline strip. Moves
    /// between positions glide over the configured transition; the first
    /// appearance draws in place.
    pub fn move_playback_cursor(
        &mut self,
        timestamp: Option<i64>,
        now_ms: u64,
    ) -> ChartResult<()> {
        self.playback_cursor = timestamp;
        let Some(mounted) = self.mounted else {
            return Ok(());
        };
        self.scheduler.run_playback_cursor_pass(
            &mounted.scales,
            &mounted.viewport,
            &mounted.layout,
            self.playback_cursor,
            now_ms,
            self.config.transition_ms,
        )?;
        self.render()
    }

    /// Steps in-flight transitions to `now_ms` and redraws. When the last
    /// transition of the current viewport generation settles, the exact
    /// cull window is computed and the continuous layer redrawn once at
    /// full precision. Returns the number of transitions that settled.
    pub fn advance(&mut self, now_ms: u64) -> ChartResult<usize> {
        let completed = self.scheduler.advance(now_ms);

        let refine = match (self.pending_refinement, self.mounted.as_ref()) {
            (Some(generation), Some(mounted)) => {
                mounted.viewport.generation() == generation
                    && !self.scheduler.has_generation(generation)
            }
            _ => false,
        };
        if refine {
            self.pending_refinement = None;
            if let Some(mounted) = self.mounted.as_mut() {
                let window =
                    panels::continuous::exact_window(&self.timestamps, mounted.viewport.domain());
                mounted.viewport.set_cull_window(Some(window));
            }
            let mounted = self.require_mounted()?;
            self.scheduler.run_continuous_pass(
                &self.dataset,
                &self.timestamps,
                &mounted.scales,
                &mounted.viewport,
                &mounted.layout,
                RenderMode::Instant,
                now_ms,
                0,
            )?;
        }

        if completed > 0 || refine || self.scheduler.has_pending_transitions() {
            self.render()?;
        }
        Ok(completed)
    }

    /// Applies a new visible domain with an animated transition.
    fn apply_domain(&mut self, domain: (i64, i64), zoom: bool, now_ms: u64) -> ChartResult<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Err(not_mounted());
        };

        let generation = if zoom {
            mounted.viewport.apply_zoom(domain)
        } else {
            mounted.viewport.reset(domain)
        };
        debug!(
            start = domain.0,
            end = domain.1,
            zoom,
            generation,
            "visible domain changed"
        );

        ScaleManager::build_or_update(
            &mut mounted.scales,
            &self.timestamps,
            &self.dataset,
            &mounted.viewport,
            &mounted.layout,
        )?;

        let mounted = *mounted;
        self.scheduler.run_pass(
            &self.dataset,
            &self.timestamps,
            &mounted.scales,
            &mounted.viewport,
            &mounted.layout,
            self.config.tick_interval_ms,
            self.playback_cursor,
            RenderMode::Animated,
            now_ms,
            self.config.transition_ms,
        )?;
        self.pending_refinement = zoom.then_some(generation);

        self.events.emit(&ChartEvent::ZoomChanged {
            domain,
            zoom_active: zoom,
        });
        self.render()
    }

    fn sync_brush_overlay(&mut self, mounted: &Mounted) -> ChartResult<()> {
        let key = NodeKey::new(SceneLayer::Brush, BRUSH_OVERLAY_KEY);
        let scene = self.scheduler.scene_mut();
        match self.brush.selection() {
            Some((left, right)) => {
                let plot = mounted.layout.continuous;
                scene.set_shape(
                    key,
                    Shape::Rect(RectShape::new(
                        left,
                        plot.top,
                        right - left,
                        plot.height(),
                        BRUSH_OVERLAY_FILL,
                    )),
                );
            }
            None => {
                scene.remove(&key);
            }
        }
        Ok(())
    }

    fn clear_focus_layer(&mut self) {
        let scene = self.scheduler.scene_mut();
        let guide = NodeKey::new(SceneLayer::Focus, FOCUS_GUIDE_KEY);
        scene.remove(&guide);
        for series in &self.dataset.continuous {
            scene.remove(&NodeKey::new(
                SceneLayer::Focus,
                format!("point-{}", series.title),
            ));
        }
    }

    fn require_mounted(&self) -> ChartResult<Mounted> {
        self.mounted.ok_or_else(not_mounted)
    }
}

fn not_mounted() -> ChartError {
    ChartError::InvalidData("engine is not mounted".to_owned())
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for ChartEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("config", &self.config)
            .field("renderer", &self.renderer)
            .field("items", &self.dataset.items.len())
            .field("mounted", &self.mounted.is_some())
            .finish()
    }
}
