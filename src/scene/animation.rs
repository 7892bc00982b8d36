//! Time-bounded attribute interpolation between retained scene states.
//!
//! A transition captures the shape a node had when a change was scheduled
//! and the shape it should settle at. Transitions are advanced by explicit
//! host timestamps and carry the viewport generation they were created
//! under, so work scheduled for a superseded viewport can be discarded.

use serde::{Deserialize, Serialize};

use crate::core::{CubicSegment, SubPath};
use crate::scene::{
    CircleShape, LineShape, NodeKey, PathShape, RectShape, Scene, SceneLayer, Shape,
};

/// How a render pass writes changed attributes into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    Instant,
    Animated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub key: NodeKey,
    from: Shape,
    to: Shape,
    start_ms: u64,
    duration_ms: u64,
    pub generation: u64,
}

/// Active transitions, at most one per node key.
#[derive(Debug, Default)]
pub struct TransitionSet {
    active: Vec<Transition>,
}

impl TransitionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether any in-flight transition still belongs to `generation`.
    #[must_use]
    pub fn has_generation(&self, generation: u64) -> bool {
        self.active
            .iter()
            .any(|transition| transition.generation == generation)
    }

    /// Schedules (or retargets) a transition for `key`. A new gesture on the
    /// same node supersedes the previous transition.
    pub fn begin(
        &mut self,
        key: NodeKey,
        from: Shape,
        to: Shape,
        start_ms: u64,
        duration_ms: u64,
        generation: u64,
    ) {
        self.cancel(&key);
        self.active.push(Transition {
            key,
            from,
            to,
            start_ms,
            duration_ms,
            generation,
        });
    }

    pub fn cancel(&mut self, key: &NodeKey) {
        self.active.retain(|transition| &transition.key != key);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Writes interpolated shapes into `scene` for the given instant and
    /// drops finished transitions (after settling them at their target).
    /// Returns the number of transitions completed by this step.
    pub fn advance(&mut self, now_ms: u64, scene: &mut Scene) -> usize {
        let mut completed = 0;
        let mut remaining = Vec::with_capacity(self.active.len());

        for transition in self.active.drain(..) {
            let elapsed = now_ms.saturating_sub(transition.start_ms);
            if transition.duration_ms == 0 || elapsed >= transition.duration_ms {
                scene.set_shape(transition.key.clone(), transition.to.clone());
                completed += 1;
                continue;
            }

            let t = elapsed as f64 / transition.duration_ms as f64;
            let shape = interpolate_shape(&transition.from, &transition.to, ease_cubic_in_out(t));
            scene.set_shape(transition.key.clone(), shape);
            remaining.push(transition);
        }

        self.active = remaining;
        completed
    }
}

/// Diffs one layer's target nodes against the retained scene.
///
/// New nodes are constructed instantly regardless of mode; existing nodes
/// are retargeted, animated when requested; nodes absent from the target
/// are removed along with their transitions.
pub fn apply_layer(
    scene: &mut Scene,
    transitions: &mut TransitionSet,
    layer: SceneLayer,
    target: Vec<(NodeKey, Shape)>,
    mode: RenderMode,
    now_ms: u64,
    duration_ms: u64,
    generation: u64,
) {
    let mut stale = scene.layer_keys(layer);
    stale.retain(|key| !target.iter().any(|(target_key, _)| target_key == key));
    for key in stale {
        transitions.cancel(&key);
        scene.remove(&key);
    }

    for (key, shape) in target {
        debug_assert_eq!(key.layer, layer);
        let current = match scene.get(&key) {
            Some(node) => node.shape.clone(),
            None => {
                transitions.cancel(&key);
                scene.set_shape(key, shape);
                continue;
            }
        };

        if current == shape || mode == RenderMode::Instant || duration_ms == 0 {
            transitions.cancel(&key);
            scene.set_shape(key.clone(), shape);
            scene.set_visible(&key, true);
            continue;
        }

        scene.set_visible(&key, true);
        transitions.begin(key, current, shape, now_ms, duration_ms, generation);
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolates position/size attributes between congruent shapes.
///
/// Structurally different shapes (variant mismatch, or paths whose subpath
/// layout differs) snap to the target immediately.
#[must_use]
pub fn interpolate_shape(from: &Shape, to: &Shape, t: f64) -> Shape {
    match (from, to) {
        (Shape::Line(from), Shape::Line(to)) => Shape::Line(LineShape {
            x1: lerp(from.x1, to.x1, t),
            y1: lerp(from.y1, to.y1, t),
            x2: lerp(from.x2, to.x2, t),
            y2: lerp(from.y2, to.y2, t),
            stroke_width: lerp(from.stroke_width, to.stroke_width, t),
            color: to.color,
            dash: to.dash,
        }),
        (Shape::Rect(from), Shape::Rect(to)) => Shape::Rect(RectShape {
            x: lerp(from.x, to.x, t),
            y: lerp(from.y, to.y, t),
            width: lerp(from.width, to.width, t),
            height: lerp(from.height, to.height, t),
            corner_radius: to.corner_radius,
            fill: to.fill,
            border_color: to.border_color,
            border_width: to.border_width,
        }),
        (Shape::Circle(from), Shape::Circle(to)) => Shape::Circle(CircleShape {
            cx: lerp(from.cx, to.cx, t),
            cy: lerp(from.cy, to.cy, t),
            radius: lerp(from.radius, to.radius, t),
            fill: to.fill,
            stroke_color: to.stroke_color,
            stroke_width: to.stroke_width,
        }),
        (Shape::Path(from), Shape::Path(to)) => {
            if !paths_congruent(from, to) {
                return Shape::Path(to.clone());
            }
            let subpaths = from
                .subpaths
                .iter()
                .zip(&to.subpaths)
                .map(|(from_sub, to_sub)| SubPath {
                    start_x: lerp(from_sub.start_x, to_sub.start_x, t),
                    start_y: lerp(from_sub.start_y, to_sub.start_y, t),
                    segments: from_sub
                        .segments
                        .iter()
                        .zip(&to_sub.segments)
                        .map(|(from_seg, to_seg)| CubicSegment {
                            c1x: lerp(from_seg.c1x, to_seg.c1x, t),
                            c1y: lerp(from_seg.c1y, to_seg.c1y, t),
                            c2x: lerp(from_seg.c2x, to_seg.c2x, t),
                            c2y: lerp(from_seg.c2y, to_seg.c2y, t),
                            x: lerp(from_seg.x, to_seg.x, t),
                            y: lerp(from_seg.y, to_seg.y, t),
                        })
                        .collect(),
                })
                .collect();
            Shape::Path(PathShape {
                subpaths,
                stroke_width: to.stroke_width,
                color: to.color,
                clip: to.clip,
            })
        }
        // Text and mismatched variants snap to target.
        (_, to) => to.clone(),
    }
}

fn paths_congruent(from: &PathShape, to: &PathShape) -> bool {
    from.subpaths.len() == to.subpaths.len()
        && from
            .subpaths
            .iter()
            .zip(&to.subpaths)
            .all(|(a, b)| a.segments.len() == b.segments.len())
}
