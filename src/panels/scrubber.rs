//! Timeline overview strip: full-extent miniature, viewport highlight,
//! playback cursor and pointer readout.
//!
//! The scrubber runs on its own full-extent scale (last timestamp extended
//! by one tick interval) and is deliberately immune to zoom, which is what
//! makes it usable as an overview while the main panel is zoomed in.

use chrono::DateTime;

use crate::core::{
    PanelLayout,
    layout::{SCRUBBER_HEIGHT, SCRUBBER_MARGIN_TOP},
};
use crate::engine::{ScaleState, ViewportState};
use crate::error::ChartResult;
use crate::scene::{Color, NodeKey, RectShape, SceneLayer, Shape, TextHAlign, TextShape};

const TIMELINE_FILL: Color = Color::from_rgb8(0xf6, 0xf8, 0xfc);
const TIMELINE_BORDER: Color = Color::from_rgb8(0xd2, 0xdb, 0xee);
const HIGHLIGHT_FILL: Color = Color::from_rgb8(0xe7, 0xef, 0xff);
const HIGHLIGHT_BORDER: Color = Color::from_rgb8(0xac, 0xb8, 0xd1);
const PLAYBACK_CURSOR_COLOR: Color = Color::from_rgb8(0x9e, 0xab, 0xc7);
const POINTER_CURSOR_COLOR: Color = Color::from_rgb8(0xac, 0xb8, 0xd1);
const POINTER_LABEL_COLOR: Color = Color::from_rgb8(0x99, 0x99, 0x99);
const POINTER_LABEL_FONT_SIZE: f64 = 10.0;
const PLAYBACK_CURSOR_OVERHANG: f64 = 6.0;

pub const POINTER_CURSOR_KEY: &str = "pointer-cursor";
pub const POINTER_LABEL_KEY: &str = "pointer-label";
pub const PLAYBACK_CURSOR_KEY: &str = "playback-cursor";

/// Background timeline rect; also drawn on its own for an empty dataset.
#[must_use]
pub fn timeline_node(layout: &PanelLayout) -> (NodeKey, Shape) {
    let strip = layout.scrubber;
    (
        NodeKey::new(SceneLayer::Scrubber, "timeline"),
        Shape::Rect(
            RectShape::new(strip.left, strip.top, strip.width(), SCRUBBER_HEIGHT, TIMELINE_FILL)
                .with_border(TIMELINE_BORDER, 1.0)
                .with_corner_radius(2.0),
        ),
    )
}

/// Builds the `Scrubber` layer: background timeline, viewport highlight,
/// and (when set and in range) the playback cursor.
pub fn build(
    scales: &ScaleState,
    viewport: &ViewportState,
    layout: &PanelLayout,
    tick_interval_ms: i64,
    playback_cursor: Option<i64>,
) -> ChartResult<Vec<(NodeKey, Shape)>> {
    let strip = layout.scrubber;
    let mut nodes = Vec::new();

    nodes.push(timeline_node(layout));

    let (domain_start, domain_end) = viewport.domain();
    let x_left = scales.scrubber.time_to_pixel(domain_start)?;
    let x_right = scales
        .scrubber
        .time_to_pixel(domain_end + tick_interval_ms)?;
    nodes.push((
        NodeKey::new(SceneLayer::Scrubber, "zoom-range"),
        Shape::Rect(
            RectShape::new(
                x_left,
                strip.top,
                (x_right - x_left).max(0.0),
                SCRUBBER_HEIGHT,
                HIGHLIGHT_FILL,
            )
            .with_border(HIGHLIGHT_BORDER, 1.0),
        ),
    ));

    if let Some(node) = playback_cursor_node(scales, layout, playback_cursor)? {
        nodes.push(node);
    }

    Ok(nodes)
}

/// Playback cursor node, or `None` when the cursor is unset or outside the
/// scrubber domain.
pub fn playback_cursor_node(
    scales: &ScaleState,
    layout: &PanelLayout,
    playback_cursor: Option<i64>,
) -> ChartResult<Option<(NodeKey, Shape)>> {
    let Some(timestamp) = playback_cursor else {
        return Ok(None);
    };
    let (full_start, full_end) = scales.scrubber.domain();
    if timestamp < full_start || timestamp > full_end {
        return Ok(None);
    }
    let strip = layout.scrubber;
    let x = scales.scrubber.time_to_pixel(timestamp)?;
    Ok(Some((
        NodeKey::new(SceneLayer::Scrubber, PLAYBACK_CURSOR_KEY),
        Shape::Rect(RectShape::new(
            x - 1.0,
            strip.top - PLAYBACK_CURSOR_OVERHANG / 2.0,
            2.0,
            SCRUBBER_HEIGHT + PLAYBACK_CURSOR_OVERHANG,
            PLAYBACK_CURSOR_COLOR,
        )),
    )))
}

/// Timestamp under a scrubber pixel, floored to the whole second.
pub fn pointer_timestamp(scales: &ScaleState, x: f64) -> ChartResult<i64> {
    let raw = scales.scrubber.pixel_to_time(x)?;
    Ok((raw / 1_000.0).floor() as i64 * 1_000)
}

/// Hover readout nodes (cursor line and time label) for a pointer at `x`.
pub fn hover_nodes(
    scales: &ScaleState,
    layout: &PanelLayout,
    x: f64,
) -> ChartResult<Vec<(NodeKey, Shape)>> {
    let timestamp = pointer_timestamp(scales, x)?;
    let snapped_x = scales.scrubber.time_to_pixel(timestamp)?;
    let strip = layout.scrubber;

    Ok(vec![
        (
            NodeKey::new(SceneLayer::Focus, POINTER_CURSOR_KEY),
            Shape::Rect(RectShape::new(
                snapped_x,
                strip.top,
                1.0,
                SCRUBBER_HEIGHT,
                POINTER_CURSOR_COLOR,
            )),
        ),
        (
            NodeKey::new(SceneLayer::Focus, POINTER_LABEL_KEY),
            Shape::Text(TextShape::new(
                format_second(timestamp),
                snapped_x - 20.0,
                strip.top - SCRUBBER_MARGIN_TOP / 2.0,
                POINTER_LABEL_FONT_SIZE,
                POINTER_LABEL_COLOR,
                TextHAlign::Left,
            )),
        ),
    ])
}

fn format_second(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
