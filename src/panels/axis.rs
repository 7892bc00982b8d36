//! Time and value axes plus the faint value grid.
//!
//! Tick nodes are keyed by their domain value, so a tick that survives a
//! zoom slides to its new pixel position while entering ticks appear in
//! place, matching the retained-scene diff semantics used everywhere else.

use chrono::DateTime;

use crate::core::{PanelLayout, PlotRect};
use crate::engine::ScaleState;
use crate::error::ChartResult;
use crate::scene::{Color, LineShape, NodeKey, SceneLayer, Shape, TextHAlign, TextShape};

const AXIS_COLOR: Color = Color::from_rgb8(0x66, 0x66, 0x66);
const GRID_ALPHA: f64 = 0.1;
const AXIS_FONT_SIZE: f64 = 10.0;
const TICK_MARK_LENGTH: f64 = 6.0;
const TIME_TICK_TARGET_SPACING_PX: f64 = 80.0;
const VALUE_TICK_TARGET_SPACING_PX: f64 = 80.0;

/// Builds the `Axis` layer: time axis baseline, tick marks and labels,
/// value-axis labels.
pub fn build_axis(
    scales: &ScaleState,
    layout: &PanelLayout,
    tick_interval_ms: i64,
) -> ChartResult<Vec<(NodeKey, Shape)>> {
    let mut nodes = Vec::new();
    let plot = layout.continuous;

    nodes.push((
        NodeKey::new(SceneLayer::Axis, "time-baseline"),
        Shape::Line(LineShape::new(
            plot.left,
            layout.axis_y,
            plot.right,
            layout.axis_y,
            1.0,
            AXIS_COLOR,
        )),
    ));

    for timestamp in time_ticks(scales.time.domain(), plot.width(), tick_interval_ms) {
        let x = scales.time.time_to_pixel(timestamp)?;
        nodes.push((
            NodeKey::new(SceneLayer::Axis, format!("time-tick-{timestamp}")),
            Shape::Line(LineShape::new(
                x,
                layout.axis_y,
                x,
                layout.axis_y + TICK_MARK_LENGTH,
                1.0,
                AXIS_COLOR,
            )),
        ));
        nodes.push((
            NodeKey::new(SceneLayer::Axis, format!("time-label-{timestamp}")),
            Shape::Text(TextShape::new(
                format_minute(timestamp),
                x,
                layout.axis_y + TICK_MARK_LENGTH + 2.0,
                AXIS_FONT_SIZE,
                AXIS_COLOR,
                TextHAlign::Center,
            )),
        ));
    }

    for value in value_ticks(scales.value.domain().1, plot) {
        let y = scales.value.value_to_pixel(value)?;
        nodes.push((
            NodeKey::new(SceneLayer::Axis, format!("value-label-{value}")),
            Shape::Text(TextShape::new(
                format_value(value),
                plot.left - 8.0,
                y - AXIS_FONT_SIZE / 2.0,
                AXIS_FONT_SIZE,
                AXIS_COLOR,
                TextHAlign::Right,
            )),
        ));
    }

    Ok(nodes)
}

/// Builds the `Grid` layer: one faint full-width line per value tick.
pub fn build_grid(scales: &ScaleState, layout: &PanelLayout) -> ChartResult<Vec<(NodeKey, Shape)>> {
    let plot = layout.continuous;
    let mut nodes = Vec::new();
    for value in value_ticks(scales.value.domain().1, plot) {
        let y = scales.value.value_to_pixel(value)?;
        nodes.push((
            NodeKey::new(SceneLayer::Grid, format!("value-grid-{value}")),
            Shape::Line(LineShape::new(
                plot.left,
                y,
                plot.right,
                y,
                1.0,
                AXIS_COLOR.with_alpha(GRID_ALPHA),
            )),
        ));
    }
    Ok(nodes)
}

/// Time tick positions: one tick per whole interval while they fit the
/// target label spacing, otherwise evenly spaced across the domain.
fn time_ticks(domain: (i64, i64), plot_width: f64, tick_interval_ms: i64) -> Vec<i64> {
    let (start, end) = domain;
    let target = ((plot_width / TIME_TICK_TARGET_SPACING_PX) as usize).max(2);

    let interval = tick_interval_ms.max(1);
    let first_aligned = start.div_euclid(interval) * interval;
    let first = if first_aligned < start {
        first_aligned + interval
    } else {
        first_aligned
    };
    let aligned_count = if end >= first {
        ((end - first) / interval + 1) as usize
    } else {
        0
    };

    if aligned_count > 0 && aligned_count <= target {
        return (0..aligned_count)
            .map(|i| first + i as i64 * interval)
            .collect();
    }

    let span = end - start;
    (0..=target)
        .map(|i| start + span * i as i64 / target as i64)
        .collect()
}

/// Ascending 1-2-5 value ticks from zero up to the axis ceiling.
fn value_ticks(max: f64, plot: PlotRect) -> Vec<f64> {
    let target = ((plot.height() / VALUE_TICK_TARGET_SPACING_PX) as usize).max(2);
    let step = nice_step(max / target as f64);
    if step <= 0.0 {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    let mut value = 0.0;
    while value <= max + 1e-9 {
        ticks.push(value);
        value += step;
    }
    ticks
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let fraction = raw / power;
    let nice = if fraction >= 5.0 {
        10.0
    } else if fraction >= 2.0 {
        5.0
    } else if fraction >= 1.0 {
        2.0
    } else {
        1.0
    };
    nice * power
}

fn format_minute(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
