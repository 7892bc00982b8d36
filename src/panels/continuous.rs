//! Interpolated line panel for continuous series.
//!
//! Paths are rebuilt from the full item list each pass. While a zoom
//! transition is in flight only the indices inside the cull window are
//! eligible, which bounds path construction cost; once the transition
//! settles the engine recomputes the exact window and redraws once at full
//! precision.

use smallvec::SmallVec;

use crate::core::{
    PanelLayout, SubPath, bisect_left, bisect_right, layout::CONTINUOUS_STROKE_WIDTH,
    monotone_subpath,
};
use crate::data::{ChartDataset, SeriesSpec};
use crate::engine::{ScaleState, ViewportState};
use crate::error::ChartResult;
use crate::scene::{NodeKey, PathShape, SceneLayer, Shape};

/// Builds the `Continuous` layer: one clipped path node per series.
pub fn build(
    dataset: &ChartDataset,
    timestamps: &[i64],
    scales: &ScaleState,
    viewport: &ViewportState,
    layout: &PanelLayout,
) -> ChartResult<Vec<(NodeKey, Shape)>> {
    if timestamps.is_empty() {
        return Ok(Vec::new());
    }

    let full_range = (0, timestamps.len() - 1);
    let window = if viewport.zoom_active() {
        viewport.cull_window().unwrap_or(full_range)
    } else {
        full_range
    };

    let mut nodes = Vec::with_capacity(dataset.continuous.len());
    for series in &dataset.continuous {
        let subpaths = series_subpaths(series, dataset, timestamps, scales, window)?;
        nodes.push((
            NodeKey::new(SceneLayer::Continuous, format!("series-{}", series.title)),
            Shape::Path(
                PathShape::new(subpaths, CONTINUOUS_STROKE_WIDTH, series.color)
                    .with_clip(layout.continuous),
            ),
        ));
    }
    Ok(nodes)
}

/// Exact cull window for a settled domain: the covering index range plus
/// one item of slack on each side so the clipped path still reaches the
/// plot edges.
#[must_use]
pub fn exact_window(timestamps: &[i64], domain: (i64, i64)) -> (usize, usize) {
    let last = timestamps.len().saturating_sub(1);
    let lo = bisect_left(timestamps, domain.0).saturating_sub(1);
    let hi = (bisect_right(timestamps, domain.1) + 1).min(last);
    (lo.min(last), hi)
}

fn series_subpaths(
    series: &SeriesSpec,
    dataset: &ChartDataset,
    timestamps: &[i64],
    scales: &ScaleState,
    window: (usize, usize),
) -> ChartResult<Vec<SubPath>> {
    let mut subpaths = Vec::new();
    // Runs between gaps are usually short; keep them off the heap.
    let mut run: SmallVec<[(f64, f64); 32]> = SmallVec::new();

    for index in window.0..=window.1.min(timestamps.len() - 1) {
        let item = &dataset.items[index];
        match series.extract(item) {
            Some(value) => {
                let x = scales.time.time_to_pixel(item.timestamp)?;
                let y = scales.value.value_to_pixel(value)?;
                run.push((x, y));
            }
            // Gap policy: an undefined value ends the current run; the
            // line breaks rather than interpolating across.
            None => flush_run(&mut run, &mut subpaths),
        }
    }
    flush_run(&mut run, &mut subpaths);

    Ok(subpaths)
}

fn flush_run(run: &mut SmallVec<[(f64, f64); 32]>, subpaths: &mut Vec<SubPath>) {
    if let Some(subpath) = monotone_subpath(run) {
        subpaths.push(subpath);
    }
    run.clear();
}
