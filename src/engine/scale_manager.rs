use tracing::trace;

use crate::core::{PanelLayout, TimeScale, ValueScale, bisect_left, bisect_right};
use crate::data::ChartDataset;
use crate::engine::{ScaleState, ViewportState};
use crate::error::ChartResult;

/// Builds and mutates the shared scale state.
///
/// Scales are constructed once per mount and updated in place on every
/// render pass, so panels holding references always observe the mapping for
/// the current viewport. The value ceiling is recomputed from the items
/// inside the visible domain only, which is what makes the value axis react
/// to zoom.
pub struct ScaleManager;

impl ScaleManager {
    /// Constructs scale state for a freshly mounted dataset.
    pub fn build(
        timestamps: &[i64],
        dataset: &ChartDataset,
        layout: &PanelLayout,
        tick_interval_ms: i64,
    ) -> ChartResult<ScaleState> {
        let time = TimeScale::from_timestamps(
            timestamps,
            layout.continuous.left,
            layout.continuous.right,
        )?;

        let (full_start, full_end) = time.full_extent();
        let scrubber = TimeScale::new(
            full_start,
            full_end + tick_interval_ms,
            layout.scrubber.left,
            layout.scrubber.right,
        )?;

        let viewport = ViewportState::new(time.full_extent());
        let value = ValueScale::new(
            visible_headroom(timestamps, dataset, viewport.domain()),
            layout.continuous.top,
            layout.continuous.bottom,
        )?;

        Ok(ScaleState {
            time,
            value,
            scrubber,
        })
    }

    /// Re-derives the shared scales for the current viewport domain.
    pub fn build_or_update(
        scales: &mut ScaleState,
        timestamps: &[i64],
        dataset: &ChartDataset,
        viewport: &ViewportState,
        layout: &PanelLayout,
    ) -> ChartResult<()> {
        let (start, end) = viewport.domain();
        scales.time.set_visible_domain(start, end)?;

        let headroom = visible_headroom(timestamps, dataset, viewport.domain());
        scales.value.update(
            headroom,
            layout.continuous.top,
            layout.continuous.bottom,
        )?;

        trace!(start, end, headroom, "scale state updated");
        Ok(())
    }
}

/// Value-axis ceiling over the continuous values visible in `domain`.
fn visible_headroom(timestamps: &[i64], dataset: &ChartDataset, domain: (i64, i64)) -> f64 {
    let lo = bisect_left(timestamps, domain.0);
    let hi = bisect_right(timestamps, domain.1);
    let visible = &dataset.items[lo.min(dataset.items.len())..hi.min(dataset.items.len())];

    ValueScale::headroom_max(
        dataset
            .continuous
            .iter()
            .flat_map(|series| visible.iter().filter_map(|item| series.extract(item))),
    )
}

#[cfg(test)]
mod tests {
    use super::ScaleManager;
    use crate::core::{Margins, PanelLayout, Viewport};
    use crate::data::{ChartDataset, DataItem, SeriesSpec};
    use crate::engine::ViewportState;
    use crate::scene::Color;

    fn dataset() -> ChartDataset {
        let items = (0..10)
            .map(|i| {
                DataItem::new(i64::from(i) * 60_000)
                    .with_field("count", if i == 5 { 80.0 } else { 5.0 })
            })
            .collect();
        ChartDataset {
            items,
            continuous: vec![SeriesSpec::field("count", Color::rgb(0.2, 0.4, 0.8), "count")],
            discrete: Vec::new(),
        }
    }

    fn layout() -> PanelLayout {
        PanelLayout::compute(
            Viewport::new(960, 540),
            Margins::new(20.0, 30.0, 30.0, 40.0),
            0,
        )
        .expect("valid layout")
    }

    #[test]
    fn value_ceiling_tracks_visible_maximum() {
        let dataset = dataset();
        let timestamps = dataset.timestamps();
        let layout = layout();
        let mut scales =
            ScaleManager::build(&timestamps, &dataset, &layout, 60_000).expect("build scales");
        assert_eq!(scales.value.domain().1, 81.0);

        // Zoom past the spike; the ceiling falls back to the floor.
        let mut viewport = ViewportState::new(scales.time.full_extent());
        viewport.apply_zoom((6 * 60_000, 9 * 60_000));
        ScaleManager::build_or_update(&mut scales, &timestamps, &dataset, &viewport, &layout)
            .expect("update scales");
        assert_eq!(scales.value.domain().1, 10.0);
        assert_eq!(scales.time.domain(), (6 * 60_000, 9 * 60_000));
    }

    #[test]
    fn scrubber_scale_ignores_zoom() {
        let dataset = dataset();
        let timestamps = dataset.timestamps();
        let layout = layout();
        let mut scales =
            ScaleManager::build(&timestamps, &dataset, &layout, 60_000).expect("build scales");
        let full = scales.scrubber.domain();

        let mut viewport = ViewportState::new(scales.time.full_extent());
        viewport.apply_zoom((60_000, 120_000));
        ScaleManager::build_or_update(&mut scales, &timestamps, &dataset, &viewport, &layout)
            .expect("update scales");
        assert_eq!(scales.scrubber.domain(), full);
        assert_eq!(full.1, 9 * 60_000 + 60_000);
    }
}
