//! Swimlane panel for discrete event series.
//!
//! Markers are keyed by series and item index, so a surviving marker
//! animates horizontally on domain change while lane layout stays fixed.
//! Zero and absent values never produce a marker; callers encode "event
//! occurred" as a non-zero sentinel.

use crate::core::{PanelLayout, layout::MARKER_RADIUS};
use crate::data::ChartDataset;
use crate::engine::ScaleState;
use crate::error::ChartResult;
use crate::scene::{CircleShape, Color, NodeKey, SceneLayer, Shape, TextHAlign, TextShape};

const LANE_LABEL_COLOR: Color = Color::from_rgb8(0x66, 0x66, 0x66);
const LANE_LABEL_FONT_SIZE: f64 = 10.0;

/// Builds the `Discrete` layer: lane title labels plus one marker per
/// event occurrence.
pub fn build(
    dataset: &ChartDataset,
    scales: &ScaleState,
    layout: &PanelLayout,
) -> ChartResult<Vec<(NodeKey, Shape)>> {
    let mut nodes = Vec::new();

    for (lane, series) in dataset.discrete.iter().enumerate() {
        let lane_center = layout.lane_center(lane);

        nodes.push((
            NodeKey::new(SceneLayer::Discrete, format!("lane-label-{}", series.title)),
            Shape::Text(TextShape::new(
                series.title.clone(),
                layout.discrete.left - 8.0,
                lane_center - LANE_LABEL_FONT_SIZE / 2.0,
                LANE_LABEL_FONT_SIZE,
                LANE_LABEL_COLOR,
                TextHAlign::Right,
            )),
        ));

        for (index, item) in dataset.items.iter().enumerate() {
            if !series.has_event(item) {
                continue;
            }
            let x = scales.time.time_to_pixel(item.timestamp)?;
            nodes.push((
                NodeKey::new(
                    SceneLayer::Discrete,
                    format!("marker-{}-{index}", series.title),
                ),
                Shape::Circle(CircleShape::new(x, lane_center, MARKER_RADIUS, series.color)),
            ));
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::core::{Margins, PanelLayout, Viewport};
    use crate::data::{ChartDataset, DataItem, SeriesSpec};
    use crate::engine::{ScaleManager, ViewportState};
    use crate::scene::{Color, Shape};

    fn fixture() -> (ChartDataset, Vec<i64>, PanelLayout) {
        let items = vec![
            DataItem::new(0).with_field("alarm", 1.0),
            DataItem::new(60_000).with_field("alarm", 0.0),
            DataItem::new(120_000),
            DataItem::new(180_000).with_field("alarm", 3.0),
        ];
        let dataset = ChartDataset {
            items,
            continuous: Vec::new(),
            discrete: vec![SeriesSpec::field("alarm", Color::rgb(0.9, 0.3, 0.2), "alarm")],
        };
        let timestamps = dataset.timestamps();
        let layout = PanelLayout::compute(
            Viewport::new(960, 540),
            Margins::new(20.0, 30.0, 30.0, 40.0),
            dataset.discrete.len(),
        )
        .expect("valid layout");
        (dataset, timestamps, layout)
    }

    #[test]
    fn zero_and_absent_values_produce_no_marker() {
        let (dataset, timestamps, layout) = fixture();
        let scales =
            ScaleManager::build(&timestamps, &dataset, &layout, 60_000).expect("scales");
        let _ = ViewportState::new(scales.time.full_extent());

        let nodes = build(&dataset, &scales, &layout).expect("build");
        let markers: Vec<_> = nodes
            .iter()
            .filter(|(key, _)| key.id.starts_with("marker-"))
            .collect();
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().any(|(key, _)| key.id == "marker-alarm-0"));
        assert!(markers.iter().any(|(key, _)| key.id == "marker-alarm-3"));
    }

    #[test]
    fn markers_sit_on_the_lane_center() {
        let (dataset, timestamps, layout) = fixture();
        let scales =
            ScaleManager::build(&timestamps, &dataset, &layout, 60_000).expect("scales");

        let nodes = build(&dataset, &scales, &layout).expect("build");
        for (key, shape) in nodes {
            if !key.id.starts_with("marker-") {
                continue;
            }
            match shape {
                Shape::Circle(circle) => assert_eq!(circle.cy, layout.lane_center(0)),
                other => panic!("unexpected shape: {other:?}"),
            }
        }
    }
}
