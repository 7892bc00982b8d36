//! Frames are plain data so hosts can ship them across a process boundary
//! (e.g. to an out-of-process renderer) as JSON.

use approx::assert_relative_eq;

use timechart_rs::data::{ChartDataset, DataItem, SeriesSpec};
use timechart_rs::engine::{ChartEngine, RenderConfig};
use timechart_rs::scene::{Color, NullRenderer, RenderFrame, Shape};

#[test]
fn rendered_frame_survives_a_json_round_trip() {
    let dataset = ChartDataset {
        items: (0..10)
            .map(|i| DataItem::new(i * 60_000).with_field("count", 5.0 + i as f64))
            .collect(),
        continuous: vec![SeriesSpec::field("count", Color::rgb(0.2, 0.4, 0.8), "count")],
        discrete: Vec::new(),
    };

    let mut engine = ChartEngine::new(RenderConfig::new(960, 540), NullRenderer::default())
        .expect("valid config");
    engine.set_data(dataset).expect("sorted dataset");
    engine.mount(0).expect("mount");

    let frame = engine.frame();
    let json = serde_json::to_string(&frame).expect("serialize");
    let restored: RenderFrame = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.shapes.len(), frame.shapes.len());
    restored.validate().expect("restored frame is drawable");

    let stroke = |frame: &RenderFrame| {
        frame
            .shapes
            .iter()
            .find_map(|shape| match shape {
                Shape::Path(path) => Some(path.stroke_width),
                _ => None,
            })
            .expect("series path")
    };
    assert_relative_eq!(stroke(&restored), stroke(&frame));
    assert_relative_eq!(stroke(&frame), 1.5);
}
