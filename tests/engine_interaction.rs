//! End-to-end gesture flows through the engine facade: brush zoom, reset,
//! timeline interaction and pointer focus, rendered through the null
//! backend.

use std::sync::{Arc, Mutex};

use timechart_rs::core::Viewport;
use timechart_rs::data::{ChartDataset, DataItem, SeriesSpec};
use timechart_rs::engine::{ChartEngine, RenderConfig};
use timechart_rs::interaction::ChartEvent;
use timechart_rs::scene::{Color, NodeKey, NullRenderer, SceneLayer, Shape};

const MINUTE: i64 = 60_000;

/// 100 one-minute items: a flat count of 5 with a spike of 20 at index 10,
/// a dip to 0 at index 11 and a gap (missing field) at index 20. Alert
/// events at indices 30 and 50; index 11 carries an explicit zero alert.
fn dataset() -> ChartDataset {
    let items = (0..100)
        .map(|i| {
            let mut item = DataItem::new(i as i64 * MINUTE);
            if i != 20 {
                let count = match i {
                    10 => 20.0,
                    11 => 0.0,
                    _ => 5.0,
                };
                item = item.with_field("count", count);
            }
            match i {
                30 => item = item.with_field("alerts", 1.0),
                50 => item = item.with_field("alerts", 2.0),
                11 => item = item.with_field("alerts", 0.0),
                _ => {}
            }
            item
        })
        .collect();

    ChartDataset {
        items,
        continuous: vec![SeriesSpec::field("count", Color::rgb(0.2, 0.4, 0.8), "count")],
        discrete: vec![SeriesSpec::field("alerts", Color::rgb(0.9, 0.3, 0.2), "alerts")],
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(RenderConfig::new(960, 540), NullRenderer::default())
        .expect("valid config");
    engine.set_data(dataset()).expect("sorted dataset");
    engine.mount(0).expect("mount");
    engine
}

/// Pixel position of item `i` on the main panel for the default layout,
/// whose continuous plot spans x = 40 .. 930.
fn item_x(i: i64) -> f64 {
    40.0 + (i as f64 / 99.0) * (930.0 - 40.0)
}

fn collect_events(engine: &mut ChartEngine<NullRenderer>) -> Arc<Mutex<Vec<ChartEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.subscribe(move |event| sink.lock().expect("lock").push(*event));
    seen
}

#[test]
fn mount_draws_line_markers_axes_and_scrubber() {
    let mut engine = engine();
    engine.render().expect("render");
    let renderer = engine.renderer();

    assert_eq!(renderer.last_path_count, 1);
    // Alert markers at indices 30 and 50 only; the zero at 11 draws nothing.
    assert_eq!(renderer.last_circle_count, 2);
    assert!(renderer.last_shape_count > 10);
}

#[test]
fn brush_selection_zooms_to_snapped_item_timestamps() {
    let mut engine = engine();
    let events = collect_events(&mut engine);

    engine.brush_start(item_x(5)).expect("start");
    engine.brush_move(item_x(40)).expect("move");
    engine
        .brush_end(item_x(40), 1_000)
        .expect("end");

    assert!(engine.zoom_active());
    assert_eq!(engine.visible_domain(), Some((5 * MINUTE, 40 * MINUTE)));

    let events = events.lock().expect("lock");
    assert!(events.contains(&ChartEvent::ZoomChanged {
        domain: (5 * MINUTE, 40 * MINUTE),
        zoom_active: true,
    }));
}

#[test]
fn advance_settles_the_transition_and_keeps_rendering_valid_frames() {
    let mut engine = engine();
    engine.brush_start(item_x(5)).expect("start");
    engine
        .brush_end(item_x(40), 1_000)
        .expect("end");

    // Mid-flight step, then one past the 500ms duration.
    engine.advance(1_250).expect("mid advance");
    let settled = engine.advance(1_600).expect("final advance");
    assert!(settled > 0);

    // The refined redraw still produces exactly one series path.
    assert_eq!(engine.renderer().last_path_count, 1);
    assert!(engine.zoom_active());
}

#[test]
fn double_click_resets_and_is_idempotent() {
    let mut engine = engine();
    let events = collect_events(&mut engine);

    engine.brush_start(item_x(5)).expect("start");
    engine
        .brush_end(item_x(40), 1_000)
        .expect("end");
    engine.double_click(2_000).expect("reset");

    assert!(!engine.zoom_active());
    assert_eq!(engine.visible_domain(), Some((0, 99 * MINUTE)));

    let before = events.lock().expect("lock").len();
    engine.double_click(3_000).expect("second reset");
    assert_eq!(events.lock().expect("lock").len(), before);
}

#[test]
fn reset_during_inflight_zoom_discards_the_stale_refinement() {
    let mut engine = engine();
    engine.brush_start(item_x(5)).expect("start");
    engine
        .brush_end(item_x(40), 1_000)
        .expect("end");

    // Reset before the zoom transition finishes.
    engine.advance(1_100).expect("advance");
    engine.double_click(1_200).expect("reset");
    engine.advance(2_000).expect("advance past both");

    assert!(!engine.zoom_active());
    assert_eq!(engine.visible_domain(), Some((0, 99 * MINUTE)));
    assert_eq!(engine.renderer().last_path_count, 1);
}

#[test]
fn pointer_move_snaps_to_nearest_item_and_shows_focus_markers() {
    let mut engine = engine();
    let events = collect_events(&mut engine);

    engine
        .pointer_move(item_x(10) + 1.0, 100.0)
        .expect("move");

    let guide = NodeKey::new(SceneLayer::Focus, "guide");
    let marker = NodeKey::new(SceneLayer::Focus, "point-count");
    assert!(engine.scene().contains(&guide));
    assert!(engine.scene().contains(&marker));
    match &engine.scene().get(&guide).expect("guide").shape {
        Shape::Line(line) => assert!((line.x1 - item_x(10)).abs() < 1e-6),
        other => panic!("unexpected guide shape: {other:?}"),
    }

    let events = events.lock().expect("lock");
    assert!(matches!(
        events.last(),
        Some(ChartEvent::PointerMoved { index: 10, .. })
    ));
}

#[test]
fn focus_marker_is_hidden_inside_a_gap() {
    let mut engine = engine();
    engine
        .pointer_move(item_x(10), 100.0)
        .expect("move onto data");
    engine
        .pointer_move(item_x(20), 100.0)
        .expect("move into gap");

    let marker = NodeKey::new(SceneLayer::Focus, "point-count");
    assert!(engine.scene().contains(&NodeKey::new(SceneLayer::Focus, "guide")));
    assert!(!engine.scene().contains(&marker));
}

#[test]
fn pointer_leave_clears_the_focus_layer() {
    let mut engine = engine();
    let events = collect_events(&mut engine);

    engine
        .pointer_move(item_x(10), 100.0)
        .expect("move");
    engine.pointer_leave().expect("leave");

    assert!(!engine.scene().contains(&NodeKey::new(SceneLayer::Focus, "guide")));
    assert!(!engine
        .scene()
        .contains(&NodeKey::new(SceneLayer::Focus, "point-count")));
    assert_eq!(
        events.lock().expect("lock").last(),
        Some(&ChartEvent::PointerLeft)
    );
}

#[test]
fn scrubber_click_notifies_and_resets_the_zoom() {
    let mut engine = engine();
    let events = collect_events(&mut engine);

    engine.brush_start(item_x(5)).expect("start");
    engine
        .brush_end(item_x(40), 1_000)
        .expect("end");
    engine.scrubber_click(500.0, 2_000).expect("click");

    assert!(!engine.zoom_active());
    let events = events.lock().expect("lock");
    let clicked = events.iter().find_map(|event| match event {
        ChartEvent::TimelineClicked { timestamp } => Some(*timestamp),
        _ => None,
    });
    let timestamp = clicked.expect("timeline click event");
    assert_eq!(timestamp % 1_000, 0);
}

#[test]
fn scrubber_hover_shows_and_hides_the_readout() {
    let mut engine = engine();
    engine.scrubber_pointer_move(500.0).expect("hover");

    let cursor = NodeKey::new(SceneLayer::Focus, "pointer-cursor");
    let label = NodeKey::new(SceneLayer::Focus, "pointer-label");
    assert!(engine.scene().contains(&cursor));
    assert!(engine.scene().contains(&label));

    engine.scrubber_pointer_leave().expect("leave");
    assert!(!engine.scene().contains(&cursor));
    assert!(!engine.scene().contains(&label));
}

#[test]
fn playback_cursor_appears_and_clears() {
    let mut engine = engine();
    let key = NodeKey::new(SceneLayer::Scrubber, "playback-cursor");

    engine
        .move_playback_cursor(Some(50 * MINUTE), 100)
        .expect("set cursor");
    assert!(engine.scene().contains(&key));

    engine.move_playback_cursor(None, 200).expect("clear cursor");
    assert!(!engine.scene().contains(&key));
}

#[test]
fn playback_cursor_moves_leave_other_transitions_undisturbed() {
    let mut engine = engine();
    engine
        .move_playback_cursor(Some(10 * MINUTE), 0)
        .expect("set cursor");

    engine.brush_start(item_x(5)).expect("start");
    engine.brush_end(item_x(40), 1_000).expect("end");
    engine.advance(1_250).expect("advance");

    let highlight = NodeKey::new(SceneLayer::Scrubber, "zoom-range");
    let mid_flight = engine
        .scene()
        .get(&highlight)
        .expect("highlight")
        .shape
        .clone();

    // Moving the cursor mid-animation must not snap the highlight.
    engine
        .move_playback_cursor(Some(60 * MINUTE), 1_250)
        .expect("move cursor");
    assert_eq!(
        engine.scene().get(&highlight).expect("highlight").shape,
        mid_flight
    );

    // The cursor itself glides rather than jumping to the new position.
    let cursor = NodeKey::new(SceneLayer::Scrubber, "playback-cursor");
    let cursor_x = |engine: &ChartEngine<NullRenderer>| match &engine
        .scene()
        .get(&cursor)
        .expect("cursor")
        .shape
    {
        Shape::Rect(rect) => rect.x,
        other => panic!("unexpected shape: {other:?}"),
    };
    let before = cursor_x(&engine);
    engine.advance(1_400).expect("advance");
    let during = cursor_x(&engine);
    assert!(during > before);

    engine.advance(2_000).expect("advance");
    assert!(cursor_x(&engine) > during);
    assert_ne!(
        engine.scene().get(&highlight).expect("highlight").shape,
        mid_flight
    );
}

#[test]
fn empty_dataset_mounts_as_a_placeholder() {
    let mut engine = ChartEngine::new(RenderConfig::new(960, 540), NullRenderer::default())
        .expect("valid config");
    engine.set_data(ChartDataset::default()).expect("empty dataset");
    engine.mount(0).expect("mount");

    // Timeline background plus a "no data" notice, nothing else.
    assert_eq!(engine.renderer().last_text_count, 1);
    assert_eq!(engine.renderer().last_shape_count, 2);
    assert_eq!(engine.frame().viewport, Viewport::new(960, 540));
}

#[test]
fn gestures_before_mount_are_rejected() {
    let mut engine = ChartEngine::new(RenderConfig::new(960, 540), NullRenderer::default())
        .expect("valid config");
    engine.set_data(dataset()).expect("dataset");

    assert!(engine.pointer_move(100.0, 100.0).is_err());
    assert!(engine.brush_start(100.0).is_err());
}
