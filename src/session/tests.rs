use std::sync::Arc;

use ndarray::{Array2, array};
use tempfile::tempdir;

use super::{
    AnnotationController, BackgroundLayer, DisplayItem, Event, EventHandler, EventScript, Flow,
    Hit, MouseButton, Pane, RecordingCanvas, ScriptAction, StatusLevel, ThresholdExplorer,
    ThresholdState, hit_test,
};
use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::model::{Extent, PixelType, Point, Raster};

fn left(x: f64, y: f64, hit: Hit) -> Event {
    Event::Click {
        button: MouseButton::Left,
        position: [x, y],
        hit,
    }
}

fn right(hit: Hit) -> Event {
    Event::Click {
        button: MouseButton::Right,
        position: [0.0, 0.0],
        hit,
    }
}

fn controller_in(dir: &std::path::Path, dual: bool) -> AnnotationController {
    let raster = Raster::new(Array2::from_elem((50, 50), 42.0_f32), PixelType::U8).expect("raster");
    let settings = Settings {
        autosave_path: dir.join(".tmp.csv"),
        ..Settings::default()
    };
    AnnotationController::new(
        AnnotationStore::with_intensity_source(Arc::new(raster)),
        &settings,
        dir.join("cells_data.csv"),
        dual,
    )
}

fn shown_points(canvas: &RecordingCanvas) -> Vec<Point> {
    canvas
        .display
        .iter()
        .filter_map(|(_, item)| match item {
            DisplayItem::Points { points, .. } => Some(points.clone()),
            DisplayItem::Mask { .. } => None,
        })
        .flatten()
        .collect()
}

#[test]
fn hit_test_prefers_closest_marker() {
    let points = [Point::new(10.0, 10.0), Point::new(13.0, 10.0)];
    let extent = Extent {
        width: 20,
        height: 20,
    };
    assert_eq!(hit_test(&points, [12.0, 10.0], 4.0, extent), Hit::Marker(1));
    assert_eq!(hit_test(&points, [9.0, 10.0], 4.0, extent), Hit::Marker(0));
    assert_eq!(hit_test(&points, [1.0, 1.0], 4.0, extent), Hit::Background);
    assert_eq!(hit_test(&points, [30.0, 1.0], 4.0, extent), Hit::Nothing);
}

#[test]
fn clicks_add_and_remove_points_with_single_display_handle() {
    let dir = tempdir().expect("tempdir");
    let mut controller = controller_in(dir.path(), false);
    let mut canvas = RecordingCanvas::default();
    controller.start(&mut canvas);
    assert!(canvas.display.is_empty());

    controller.handle(&left(1.0, 2.0, Hit::Background), &mut canvas);
    controller.handle(&left(3.0, 4.0, Hit::Background), &mut canvas);
    controller.handle(&left(5.0, 6.0, Hit::Background), &mut canvas);
    assert_eq!(controller.store().len(), 3);
    assert_eq!(canvas.display.len(), 1);
    assert_eq!(shown_points(&canvas).len(), 3);
    assert_eq!(controller.store().points()[0].intensity, Some(42.0));

    controller.handle(&left(3.0, 4.0, Hit::Marker(1)), &mut canvas);
    assert_eq!(
        controller.store().coordinates().expect("coords"),
        vec![(1, 2), (5, 6)]
    );

    controller.handle(&right(Hit::Background), &mut canvas);
    assert_eq!(controller.store().coordinates().expect("coords"), vec![(1, 2)]);

    controller.handle(&left(0.0, 0.0, Hit::Nothing), &mut canvas);
    assert_eq!(controller.store().len(), 1);
    assert_eq!(canvas.display.len(), 1);
}

#[test]
fn right_click_needs_a_hit_and_never_fails_on_empty_store() {
    let dir = tempdir().expect("tempdir");
    let mut controller = controller_in(dir.path(), false);
    let mut canvas = RecordingCanvas::default();
    controller.handle(&left(1.0, 1.0, Hit::Background), &mut canvas);

    controller.handle(&right(Hit::Nothing), &mut canvas);
    assert_eq!(controller.store().len(), 1);

    for _ in 0..3 {
        assert_eq!(
            controller.handle(&right(Hit::Background), &mut canvas),
            Flow::Continue
        );
    }
    assert!(controller.store().is_empty());
    assert!(canvas.display.is_empty());
}

#[test]
fn clear_write_and_quit_keys() {
    let dir = tempdir().expect("tempdir");
    let mut controller = controller_in(dir.path(), false);
    let mut canvas = RecordingCanvas::default();
    controller.handle(&left(10.4, 20.6, Hit::Background), &mut canvas);

    controller.handle(&Event::KeyPress('w'), &mut canvas);
    let saved = std::fs::read_to_string(dir.path().join("cells_data.csv")).expect("saved");
    assert_eq!(saved, "10,21,42\n");

    controller.handle(&Event::KeyPress('c'), &mut canvas);
    assert!(controller.store().is_empty());
    assert!(canvas.display.is_empty());
    assert_eq!(
        canvas.last_status().map(|status| status.level),
        Some(StatusLevel::Warning)
    );

    controller.handle(&left(7.0, 8.0, Hit::Background), &mut canvas);
    assert_eq!(
        controller.handle(&Event::KeyPress('Q'), &mut canvas),
        Flow::Quit
    );
    let autosaved = std::fs::read_to_string(dir.path().join(".tmp.csv")).expect("autosave");
    assert_eq!(autosaved, "7,8,42\n");
}

#[test]
fn uppercase_clear_and_write_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let mut controller = controller_in(dir.path(), false);
    let mut canvas = RecordingCanvas::default();
    controller.handle(&left(3.0, 4.0, Hit::Background), &mut canvas);

    assert_eq!(
        controller.handle(&Event::KeyPress('C'), &mut canvas),
        Flow::Continue
    );
    assert_eq!(controller.store().len(), 1);

    controller.handle(&Event::KeyPress('W'), &mut canvas);
    assert!(!dir.path().join("cells_data.csv").exists());
}

#[test]
fn failed_autosave_keeps_session_open() {
    let dir = tempdir().expect("tempdir");
    let settings = Settings {
        autosave_path: dir.path().join("missing-dir").join(".tmp.csv"),
        ..Settings::default()
    };
    let mut controller = AnnotationController::new(
        AnnotationStore::new(),
        &settings,
        dir.path().join("out.csv"),
        false,
    );
    let mut canvas = RecordingCanvas::default();
    assert_eq!(
        controller.handle(&Event::KeyPress('q'), &mut canvas),
        Flow::Continue
    );
    assert_eq!(
        canvas.last_status().map(|status| status.level),
        Some(StatusLevel::Error)
    );
}

#[test]
fn background_toggle_only_with_intensity_layer() {
    let dir = tempdir().expect("tempdir");
    let mut canvas = RecordingCanvas::default();

    let mut single = controller_in(dir.path(), false);
    single.handle(&Event::KeyPress('a'), &mut canvas);
    assert_eq!(canvas.background, BackgroundLayer::Primary);

    let mut dual = controller_in(dir.path(), true);
    dual.handle(&Event::KeyPress('a'), &mut canvas);
    assert_eq!(canvas.background, BackgroundLayer::Intensity);
    assert_eq!(dual.background(), BackgroundLayer::Intensity);
    dual.handle(&Event::KeyPress('a'), &mut canvas);
    assert_eq!(canvas.background, BackgroundLayer::Primary);
}

#[test]
fn explorer_pick_is_idempotent_and_swaps_mask_handle() {
    let grid = array![[0.1_f64, 0.4], [0.6, 0.9]];
    let mut explorer = ThresholdExplorer::new(grid);
    let mut canvas = RecordingCanvas::default();
    assert_eq!(explorer.state(), ThresholdState::Unset);
    assert!(explorer.mask().is_none());

    let pick = |value| Event::Pick {
        value,
        pane: Pane::Histogram,
    };
    explorer.handle(&pick(0.5), &mut canvas);
    let first = explorer.mask().cloned().expect("mask");
    explorer.handle(&pick(0.5), &mut canvas);
    assert_eq!(explorer.mask(), Some(&first));
    assert_eq!(canvas.display.len(), 1);
    assert_eq!(first, array![[false, false], [true, true]]);

    explorer.handle(&pick(0.2), &mut canvas);
    assert_ne!(explorer.mask(), Some(&first));
    assert_eq!(explorer.state(), ThresholdState::Thresholded(0.2));
    let titles = canvas
        .display
        .iter()
        .filter_map(|(_, item)| match item {
            DisplayItem::Mask { title, .. } => Some(title.clone()),
            DisplayItem::Points { .. } => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Threshold 0.20".to_string()]);

    explorer.reset(&mut canvas);
    assert_eq!(explorer.state(), ThresholdState::Unset);
    assert!(canvas.display.is_empty());
}

#[test]
fn explorer_ignores_other_panes_and_quits_on_q() {
    let mut explorer = ThresholdExplorer::new(array![[1.0_f64]]);
    let mut canvas = RecordingCanvas::default();
    explorer.handle(
        &Event::Pick {
            value: 0.5,
            pane: Pane::Image,
        },
        &mut canvas,
    );
    assert_eq!(explorer.state(), ThresholdState::Unset);
    assert_eq!(
        explorer.handle(&Event::KeyPress('q'), &mut canvas),
        Flow::Quit
    );
}

#[test]
fn script_parses_and_reports_bad_lines() {
    let script = EventScript::parse("# session\nclick left 10 20.5\n\nkey w\npick 0.3\n")
        .expect("script");
    assert_eq!(
        script.actions(),
        &[
            ScriptAction::Click {
                button: MouseButton::Left,
                position: [10.0, 20.5],
            },
            ScriptAction::Key('w'),
            ScriptAction::Pick(0.3),
        ]
    );

    let error = EventScript::parse("key w\nclick middle 1 2\n").expect_err("bad button");
    assert!(error.to_string().contains("line 2"));
    assert!(EventScript::parse("key ww").is_err());
    assert!(EventScript::parse("click left x 2").is_err());
}

#[test]
fn script_replay_drives_controller_until_quit() {
    let dir = tempdir().expect("tempdir");
    let mut controller = controller_in(dir.path(), false);
    let mut canvas = RecordingCanvas::default();
    let script = EventScript::parse(
        "click left 10 10\nclick left 20 20\nclick left 10.5 10\nkey q\nclick left 30 30\n",
    )
    .expect("script");
    let extent = Extent {
        width: 50,
        height: 50,
    };
    let flow = script.replay(&mut controller, &mut canvas, |controller, position| {
        hit_test(controller.store().points(), position, 2.0, extent)
    });
    assert_eq!(flow, Flow::Quit);
    // third click landed on the first marker and removed it
    assert_eq!(
        controller.store().coordinates().expect("coords"),
        vec![(20, 20)]
    );
}
