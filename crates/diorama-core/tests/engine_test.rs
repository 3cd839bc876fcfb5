//! Integration scenarios driving the engine through its public API with
//! fixed-step ticks.

use std::time::{Duration, Instant};

use diorama_core::{
    Attachment, EngineConfig, GestureDetector, PointerButton, Scene, TransitionEngine, Vec2,
};

const TICK: Duration = Duration::from_millis(10);
const SEC_1: Duration = Duration::from_secs(1);

/// Root `R` with child `C` at 10% scale, both 2000×1414 world units, so the
/// baseline camera size framing the root is 707.
fn fixture() -> (Scene, TransitionEngine, diorama_core::PanelId, diorama_core::PanelId) {
    let mut scene = Scene::new();
    let r = scene.add_root(Vec2::new(2000.0, 1414.0));
    let c = scene.add_child(
        r,
        Vec2::new(250.0, -80.0),
        Vec2::splat(0.1),
        Vec2::new(2000.0, 1414.0),
    );
    let engine = TransitionEngine::new(EngineConfig::default(), r);
    (scene, engine, r, c)
}

/// Simulate `total` time in fixed ticks.
fn run(engine: &mut TransitionEngine, scene: &mut Scene, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        engine.tick(scene, TICK);
        elapsed += TICK;
    }
}

/// Tick until idle (bounded).
fn settle(engine: &mut TransitionEngine, scene: &mut Scene) {
    for _ in 0..1000 {
        if !engine.is_transitioning() {
            return;
        }
        engine.tick(scene, TICK);
    }
    panic!("transition never settled");
}

#[test]
fn scenario_1_zoom_into_child() {
    let (mut scene, mut engine, r, c) = fixture();
    assert_eq!(engine.camera().size, 707.0);

    assert!(engine.zoom_to_panel(&mut scene, c, SEC_1));
    run(&mut engine, &mut scene, SEC_1);

    // Camera reached the size that exactly framed C, then reset to baseline
    // on promotion; C now fills the view at unit scale.
    assert_eq!(engine.current_panel(), c);
    assert!(!scene.is_active(r));
    assert!(scene.is_active(c));
    assert_eq!(scene.attachment(c), Attachment::PromotedRoot);
    assert_eq!(scene.visible_half_height(c), Some(707.0));
    assert_eq!(engine.camera().size, 707.0);
    assert_eq!(engine.camera().position, Vec2::ZERO);
}

#[test]
fn scenario_2_back_out_restores_everything() {
    let (mut scene, mut engine, r, c) = fixture();
    engine.zoom_to_panel(&mut scene, c, SEC_1);
    settle(&mut engine, &mut scene);

    assert!(engine.go_back(&mut scene, SEC_1));
    settle(&mut engine, &mut scene);

    assert_eq!(engine.current_panel(), r);
    assert!(scene.is_active(r));
    assert_eq!(scene.parent(c), Some(r));
    assert_eq!(scene.local_pos(c), Vec2::new(250.0, -80.0));
    assert_eq!(scene.local_scale(c), Vec2::splat(0.1));
    assert_eq!(engine.camera().size, 707.0);
    assert_eq!(engine.camera().position, Vec2::ZERO);
}

#[test]
fn scenario_3_second_zoom_request_has_no_observable_effect() {
    let (mut scene_a, mut engine_a, _r, c_a) = fixture();
    let (mut scene_b, mut engine_b, _r2, c_b) = fixture();

    // A: single call. B: double call within the same tick.
    engine_a.zoom_to_panel(&mut scene_a, c_a, SEC_1);
    engine_b.zoom_to_panel(&mut scene_b, c_b, SEC_1);
    assert!(!engine_b.zoom_to_panel(&mut scene_b, c_b, SEC_1));

    // Camera trajectories match exactly, tick for tick.
    for _ in 0..120 {
        engine_a.tick(&mut scene_a, TICK);
        engine_b.tick(&mut scene_b, TICK);
        assert_eq!(engine_a.camera(), engine_b.camera());
        assert_eq!(scene_a.fade(c_a), scene_b.fade(c_b));
    }
    assert_eq!(engine_a.current_panel(), c_a);
    assert_eq!(engine_b.current_panel(), c_b);
}

#[test]
fn scenario_4_go_back_at_root_changes_nothing() {
    let (mut scene, mut engine, r, c) = fixture();
    let cam_before = engine.camera();

    assert!(!engine.go_back(&mut scene, SEC_1));

    assert!(!engine.is_transitioning());
    assert_eq!(engine.camera(), cam_before);
    assert_eq!(engine.current_panel(), r);
    assert!(scene.is_active(r));
    assert_eq!(scene.local_scale(c), Vec2::splat(0.1));
}

#[test]
fn scenario_5_manual_zoom_ignored_while_transitioning() {
    let (mut scene, mut engine, _r, c) = fixture();
    engine.zoom_to_panel(&mut scene, c, SEC_1);
    engine.tick(&mut scene, TICK);
    let cam = engine.camera();

    assert!(!engine.manual_zoom_in(Vec2::new(500.0, 500.0)));
    assert_eq!(engine.camera(), cam);
}

#[test]
fn zoom_in_then_back_out_returns_camera_to_baseline() {
    let (mut scene, mut engine, _r, c) = fixture();

    engine.zoom_to_panel(&mut scene, c, SEC_1);
    settle(&mut engine, &mut scene);
    engine.go_back(&mut scene, SEC_1);
    settle(&mut engine, &mut scene);

    assert!((engine.camera().size - 707.0).abs() < 0.001);
    assert!(engine.camera().position.x.abs() < 0.001);
    assert!(engine.camera().position.y.abs() < 0.001);
}

#[test]
fn only_first_of_many_zoom_requests_is_honored() {
    let (mut scene, mut engine, _r, c) = fixture();
    // A second possible target so the ignored requests differ from the first.
    let g = scene.add_child(c, Vec2::ZERO, Vec2::splat(0.2), Vec2::new(2000.0, 1414.0));

    assert!(engine.zoom_to_panel(&mut scene, c, SEC_1));
    while engine.is_transitioning() {
        assert!(!engine.zoom_to_panel(&mut scene, g, SEC_1));
        assert!(!engine.go_back(&mut scene, SEC_1));
        engine.tick(&mut scene, TICK);
    }
    assert_eq!(engine.current_panel(), c);
}

#[test]
fn deep_hierarchy_drill_and_full_back_out() {
    let mut scene = Scene::new();
    let size = Vec2::new(2000.0, 1414.0);
    let a = scene.add_root(size);
    let b = scene.add_child(a, Vec2::new(100.0, 50.0), Vec2::splat(0.1), size);
    let c = scene.add_child(b, Vec2::new(-40.0, 30.0), Vec2::splat(0.1), size);
    let mut engine = TransitionEngine::new(EngineConfig::default(), a);

    engine.zoom_to_panel(&mut scene, b, SEC_1);
    settle(&mut engine, &mut scene);
    engine.zoom_to_panel(&mut scene, c, SEC_1);
    settle(&mut engine, &mut scene);
    assert_eq!(engine.current_panel(), c);
    assert!(!scene.is_active(a));
    assert!(!scene.is_active(b));

    engine.go_back(&mut scene, SEC_1);
    settle(&mut engine, &mut scene);
    assert_eq!(engine.current_panel(), b);
    assert!(scene.is_active(b));

    engine.go_back(&mut scene, SEC_1);
    settle(&mut engine, &mut scene);
    assert_eq!(engine.current_panel(), a);
    assert!(scene.is_active(a));

    // Back at the true root: one more back-out is a no-op.
    assert!(!engine.go_back(&mut scene, SEC_1));
}

#[test]
fn fade_opens_only_in_late_window_on_zoom_in() {
    let (mut scene, mut engine, _r, c) = fixture();
    engine.zoom_to_panel(&mut scene, c, SEC_1);

    run(&mut engine, &mut scene, Duration::from_millis(700));
    assert_eq!(scene.fade(c), 0.0, "invisible before the window opens");

    run(&mut engine, &mut scene, Duration::from_millis(200));
    let mid = scene.fade(c);
    assert!(mid > 0.0 && mid < 1.0, "fading inside the window, got {mid}");

    settle(&mut engine, &mut scene);
    assert_eq!(scene.fade(c), 1.0);
}

#[test]
fn fade_closes_only_in_early_window_on_back_out() {
    let (mut scene, mut engine, _r, c) = fixture();
    engine.zoom_to_panel(&mut scene, c, SEC_1);
    settle(&mut engine, &mut scene);

    engine.go_back(&mut scene, SEC_1);
    run(&mut engine, &mut scene, Duration::from_millis(100));
    let early = scene.fade(c);
    assert!(early < 1.0, "fading during the early window, got {early}");

    run(&mut engine, &mut scene, Duration::from_millis(300));
    assert_eq!(scene.fade(c), 0.0, "fully faded after the window closes");
}

#[test]
fn pointer_flow_double_click_back_out() {
    let (mut scene, mut engine, r, c) = fixture();
    let mut gestures = GestureDetector::default();
    engine.zoom_to_panel(&mut scene, c, SEC_1);
    settle(&mut engine, &mut scene);

    let t0 = Instant::now();
    gestures.begin_tick();
    engine.handle_pointer_down(&mut scene, &mut gestures, PointerButton::Secondary, Vec2::ZERO, t0);
    gestures.begin_tick();
    engine.handle_pointer_down(
        &mut scene,
        &mut gestures,
        PointerButton::Secondary,
        Vec2::ZERO,
        t0 + Duration::from_millis(150),
    );
    settle(&mut engine, &mut scene);
    assert_eq!(engine.current_panel(), r);
}
