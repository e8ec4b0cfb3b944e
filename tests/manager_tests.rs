//! Scene Manager Tests
//!
//! Tests for:
//! - Scene stack: push/pop lifecycle, last-scene and empty-stack errors
//! - Deferred commands issued from handlers during a frame
//! - Frame loop: event dispatch, background clear, pacing, quitting
//! - Teardown: every scene disposed, every cached texture released

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{Probe, entries, journal, test_resources};
use glam::Vec2;
use scenery::entity::{Clickable, Entity};
use scenery::input::{Key, MouseButton};
use scenery::platform::{HeadlessPlatform, PlatformEvent};
use scenery::render::Canvas;
use scenery::shapes::{Button, FillRectangle, TextAlignment, TextEntity};
use scenery::{Color, Rect, Scale, Scene, SceneError, SceneManager, Settings};

fn manager() -> SceneManager {
    let (resources, _) = test_resources();
    SceneManager::with_resources(Settings::default().with_size(100, 60), resources)
}

fn mouse_down(x: i32, y: i32) -> PlatformEvent {
    PlatformEvent::MouseDown { x, y, button: MouseButton::Left }
}

fn mouse_up(x: i32, y: i32) -> PlatformEvent {
    PlatformEvent::MouseUp { x, y, button: MouseButton::Left }
}

// ============================================================================
// Scene Stack
// ============================================================================

#[test]
fn push_initializes_and_pop_disposes() {
    common::init_logger();
    let log = journal();
    let mut manager = manager();

    let mut a = Scene::new();
    a.add_entity(Probe::new("a", &log)).unwrap();
    assert_eq!(a.id(), None);
    let mut b = Scene::new();
    b.add_entity(Probe::new("b", &log)).unwrap();

    manager.push_scene(a).unwrap();
    manager.push_scene(b).unwrap();
    assert_eq!(entries(&log, "init"), ["init:a", "init:b"]);
    assert_eq!(manager.scene_count(), 2);
    assert_eq!(manager.active_scene().and_then(Scene::id), Some(2));

    manager.pop_scene().unwrap();

    assert_eq!(entries(&log, "dispose"), ["dispose:b"]);
    assert_eq!(manager.active_scene().and_then(Scene::id), Some(1));
    // The scene below was initialized once and never re-initialized.
    assert_eq!(entries(&log, "init"), ["init:a", "init:b"]);
}

#[test]
fn popping_the_last_scene_fails() {
    let log = journal();
    let mut manager = manager();
    let mut scene = Scene::new();
    scene.add_entity(Probe::new("only", &log)).unwrap();
    manager.push_scene(scene).unwrap();

    assert!(matches!(manager.pop_scene(), Err(SceneError::LastScene)));
    assert_eq!(manager.scene_count(), 1);
    assert!(entries(&log, "dispose").is_empty());
}

#[test]
fn empty_stack_has_no_active_scene() {
    let mut manager = manager();

    assert!(manager.active_scene().is_none());
    assert!(matches!(manager.pop_scene(), Err(SceneError::NoActiveScene)));
    assert!(matches!(
        manager.add_entity_to_active_scene(scenery::Group::new()),
        Err(SceneError::NoActiveScene)
    ));
}

#[test]
fn entities_added_to_an_active_scene_are_initialized() {
    let log = journal();
    let mut manager = manager();
    manager.push_scene(Scene::new()).unwrap();

    manager.add_entity_to_active_scene(Probe::new("late", &log)).unwrap();

    assert_eq!(entries(&log, "init"), ["init:late"]);
    assert_eq!(manager.active_scene().map(Scene::len), Some(1));
}

// ============================================================================
// Frame Loop
// ============================================================================

#[test]
fn frame_clears_to_the_background_and_draws() {
    let mut manager = manager();
    let mut scene = Scene::new();
    scene
        .add_entity(FillRectangle::with_scale(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::RED,
            Scale::AbsoluteInPixels,
        ))
        .unwrap();
    manager.push_scene(scene).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_idle_frame();
    let mut canvas = Canvas::new(100, 60);

    assert!(manager.frame(&mut platform, &mut canvas).unwrap());

    assert_eq!(canvas.pixel(5, 5), Some(Color::RED));
    assert_eq!(canvas.pixel(50, 50), Some(Settings::default().background));
    assert_eq!(canvas.frames_presented(), 1);
}

#[test]
fn render_runs_until_the_platform_quits_and_paces_frames() {
    let mut manager = manager();
    manager.push_scene(Scene::new()).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_idle_frame().push_idle_frame().push_idle_frame();
    let mut canvas = Canvas::new(100, 60);

    manager.render(&mut platform, &mut canvas).unwrap();

    assert_eq!(platform.window_title(), Some("Scene Displayer"));
    assert_eq!(canvas.frames_presented(), 3);
    // 120 fps -> 8 ms budget; the virtual clock never advances during a frame.
    assert_eq!(platform.delayed_ms(), 3 * 8);
}

#[test]
fn zero_target_fps_disables_pacing() {
    let mut manager = manager();
    manager.set_target_fps(0);
    manager.push_scene(Scene::new()).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_idle_frame().push_idle_frame();
    manager.render(&mut platform, &mut Canvas::new(100, 60)).unwrap();

    assert_eq!(platform.delayed_ms(), 0);
}

#[test]
fn platform_events_reach_the_active_scene() {
    let log = journal();
    let mut manager = manager();
    let mut scene = Scene::new();
    scene.add_entity(Probe::new("probe", &log)).unwrap();
    manager.push_scene(scene).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_frame([
        mouse_down(10, 10),
        mouse_up(10, 10),
        PlatformEvent::KeyDown { key: Key::Escape },
        PlatformEvent::KeyUp { key: Key::Escape },
    ]);
    manager.render(&mut platform, &mut Canvas::new(100, 60)).unwrap();

    assert_eq!(entries(&log, "down"), ["down:probe"]);
    assert_eq!(entries(&log, "up"), ["up:probe"]);
    assert_eq!(entries(&log, "key"), ["key:probe"]);
    assert!(!manager.input().is_key_held(Key::Escape));
}

#[test]
fn resize_updates_window_and_notifies_entities() {
    let sizes = Rc::new(Cell::new(None));
    let mut group = scenery::Group::new();
    let seen = Rc::clone(&sizes);
    group
        .node_mut()
        .events
        .on_window_resized(move |args, _| seen.set(Some(args.size)));

    let mut manager = manager();
    let mut scene = Scene::new();
    scene.add_entity(group).unwrap();
    manager.push_scene(scene).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_frame([PlatformEvent::WindowResized { width: 200, height: 120 }]);
    let mut canvas = Canvas::new(200, 120);
    manager.frame(&mut platform, &mut canvas).unwrap();

    let expected = scenery::WindowSize::new(200, 120);
    assert_eq!(sizes.get(), Some(expected));
    assert_eq!(manager.window_size(), expected);
}

// ============================================================================
// Deferred Commands
// ============================================================================

#[test]
fn click_handler_can_push_a_scene_and_quit() {
    let log = journal();
    let mut button = Button::new(
        Rect::new(0.5, 0.5, 0.2, 0.1),
        Color::SILVER,
        TextAlignment::Center,
        "Next",
        "fonts/any.ttf",
        10,
    );
    let next = Rc::new(Cell::new(Some(Probe::new("next", &log))));
    button.click_behavior_mut().add_handler(move |_, commands| {
        if let Some(probe) = next.take() {
            let mut scene = Scene::new();
            if scene.add_entity(probe).is_ok() {
                commands.push_scene(scene);
            }
        }
    });

    let mut manager = manager();
    let mut first = Scene::new();
    first.add_entity(button).unwrap();
    manager.push_scene(first).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    let mut canvas = Canvas::new(100, 60);
    platform.push_frame([mouse_down(50, 30)]);

    // The push is deferred until the frame is over.
    assert!(manager.frame(&mut platform, &mut canvas).unwrap());
    assert_eq!(manager.scene_count(), 2);
    assert_eq!(entries(&log, "init"), ["init:next"]);

    manager.commands().quit();
    platform.push_idle_frame();
    assert!(!manager.frame(&mut platform, &mut canvas).unwrap());
}

#[test]
fn update_handlers_run_every_frame() {
    let ticks = Rc::new(Cell::new(0));
    let mut scene = Scene::new();
    let counter = Rc::clone(&ticks);
    scene.add_update_handler(move |commands| {
        counter.set(counter.get() + 1);
        if counter.get() == 2 {
            commands.set_background(Color::BLACK);
        }
    });

    let mut manager = manager();
    manager.push_scene(scene).unwrap();
    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_idle_frame().push_idle_frame().push_idle_frame();
    manager.render(&mut platform, &mut Canvas::new(100, 60)).unwrap();

    assert_eq!(ticks.get(), 3);
    assert_eq!(manager.background(), Color::BLACK);
}

#[test]
fn pop_command_from_a_handler_returns_to_the_previous_scene() {
    let log = journal();
    let mut manager = manager();

    let mut base = Scene::new();
    base.add_entity(Probe::new("base", &log)).unwrap();
    manager.push_scene(base).unwrap();
    let base_id = manager.active_scene().and_then(Scene::id);

    let mut top = Scene::new();
    top.add_entity(Probe::new("top", &log)).unwrap();
    top.add_update_handler(|commands| commands.pop_scene());
    manager.push_scene(top).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    platform.push_idle_frame();
    manager.frame(&mut platform, &mut Canvas::new(100, 60)).unwrap();

    assert_eq!(manager.active_scene().and_then(Scene::id), base_id);
    assert_eq!(base_id, Some(1));
    assert_eq!(entries(&log, "dispose"), ["dispose:top"]);
}

// ============================================================================
// Dragging & Teardown
// ============================================================================

#[test]
fn headless_drag_moves_a_shape() {
    let mut manager = manager();
    let mut scene = Scene::new();
    scene
        .add_entity(
            FillRectangle::with_scale(Rect::new(10.0, 10.0, 20.0, 20.0), Color::RED, Scale::AbsoluteInPixels)
                .with_drag(scenery::Drag::DraggableAtCenter),
        )
        .unwrap();
    manager.push_scene(scene).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    let mut canvas = Canvas::new(100, 60);

    platform.push_frame([mouse_down(20, 20)]);
    manager.frame(&mut platform, &mut canvas).unwrap();

    platform.set_mouse_position(Vec2::new(60.0, 40.0));
    platform.push_idle_frame();
    manager.frame(&mut platform, &mut canvas).unwrap();

    let shape = manager
        .active_scene()
        .and_then(|scene| scene.typed_entity::<FillRectangle>(0))
        .unwrap();
    assert_eq!(shape.area, Rect::new(50.0, 30.0, 20.0, 20.0));
    assert_eq!(canvas.pixel(60, 40), Some(Color::RED));
}

#[test]
fn dispose_releases_scenes_and_text_textures() {
    let log = journal();
    let mut manager = manager();
    let mut scene = Scene::new();
    scene.add_entity(Probe::new("probe", &log)).unwrap();
    scene
        .add_entity(TextEntity::new("hi", "fonts/any.ttf", 10, Color::WHITE, Vec2::new(0.5, 0.5)))
        .unwrap();
    manager.push_scene(scene).unwrap();

    let mut platform = HeadlessPlatform::new(100, 60);
    let mut canvas = Canvas::new(100, 60);
    platform.push_idle_frame();
    manager.frame(&mut platform, &mut canvas).unwrap();
    assert_eq!(canvas.texture_count(), 1);

    manager.dispose(&mut canvas);

    assert_eq!(manager.scene_count(), 0);
    assert_eq!(entries(&log, "dispose"), ["dispose:probe"]);
    assert_eq!(canvas.texture_count(), 0);
    assert!(manager.resources().text().is_empty());
}
