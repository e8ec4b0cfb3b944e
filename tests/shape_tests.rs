//! Shape Tests
//!
//! Tests for:
//! - Circle: side-count derivation and rebuilding on resize
//! - Filled primitives: exact pixel coverage on the software canvas
//! - Triangle: outline children and hit-testing
//! - Image: loading, caching, alpha modulation, missing files
//! - VisibleWrapper: hidden subtrees are not drawn

mod common;

use std::path::PathBuf;

use common::{draw_once, test_resources};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use scenery::entity::{Clickable, Entity, Group};
use scenery::render::Canvas;
use scenery::shapes::{Circle, FillCircle, FillRectangle, Image, Line, Rectangle, Triangle, VisibleWrapper};
use scenery::{Color, Rect, Scale, SceneError, WindowSize};

fn temp_png(name: &str, image: &RgbaImage) -> PathBuf {
    let path = std::env::temp_dir().join(format!("scenery-{}-{name}.png", std::process::id()));
    image.save(&path).unwrap();
    path
}

// ============================================================================
// Circle
// ============================================================================

#[test]
fn explicit_sides_are_built_at_init() {
    let mut circle = Circle::with_sides(Vec2::new(0.5, 0.5), 0.1, Color::WHITE, 6);
    circle.init().unwrap();

    assert_eq!(circle.node().child_count(), 6);
    assert!(circle.node().typed_child::<Line>(("side", 5_usize)).is_ok());
}

#[test]
fn derived_sides_follow_the_pixel_radius() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(1000, 600);
    let mut circle = Circle::with_sides(Vec2::new(0.5, 0.5), 0.1, Color::WHITE, 0);
    circle.init().unwrap();
    assert_eq!(circle.node().child_count(), 0);

    draw_once(&mut circle, &mut canvas, &resources).unwrap();

    // r = 0.1 * 1000 px = 100 px, about π·r sides.
    assert_eq!(circle.side_count(WindowSize::new(1000, 600)), 314);
    assert_eq!(circle.node().child_count(), 314);

    // A narrower window shrinks the radius and the side count with it.
    let mut small = Canvas::new(100, 60);
    draw_once(&mut circle, &mut small, &resources).unwrap();
    assert_eq!(circle.node().child_count(), 31);
}

#[test]
fn rebuilding_sides_keeps_other_children() {
    let (resources, _) = test_resources();
    let mut circle = Circle::with_sides(Vec2::new(0.5, 0.5), 0.1, Color::WHITE, 0);
    circle.init().unwrap();
    circle.node_mut().add_child("label", Group::new()).unwrap();

    draw_once(&mut circle, &mut Canvas::new(1000, 600), &resources).unwrap();
    assert!(circle.node().typed_child::<Group>("label").is_ok());
    assert_eq!(circle.node().child_count(), 314 + 1);

    draw_once(&mut circle, &mut Canvas::new(100, 60), &resources).unwrap();
    assert!(circle.node().typed_child::<Group>("label").is_ok());
    assert_eq!(circle.node().child_count(), 31 + 1);
    assert!(circle.node().typed_child::<Line>(("side", 30_usize)).is_ok());
    assert!(circle.node().typed_child::<Line>(("side", 31_usize)).is_err());
}

#[test]
fn circle_outline_reaches_its_radius() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(100, 100);
    let mut circle = Circle::with_sides(Vec2::new(50.0, 50.0), 20.0, Color::RED, 4)
        .with_scale(Scale::AbsoluteInPixels);
    circle.init().unwrap();

    draw_once(&mut circle, &mut canvas, &resources).unwrap();

    // Vertices of the square lie on the axes.
    assert_eq!(canvas.pixel(70, 50), Some(Color::RED));
    assert_eq!(canvas.pixel(50, 70), Some(Color::RED));
    assert_eq!(canvas.pixel(50, 50), Some(Color::TRANSPARENT));
}

#[test]
fn circle_hit_test_uses_the_radius() {
    let circle = Circle::new(Vec2::new(50.0, 50.0), 10.0, Color::WHITE).with_scale(Scale::AbsoluteInPixels);
    let window = WindowSize::new(100, 100);

    assert!(circle.contains(Vec2::new(50.0, 60.0), window));
    assert!(!circle.contains(Vec2::new(58.0, 58.0), window));
}

#[test]
fn dispose_releases_circle_sides() {
    let mut circle = Circle::new(Vec2::new(0.5, 0.5), 0.1, Color::WHITE);
    circle.init().unwrap();
    circle.dispose();

    assert_eq!(circle.node().child_count(), 0);
}

// ============================================================================
// Filled Primitives
// ============================================================================

#[test]
fn fill_rectangle_covers_its_relative_area() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(100, 100);
    // Center (0.5, 0.5), 20% of the window: pixels 40..60.
    let mut rect = FillRectangle::new(Rect::new(0.5, 0.5, 0.2, 0.2), Color::LIME);

    draw_once(&mut rect, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(40, 40), Some(Color::LIME));
    assert_eq!(canvas.pixel(59, 59), Some(Color::LIME));
    assert_eq!(canvas.pixel(39, 50), Some(Color::TRANSPARENT));
    assert_eq!(canvas.pixel(60, 50), Some(Color::TRANSPARENT));
}

#[test]
fn rectangle_draws_only_its_outline() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(50, 50);
    let mut rect = Rectangle::with_scale(Rect::new(10.0, 10.0, 20.0, 20.0), Color::YELLOW, Scale::AbsoluteInPixels);

    draw_once(&mut rect, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(10, 10), Some(Color::YELLOW));
    assert_eq!(canvas.pixel(29, 20), Some(Color::YELLOW));
    assert_eq!(canvas.pixel(20, 20), Some(Color::TRANSPARENT));
}

#[test]
fn fill_circle_is_a_solid_disc() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(50, 50);
    let mut disc = FillCircle::new(Vec2::new(25.0, 25.0), 10.0, Color::BLUE).with_scale(Scale::AbsoluteInPixels);

    draw_once(&mut disc, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(25, 25), Some(Color::BLUE));
    assert_eq!(canvas.pixel(25, 15), Some(Color::BLUE));
    assert_eq!(canvas.pixel(35, 25), Some(Color::BLUE));
    assert_eq!(canvas.pixel(25, 14), Some(Color::TRANSPARENT));
    assert_eq!(canvas.pixel(33, 33), Some(Color::TRANSPARENT));
}

#[test]
fn oversized_fill_circle_only_touches_the_window() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(20, 20);
    let mut disc = FillCircle::new(Vec2::new(10.0, 10.0), 1.0e7, Color::BLUE).with_scale(Scale::AbsoluteInPixels);

    draw_once(&mut disc, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(0, 0), Some(Color::BLUE));
    assert_eq!(canvas.pixel(19, 19), Some(Color::BLUE));
}

// ============================================================================
// Triangle
// ============================================================================

#[test]
fn triangle_is_outlined_by_three_lines() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(50, 50);
    let mut triangle = Triangle::new(
        Vec2::new(10.0, 10.0),
        Vec2::new(40.0, 10.0),
        Vec2::new(10.0, 40.0),
        Color::MAGENTA,
    )
    .with_scale(Scale::AbsoluteInPixels);
    triangle.init().unwrap();
    assert_eq!(triangle.node().child_count(), 3);

    draw_once(&mut triangle, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(25, 10), Some(Color::MAGENTA));
    assert_eq!(canvas.pixel(10, 25), Some(Color::MAGENTA));
    assert_eq!(canvas.pixel(25, 25), Some(Color::MAGENTA));
    assert_eq!(canvas.pixel(15, 15), Some(Color::TRANSPARENT));
}

#[test]
fn triangle_hit_test() {
    let triangle = Triangle::new(
        Vec2::new(0.1, 0.1),
        Vec2::new(0.5, 0.1),
        Vec2::new(0.1, 0.5),
        Color::WHITE,
    );
    let window = WindowSize::new(100, 100);

    assert!(triangle.contains(Vec2::new(20.0, 20.0), window));
    assert!(!triangle.contains(Vec2::new(45.0, 45.0), window));
}

// ============================================================================
// Image
// ============================================================================

#[test]
fn image_is_stretched_over_its_area() {
    let path = temp_png("stretch", &RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(50, 50);
    let mut image = Image::new(Rect::new(10.0, 10.0, 20.0, 20.0), path.to_string_lossy())
        .with_scale(Scale::AbsoluteInPixels);

    draw_once(&mut image, &mut canvas, &resources).unwrap();
    draw_once(&mut image, &mut canvas, &resources).unwrap();

    assert_eq!(canvas.pixel(10, 10), Some(Color::RED));
    assert_eq!(canvas.pixel(29, 29), Some(Color::RED));
    assert_eq!(canvas.pixel(30, 30), Some(Color::TRANSPARENT));
    // Loaded once, reused on the second frame.
    assert_eq!(canvas.texture_count(), 1);
    assert_eq!(resources.images().dimensions(&path.to_string_lossy()), Some((2, 2)));

    std::fs::remove_file(path).ok();
}

#[test]
fn image_alpha_requires_renderer_support() {
    let path = temp_png("alpha", &RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255])));
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(20, 20).without_alpha_mod();
    let mut image = Image::new(Rect::new(0.5, 0.5, 0.5, 0.5), path.to_string_lossy()).with_alpha(128);

    let err = draw_once(&mut image, &mut canvas, &resources);
    assert!(matches!(err, Err(SceneError::AlphaModUnsupported)));

    // Opaque drawing still works on the same renderer.
    image.alpha = 0xFF;
    draw_once(&mut image, &mut canvas, &resources).unwrap();

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_image_is_a_texture_load_error() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(20, 20);
    let mut image = Image::new(Rect::new(0.5, 0.5, 0.5, 0.5), "no/such/image.png");

    match draw_once(&mut image, &mut canvas, &resources) {
        Err(SceneError::TextureLoad { path, .. }) => assert_eq!(path, "no/such/image.png"),
        other => panic!("expected TextureLoad, got {other:?}"),
    }
    assert!(resources.images().is_empty());
}

// ============================================================================
// VisibleWrapper
// ============================================================================

#[test]
fn hidden_wrapper_skips_drawing_its_entity() {
    let (resources, _) = test_resources();
    let mut canvas = Canvas::new(10, 10);

    let fill = FillRectangle::with_scale(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED, Scale::AbsoluteInPixels);
    let mut root = Group::new();
    root.node_mut().add_child("toggle", VisibleWrapper::new(fill).hidden()).unwrap();

    draw_once(&mut root, &mut canvas, &resources).unwrap();
    assert_eq!(canvas.pixel(5, 5), Some(Color::TRANSPARENT));

    root.node_mut()
        .typed_child_mut::<VisibleWrapper>("toggle")
        .unwrap()
        .toggle();
    draw_once(&mut root, &mut canvas, &resources).unwrap();
    assert_eq!(canvas.pixel(5, 5), Some(Color::RED));
}

#[test]
fn wrapper_exposes_its_entity_after_init() {
    let fill = FillRectangle::new(Rect::new(0.5, 0.5, 0.1, 0.1), Color::RED);
    let mut wrapper = VisibleWrapper::new(fill);
    assert!(wrapper.inner().is_err());

    wrapper.init().unwrap();
    wrapper.inner_as_mut::<FillRectangle>().unwrap().color = Color::BLUE;
    assert_eq!(wrapper.inner_as::<FillRectangle>().unwrap().color, Color::BLUE);
}
