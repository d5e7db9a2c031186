use image::Rgba;
use ripple_compat::prelude::*;
use visual_tests::{compare_renders, Scene, Step};

const SIZE: u32 = 96;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert two scenes render the same, writing diff artifacts otherwise.
macro_rules! assert_same_render {
    ($name:literal, $expected:expr, $actual:expr) => {
        let result = compare_renders($name, &$expected.render(), &$actual.render(), 0.999)
            .expect("Visual test failed to run");
        assert!(
            result.passed,
            "Visual regression detected for '{}': similarity {:.4}% (threshold: 99.9%)\n\
             Diff: {}",
            $name,
            result.similarity * 100.0,
            result
                .diff_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "N/A".to_string())
        );
    };
}

fn dark_scene() -> Scene {
    Scene::new(SIZE, SIZE)
        .color(Color::BLACK.with_alpha(0.5))
        .content(Color::WHITE)
}

#[test]
fn test_render_is_deterministic() {
    init_logging();
    let scene = dark_scene().press(20.0, 30.0).advance(120);
    assert_same_render!("deterministic", scene, scene.clone());
}

#[test]
fn test_settled_press_matches_jump() {
    init_logging();
    let waited = dark_scene().press(20.0, 30.0).advance(2000);
    let jumped = dark_scene().press(20.0, 30.0).step(Step::Jump);
    assert_same_render!("settled_press", waited, jumped);
}

#[test]
fn test_release_returns_to_content() {
    init_logging();
    let idle = dark_scene();
    let released = dark_scene().press(48.0, 48.0).advance(100).release().advance(2000);
    assert_same_render!("released", idle, released);
}

#[test]
fn test_hidden_ripple_draws_only_content() {
    init_logging();
    let idle = dark_scene();
    let hidden = dark_scene()
        .press(48.0, 48.0)
        .advance(50)
        .step(Step::Visible(false));
    assert_same_render!("hidden", idle, hidden);
}

#[test]
fn test_press_changes_pixels() {
    init_logging();
    let idle = dark_scene().render();
    let pressed = dark_scene().press(48.0, 48.0).step(Step::Jump).render();

    let result = compare_renders("press_visible", &idle, &pressed, 0.0).expect("compare");
    assert!(result.differing_pixels > 0);
}

#[test]
fn test_bounded_ripple_stays_inside_bounds() {
    init_logging();
    let bounds = Rect::new(24.0, 24.0, 48.0, 48.0);
    let image = Scene::new(SIZE, SIZE)
        .bounds(bounds)
        .color(Color::BLACK)
        .content(Color::rgb(0.5, 0.5, 0.5))
        .press(30.0, 30.0)
        .step(Step::Jump)
        .render();

    let white = Rgba([255, 255, 255, 255]);
    for (x, y, pixel) in image.enumerate_pixels() {
        let inside = bounds.contains(x as f32 + 0.5, y as f32 + 0.5);
        if !inside {
            assert_eq!(*pixel, white, "pixel ({}, {}) outside the bounds was touched", x, y);
        }
    }
    assert_ne!(*image.get_pixel(48, 48), white);
}

#[test]
fn test_small_explicit_radius_leaves_corners() {
    init_logging();
    let image = Scene::new(SIZE, SIZE)
        .color(Color::BLACK)
        .radius(10)
        .step(Step::State(StateFlags::FOCUSED))
        .step(Step::Jump)
        .render();

    // No content: background only, centered and small
    assert_eq!(*image.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    assert_ne!(*image.get_pixel(48, 48), Rgba([255, 255, 255, 255]));
}
