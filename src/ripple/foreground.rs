use std::time::Duration;

use crate::animation::{Animatable, TimingFunction, Transition, Tween};
use crate::canvas::{Canvas, Paint};
use crate::geometry::Rect;

use super::component::{MaxRadius, RippleComponent, RipplePhase};
use super::config::RippleConfig;

/// An expanding wave anchored at a touch point.
///
/// Entering grows the radius from zero to the target radius at full
/// opacity. Exiting keeps growing toward the target while opacity drops to
/// zero; the ripple is `Finished` exactly when it becomes fully transparent.
#[derive(Debug, Clone)]
pub struct RippleForeground {
    component: RippleComponent,
    phase: RipplePhase,
    /// Touch point in drawable coordinates
    anchor: (f32, f32),
    /// Radius as a fraction of the target radius
    radius: Tween<f32>,
    opacity: Tween<f32>,
    enter_transition: Transition,
    exit_transition: Transition,
    tween_origin: bool,
}

impl RippleForeground {
    pub fn new(hotspot_bounds: Rect, x: f32, y: f32, config: &RippleConfig) -> Self {
        Self {
            component: RippleComponent::new(hotspot_bounds),
            phase: RipplePhase::Idle,
            anchor: (x, y),
            radius: Tween::new(0.0),
            opacity: Tween::new(0.0),
            enter_transition: config.foreground_enter.clone(),
            exit_transition: config.foreground_exit.clone(),
            tween_origin: config.tween_origin,
        }
    }

    pub fn setup(&mut self, max_radius: MaxRadius, density: f32) {
        self.component.setup(max_radius, density);
    }

    /// Start expanding, or snap straight to the entered state when `force`d.
    pub fn enter(&mut self, force: bool, now: Duration) {
        self.opacity.set_immediate(1.0);
        if force {
            self.radius.set_immediate(1.0);
            self.phase = RipplePhase::Entered;
        } else {
            self.radius.animate_to(1.0, self.enter_transition.clone(), now);
            self.phase = RipplePhase::Entering;
        }
    }

    pub fn exit(&mut self, now: Duration) {
        match self.phase {
            RipplePhase::Finished | RipplePhase::Exiting => return,
            RipplePhase::Idle => {
                self.end();
                return;
            }
            RipplePhase::Entering | RipplePhase::Entered => {}
        }

        let fade = Transition::new(self.exit_transition.duration_ms, TimingFunction::Linear)
            .delay(self.exit_transition.delay_ms);
        self.radius.animate_to(1.0, self.exit_transition.clone(), now);
        self.opacity.animate_to(0.0, fade, now);
        self.phase = RipplePhase::Exiting;
    }

    /// Terminate immediately without animating.
    pub fn end(&mut self) {
        self.radius.finish();
        self.opacity.set_immediate(0.0);
        self.phase = RipplePhase::Finished;
    }

    /// Sample animations at `now`. Returns true while still animating.
    pub fn update(&mut self, now: Duration) -> bool {
        let radius_running = self.radius.advance(now);
        let opacity_running = self.opacity.advance(now);

        match self.phase {
            RipplePhase::Entering if !radius_running => self.phase = RipplePhase::Entered,
            RipplePhase::Exiting if !opacity_running => self.phase = RipplePhase::Finished,
            _ => {}
        }

        radius_running || opacity_running
    }

    /// Move the anchor without restarting the animation.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.anchor = (x, y);
    }

    pub fn has_finished_exit(&self) -> bool {
        self.phase == RipplePhase::Finished
    }

    pub fn phase(&self) -> RipplePhase {
        self.phase
    }

    pub fn anchor(&self) -> (f32, f32) {
        self.anchor
    }

    /// Current radius in pixels.
    pub fn radius(&self) -> f32 {
        self.component.target_radius() * *self.radius.current()
    }

    pub fn target_radius(&self) -> f32 {
        self.component.target_radius()
    }

    pub fn opacity(&self) -> f32 {
        *self.opacity.current()
    }

    /// Anchor relative to the hotspot center, pulled inside the target
    /// radius when the bounds are too small to contain it.
    fn clamped_start(&self) -> (f32, f32) {
        let (cx, cy) = self.component.hotspot_bounds().center();
        let dx = self.anchor.0 - cx;
        let dy = self.anchor.1 - cy;

        let limit = self.component.target_radius();
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > limit && distance > 0.0 {
            let scale = limit / distance;
            (dx * scale, dy * scale)
        } else {
            (dx, dy)
        }
    }

    /// Current circle center relative to the hotspot center.
    pub fn center(&self) -> (f32, f32) {
        let start = self.clamped_start();
        if self.tween_origin {
            <(f32, f32)>::lerp(&start, &(0.0, 0.0), *self.radius.current())
        } else {
            start
        }
    }

    /// Area this ripple may cover, relative to the hotspot center.
    pub fn bounds(&self) -> Rect {
        self.component.circle_bounds(self.center())
    }

    pub fn on_hotspot_bounds_changed(&mut self, hotspot_bounds: Rect) {
        self.component.on_hotspot_bounds_changed(hotspot_bounds);
    }

    /// Draw relative to the hotspot center. Returns true if anything was drawn.
    pub fn draw(&self, canvas: &mut dyn Canvas, paint: &Paint) -> bool {
        let opacity = self.opacity();
        let radius = self.radius();
        if opacity <= 0.0 || radius <= 0.0 {
            return false;
        }

        let (x, y) = self.center();
        canvas.draw_circle(x, y, radius, &paint.with_alpha_scaled(opacity));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandCanvas, DrawCommand};
    use crate::geometry::Color;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn linear_config() -> RippleConfig {
        RippleConfig::new()
            .foreground_enter(Transition::new(200.0, TimingFunction::Linear))
            .foreground_exit(Transition::new(300.0, TimingFunction::Linear))
            .tween_origin(false)
    }

    fn ripple_at(x: f32, y: f32, config: &RippleConfig) -> RippleForeground {
        let mut ripple = RippleForeground::new(Rect::new(0.0, 0.0, 100.0, 100.0), x, y, config);
        ripple.setup(MaxRadius::Explicit(40.0), 1.0);
        ripple
    }

    #[test]
    fn test_new_ripple_is_idle_and_invisible() {
        let ripple = ripple_at(50.0, 50.0, &linear_config());
        assert_eq!(ripple.phase(), RipplePhase::Idle);
        assert_eq!(ripple.opacity(), 0.0);

        let mut canvas = CommandCanvas::new();
        assert!(!ripple.draw(&mut canvas, &Paint::default()));
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_enter_expands_over_duration() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(false, ms(0));
        assert_eq!(ripple.phase(), RipplePhase::Entering);

        assert!(ripple.update(ms(100)));
        assert!(approx_eq(ripple.radius(), 20.0));
        assert_eq!(ripple.opacity(), 1.0);

        assert!(!ripple.update(ms(200)));
        assert_eq!(ripple.phase(), RipplePhase::Entered);
        assert!(approx_eq(ripple.radius(), 40.0));
    }

    #[test]
    fn test_forced_enter_snaps() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(true, ms(0));
        assert_eq!(ripple.phase(), RipplePhase::Entered);
        assert_eq!(ripple.radius(), 40.0);
        assert_eq!(ripple.opacity(), 1.0);
    }

    #[test]
    fn test_exit_finishes_when_transparent() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(false, ms(0));
        ripple.update(ms(100));
        ripple.exit(ms(100));
        assert_eq!(ripple.phase(), RipplePhase::Exiting);

        ripple.update(ms(250));
        assert!(approx_eq(ripple.opacity(), 0.5));
        // Radius keeps growing while fading
        assert!(ripple.radius() > 20.0);
        assert!(!ripple.has_finished_exit());

        ripple.update(ms(400));
        assert!(ripple.has_finished_exit());
        assert_eq!(ripple.opacity(), 0.0);
    }

    #[test]
    fn test_end_is_immediate() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(false, ms(0));
        ripple.end();
        assert!(ripple.has_finished_exit());
        assert_eq!(ripple.opacity(), 0.0);
        assert!(!ripple.update(ms(10)));
    }

    #[test]
    fn test_exit_before_enter_ends() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.exit(ms(0));
        assert!(ripple.has_finished_exit());
    }

    #[test]
    fn test_move_keeps_progress() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(false, ms(0));
        ripple.update(ms(100));
        ripple.move_to(60.0, 50.0);

        assert_eq!(ripple.anchor(), (60.0, 50.0));
        assert_eq!(ripple.phase(), RipplePhase::Entering);
        assert!(approx_eq(ripple.radius(), 20.0));
        assert_eq!(ripple.center(), (10.0, 0.0));
    }

    #[test]
    fn test_anchor_clamped_when_bounds_shrink() {
        let config = linear_config();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut ripple = RippleForeground::new(bounds, 90.0, 50.0, &config);
        ripple.setup(MaxRadius::Auto, 1.0);
        assert_eq!(ripple.center(), (40.0, 0.0));

        // 30x40 bounds: center (15, 20), auto radius 25
        ripple.on_hotspot_bounds_changed(Rect::new(0.0, 0.0, 30.0, 40.0));
        assert!(approx_eq(ripple.target_radius(), 25.0));
        let (x, y) = ripple.center();
        assert!(approx_eq((x * x + y * y).sqrt(), 25.0));
    }

    #[test]
    fn test_center_tweens_toward_hotspot_center() {
        let config = linear_config().tween_origin(true);
        let mut ripple = ripple_at(70.0, 50.0, &config);
        ripple.enter(false, ms(0));
        assert_eq!(ripple.center(), (20.0, 0.0));

        ripple.update(ms(100));
        assert!(approx_eq(ripple.center().0, 10.0));

        ripple.update(ms(200));
        assert!(approx_eq(ripple.center().0, 0.0));
    }

    #[test]
    fn test_draw_scales_alpha_by_opacity() {
        let mut ripple = ripple_at(50.0, 50.0, &linear_config());
        ripple.enter(true, ms(0));
        ripple.exit(ms(0));
        ripple.update(ms(150));

        let mut canvas = CommandCanvas::new();
        let paint = Paint::new(Color::rgba(1.0, 1.0, 1.0, 0.4));
        assert!(ripple.draw(&mut canvas, &paint));

        match &canvas.commands()[0] {
            DrawCommand::Circle { center, color, .. } => {
                assert_eq!(*center, (0.0, 0.0));
                assert!(approx_eq(color.a, 0.2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bounds_cover_target_radius() {
        let ripple = ripple_at(50.0, 50.0, &linear_config());
        assert_eq!(ripple.bounds(), Rect::around(0.0, 0.0, 41.0));
    }
}
