use std::time::Duration;

use crate::animation::{Transition, Tween};
use crate::canvas::{Canvas, Paint};
use crate::geometry::Rect;

use super::component::{MaxRadius, RippleComponent, RipplePhase};
use super::config::RippleConfig;

/// Focus/press glow centered on the hotspot bounds.
///
/// A single instance lives for the lifetime of its drawable and is re-entered
/// on every activation. Entering fades in while the radius grows from the
/// resting fraction to the full radius; exiting only fades out.
#[derive(Debug, Clone)]
pub struct RippleBackground {
    component: RippleComponent,
    phase: RipplePhase,
    /// Radius as a fraction of the target radius
    radius: Tween<f32>,
    opacity: Tween<f32>,
    focused: bool,
    press_transition: Transition,
    focus_transition: Transition,
    exit_transition: Transition,
    rest_fraction: f32,
}

impl RippleBackground {
    pub fn new(hotspot_bounds: Rect, config: &RippleConfig) -> Self {
        let rest_fraction = config.background_rest_fraction;
        Self {
            component: RippleComponent::new(hotspot_bounds),
            phase: RipplePhase::Idle,
            radius: Tween::new(rest_fraction),
            opacity: Tween::new(0.0),
            focused: false,
            press_transition: config.background_press.clone(),
            focus_transition: config.background_focus.clone(),
            exit_transition: config.background_exit.clone(),
            rest_fraction,
        }
    }

    pub fn setup(&mut self, max_radius: MaxRadius, density: f32) {
        self.component.setup(max_radius, density);
    }

    /// Fade in. Focus uses the softer focus transition, a press the quicker
    /// press transition.
    pub fn enter(&mut self, focused: bool, now: Duration) {
        self.focused = focused;
        if matches!(self.phase, RipplePhase::Idle | RipplePhase::Finished) {
            self.radius.set_immediate(self.rest_fraction);
        }

        let transition = if focused {
            self.focus_transition.clone()
        } else {
            self.press_transition.clone()
        };
        self.radius.animate_to(1.0, transition.clone(), now);
        self.opacity.animate_to(1.0, transition, now);
        self.phase = RipplePhase::Entering;
    }

    pub fn exit(&mut self, now: Duration) {
        if matches!(self.phase, RipplePhase::Idle | RipplePhase::Finished) {
            return;
        }
        self.opacity.animate_to(0.0, self.exit_transition.clone(), now);
        self.phase = RipplePhase::Exiting;
    }

    /// Jump to the end of the running transition: settled when entering,
    /// gone when exiting.
    pub fn end(&mut self) {
        match self.phase {
            RipplePhase::Entering | RipplePhase::Entered => {
                self.radius.finish();
                self.opacity.finish();
                self.phase = RipplePhase::Entered;
            }
            RipplePhase::Exiting | RipplePhase::Finished => {
                self.radius.set_immediate(self.rest_fraction);
                self.opacity.set_immediate(0.0);
                self.phase = RipplePhase::Finished;
            }
            RipplePhase::Idle => {}
        }
    }

    /// Sample animations at `now`. Returns true while still animating.
    pub fn update(&mut self, now: Duration) -> bool {
        let radius_running = self.radius.advance(now);
        let opacity_running = self.opacity.advance(now);

        match self.phase {
            RipplePhase::Entering if !radius_running && !opacity_running => {
                self.phase = RipplePhase::Entered;
            }
            RipplePhase::Exiting if !opacity_running => {
                self.phase = RipplePhase::Finished;
            }
            _ => {}
        }

        radius_running || opacity_running
    }

    pub fn is_visible(&self) -> bool {
        *self.opacity.current() > 0.0 && self.radius() > 0.0
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn phase(&self) -> RipplePhase {
        self.phase
    }

    /// Current radius in pixels.
    pub fn radius(&self) -> f32 {
        self.component.target_radius() * *self.radius.current()
    }

    pub fn opacity(&self) -> f32 {
        *self.opacity.current()
    }

    /// Area the glow may cover, relative to the hotspot center.
    pub fn bounds(&self) -> Rect {
        self.component.circle_bounds((0.0, 0.0))
    }

    pub fn on_hotspot_bounds_changed(&mut self, hotspot_bounds: Rect) {
        self.component.on_hotspot_bounds_changed(hotspot_bounds);
    }

    /// Draw relative to the hotspot center. Returns true if anything was drawn.
    pub fn draw(&self, canvas: &mut dyn Canvas, paint: &Paint) -> bool {
        if !self.is_visible() {
            return false;
        }
        canvas.draw_circle(0.0, 0.0, self.radius(), &paint.with_alpha_scaled(self.opacity()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;
    use crate::canvas::CommandCanvas;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn config() -> RippleConfig {
        RippleConfig::new()
            .background_press(Transition::new(100.0, TimingFunction::Linear))
            .background_focus(Transition::new(400.0, TimingFunction::Linear))
            .background_exit(Transition::new(200.0, TimingFunction::Linear))
            .background_rest_fraction(0.5)
    }

    fn background() -> RippleBackground {
        let mut background = RippleBackground::new(Rect::new(0.0, 0.0, 100.0, 100.0), &config());
        background.setup(MaxRadius::Explicit(40.0), 1.0);
        background
    }

    #[test]
    fn test_starts_invisible_at_rest() {
        let background = background();
        assert!(!background.is_visible());
        assert_eq!(background.phase(), RipplePhase::Idle);
        assert!(approx_eq(background.radius(), 20.0));
    }

    #[test]
    fn test_press_enter_grows_from_rest() {
        let mut background = background();
        background.enter(false, ms(0));
        assert!(!background.is_focused());

        background.update(ms(50));
        assert!(background.is_visible());
        assert!(approx_eq(background.radius(), 30.0));
        assert!(approx_eq(background.opacity(), 0.5));

        assert!(!background.update(ms(100)));
        assert_eq!(background.phase(), RipplePhase::Entered);
        assert!(approx_eq(background.radius(), 40.0));
    }

    #[test]
    fn test_focus_enter_is_softer() {
        let mut pressed = background();
        let mut focused = background();
        pressed.enter(false, ms(0));
        focused.enter(true, ms(0));
        pressed.update(ms(100));
        focused.update(ms(100));

        assert!(focused.is_focused());
        assert!(focused.opacity() < pressed.opacity());
        assert_eq!(focused.phase(), RipplePhase::Entering);
    }

    #[test]
    fn test_exit_fades_to_finished() {
        let mut background = background();
        background.enter(false, ms(0));
        background.update(ms(100));
        background.exit(ms(100));

        background.update(ms(200));
        assert!(approx_eq(background.opacity(), 0.5));
        // Radius holds while fading
        assert!(approx_eq(background.radius(), 40.0));

        background.update(ms(300));
        assert_eq!(background.phase(), RipplePhase::Finished);
        assert!(!background.is_visible());
    }

    #[test]
    fn test_reenter_after_exit_restarts_from_rest() {
        let mut background = background();
        background.enter(false, ms(0));
        background.end();
        background.exit(ms(0));
        background.end();
        assert_eq!(background.phase(), RipplePhase::Finished);

        background.enter(false, ms(10));
        background.update(ms(10));
        assert!(approx_eq(background.radius(), 20.0));
    }

    #[test]
    fn test_end_settles_entering() {
        let mut background = background();
        background.enter(true, ms(0));
        background.end();
        assert_eq!(background.phase(), RipplePhase::Entered);
        assert_eq!(background.opacity(), 1.0);
        assert!(approx_eq(background.radius(), 40.0));
    }

    #[test]
    fn test_exit_when_idle_is_ignored() {
        let mut background = background();
        background.exit(ms(0));
        assert_eq!(background.phase(), RipplePhase::Idle);
    }

    #[test]
    fn test_draw_only_when_visible() {
        let mut canvas = CommandCanvas::new();
        let mut background = background();
        assert!(!background.draw(&mut canvas, &Paint::default()));

        background.enter(false, ms(0));
        background.end();
        assert!(background.draw(&mut canvas, &Paint::default()));
        assert_eq!(canvas.circles().count(), 1);
    }

    #[test]
    fn test_bounds_centered_on_hotspot() {
        let background = background();
        assert_eq!(background.bounds(), Rect::around(0.0, 0.0, 41.0));
    }
}
