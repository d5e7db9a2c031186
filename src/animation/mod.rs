mod animatable;
mod timing;

use std::time::Duration;

pub use animatable::Animatable;
pub use timing::TimingFunction;

/// Duration, easing and start delay of one animated change.
#[derive(Clone, Debug)]
pub struct Transition {
    pub duration_ms: f32,
    pub timing: TimingFunction,
    pub delay_ms: f32,
}

impl Transition {
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Linear progress in `[0, 1]` after `elapsed_ms`, accounting for the delay.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        let adjusted = elapsed_ms - self.delay_ms;
        if adjusted <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (adjusted / self.duration_ms).min(1.0)
    }

    /// Total time from start until the animation settles.
    pub fn total_ms(&self) -> f32 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300.0, TimingFunction::EaseOut)
    }
}

/// A value animated between two endpoints over a [`Transition`].
///
/// Unlike a free-running animation, a tween never reads the clock itself:
/// callers pass the frame timestamp to [`Tween::animate_to`] and
/// [`Tween::advance`], which keeps progress deterministic under a simulated
/// clock.
#[derive(Clone, Debug)]
pub struct Tween<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Value when animation started
    start: T,
    /// Target value
    target: T,
    /// Frame time at which the animation started
    started_at: Duration,
    transition: Transition,
    animating: bool,
}

impl<T: Animatable> Tween<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            start: value.clone(),
            target: value,
            started_at: Duration::ZERO,
            transition: Transition::default(),
            animating: false,
        }
    }

    /// Start animating from the current value to `target`.
    pub fn animate_to(&mut self, target: T, transition: Transition, now: Duration) {
        self.start = self.current.clone();
        self.target = target;
        self.transition = transition;
        self.started_at = now;
        self.animating = true;
    }

    /// Sample the animation at `now`. Returns true while still running.
    pub fn advance(&mut self, now: Duration) -> bool {
        if !self.animating {
            return false;
        }

        let elapsed_ms = now.saturating_sub(self.started_at).as_secs_f32() * 1000.0;
        let t = self.transition.progress(elapsed_ms);
        if t >= 1.0 {
            self.current = self.target.clone();
            self.animating = false;
            return false;
        }

        let eased = self.transition.timing.evaluate(t);
        self.current = T::lerp(&self.start, &self.target, eased);
        true
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.start = value.clone();
        self.target = value;
        self.animating = false;
    }

    /// Jump to the target of the running animation, if any.
    pub fn finish(&mut self) {
        self.current = self.target.clone();
        self.animating = false;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_transition_progress() {
        let transition = Transition::new(200.0, TimingFunction::Linear).delay(50.0);
        assert_eq!(transition.progress(0.0), 0.0);
        assert_eq!(transition.progress(50.0), 0.0);
        assert!(approx_eq(transition.progress(150.0), 0.5));
        assert_eq!(transition.progress(1000.0), 1.0);
        assert_eq!(transition.total_ms(), 250.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let transition = Transition::new(0.0, TimingFunction::Linear);
        assert_eq!(transition.progress(0.001), 1.0);
    }

    #[test]
    fn test_tween_new() {
        let tween = Tween::new(0.0f32);
        assert_eq!(*tween.current(), 0.0);
        assert!(!tween.is_animating());
    }

    #[test]
    fn test_tween_linear_progress() {
        let mut tween = Tween::new(0.0f32);
        tween.animate_to(100.0, Transition::new(100.0, TimingFunction::Linear), ms(1000));

        assert!(tween.advance(ms(1050)));
        assert!(approx_eq(*tween.current(), 50.0));

        assert!(!tween.advance(ms(1100)));
        assert_eq!(*tween.current(), 100.0);
        assert!(!tween.is_animating());
    }

    #[test]
    fn test_tween_retarget_starts_from_current() {
        let mut tween = Tween::new(0.0f32);
        tween.animate_to(1.0, Transition::new(100.0, TimingFunction::Linear), ms(0));
        tween.advance(ms(50));

        tween.animate_to(0.0, Transition::new(100.0, TimingFunction::Linear), ms(50));
        tween.advance(ms(100));
        assert!(approx_eq(*tween.current(), 0.25));
    }

    #[test]
    fn test_tween_finish_and_set_immediate() {
        let mut tween = Tween::new(0.0f32);
        tween.animate_to(10.0, Transition::default(), ms(0));
        tween.finish();
        assert_eq!(*tween.current(), 10.0);
        assert!(!tween.is_animating());

        tween.set_immediate(3.0);
        assert_eq!(*tween.current(), 3.0);
        assert_eq!(*tween.target(), 3.0);
    }
}
