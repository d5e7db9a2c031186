use crate::animation::{TimingFunction, Transition};

/// Timing and shape tuning for the ripple effect.
///
/// # Example
/// ```ignore
/// let config = RippleConfig::new()
///     .foreground_enter(Transition::new(180.0, TimingFunction::EaseOut))
///     .background_rest_fraction(0.5);
/// ```
#[derive(Clone, Debug)]
pub struct RippleConfig {
    /// Expansion of a pressed ripple
    pub foreground_enter: Transition,
    /// Fade-out of a released ripple. The radius keeps growing toward its
    /// target while opacity drops linearly over the same duration.
    pub foreground_exit: Transition,
    /// Background glow entering because of a press
    pub background_press: Transition,
    /// Background glow entering because of focus (softer, slower)
    pub background_focus: Transition,
    /// Background glow fading out
    pub background_exit: Transition,
    /// Background radius before it expands, as a fraction of the max radius
    pub background_rest_fraction: f32,
    /// Whether the ripple center drifts from the touch point toward the
    /// hotspot center as it grows
    pub tween_origin: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            foreground_enter: Transition::new(225.0, TimingFunction::FAST_OUT_SLOW_IN),
            foreground_exit: Transition::new(300.0, TimingFunction::EaseOut),
            background_press: Transition::new(150.0, TimingFunction::EaseOut),
            background_focus: Transition::new(450.0, TimingFunction::EaseInOut),
            background_exit: Transition::new(220.0, TimingFunction::EaseIn),
            background_rest_fraction: 0.6,
            tween_origin: true,
        }
    }
}

impl RippleConfig {
    /// Create a new ripple config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground_enter(mut self, transition: Transition) -> Self {
        self.foreground_enter = transition;
        self
    }

    pub fn foreground_exit(mut self, transition: Transition) -> Self {
        self.foreground_exit = transition;
        self
    }

    pub fn background_press(mut self, transition: Transition) -> Self {
        self.background_press = transition;
        self
    }

    pub fn background_focus(mut self, transition: Transition) -> Self {
        self.background_focus = transition;
        self
    }

    pub fn background_exit(mut self, transition: Transition) -> Self {
        self.background_exit = transition;
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn background_rest_fraction(mut self, fraction: f32) -> Self {
        self.background_rest_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn tween_origin(mut self, tween: bool) -> Self {
        self.tween_origin = tween;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_enter_is_slower_than_press() {
        let config = RippleConfig::default();
        assert!(config.background_focus.total_ms() > config.background_press.total_ms());
    }

    #[test]
    fn test_builder() {
        let config = RippleConfig::new()
            .foreground_exit(Transition::new(100.0, TimingFunction::Linear))
            .background_rest_fraction(1.5)
            .tween_origin(false);
        assert_eq!(config.foreground_exit.duration_ms, 100.0);
        assert_eq!(config.background_rest_fraction, 1.0);
        assert!(!config.tween_origin);
    }
}
