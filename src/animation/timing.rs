//! Easing curves.
//!
//! The named curves are the CSS cubic-bezier presets, plus the Material
//! "fast out, slow in" curve ripples expand with. All of them share one
//! bezier solver; [`TimingFunction::Custom`] takes an arbitrary closure.

use std::sync::Arc;

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Clone)]
pub enum TimingFunction {
    Linear,
    /// CSS `ease-in`
    EaseIn,
    /// CSS `ease-out`
    EaseOut,
    /// CSS `ease-in-out`
    EaseInOut,
    /// Cubic bezier through (0, 0), (x1, y1), (x2, y2), (1, 1)
    CubicBezier(f32, f32, f32, f32),
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    pub const FAST_OUT_SLOW_IN: TimingFunction = TimingFunction::CubicBezier(0.4, 0.0, 0.2, 1.0);

    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => solve_bezier(t, (0.42, 0.0), (1.0, 1.0)),
            TimingFunction::EaseOut => solve_bezier(t, (0.0, 0.0), (0.58, 1.0)),
            TimingFunction::EaseInOut => solve_bezier(t, (0.42, 0.0), (0.58, 1.0)),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                solve_bezier(t, (*x1, *y1), (*x2, *y2))
            }
            TimingFunction::Custom(f) => f(t),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => f.write_str("Linear"),
            TimingFunction::EaseIn => f.write_str("EaseIn"),
            TimingFunction::EaseOut => f.write_str("EaseOut"),
            TimingFunction::EaseInOut => f.write_str("EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => f
                .debug_tuple("CubicBezier")
                .field(x1)
                .field(y1)
                .field(x2)
                .field(y2)
                .finish(),
            TimingFunction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 24;
const EPSILON: f32 = 1e-5;

/// One coordinate of a unit cubic bezier with control values `p1`, `p2`.
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x equals `x`, then return its y.
///
/// Newton steps converge quickly for well-behaved curves; flat slopes fall
/// back to bisection, which always converges since x is monotonic for
/// control x values in `[0, 1]`.
fn solve_bezier(x: f32, p1: (f32, f32), p2: (f32, f32)) -> f32 {
    let (x1, y1) = p1;
    let (x2, y2) = p2;

    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return bezier(s, y1, y2);
        }
        let slope = bezier_derivative(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(s, y1, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_lags_ease_out_leads() {
        assert!(TimingFunction::EaseIn.evaluate(0.5) < 0.5);
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
        assert!((TimingFunction::EaseInOut.evaluate(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_curves_hit_endpoints() {
        let curves = [
            TimingFunction::Linear,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
            TimingFunction::FAST_OUT_SLOW_IN,
        ];
        for curve in curves {
            assert!(curve.evaluate(0.0).abs() < 1e-3, "{:?} at 0", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-3, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_fast_out_slow_in_front_loaded() {
        assert!(TimingFunction::FAST_OUT_SLOW_IN.evaluate(0.5) > 0.6);
    }

    #[test]
    fn test_monotonic() {
        let curve = TimingFunction::FAST_OUT_SLOW_IN;
        let mut previous = 0.0;
        for i in 1..=20 {
            let value = curve.evaluate(i as f32 / 20.0);
            assert!(value >= previous - 1e-4);
            previous = value;
        }
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.25), 0.0);
        assert_eq!(step.evaluate(0.75), 1.0);
    }
}
