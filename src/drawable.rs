//! The drawable contract hosts use to size, drive and paint visual content.

use crate::canvas::{Canvas, Paint};
use crate::geometry::{Color, Rect};
use crate::state::StateFlags;

/// How a drawable covers the pixels beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Opaque,
    Translucent,
    Transparent,
}

/// Something that can be painted into bounds and reacts to the host view's
/// state, visibility and touch hotspot.
///
/// Hotspot, state and visibility callbacks default to no-ops so simple
/// content only has to provide drawing and bounds.
pub trait Drawable {
    fn draw(&mut self, canvas: &mut dyn Canvas);

    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);

    fn opacity(&self) -> Opacity;

    /// Set the overall alpha in `[0, 1]`. Ignored unless overridden.
    fn set_alpha(&mut self, alpha: f32) {
        let _ = alpha;
    }

    /// Apply a new state set. Returns true if the appearance changed.
    fn set_state(&mut self, states: StateFlags) -> bool {
        let _ = states;
        false
    }

    fn state(&self) -> StateFlags {
        StateFlags::empty()
    }

    fn is_stateful(&self) -> bool {
        false
    }

    /// Returns true if the visibility changed.
    fn set_visible(&mut self, visible: bool, restart: bool) -> bool {
        let _ = (visible, restart);
        false
    }

    fn is_visible(&self) -> bool {
        true
    }

    /// Skip any running transition and show the final state.
    fn jump_to_current_state(&mut self) {}

    fn set_hotspot(&mut self, x: f32, y: f32) {
        let _ = (x, y);
    }

    fn set_hotspot_bounds(&mut self, bounds: Rect) {
        let _ = bounds;
    }

    fn hotspot_bounds(&self) -> Rect {
        self.bounds()
    }

    /// Region the next frame may touch.
    fn dirty_bounds(&mut self) -> Rect {
        self.bounds()
    }

    /// Whether the host should paint again (e.g. an animation is running).
    fn needs_paint(&self) -> bool {
        false
    }

    /// True for touch-feedback ripple drawables, native or backported.
    fn is_ripple(&self) -> bool {
        false
    }
}

/// Fills its bounds with a single color.
#[derive(Debug, Clone)]
pub struct ColorDrawable {
    color: Color,
    bounds: Rect,
    visible: bool,
}

impl ColorDrawable {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            bounds: Rect::EMPTY,
            visible: true,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Drawable for ColorDrawable {
    fn draw(&mut self, canvas: &mut dyn Canvas) {
        if self.color.a > 0.0 && !self.bounds.is_empty() {
            canvas.draw_rect(self.bounds, &Paint::new(self.color));
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn opacity(&self) -> Opacity {
        if self.color.a >= 1.0 {
            Opacity::Opaque
        } else if self.color.a <= 0.0 {
            Opacity::Transparent
        } else {
            Opacity::Translucent
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.color = self.color.with_alpha(alpha.clamp(0.0, 1.0));
    }

    fn set_visible(&mut self, visible: bool, _restart: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
