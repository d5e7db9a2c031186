use crate::geometry::Rect;

/// Raw radius value meaning "derive the radius from the hotspot bounds".
pub const RADIUS_AUTO: i32 = -1;

/// Radius of a fully expanded ripple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MaxRadius {
    /// Half the diagonal of the hotspot bounds
    #[default]
    Auto,
    /// Fixed radius in pixels
    Explicit(f32),
}

impl MaxRadius {
    pub fn resolve(&self, hotspot_bounds: &Rect) -> f32 {
        match self {
            MaxRadius::Auto => auto_radius(hotspot_bounds),
            MaxRadius::Explicit(radius) => *radius,
        }
    }

    /// The raw integer form, with [`RADIUS_AUTO`] for `Auto`.
    pub fn to_raw(&self) -> i32 {
        match self {
            MaxRadius::Auto => RADIUS_AUTO,
            MaxRadius::Explicit(radius) => radius.round() as i32,
        }
    }
}

/// Negative values (the sentinel or anything else) select `Auto`.
impl From<i32> for MaxRadius {
    fn from(raw: i32) -> Self {
        if raw < 0 {
            MaxRadius::Auto
        } else {
            MaxRadius::Explicit(raw as f32)
        }
    }
}

impl From<f32> for MaxRadius {
    fn from(raw: f32) -> Self {
        if raw.is_finite() && raw >= 0.0 {
            MaxRadius::Explicit(raw)
        } else {
            MaxRadius::Auto
        }
    }
}

/// Radius that reaches every corner from the center: `sqrt(w² + h²) / 2`.
pub fn auto_radius(bounds: &Rect) -> f32 {
    let w = bounds.width.max(0.0);
    let h = bounds.height.max(0.0);
    (w * w + h * h).sqrt() / 2.0
}

/// Lifecycle of a ripple or background animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RipplePhase {
    #[default]
    Idle,
    Entering,
    Entered,
    Exiting,
    Finished,
}

/// Geometry shared by foreground and background animations.
///
/// Holds a snapshot of the hotspot bounds that the owning drawable refreshes
/// through `on_hotspot_bounds_changed`; components never write it back.
#[derive(Debug, Clone)]
pub(crate) struct RippleComponent {
    hotspot_bounds: Rect,
    max_radius: MaxRadius,
    target_radius: f32,
    density: f32,
}

impl RippleComponent {
    pub(crate) fn new(hotspot_bounds: Rect) -> Self {
        Self {
            hotspot_bounds,
            max_radius: MaxRadius::Auto,
            target_radius: auto_radius(&hotspot_bounds),
            density: 1.0,
        }
    }

    pub(crate) fn setup(&mut self, max_radius: MaxRadius, density: f32) {
        self.max_radius = max_radius;
        self.density = if density > 0.0 { density } else { 1.0 };
        self.update_target_radius();
    }

    pub(crate) fn on_hotspot_bounds_changed(&mut self, hotspot_bounds: Rect) {
        self.hotspot_bounds = hotspot_bounds;
        self.update_target_radius();
    }

    fn update_target_radius(&mut self) {
        self.target_radius = self.max_radius.resolve(&self.hotspot_bounds);
    }

    pub(crate) fn hotspot_bounds(&self) -> Rect {
        self.hotspot_bounds
    }

    pub(crate) fn target_radius(&self) -> f32 {
        self.target_radius
    }

    /// Anti-aliasing fringe around a circle, one density-independent pixel.
    pub(crate) fn padding(&self) -> f32 {
        self.density.max(1.0).ceil()
    }

    /// Extent of a circle of the target radius at `center`, relative to the
    /// hotspot center.
    pub(crate) fn circle_bounds(&self, center: (f32, f32)) -> Rect {
        Rect::around(center.0, center.1, self.target_radius + self.padding())
    }
}
