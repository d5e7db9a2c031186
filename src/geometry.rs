//! Colors, rectangles and the dirty-region tracker used to bound redraws.

/// An RGBA color with straight (non-premultiplied) float channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into `0xAARRGGBB`, rounding each channel to the nearest byte.
    pub fn to_argb(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Axis-aligned rectangle. A rectangle with non-positive width or height is
/// empty and acts as the identity for [`Rect::union`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from left/top/right/bottom edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Bounding box of a circle.
    pub fn around(cx: f32, cy: f32, radius: f32) -> Self {
        Self::from_ltrb(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Exact (fractional) center point.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle enclosing both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Overlapping area, or `None` when the rectangles don't overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > left && bottom > top {
            Some(Rect::from_ltrb(left, top, right, bottom))
        } else {
            None
        }
    }
}

/// Tracks what was drawn last frame so the next invalidation covers both the
/// old and the new extents.
#[derive(Debug, Clone, Default)]
pub struct DirtyRegion {
    /// Extents drawn during the most recent frame.
    drawing: Rect,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current drawing extents and return the region to redraw.
    ///
    /// `extents` are relative to `origin`; the result is the union of the
    /// previous frame's extents with the new ones, intersected with `outer`.
    /// An empty rectangle is returned when nothing overlaps `outer`.
    pub fn update<I>(&mut self, origin: (f32, f32), extents: I, outer: Rect) -> Rect
    where
        I: IntoIterator<Item = Rect>,
    {
        let previous = self.drawing;

        let drawing = extents
            .into_iter()
            .map(|rect| rect.offset(origin.0, origin.1))
            .fold(Rect::EMPTY, |acc, rect| acc.union(&rect));
        self.drawing = drawing;

        previous
            .union(&drawing)
            .intersect(&outer)
            .unwrap_or(Rect::EMPTY)
    }

    pub fn drawing_bounds(&self) -> Rect {
        self.drawing
    }
}
