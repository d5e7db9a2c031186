//! Touch-feedback ripples for views that predate the platform's native
//! ripple, plus a facade that picks the native drawable when it exists.
//!
//! The core is [`ripple::RippleDrawable`]; hosts drive it through the
//! [`drawable::Drawable`] contract and paint it on any [`canvas::Canvas`].

pub mod animation;
pub mod canvas;
pub mod clock;
pub mod compat;
pub mod drawable;
pub mod geometry;
pub mod ripple;
pub mod state;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition};
    pub use crate::canvas::{Canvas, CommandCanvas, DrawCommand, Paint, PaintStyle};
    pub use crate::clock::{FrameClock, ManualClock, SystemClock};
    pub use crate::compat::{
        Context, DisplayMetrics, Platform, RippleColor, RippleCompat, View, RIPPLE_MATERIAL_DARK,
        RIPPLE_MATERIAL_LIGHT,
    };
    pub use crate::drawable::{ColorDrawable, Drawable, Opacity};
    pub use crate::geometry::{Color, Rect};
    pub use crate::ripple::{MaxRadius, RippleConfig, RippleDrawable, MAX_RIPPLES};
    pub use crate::state::{ChangeFlags, ColorStateList, StateFlags};
}
