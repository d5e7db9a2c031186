//! Attach ripples to views, backported or native depending on the platform.
//!
//! The strategy is resolved once, when a [`RippleCompat`] is built, and
//! reused for every call. Platforms with a native ripple get it (masked by a
//! black layer, with display density applied through whichever hook the
//! platform level offers); everything older gets the backported
//! [`RippleDrawable`].

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::clock::{FrameClock, SystemClock};
use crate::drawable::{ColorDrawable, Drawable};
use crate::geometry::Color;
use crate::ripple::RippleDrawable;
use crate::state::ColorStateList;

/// Light overlay for dark surfaces.
pub const RIPPLE_MATERIAL_DARK: Color = Color::from_argb(0x4dffffff);
/// Dark overlay for light surfaces.
pub const RIPPLE_MATERIAL_LIGHT: Color = Color::from_argb(0x1f000000);

/// First platform level with a native ripple.
pub const NATIVE_RIPPLE_LEVEL: u32 = 21;
/// Last platform level where density goes through the target-density method.
const TARGET_DENSITY_LAST_LEVEL: u32 = 23;

/// Ripple color: one of the two presets, or an explicit state list.
#[derive(Debug, Clone, PartialEq)]
pub enum RippleColor {
    Preset { dark: bool },
    List(ColorStateList),
}

impl RippleColor {
    pub fn into_color_state_list(self) -> ColorStateList {
        match self {
            RippleColor::Preset { dark: true } => ColorStateList::value_of(RIPPLE_MATERIAL_DARK),
            RippleColor::Preset { dark: false } => ColorStateList::value_of(RIPPLE_MATERIAL_LIGHT),
            RippleColor::List(list) => list,
        }
    }
}

impl From<bool> for RippleColor {
    fn from(dark: bool) -> Self {
        RippleColor::Preset { dark }
    }
}

impl From<ColorStateList> for RippleColor {
    fn from(list: ColorStateList) -> Self {
        RippleColor::List(list)
    }
}

impl From<Color> for RippleColor {
    fn from(color: Color) -> Self {
        RippleColor::List(ColorStateList::value_of(color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Scale from density-independent to physical pixels
    pub density: f32,
    /// Dots per inch
    pub density_dpi: u32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            density_dpi: 160,
        }
    }
}

/// What a view knows about its display: metrics and the frame clock its
/// drawables animate against.
#[derive(Clone)]
pub struct Context {
    metrics: DisplayMetrics,
    clock: Rc<dyn FrameClock>,
}

impl Context {
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self {
            metrics,
            clock: Rc::new(SystemClock::new()),
        }
    }

    pub fn with_clock(mut self, clock: Rc<dyn FrameClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn metrics(&self) -> &DisplayMetrics {
        &self.metrics
    }

    pub fn clock(&self) -> Rc<dyn FrameClock> {
        Rc::clone(&self.clock)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// The host view a ripple is attached to.
pub trait View {
    fn context(&self) -> &Context;

    fn background(&self) -> Option<&dyn Drawable>;

    fn take_background(&mut self) -> Option<Box<dyn Drawable>>;

    fn set_background(&mut self, background: Box<dyn Drawable>);

    /// Route touch coordinates to the background's `set_hotspot`.
    fn set_hotspot_receiver(&mut self, enabled: bool);
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DensityError {
    #[error("Density hook not available on this native ripple")]
    Unsupported,
    #[error("Native ripple rejected density: {0}")]
    Rejected(String),
}

/// The platform's own ripple drawable.
pub trait NativeRipple: Drawable {
    /// Density hook on platform levels 21 to 23.
    fn set_target_density(&mut self, metrics: &DisplayMetrics) -> Result<(), DensityError> {
        let _ = metrics;
        Err(DensityError::Unsupported)
    }

    /// Density hook on platform level 24 and later.
    fn set_density_dpi(&mut self, density_dpi: u32) -> Result<(), DensityError> {
        let _ = density_dpi;
        Err(DensityError::Unsupported)
    }

    fn into_drawable(self: Box<Self>) -> Box<dyn Drawable>;
}

pub trait NativeRippleFactory {
    fn create(
        &self,
        color: ColorStateList,
        content: Option<Box<dyn Drawable>>,
        mask: Box<dyn Drawable>,
    ) -> Box<dyn NativeRipple>;
}

/// Pushes display density into a native ripple.
pub trait DensityApplier: fmt::Debug {
    fn apply(
        &self,
        metrics: &DisplayMetrics,
        ripple: &mut dyn NativeRipple,
    ) -> Result<(), DensityError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDensity;

impl DensityApplier for NoDensity {
    fn apply(
        &self,
        _metrics: &DisplayMetrics,
        _ripple: &mut dyn NativeRipple,
    ) -> Result<(), DensityError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetDensity;

impl DensityApplier for TargetDensity {
    fn apply(
        &self,
        metrics: &DisplayMetrics,
        ripple: &mut dyn NativeRipple,
    ) -> Result<(), DensityError> {
        ripple.set_target_density(metrics)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DensityDpi;

impl DensityApplier for DensityDpi {
    fn apply(
        &self,
        metrics: &DisplayMetrics,
        ripple: &mut dyn NativeRipple,
    ) -> Result<(), DensityError> {
        ripple.set_density_dpi(metrics.density_dpi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub api_level: u32,
}

impl Platform {
    pub fn new(api_level: u32) -> Self {
        Self { api_level }
    }

    pub fn has_native_ripple(&self) -> bool {
        self.api_level >= NATIVE_RIPPLE_LEVEL
    }

    /// The density hook this platform level exposes.
    pub fn density_applier(&self) -> Box<dyn DensityApplier> {
        match self.api_level {
            level if level < NATIVE_RIPPLE_LEVEL => Box::new(NoDensity),
            level if level <= TARGET_DENSITY_LAST_LEVEL => Box::new(TargetDensity),
            _ => Box::new(DensityDpi),
        }
    }
}

enum Strategy {
    Backport,
    Native {
        factory: Box<dyn NativeRippleFactory>,
        density: Box<dyn DensityApplier>,
    },
}

/// Entry point for adding ripples to views.
pub struct RippleCompat {
    strategy: Strategy,
}

impl RippleCompat {
    /// Always use the backported drawable.
    pub fn backport() -> Self {
        Self {
            strategy: Strategy::Backport,
        }
    }

    pub fn native(factory: Box<dyn NativeRippleFactory>, density: Box<dyn DensityApplier>) -> Self {
        Self {
            strategy: Strategy::Native { factory, density },
        }
    }

    /// Pick the strategy for `platform`. Falls back to the backport when
    /// the platform predates native ripples or no factory is available.
    pub fn detect(platform: Platform, factory: Option<Box<dyn NativeRippleFactory>>) -> Self {
        match factory {
            Some(factory) if platform.has_native_ripple() => {
                let density = platform.density_applier();
                log::debug!(
                    "Using native ripples (level {}, density via {:?})",
                    platform.api_level,
                    density
                );
                Self::native(factory, density)
            }
            _ => {
                log::debug!("Using backported ripples (level {})", platform.api_level);
                Self::backport()
            }
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.strategy, Strategy::Native { .. })
    }

    /// Give `view` a ripple background wrapping its current background,
    /// unless it already has a ripple.
    pub fn add_ripple(&self, view: &mut dyn View, color: impl Into<RippleColor>) {
        if view.background().is_some_and(|background| background.is_ripple()) {
            log::debug!("View already has a ripple background");
            return;
        }
        let content = view.take_background();
        self.add_ripple_with_content(view, color, content);
    }

    /// Replace the background of `view` with a ripple over `content`.
    pub fn add_ripple_with_content(
        &self,
        view: &mut dyn View,
        color: impl Into<RippleColor>,
        content: Option<Box<dyn Drawable>>,
    ) {
        let color = color.into().into_color_state_list();
        match &self.strategy {
            Strategy::Backport => {
                let ripple = backport_ripple(view.context(), color, content);
                view.set_hotspot_receiver(true);
                view.set_background(Box::new(ripple));
            }
            Strategy::Native { factory, density } => {
                let ripple = native_ripple(
                    factory.as_ref(),
                    density.as_ref(),
                    view.context(),
                    color,
                    content,
                );
                view.set_background(ripple);
            }
        }
    }

    pub fn generate_ripple_drawable(
        &self,
        context: &Context,
        color: impl Into<RippleColor>,
    ) -> Box<dyn Drawable> {
        self.generate_ripple_drawable_with_content(context, color, None)
    }

    pub fn generate_ripple_drawable_with_content(
        &self,
        context: &Context,
        color: impl Into<RippleColor>,
        content: Option<Box<dyn Drawable>>,
    ) -> Box<dyn Drawable> {
        let color = color.into().into_color_state_list();
        match &self.strategy {
            Strategy::Backport => Box::new(backport_ripple(context, color, content)),
            Strategy::Native { factory, density } => {
                native_ripple(factory.as_ref(), density.as_ref(), context, color, content)
            }
        }
    }
}

fn backport_ripple(
    context: &Context,
    color: ColorStateList,
    content: Option<Box<dyn Drawable>>,
) -> RippleDrawable {
    RippleDrawable::new(color, content)
        .with_density(context.metrics().density)
        .with_clock(context.clock())
}

fn native_ripple(
    factory: &dyn NativeRippleFactory,
    density: &dyn DensityApplier,
    context: &Context,
    color: ColorStateList,
    content: Option<Box<dyn Drawable>>,
) -> Box<dyn Drawable> {
    let mask = Box::new(ColorDrawable::new(Color::BLACK));
    let mut ripple = factory.create(color, content, mask);

    // Wrong density only changes how crisp the edge is
    if let Err(e) = density.apply(context.metrics(), ripple.as_mut()) {
        log::warn!("Failed to apply density to native ripple: {}", e);
    }

    ripple.into_drawable()
}
