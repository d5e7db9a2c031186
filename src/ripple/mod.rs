//! Touch-feedback ripple drawable.
//!
//! [`RippleDrawable`] reacts to the host view's state set: a press starts an
//! expanding [`RippleForeground`] at the touch hotspot and fades in a
//! [`RippleBackground`] glow, focus fades in the glow only. On release the
//! active ripple moves into a bounded pool of exiting ripples that keep
//! animating until they fade out.
//!
//! # Example
//! ```ignore
//! let colors = ColorStateList::value_of(Color::from_argb(0x1f000000));
//! let mut ripple = RippleDrawable::new(colors, None).with_density(2.0);
//! ripple.set_bounds(Rect::new(0.0, 0.0, 120.0, 48.0));
//! ripple.set_hotspot(30.0, 20.0);
//! ripple.set_state(StateFlags::ENABLED | StateFlags::PRESSED);
//! ripple.draw(&mut canvas);
//! ```

mod background;
mod component;
mod config;
mod foreground;
mod pool;

use std::rc::Rc;
use std::time::Duration;

pub use background::RippleBackground;
pub use component::{auto_radius, MaxRadius, RipplePhase, RADIUS_AUTO};
pub use config::RippleConfig;
pub use foreground::RippleForeground;
pub use pool::{ExitingRipples, MAX_RIPPLES};

use crate::canvas::{Canvas, Paint, PaintStyle};
use crate::clock::{FrameClock, SystemClock};
use crate::drawable::{Drawable, Opacity};
use crate::geometry::{Color, DirtyRegion, Rect};
use crate::state::{ChangeFlags, ColorStateList, StateFlags};

/// A drawable that shows touch feedback over optional content.
///
/// Drawing is clipped to the drawable bounds when there is content, and to
/// the area the live ripples cover otherwise. Animations are sampled from the
/// injected [`FrameClock`] on every [`Drawable::draw`].
pub struct RippleDrawable {
    config: RippleConfig,
    clock: Rc<dyn FrameClock>,

    /// Layout bounds assigned by the host
    bounds: Rect,
    /// Bounds used to size and anchor ripples
    hotspot_bounds: Rect,
    /// Set once `set_hotspot_bounds` decouples the hotspot from layout bounds
    override_bounds: bool,
    dirty: DirtyRegion,

    background: Option<RippleBackground>,
    /// Whether we expect to draw a background when visible
    background_active: bool,
    ripple: Option<RippleForeground>,
    /// Whether we expect to draw a ripple when visible
    ripple_active: bool,
    /// Hotspot awaiting the next ripple
    pending_hotspot: Option<(f32, f32)>,
    exiting: ExitingRipples,

    /// Created on first draw
    paint: Option<Paint>,
    density: f32,
    max_radius: MaxRadius,
    color: ColorStateList,
    content: Option<Box<dyn Drawable>>,

    state: StateFlags,
    visible: bool,
    dirty_flags: ChangeFlags,
}

impl RippleDrawable {
    pub fn new(color: ColorStateList, content: Option<Box<dyn Drawable>>) -> Self {
        Self {
            config: RippleConfig::default(),
            clock: Rc::new(SystemClock::new()),
            bounds: Rect::EMPTY,
            hotspot_bounds: Rect::EMPTY,
            override_bounds: false,
            dirty: DirtyRegion::new(),
            background: None,
            background_active: false,
            ripple: None,
            ripple_active: false,
            pending_hotspot: None,
            exiting: ExitingRipples::new(),
            paint: None,
            density: 1.0,
            max_radius: MaxRadius::Auto,
            color,
            content,
            state: StateFlags::empty(),
            visible: true,
            dirty_flags: ChangeFlags::empty(),
        }
    }

    pub fn with_config(mut self, config: RippleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Rc<dyn FrameClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Display density used to scale anti-aliasing fringes.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_radius(mut self, radius: impl Into<MaxRadius>) -> Self {
        self.max_radius = radius.into();
        self
    }

    pub fn set_color(&mut self, color: ColorStateList) {
        self.color = color;
        self.invalidate_self();
    }

    pub fn color(&self) -> &ColorStateList {
        &self.color
    }

    /// Radius of a fully expanded ripple, or `MaxRadius::Auto` to derive it
    /// from the hotspot bounds. Applies from the next enter.
    pub fn set_radius(&mut self, radius: impl Into<MaxRadius>) {
        self.max_radius = radius.into();
        self.invalidate_self();
    }

    pub fn radius(&self) -> MaxRadius {
        self.max_radius
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn content(&self) -> Option<&dyn Drawable> {
        self.content.as_deref()
    }

    pub fn is_ripple_active(&self) -> bool {
        self.ripple_active
    }

    pub fn is_background_active(&self) -> bool {
        self.background_active
    }

    pub fn active_ripple(&self) -> Option<&RippleForeground> {
        self.ripple.as_ref()
    }

    pub fn exiting_ripples(&self) -> &ExitingRipples {
        &self.exiting
    }

    pub fn ripple_background(&self) -> Option<&RippleBackground> {
        self.background.as_ref()
    }

    pub fn pending_hotspot(&self) -> Option<(f32, f32)> {
        self.pending_hotspot
    }

    /// Host-facing invalidation flags.
    pub fn change_flags(&self) -> ChangeFlags {
        self.dirty_flags
    }

    pub fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
    }

    fn invalidate_self(&mut self) {
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Ripples are clipped to the drawable bounds only when there is content
    /// to mask against.
    fn is_bounded(&self) -> bool {
        self.content.is_some()
    }

    /// Derive ripple and background activity from a state set. Returns true
    /// once the state set has been observed.
    pub fn on_state_change(&mut self, states: StateFlags) -> bool {
        let enabled = states.contains(StateFlags::ENABLED);
        let focused = states.contains(StateFlags::FOCUSED);
        let pressed = states.contains(StateFlags::PRESSED);

        self.set_ripple_active(enabled && pressed);
        self.set_background_active(focused || (enabled && pressed), focused);

        true
    }

    fn set_ripple_active(&mut self, active: bool) {
        if self.ripple_active != active {
            self.ripple_active = active;
            if active {
                self.try_ripple_enter();
            } else {
                self.try_ripple_exit();
            }
        }
    }

    fn set_background_active(&mut self, active: bool, focused: bool) {
        if self.background_active != active {
            self.background_active = active;
            if active {
                self.try_background_enter(focused);
            } else {
                self.try_background_exit();
            }
        }
    }

    fn try_background_enter(&mut self, focused: bool) {
        let now = self.now();
        let background = self
            .background
            .get_or_insert_with(|| RippleBackground::new(self.hotspot_bounds, &self.config));
        background.setup(self.max_radius, self.density);
        background.enter(focused, now);
        log::debug!("Background enter (focused: {})", focused);
        self.invalidate_self();
    }

    fn try_background_exit(&mut self) {
        // The background stays allocated so it can finish drawing
        if let Some(background) = self.background.as_mut() {
            background.exit(self.clock.now());
            log::debug!("Background exit");
            self.invalidate_self();
        }
    }

    /// Start the enter animation for the active ripple, creating it at the
    /// pending hotspot (or the hotspot center) if needed. Refused while the
    /// exiting pool is full.
    fn try_ripple_enter(&mut self) {
        if self.exiting.is_full() {
            log::warn!(
                "Dropping ripple enter: {} ripples already exiting",
                self.exiting.len()
            );
            return;
        }

        let now = self.now();
        if self.ripple.is_none() {
            let (x, y) = self
                .pending_hotspot
                .take()
                .unwrap_or_else(|| self.hotspot_bounds.center());
            self.ripple = Some(RippleForeground::new(self.hotspot_bounds, x, y, &self.config));
            log::debug!("Ripple created at ({}, {})", x, y);
        }

        if let Some(ripple) = self.ripple.as_mut() {
            ripple.setup(self.max_radius, self.density);
            ripple.enter(false, now);
        }
        self.invalidate_self();
    }

    /// Hand the active ripple to the exiting pool and start its exit.
    fn try_ripple_exit(&mut self) {
        let Some(mut ripple) = self.ripple.take() else {
            return;
        };

        ripple.exit(self.now());
        if self.exiting.push(ripple).is_err() {
            log::warn!("Exiting ripple pool full, dropping ripple");
        } else {
            log::debug!("Ripple exit ({} exiting)", self.exiting.len());
        }
        self.invalidate_self();
    }

    /// Cancel and drop the active ripple, every exiting ripple and the
    /// background. Nothing is drawn afterwards.
    fn clear_hotspots(&mut self) {
        if let Some(mut ripple) = self.ripple.take() {
            ripple.end();
            self.ripple_active = false;
        }

        if let Some(mut background) = self.background.take() {
            background.end();
            self.background_active = false;
        }

        self.cancel_exiting_ripples();
        log::debug!("Cleared all ripples");
    }

    fn cancel_exiting_ripples(&mut self) {
        self.exiting.cancel_all();
        // Always draw an additional "clean" frame after canceling animations
        self.invalidate_self();
    }

    fn on_bounds_change(&mut self, bounds: Rect) {
        if !self.override_bounds {
            self.hotspot_bounds = bounds;
            self.on_hotspot_bounds_changed();
        }

        if let Some(content) = self.content.as_mut() {
            content.set_bounds(bounds);
        }

        self.invalidate_self();
    }

    /// Notify every live animation that the hotspot bounds changed.
    fn on_hotspot_bounds_changed(&mut self) {
        let hotspot_bounds = self.hotspot_bounds;
        for ripple in self.exiting.iter_mut() {
            ripple.on_hotspot_bounds_changed(hotspot_bounds);
        }

        if let Some(ripple) = self.ripple.as_mut() {
            ripple.on_hotspot_bounds_changed(hotspot_bounds);
        }

        if let Some(background) = self.background.as_mut() {
            background.on_hotspot_bounds_changed(hotspot_bounds);
        }
    }

    /// Sample every animation at the current frame time. Returns true while
    /// anything is still moving.
    fn advance_animations(&mut self) -> bool {
        let now = self.now();
        let mut animating = self.exiting.update(now);

        if let Some(ripple) = self.ripple.as_mut() {
            animating |= ripple.update(now);
        }

        if let Some(background) = self.background.as_mut() {
            animating |= background.update(now);
        }

        animating
    }

    fn prune_ripples(&mut self) {
        let removed = self.exiting.prune();
        if removed > 0 {
            log::trace!(
                "Pruned {} finished ripples, {} remaining",
                removed,
                self.exiting.len()
            );
        }
    }

    fn draw_content(&mut self, canvas: &mut dyn Canvas) {
        if let Some(content) = self.content.as_mut() {
            content.draw(canvas);
        }
    }

    fn draw_background_and_ripples(&mut self, canvas: &mut dyn Canvas) {
        let background_visible = self
            .background
            .as_ref()
            .is_some_and(RippleBackground::is_visible);
        if self.ripple.is_none() && self.exiting.is_empty() && !background_visible {
            // Nothing to draw
            return;
        }

        let (x, y) = self.hotspot_bounds.center();
        canvas.translate(x, y);

        // Halve the alpha so the ripple and background together yield the
        // full alpha of the state color.
        let color = self.color.color_for_state(self.state);
        let paint = self.ripple_paint(color.with_alpha(color.a / 2.0));

        if let Some(background) = self.background.as_ref() {
            background.draw(canvas, &paint);
        }

        for ripple in self.exiting.iter() {
            ripple.draw(canvas, &paint);
        }

        if let Some(ripple) = self.ripple.as_ref() {
            ripple.draw(canvas, &paint);
        }

        canvas.translate(-x, -y);
    }

    fn ripple_paint(&mut self, color: Color) -> Paint {
        let paint = self.paint.get_or_insert_with(|| {
            Paint::new(Color::BLACK)
                .anti_alias(true)
                .style(PaintStyle::Fill)
        });
        paint.color = color;
        *paint
    }
}

impl Drawable for RippleDrawable {
    fn draw(&mut self, canvas: &mut dyn Canvas) {
        let animating = self.advance_animations();
        self.prune_ripples();

        // Clip to the dirty bounds: the drawable bounds when bounded by
        // content, the ripple extents when projecting.
        let bounds = self.dirty_bounds();
        let save_count = canvas.save();
        canvas.clip_rect(bounds);

        self.draw_content(canvas);
        self.draw_background_and_ripples(canvas);

        canvas.restore_to_count(save_count);

        self.dirty_flags.remove(ChangeFlags::NEEDS_PAINT);
        if animating {
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT | ChangeFlags::ANIMATING;
        } else {
            self.dirty_flags.remove(ChangeFlags::ANIMATING);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.on_bounds_change(bounds);
        }
    }

    /// Worst case: ripples are always translucent.
    fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    fn set_state(&mut self, states: StateFlags) -> bool {
        if self.state == states {
            return false;
        }
        self.state = states;
        self.on_state_change(states)
    }

    fn state(&self) -> StateFlags {
        self.state
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn set_visible(&mut self, visible: bool, _restart: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;

        if !visible {
            self.clear_hotspots();
        } else if changed {
            // Just became visible: make the ripple and background match
            // their active flags, then skip straight to the settled look.
            if self.ripple_active {
                self.try_ripple_enter();
            }

            if self.background_active {
                self.try_background_enter(false);
            }

            self.jump_to_current_state();
        }

        changed
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn jump_to_current_state(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.jump_to_current_state();
        }

        let now = self.now();
        if let Some(ripple) = self.ripple.as_mut() {
            ripple.enter(true, now);
        }

        if let Some(background) = self.background.as_mut() {
            background.end();
        }

        self.cancel_exiting_ripples();
    }

    /// Anchor the next ripple at `(x, y)` and move the active one there.
    fn set_hotspot(&mut self, x: f32, y: f32) {
        if self.ripple.is_none() || self.background.is_none() {
            self.pending_hotspot = Some((x, y));
        }

        if let Some(ripple) = self.ripple.as_mut() {
            ripple.move_to(x, y);
            self.invalidate_self();
        }
    }

    fn set_hotspot_bounds(&mut self, bounds: Rect) {
        self.override_bounds = true;
        self.hotspot_bounds = bounds;
        self.on_hotspot_bounds_changed();
        self.invalidate_self();
    }

    fn hotspot_bounds(&self) -> Rect {
        self.hotspot_bounds
    }

    fn dirty_bounds(&mut self) -> Rect {
        if self.is_bounded() {
            return self.bounds;
        }

        let center = self.hotspot_bounds.center();
        let extents = self
            .exiting
            .iter()
            .map(RippleForeground::bounds)
            .chain(self.background.iter().map(RippleBackground::bounds))
            .chain(self.ripple.iter().map(RippleForeground::bounds));

        let dirty = self.dirty.update(center, extents, self.bounds);
        log::trace!("Dirty bounds {:?}", dirty);
        dirty
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
    }

    fn is_ripple(&self) -> bool {
        true
    }
}
