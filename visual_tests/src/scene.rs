use std::rc::Rc;

use image::RgbaImage;
use ripple_compat::prelude::*;

use crate::raster::Rasterizer;

/// One input applied to the drawable under test.
#[derive(Debug, Clone)]
pub enum Step {
    Hotspot(f32, f32),
    State(StateFlags),
    /// Advance the clock and draw a frame
    Advance(u64),
    Jump,
    Visible(bool),
}

/// A scripted ripple animation rendered off-screen with a simulated clock.
#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    bounds: Rect,
    color: Color,
    content: Option<Color>,
    radius: MaxRadius,
    steps: Vec<Step>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bounds: Rect::new(0.0, 0.0, width as f32, height as f32),
            color: RIPPLE_MATERIAL_LIGHT,
            content: None,
            radius: MaxRadius::Auto,
            steps: Vec::new(),
        }
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn content(mut self, color: Color) -> Self {
        self.content = Some(color);
        self
    }

    pub fn radius(mut self, radius: impl Into<MaxRadius>) -> Self {
        self.radius = radius.into();
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn press(self, x: f32, y: f32) -> Self {
        self.step(Step::Hotspot(x, y))
            .step(Step::State(StateFlags::ENABLED | StateFlags::PRESSED))
    }

    pub fn release(self) -> Self {
        self.step(Step::State(StateFlags::ENABLED))
    }

    pub fn advance(self, ms: u64) -> Self {
        self.step(Step::Advance(ms))
    }

    /// Play every step and return the last frame.
    pub fn render(&self) -> RgbaImage {
        let clock = ManualClock::new();
        let content = self
            .content
            .map(|color| Box::new(ColorDrawable::new(color)) as Box<dyn Drawable>);
        let mut drawable = RippleDrawable::new(ColorStateList::value_of(self.color), content)
            .with_clock(Rc::new(clock.clone()))
            .with_radius(self.radius);
        drawable.set_bounds(self.bounds);

        let mut canvas = CommandCanvas::new();
        for step in &self.steps {
            log::trace!("Scene step {:?}", step);
            match step {
                Step::Hotspot(x, y) => drawable.set_hotspot(*x, *y),
                Step::State(states) => {
                    drawable.set_state(*states);
                }
                Step::Advance(ms) => {
                    clock.advance_ms(*ms);
                    canvas.clear();
                    drawable.draw(&mut canvas);
                }
                Step::Jump => drawable.jump_to_current_state(),
                Step::Visible(visible) => {
                    drawable.set_visible(*visible, false);
                }
            }
        }

        canvas.clear();
        drawable.draw(&mut canvas);
        log::debug!("Scene rendered {} commands", canvas.commands().len());

        Rasterizer::new(self.width, self.height).render(canvas.commands())
    }
}
