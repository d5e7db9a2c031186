//! The drawing surface seen by drawables, plus a recording implementation.

use crate::geometry::{Color, Rect};

/// Whether shapes are filled or outlined with a hairline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Color and style parameters shared by draw calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub anti_alias: bool,
    pub style: PaintStyle,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            anti_alias: false,
            style: PaintStyle::Fill,
        }
    }

    pub fn anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Copy with the alpha channel multiplied by `factor`.
    pub fn with_alpha_scaled(&self, factor: f32) -> Self {
        Self {
            color: self.color.with_alpha(self.color.a * factor),
            ..*self
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

/// A 2D surface with a save/restore stack, rectangular clipping and
/// translation.
pub trait Canvas {
    /// Push the current clip and translation. Returns the depth before the
    /// push, suitable for [`Canvas::restore_to_count`].
    fn save(&mut self) -> usize;

    /// Pop saved states until the stack depth equals `count`.
    fn restore_to_count(&mut self, count: usize);

    /// Intersect the current clip with `rect` (in local coordinates).
    fn clip_rect(&mut self, rect: Rect);

    fn translate(&mut self, dx: f32, dy: f32);

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
}

/// A single recorded draw operation in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
        style: PaintStyle,
        /// Active clip, if any
        clip: Option<Rect>,
    },

    Circle {
        center: (f32, f32),
        radius: f32,
        color: Color,
        anti_alias: bool,
        style: PaintStyle,
        /// Active clip, if any
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    pub fn clip(&self) -> Option<Rect> {
        match self {
            DrawCommand::Rect { clip, .. } | DrawCommand::Circle { clip, .. } => *clip,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Rect { color, .. } | DrawCommand::Circle { color, .. } => *color,
        }
    }

    pub fn style(&self) -> PaintStyle {
        match self {
            DrawCommand::Rect { style, .. } | DrawCommand::Circle { style, .. } => *style,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CanvasState {
    translation: (f32, f32),
    clip: Option<Rect>,
}

/// Canvas that records commands instead of rasterizing them.
///
/// Translations are resolved at record time, so every command carries
/// surface coordinates and the clip in effect when it was issued.
#[derive(Debug, Default)]
pub struct CommandCanvas {
    commands: Vec<DrawCommand>,
    current: CanvasState,
    stack: Vec<CanvasState>,
}

impl CommandCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear recorded commands and reset clip/translation
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.current = CanvasState::default();
    }

    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    pub fn translation(&self) -> (f32, f32) {
        self.current.translation
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.current.clip
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
    }
}

impl Canvas for CommandCanvas {
    fn save(&mut self) -> usize {
        let depth = self.stack.len();
        self.stack.push(self.current);
        depth
    }

    fn restore_to_count(&mut self, count: usize) {
        while self.stack.len() > count {
            if let Some(state) = self.stack.pop() {
                self.current = state;
            }
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        let (tx, ty) = self.current.translation;
        let rect = rect.offset(tx, ty);
        // A clip that misses the current one leaves nothing drawable
        let clip = match self.current.clip {
            Some(existing) => existing.intersect(&rect).unwrap_or(Rect::EMPTY),
            None => rect,
        };
        self.current.clip = Some(clip);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.current.translation.0 += dx;
        self.current.translation.1 += dy;
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let (tx, ty) = self.current.translation;
        self.commands.push(DrawCommand::Circle {
            center: (cx + tx, cy + ty),
            radius,
            color: paint.color,
            anti_alias: paint.anti_alias,
            style: paint.style,
            clip: self.current.clip,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        let (tx, ty) = self.current.translation;
        self.commands.push(DrawCommand::Rect {
            rect: rect.offset(tx, ty),
            color: paint.color,
            style: paint.style,
            clip: self.current.clip,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_applies_to_commands() {
        let mut canvas = CommandCanvas::new();
        canvas.translate(10.0, 20.0);
        canvas.draw_circle(1.0, 2.0, 5.0, &Paint::new(Color::WHITE));

        assert_eq!(
            canvas.commands()[0],
            DrawCommand::Circle {
                center: (11.0, 22.0),
                radius: 5.0,
                color: Color::WHITE,
                anti_alias: false,
                style: PaintStyle::Fill,
                clip: None,
            }
        );
    }

    #[test]
    fn test_stroke_style_is_recorded() {
        let mut canvas = CommandCanvas::new();
        let stroke = Paint::new(Color::WHITE).style(PaintStyle::Stroke);
        canvas.draw_circle(0.0, 0.0, 10.0, &stroke);
        canvas.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &stroke);
        canvas.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::default());

        let styles: Vec<_> = canvas.commands().iter().map(DrawCommand::style).collect();
        assert_eq!(
            styles,
            vec![PaintStyle::Stroke, PaintStyle::Stroke, PaintStyle::Fill]
        );
    }

    #[test]
    fn test_save_restore() {
        let mut canvas = CommandCanvas::new();
        let count = canvas.save();
        assert_eq!(count, 0);

        canvas.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        canvas.translate(5.0, 5.0);
        canvas.save();
        canvas.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(canvas.current_clip(), Some(Rect::new(5.0, 5.0, 45.0, 45.0)));

        canvas.restore_to_count(count);
        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.current_clip(), None);
        assert_eq!(canvas.translation(), (0.0, 0.0));
    }

    #[test]
    fn test_disjoint_clip_is_empty() {
        let mut canvas = CommandCanvas::new();
        canvas.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.clip_rect(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert!(canvas.current_clip().is_some_and(|clip| clip.is_empty()));
    }

    #[test]
    fn test_paint_alpha_scaling() {
        let paint = Paint::new(Color::rgba(1.0, 1.0, 1.0, 0.5)).anti_alias(true);
        let faded = paint.with_alpha_scaled(0.5);
        assert_eq!(faded.color.a, 0.25);
        assert!(faded.anti_alias);
        assert_eq!(faded.style, PaintStyle::Fill);
    }
}
