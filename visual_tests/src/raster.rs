use image::{Rgba, RgbaImage};
use ripple_compat::canvas::{DrawCommand, PaintStyle};
use ripple_compat::geometry::{Color, Rect};

/// Software rasterizer for recorded draw commands.
///
/// Samples at pixel centers and composites source-over onto white.
/// Anti-aliased circles get a one-pixel coverage ramp at the edge. Stroked
/// shapes are drawn as one-pixel hairlines.
pub struct Rasterizer {
    width: u32,
    height: u32,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn render(&self, commands: &[DrawCommand]) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.width, self.height, to_rgba(Color::WHITE));
        for command in commands {
            self.draw_command(&mut image, command);
        }
        image
    }

    fn draw_command(&self, image: &mut RgbaImage, command: &DrawCommand) {
        let surface = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let area = match command.clip() {
            Some(clip) => match clip.intersect(&surface) {
                Some(area) => area,
                None => return,
            },
            None => surface,
        };

        match command {
            DrawCommand::Rect { rect, color, style, .. } => {
                let Some(area) = area.intersect(rect) else {
                    return;
                };
                let rect = *rect;
                let stroke = *style == PaintStyle::Stroke;
                self.fill(
                    image,
                    area,
                    |x, y| {
                        let on_edge = x - rect.x < 1.0
                            || rect.right() - x < 1.0
                            || y - rect.y < 1.0
                            || rect.bottom() - y < 1.0;
                        if !stroke || on_edge {
                            1.0
                        } else {
                            0.0
                        }
                    },
                    *color,
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                anti_alias,
                style,
                ..
            } => {
                let reach = radius + 1.0;
                let Some(area) = area.intersect(&Rect::around(center.0, center.1, reach)) else {
                    return;
                };
                let (cx, cy) = *center;
                let radius = *radius;
                let anti_alias = *anti_alias;
                let stroke = *style == PaintStyle::Stroke;
                self.fill(
                    image,
                    area,
                    |x, y| {
                        let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                        if stroke {
                            let offset = (distance - radius).abs();
                            if anti_alias {
                                (1.0 - offset).clamp(0.0, 1.0)
                            } else if offset <= 0.5 {
                                1.0
                            } else {
                                0.0
                            }
                        } else if anti_alias {
                            (radius + 0.5 - distance).clamp(0.0, 1.0)
                        } else if distance <= radius {
                            1.0
                        } else {
                            0.0
                        }
                    },
                    *color,
                );
            }
        }
    }

    /// Blend `color` over every pixel whose center lies in `area`, scaled by
    /// `coverage` sampled at that center.
    fn fill<F>(&self, image: &mut RgbaImage, area: Rect, coverage: F, color: Color)
    where
        F: Fn(f32, f32) -> f32,
    {
        let x0 = area.x.round().max(0.0) as u32;
        let y0 = area.y.round().max(0.0) as u32;
        let x1 = (area.right().round() as u32).min(self.width);
        let y1 = (area.bottom().round() as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let alpha = color.a * coverage(x as f32 + 0.5, y as f32 + 0.5);
                if alpha <= 0.0 {
                    continue;
                }
                let pixel = image.get_pixel_mut(x, y);
                *pixel = blend(*pixel, color, alpha);
            }
        }
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([channel(color.r), channel(color.g), channel(color.b), channel(color.a)])
}

fn blend(dst: Rgba<u8>, src: Color, alpha: f32) -> Rgba<u8> {
    let mix = |s: f32, d: u8| s * alpha + (d as f32 / 255.0) * (1.0 - alpha);
    let dst_alpha = dst[3] as f32 / 255.0;
    Rgba([
        channel(mix(src.r, dst[0])),
        channel(mix(src.g, dst[1])),
        channel(mix(src.b, dst[2])),
        channel(alpha + dst_alpha * (1.0 - alpha)),
    ])
}
