//! Paint primitives the view draws through.
//!
//! The view only ever issues anti-aliased rounded rectangles, filled with a
//! solid color or a bitmap shader, or stroked with a solid color. Hosts
//! implement [`Canvas`] on top of their own rasterizer; [`PixmapCanvas`] is a
//! CPU implementation on tiny-skia and [`RecordingCanvas`] records commands.

pub mod bitmap;
pub mod commands;
pub mod flatten;
pub mod pixmap_canvas;
pub mod shader;

pub use bitmap::{Bitmap, WeakBitmap};
pub use commands::{DrawCommand, RecordedFill, RecordingCanvas};
pub use flatten::flatten;
pub use pixmap_canvas::PixmapCanvas;
pub use shader::{center_crop, BitmapShader};

use crate::widgets::{Color, Rect};

/// Color transformation applied to the image layer before compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorFilter {
    /// Replace color with the tint, keeping the source coverage (source-in).
    Tint(Color),
    /// 4x5 row-major matrix over straight RGBA in the 0–255 range:
    /// `R' = m[0]*R + m[1]*G + m[2]*B + m[3]*A + m[4]`, and so on per row.
    Matrix([f32; 20]),
}

impl ColorFilter {
    /// Matrix that keeps luminance only.
    pub fn grayscale() -> Self {
        let (r, g, b) = (0.2126, 0.7152, 0.0722);
        ColorFilter::Matrix([
            r, g, b, 0.0, 0.0, //
            r, g, b, 0.0, 0.0, //
            r, g, b, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Apply to one straight-alpha pixel.
    pub fn apply(&self, rgba: [u8; 4]) -> [u8; 4] {
        match self {
            ColorFilter::Tint(tint) => {
                let [r, g, b, a] = tint.to_rgba8();
                let coverage = (rgba[3] as u16 * a as u16 + 127) / 255;
                [r, g, b, coverage as u8]
            }
            ColorFilter::Matrix(m) => {
                let src = rgba.map(|c| c as f32);
                let row = |i: usize| {
                    let v = m[i] * src[0]
                        + m[i + 1] * src[1]
                        + m[i + 2] * src[2]
                        + m[i + 3] * src[3]
                        + m[i + 4];
                    v.round().clamp(0.0, 255.0) as u8
                };
                [row(0), row(5), row(10), row(15)]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintMode {
    Fill,
    /// Stroke centered on the shape outline.
    Stroke { width: f32 },
}

#[derive(Debug, Clone, Copy)]
pub enum Fill<'a> {
    Solid(Color),
    Shader(&'a BitmapShader),
}

/// Everything a [`Canvas`] needs to paint one shape.
#[derive(Debug, Clone, Copy)]
pub struct PaintStyle<'a> {
    pub fill: Fill<'a>,
    pub mode: PaintMode,
    /// Layer opacity, 255 is opaque.
    pub alpha: u8,
    pub color_filter: Option<ColorFilter>,
    pub anti_alias: bool,
}

impl<'a> PaintStyle<'a> {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Fill::Solid(color),
            mode: PaintMode::Fill,
            alpha: 255,
            color_filter: None,
            anti_alias: true,
        }
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            mode: PaintMode::Stroke { width },
            ..Self::fill(color)
        }
    }

    pub fn shader(shader: &'a BitmapShader) -> Self {
        Self {
            fill: Fill::Shader(shader),
            mode: PaintMode::Fill,
            alpha: 255,
            color_filter: None,
            anti_alias: true,
        }
    }

    pub fn alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn color_filter(mut self, color_filter: Option<ColorFilter>) -> Self {
        self.color_filter = color_filter;
        self
    }
}

/// Host paint primitive: an anti-aliased rounded rectangle.
pub trait Canvas {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &PaintStyle<'_>);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &PaintStyle<'_>) {
        (**self).draw_round_rect(rect, radius, paint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_keeps_coverage() {
        let tint = ColorFilter::Tint(Color::rgba8(0, 0, 255, 255));
        assert_eq!(tint.apply([200, 10, 10, 128]), [0, 0, 255, 128]);

        let half = ColorFilter::Tint(Color::rgba8(0, 255, 0, 128));
        assert_eq!(half.apply([1, 2, 3, 255]), [0, 255, 0, 128]);
        assert_eq!(half.apply([1, 2, 3, 0]), [0, 255, 0, 0]);
    }

    #[test]
    fn test_identity_matrix() {
        let identity = ColorFilter::Matrix([
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        assert_eq!(identity.apply([12, 34, 56, 78]), [12, 34, 56, 78]);
    }

    #[test]
    fn test_matrix_clamps_and_offsets() {
        let brighten = ColorFilter::Matrix([
            1.0, 0.0, 0.0, 0.0, 100.0, //
            0.0, 1.0, 0.0, 0.0, 100.0, //
            0.0, 0.0, 1.0, 0.0, 100.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        assert_eq!(brighten.apply([200, 0, 50, 255]), [255, 100, 150, 255]);
    }

    #[test]
    fn test_grayscale() {
        let [r, g, b, a] = ColorFilter::grayscale().apply([255, 255, 255, 200]);
        assert_eq!((r, g, b, a), (255, 255, 255, 200));

        let [r, g, b, _] = ColorFilter::grayscale().apply([255, 0, 0, 255]);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, 54);
    }

    #[test]
    fn test_paint_style_builders() {
        let stroke = PaintStyle::stroke(Color::BLACK, 4.0).alpha(10);
        assert_eq!(stroke.mode, PaintMode::Stroke { width: 4.0 });
        assert_eq!(stroke.alpha, 10);
        assert!(stroke.anti_alias);
        assert!(matches!(stroke.fill, Fill::Solid(c) if c == Color::BLACK));
    }
}
