//! CPU canvas backed by a tiny-skia pixmap.

use image::RgbaImage;
use resvg::tiny_skia::{
    FillRule, FilterQuality, Paint, Path, PathBuilder, Pattern, Pixmap, PixmapMut, PixmapPaint,
    SpreadMode, Stroke, Transform,
};

use crate::widgets::{Color, Rect};

use super::bitmap::{fill_pixels, pixmap_to_rgba_image};
use super::{Canvas, ColorFilter, Fill, PaintMode, PaintStyle};

/// Renders into an owned premultiplied RGBA8 pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// `None` when either dimension is zero or the buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color) {
        fill_pixels(&mut self.pixmap.as_mut(), color);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas for PixmapCanvas {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, style: &PaintStyle<'_>) {
        if rect.is_empty() {
            return;
        }
        let Some(path) = rounded_rect_path(&rect, radius) else {
            return;
        };
        let opacity = style.alpha as f32 / 255.0;

        let Some(filter) = style.color_filter else {
            paint_path(&mut self.pixmap.as_mut(), &path, style, opacity);
            return;
        };

        // Filtered paints go through a layer so the filter sees the
        // rasterized source before it is blended onto the canvas.
        let Some(mut layer) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
            log::warn!("Failed to allocate color filter layer");
            return;
        };
        paint_path(&mut layer.as_mut(), &path, style, 1.0);
        apply_color_filter(&mut layer, &filter);

        let paint = PixmapPaint {
            opacity,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
    }
}

fn paint_path(target: &mut PixmapMut<'_>, path: &Path, style: &PaintStyle<'_>, opacity: f32) {
    match style.fill {
        Fill::Solid(color) => {
            let mut paint = Paint::default();
            paint.set_color(
                Color {
                    a: color.a * opacity,
                    ..color
                }
                .to_skia(),
            );
            paint.anti_alias = style.anti_alias;
            fill_or_stroke(target, path, &paint, style.mode);
        }
        Fill::Shader(shader) => {
            let pixels = shader.bitmap.pixels();
            let mut paint = Paint::default();
            paint.shader = Pattern::new(
                pixels.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                opacity,
                shader.transform.to_skia(),
            );
            paint.anti_alias = style.anti_alias;
            fill_or_stroke(target, path, &paint, style.mode);
        }
    }
}

fn fill_or_stroke(target: &mut PixmapMut<'_>, path: &Path, paint: &Paint<'_>, mode: PaintMode) {
    match mode {
        PaintMode::Fill => {
            target.fill_path(path, paint, FillRule::Winding, Transform::identity(), None);
        }
        PaintMode::Stroke { width } => {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            target.stroke_path(path, paint, &stroke, Transform::identity(), None);
        }
    }
}

fn apply_color_filter(layer: &mut Pixmap, filter: &ColorFilter) {
    for pixel in layer.pixels_mut() {
        if pixel.alpha() == 0 {
            continue;
        }
        let c = pixel.demultiply();
        let [r, g, b, a] = filter.apply([c.red(), c.green(), c.blue(), c.alpha()]);
        *pixel = resvg::tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
}

/// Rounded rectangle as four quarter-circle cubics joined by straight edges.
fn rounded_rect_path(rect: &Rect, radius: f32) -> Option<Path> {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r < 0.5 {
        return rect.to_skia().map(PathBuilder::from_rect);
    }

    // Quarter-circle control point distance
    const K: f32 = 0.552_284_8;
    let kr = K * r;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + kr, y, x + w, y + r - kr, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + kr, x + w - r + kr, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - kr, y + h, x, y + h - r + kr, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - kr, x + r - kr, y, x + r, y);
    pb.close();
    pb.finish()
}
