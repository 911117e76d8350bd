//! Border, drawable and corner geometry derived from view bounds.
//!
//! Everything here is a pure function of its inputs and cheap enough to run
//! on every bounds, padding or border change instead of being cached.

use crate::widgets::{Color, Rect};

use super::ViewBounds;

/// Stroke drawn around the masked image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSpec {
    /// Stroke width in pixels; zero disables the border.
    pub width: i32,
    pub color: Color,
    /// Draw the border over the image instead of shrinking the image inside it.
    pub overlay: bool,
}

impl BorderSpec {
    pub fn new(width: i32, color: Color) -> Self {
        Self {
            width: width.max(0),
            color,
            overlay: false,
        }
    }

    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::new(0, Color::BLACK)
    }
}

/// Derived rectangles and radii for one view configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Content area after padding; the border is stroked along it.
    pub border_rect: Rect,
    /// Area filled by the masked image. Always inside `border_rect`.
    pub drawable_rect: Rect,
    /// Inscribed circle radius used by the hit-test.
    pub border_stroke_radius: f32,
    /// Corner radius used for both the image mask and the border stroke.
    pub corner_radius: f32,
}

impl Geometry {
    pub fn compute(bounds: &ViewBounds, border: &BorderSpec, requested_corner_radius: f32) -> Self {
        let border_rect = bounds.content_rect();
        let border_width = border.width.max(0) as f32;

        let border_stroke_radius = ((border_rect.height - border_width) / 2.0)
            .min((border_rect.width - border_width) / 2.0);

        // The 1px overlap keeps the image under the anti-aliased inner edge of the stroke.
        let drawable_rect = if !border.overlay && border.width > 0 {
            border_rect.inset(border_width - 1.0)
        } else {
            border_rect
        };

        Self {
            border_rect,
            drawable_rect,
            border_stroke_radius,
            corner_radius: clamp_corner_radius(requested_corner_radius, &drawable_rect),
        }
    }

    /// True when there is nothing to draw (not laid out yet, or padding ate the view).
    pub fn is_degenerate(&self) -> bool {
        self.border_rect.is_empty() || self.drawable_rect.is_empty()
    }

    /// Whether the mask is a full circle or capsule.
    pub fn is_circular(&self) -> bool {
        !self.drawable_rect.is_empty()
            && self.corner_radius >= max_corner_radius(&self.drawable_rect)
    }
}

fn max_corner_radius(rect: &Rect) -> f32 {
    (rect.height / 2.0).min(rect.width / 2.0)
}

/// Clamp a requested radius so the rounded rect never self-intersects.
pub fn clamp_corner_radius(requested: f32, drawable_rect: &Rect) -> f32 {
    requested.min(max_corner_radius(drawable_rect)).max(0.0)
}
