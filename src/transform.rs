//! Uniform scale + translate transform used to place a bitmap under a mask.
//!
//! Bitmap shaders never rotate or skew, so the transform is stored as three
//! scalars rather than a full matrix. Points map as
//! `(x * scale + translate_x, y * scale + translate_y)`.

use crate::widgets::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ShaderTransform {
    /// Identity transform (no scaling, no offset)
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn scale(s: f32) -> Self {
        Self {
            scale: s,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Apply `self` first, then translate by `(dx, dy)`.
    pub fn post_translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            ..*self
        }
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    /// Map a `width` x `height` box anchored at the origin into view space.
    pub fn map_size(&self, width: f32, height: f32) -> Rect {
        let (x, y) = self.transform_point(0.0, 0.0);
        Rect::new(x, y, width * self.scale, height * self.scale)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub(crate) fn to_skia(self) -> resvg::tiny_skia::Transform {
        resvg::tiny_skia::Transform::from_row(
            self.scale,
            0.0,
            0.0,
            self.scale,
            self.translate_x,
            self.translate_y,
        )
    }
}

impl Default for ShaderTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_default_is_identity() {
        let t = ShaderTransform::default();
        assert_eq!(t, ShaderTransform::IDENTITY);
        assert!(t.is_identity());
        assert!(!ShaderTransform::scale(2.0).is_identity());
    }

    #[test]
    fn test_scale_then_post_translate() {
        // Scale first, translation is not scaled
        let t = ShaderTransform::scale(2.0).post_translate(10.0, 0.5);
        let (x, y) = t.transform_point(3.0, 4.0);
        assert!(approx_eq(x, 16.0));
        assert!(approx_eq(y, 8.5));
    }

    #[test]
    fn test_map_size() {
        let t = ShaderTransform::scale(0.5).post_translate(1.0, 2.0);
        assert_eq!(t.map_size(200.0, 100.0), Rect::new(1.0, 2.0, 100.0, 50.0));
    }
}
