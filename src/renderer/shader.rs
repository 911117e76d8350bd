//! Center-crop placement of a bitmap inside the drawable rect.

use crate::transform::ShaderTransform;
use crate::widgets::Rect;

use super::Bitmap;

/// Half-pixel bias applied after centering; keeps edge samples off the mask seam.
const SAMPLE_BIAS: f32 = 0.5;

/// Transform that scales a `source_size` bitmap uniformly to cover
/// `drawable_rect`, centered, cropping the overflow on one axis.
///
/// Returns identity when there is no source.
pub fn center_crop(source_size: Option<(u32, u32)>, drawable_rect: &Rect) -> ShaderTransform {
    let Some((bitmap_width, bitmap_height)) = source_size else {
        return ShaderTransform::IDENTITY;
    };
    if bitmap_width == 0 || bitmap_height == 0 {
        return ShaderTransform::IDENTITY;
    }

    let sw = bitmap_width as f32;
    let sh = bitmap_height as f32;
    let dw = drawable_rect.width;
    let dh = drawable_rect.height;

    let mut dx = 0.0;
    let mut dy = 0.0;
    let scale = if sw * dh > dw * sh {
        // Source is relatively wider: match heights, crop left/right
        let scale = dh / sh;
        dx = (dw - sw * scale) * 0.5;
        scale
    } else {
        // Match widths, crop top/bottom
        let scale = dw / sw;
        dy = (dh - sh * scale) * 0.5;
        scale
    };

    ShaderTransform::scale(scale).post_translate(
        dx + SAMPLE_BIAS + drawable_rect.left(),
        dy + SAMPLE_BIAS + drawable_rect.top(),
    )
}

/// A bitmap sampled through a fixed transform, clamped at its edges.
#[derive(Debug, Clone)]
pub struct BitmapShader {
    pub bitmap: Bitmap,
    pub transform: ShaderTransform,
}

impl BitmapShader {
    /// Shader placing `bitmap` over `drawable_rect` with center-crop.
    pub fn center_crop(bitmap: Bitmap, drawable_rect: &Rect) -> Self {
        let transform = center_crop(Some(bitmap.size()), drawable_rect);
        Self { bitmap, transform }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_wide_source_in_square_target() {
        let t = center_crop(Some((200, 100)), &Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(approx_eq(t.scale, 1.0));
        assert!(approx_eq(t.translate_x, -49.5));
        assert!(approx_eq(t.translate_y, 0.5));
    }

    #[test]
    fn test_tall_source_in_square_target() {
        let t = center_crop(Some((50, 100)), &Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(approx_eq(t.scale, 2.0));
        assert!(approx_eq(t.translate_x, 0.5));
        assert!(approx_eq(t.translate_y, -49.5));
    }

    #[test]
    fn test_offset_by_drawable_origin() {
        let rect = Rect::from_ltrb(9.0, 9.0, 91.0, 91.0);
        let t = center_crop(Some((2, 2)), &rect);
        assert!(approx_eq(t.scale, 41.0));
        assert!(approx_eq(t.translate_x, 9.5));
        assert!(approx_eq(t.translate_y, 9.5));
    }

    #[test]
    fn test_absent_source_is_identity() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(center_crop(None, &rect).is_identity());
        assert!(center_crop(Some((0, 10)), &rect).is_identity());
    }

    #[test]
    fn test_always_covers_and_centers() {
        let sources = [(1, 1), (200, 100), (100, 200), (3, 7), (640, 480), (17, 100)];
        let targets = [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(4.0, 2.0, 37.0, 91.0),
            Rect::new(9.0, 9.0, 82.0, 82.0),
            Rect::new(0.0, 0.0, 300.0, 20.0),
        ];

        for (sw, sh) in sources {
            for target in targets {
                let t = center_crop(Some((sw, sh)), &target);
                let mapped = t.map_size(sw as f32, sh as f32);

                assert!(mapped.width >= target.width - 1e-3);
                assert!(mapped.height >= target.height - 1e-3);

                let dx = mapped.x - SAMPLE_BIAS - target.x;
                let dy = mapped.y - SAMPLE_BIAS - target.y;
                let expected_dx = (target.width - mapped.width) / 2.0;
                let expected_dy = (target.height - mapped.height) / 2.0;
                assert!(approx_eq(dx, expected_dx), "dx {dx} vs {expected_dx}");
                assert!(approx_eq(dy, expected_dy), "dy {dy} vs {expected_dy}");
                // One axis fits exactly, the other overflows symmetrically
                assert!(approx_eq(dx, 0.0) || approx_eq(dy, 0.0));
            }
        }
    }

    #[test]
    fn test_bitmap_shader_uses_bitmap_size() {
        let bitmap = Bitmap::new(200, 100).expect("allocates");
        let shader = BitmapShader::center_crop(bitmap.clone(), &Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(shader.bitmap.ptr_eq(&bitmap));
        assert!(approx_eq(shader.transform.translate_x, -49.5));
    }
}
