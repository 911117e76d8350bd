//! Drawable flattening into fixed-format pixel buffers.
//!
//! Whatever the drawable kind, the result is a premultiplied RGBA8 [`Bitmap`]
//! that a [`BitmapShader`](super::BitmapShader) can sample, so a single
//! masking path renders bitmaps, solid colors and procedural content alike.

use crate::error::FlattenError;
use crate::widgets::{Color, Drawable};

use super::bitmap::fill_pixels;
use super::Bitmap;

/// Edge length of the buffer a solid color is flattened into. The shader
/// scales it to cover the target, so a uniform fill needs no more pixels.
pub const COLOR_DRAWABLE_DIMENSION: u32 = 2;

/// Flatten `source` into a bitmap, or `None` when there is nothing to show.
///
/// `fallback_size` sizes procedural drawables that report no intrinsic size
/// (normally the current drawable rect). Failures are logged and reported as
/// `None`: a view with a broken source renders its background and border only.
pub fn flatten(source: Option<&Drawable>, fallback_size: (u32, u32)) -> Option<Bitmap> {
    let source = source?;
    match try_flatten(source, fallback_size) {
        Ok(bitmap) => Some(bitmap),
        Err(err) => {
            log::warn!("Failed to flatten {source:?}: {err}");
            None
        }
    }
}

/// Like [`flatten`], but reports why flattening failed.
pub fn try_flatten(source: &Drawable, fallback_size: (u32, u32)) -> Result<Bitmap, FlattenError> {
    match source {
        Drawable::Bitmap(bitmap) => Ok(bitmap.clone()),
        Drawable::SolidColor(_) => {
            let bitmap = Bitmap::new(COLOR_DRAWABLE_DIMENSION, COLOR_DRAWABLE_DIMENSION)?;
            redraw(source, &bitmap)?;
            Ok(bitmap)
        }
        Drawable::Procedural(drawable) => {
            let (width, height) = drawable
                .intrinsic_size()
                .filter(|&(w, h)| w > 0 && h > 0)
                .unwrap_or(fallback_size);
            let bitmap = Bitmap::new(width, height)?;
            redraw(source, &bitmap)?;
            log::debug!("Flattened procedural drawable into {width}x{height} buffer");
            Ok(bitmap)
        }
    }
}

/// Redraw `source` over the whole of `target`, replacing its content.
///
/// Immutable targets and bitmap sources are left untouched.
pub fn redraw(source: &Drawable, target: &Bitmap) -> Result<(), FlattenError> {
    let Some(mut pixmap) = target.pixels_mut() else {
        return Ok(());
    };

    let mut target = pixmap.as_mut();
    match source {
        Drawable::Bitmap(_) => Ok(()),
        Drawable::SolidColor(color) => {
            fill_pixels(&mut target, *color);
            Ok(())
        }
        Drawable::Procedural(drawable) => {
            fill_pixels(&mut target, Color::TRANSPARENT);
            drawable.draw(&mut target)
        }
    }
}
