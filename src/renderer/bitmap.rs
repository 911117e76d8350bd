//! Fixed-format pixel buffers sampled by bitmap shaders.
//!
//! Every buffer is premultiplied RGBA8 (`tiny_skia::Pixmap`), whatever the
//! drawable it came from, so one masking path serves every source kind.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, Pixmap, PixmapMut};

use crate::error::FlattenError;
use crate::widgets::Color;

/// Shared handle to a premultiplied RGBA8 pixel buffer.
///
/// Cloning shares the buffer; two handles are the same bitmap when
/// [`Bitmap::ptr_eq`] holds. Only mutable bitmaps can be redrawn in place.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Rc<RefCell<Pixmap>>,
    width: u32,
    height: u32,
    mutable: bool,
}

impl Bitmap {
    /// Allocate a transparent, mutable buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, FlattenError> {
        if width == 0 || height == 0 {
            return Err(FlattenError::EmptySize { width, height });
        }
        let pixmap = Pixmap::new(width, height).ok_or(FlattenError::Allocation { width, height })?;
        Ok(Self::from_pixmap(pixmap, true))
    }

    pub fn from_pixmap(pixmap: Pixmap, mutable: bool) -> Self {
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            pixels: Rc::new(RefCell::new(pixmap)),
            mutable,
        }
    }

    /// Premultiply a decoded straight-alpha image into an immutable bitmap.
    pub fn from_rgba_image(rgba: &RgbaImage) -> Result<Self, FlattenError> {
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(FlattenError::EmptySize { width, height });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(FlattenError::Allocation { width, height })?;

        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(Self::from_pixmap(pixmap, false))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn ptr_eq(&self, other: &Bitmap) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }

    pub fn pixels(&self) -> Ref<'_, Pixmap> {
        self.pixels.borrow()
    }

    /// Write access for in-place redraws; `None` for immutable bitmaps.
    pub(crate) fn pixels_mut(&self) -> Option<RefMut<'_, Pixmap>> {
        self.mutable.then(|| self.pixels.borrow_mut())
    }

    /// Straight-alpha RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixels = self.pixels.borrow();
        // tiny-skia only bounds-checks the flat index, so x past the width
        // would wrap into the next row.
        if x >= pixels.width() || y >= pixels.height() {
            return None;
        }
        let pixel = pixels.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixels.borrow())
    }

    /// Weak handle that stops upgrading once every owner released the buffer.
    pub fn downgrade(&self) -> WeakBitmap {
        WeakBitmap {
            pixels: Rc::downgrade(&self.pixels),
        }
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mutable", &self.mutable)
            .finish()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Non-owning reference to a [`Bitmap`]'s buffer.
#[derive(Debug, Clone)]
pub struct WeakBitmap {
    pixels: Weak<RefCell<Pixmap>>,
}

impl WeakBitmap {
    /// Whether the buffer is still held by some [`Bitmap`].
    pub fn is_alive(&self) -> bool {
        self.pixels.strong_count() > 0
    }
}

/// Overwrite every pixel of `target` with `color`.
pub fn fill_pixels(target: &mut PixmapMut<'_>, color: Color) {
    let [r, g, b, a] = color.to_rgba8();
    let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
    target.pixels_mut().fill(premultiplied);
}

pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut rgba = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_new_is_mutable_and_transparent() {
        let bitmap = Bitmap::new(3, 2).expect("allocates");
        assert_eq!(bitmap.size(), (3, 2));
        assert!(bitmap.is_mutable());
        assert_eq!(bitmap.pixel(2, 1), Some([0, 0, 0, 0]));
        assert_eq!(bitmap.pixel(3, 0), None);
    }

    #[test]
    fn test_new_rejects_empty_size() {
        assert!(matches!(
            Bitmap::new(0, 4),
            Err(FlattenError::EmptySize { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_from_rgba_image_premultiplies() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 255, 128]));

        let bitmap = Bitmap::from_rgba_image(&rgba).expect("decodes");
        assert!(!bitmap.is_mutable());
        assert!(bitmap.pixels_mut().is_none());

        let stored = bitmap.pixels().pixel(1, 0).expect("in bounds");
        assert_eq!(stored.alpha(), 128);
        assert_eq!(stored.blue(), 128);
        assert_eq!(bitmap.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let bitmap = Bitmap::new(2, 2).expect("allocates");
        let clone = bitmap.clone();
        assert!(bitmap.ptr_eq(&clone));
        assert_eq!(bitmap, clone);
        assert_ne!(bitmap, Bitmap::new(2, 2).expect("allocates"));
    }

    #[test]
    fn test_weak_handle_tracks_release() {
        let bitmap = Bitmap::new(2, 2).expect("allocates");
        let weak = bitmap.downgrade();
        let clone = bitmap.clone();
        drop(bitmap);
        assert!(weak.is_alive());
        drop(clone);
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_fill_pixels() {
        let bitmap = Bitmap::new(3, 3).expect("allocates");
        fill_pixels(
            &mut bitmap.pixels_mut().expect("mutable").as_mut(),
            Color::rgba8(255, 0, 0, 128),
        );
        assert_eq!(bitmap.pixels().pixel(2, 2).map(|p| p.red()), Some(128));
        assert_eq!(bitmap.pixel(2, 2), Some([255, 0, 0, 128]));
    }

    #[test]
    fn test_round_trip_to_rgba_image() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([10, 200, 30, 255]));
        let bitmap = Bitmap::from_rgba_image(&rgba).expect("decodes");
        assert_eq!(bitmap.to_rgba_image().get_pixel(0, 0), &Rgba([10, 200, 30, 255]));
    }
}
