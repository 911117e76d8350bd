//! Image sources and the drawables they turn into.
//!
//! Supports PNG, JPEG, GIF, WebP raster formats (decoded to immutable bitmaps)
//! and SVG documents (kept as procedural drawables and rasterized on demand).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use resvg::tiny_skia::{PixmapMut, Transform};
use resvg::usvg;

use crate::error::{FlattenError, Result};
use crate::invalidation::{Invalidator, InvalidatorSlot};
use crate::renderer::Bitmap;

use super::Color;

/// Source for an image - can be a file path or in-memory bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from a file path
    SvgPath(PathBuf),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    /// Check if this is an SVG source
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgPath(_) | ImageSource::SvgBytes(_))
    }

    /// Decode the source into a drawable.
    ///
    /// Raster images become immutable bitmaps; SVGs become procedural
    /// drawables rendered at whatever size the flattener asks for.
    pub fn load(&self) -> Result<Drawable> {
        match self {
            ImageSource::Path(path) => {
                let img = image::open(path)?;
                Ok(Drawable::Bitmap(Bitmap::from_rgba_image(&img.to_rgba8())?))
            }
            ImageSource::Bytes(bytes) => {
                let img = image::load_from_memory(bytes)?;
                Ok(Drawable::Bitmap(Bitmap::from_rgba_image(&img.to_rgba8())?))
            }
            ImageSource::SvgPath(path) => {
                let data = std::fs::read(path)?;
                Ok(Drawable::procedural(SvgDrawable::from_data(&data)?))
            }
            ImageSource::SvgBytes(bytes) => {
                Ok(Drawable::procedural(SvgDrawable::from_data(bytes)?))
            }
        }
    }
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::from(path.as_str())
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::from(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if is_svg_path(&path) {
            ImageSource::SvgPath(path)
        } else {
            ImageSource::Path(path)
        }
    }
}

/// Content that renders itself into a pixel buffer on request.
///
/// A procedural drawable that changes over time keeps the [`Invalidator`]
/// handed to it by the view and calls [`Invalidator::invalidate`] to get
/// redrawn into the same buffer.
pub trait ProceduralDrawable {
    /// Natural size in pixels, if the drawable has one.
    fn intrinsic_size(&self) -> Option<(u32, u32)>;

    /// Draw over the full bounds of `target`.
    fn draw(&self, target: &mut PixmapMut<'_>) -> std::result::Result<(), FlattenError>;

    /// Attach (`Some`) or detach (`None`) the owning view's invalidator.
    fn set_invalidator(&self, _invalidator: Option<Invalidator>) {}
}

/// What a view can display: tagged by how it is turned into pixels.
#[derive(Clone)]
pub enum Drawable {
    /// Already a pixel buffer; displayed as-is.
    Bitmap(Bitmap),
    /// Uniform fill.
    SolidColor(Color),
    /// Rasterized on demand.
    Procedural(Rc<dyn ProceduralDrawable>),
}

impl Drawable {
    pub fn procedural(drawable: impl ProceduralDrawable + 'static) -> Self {
        Drawable::Procedural(Rc::new(drawable))
    }

    pub fn intrinsic_size(&self) -> Option<(u32, u32)> {
        match self {
            Drawable::Bitmap(bitmap) => Some(bitmap.size()),
            Drawable::SolidColor(_) => None,
            Drawable::Procedural(drawable) => drawable.intrinsic_size(),
        }
    }
}

impl PartialEq for Drawable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Drawable::Bitmap(a), Drawable::Bitmap(b)) => a.ptr_eq(b),
            (Drawable::SolidColor(a), Drawable::SolidColor(b)) => a == b,
            (Drawable::Procedural(a), Drawable::Procedural(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Drawable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Drawable::Bitmap(bitmap) => f.debug_tuple("Bitmap").field(bitmap).finish(),
            Drawable::SolidColor(color) => f.debug_tuple("SolidColor").field(color).finish(),
            Drawable::Procedural(drawable) => f
                .debug_struct("Procedural")
                .field("intrinsic_size", &drawable.intrinsic_size())
                .finish(),
        }
    }
}

impl From<Bitmap> for Drawable {
    fn from(bitmap: Bitmap) -> Self {
        Drawable::Bitmap(bitmap)
    }
}

impl From<Color> for Drawable {
    fn from(color: Color) -> Self {
        Drawable::SolidColor(color)
    }
}

/// An SVG document rasterized with resvg, stretched to the target bounds.
pub struct SvgDrawable {
    tree: usvg::Tree,
}

impl SvgDrawable {
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
        Ok(Self { tree })
    }
}

impl ProceduralDrawable for SvgDrawable {
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        let size = self.tree.size();
        Some((size.width().ceil() as u32, size.height().ceil() as u32))
    }

    fn draw(&self, target: &mut PixmapMut<'_>) -> std::result::Result<(), FlattenError> {
        let size = self.tree.size();
        let sx = target.width() as f32 / size.width();
        let sy = target.height() as f32 / size.height();
        resvg::render(&self.tree, Transform::from_scale(sx, sy), target);
        Ok(())
    }
}

type PaintFn = Box<dyn Fn(&mut PixmapMut<'_>)>;

/// Procedural drawable backed by a painting closure.
///
/// Call [`CustomDrawable::invalidate_self`] after whatever the closure reads
/// has changed to get the attached view to redraw it.
pub struct CustomDrawable {
    size: Option<(u32, u32)>,
    paint: PaintFn,
    invalidator: InvalidatorSlot,
}

impl CustomDrawable {
    pub fn new(size: Option<(u32, u32)>, paint: impl Fn(&mut PixmapMut<'_>) + 'static) -> Self {
        Self {
            size,
            paint: Box::new(paint),
            invalidator: InvalidatorSlot::new(),
        }
    }

    /// Returns whether a view was attached to be notified.
    pub fn invalidate_self(&self) -> bool {
        self.invalidator.invalidate()
    }

    pub fn is_attached(&self) -> bool {
        self.invalidator.is_attached()
    }
}

impl ProceduralDrawable for CustomDrawable {
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn draw(&self, target: &mut PixmapMut<'_>) -> std::result::Result<(), FlattenError> {
        (self.paint)(target);
        Ok(())
    }

    fn set_invalidator(&self, invalidator: Option<Invalidator>) {
        self.invalidator.set(invalidator);
    }
}

/// Host-provided table resolving resource ids to drawables.
#[derive(Debug, Default, Clone)]
pub struct Resources {
    entries: HashMap<u32, ResourceEntry>,
}

#[derive(Debug, Clone)]
enum ResourceEntry {
    Drawable(Drawable),
    Source(ImageSource),
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_drawable(&mut self, id: u32, drawable: impl Into<Drawable>) {
        self.entries
            .insert(id, ResourceEntry::Drawable(drawable.into()));
    }

    /// Register a source that is decoded each time the id is resolved.
    pub fn insert_source(&mut self, id: u32, source: impl Into<ImageSource>) {
        self.entries.insert(id, ResourceEntry::Source(source.into()));
    }

    /// Resolve `id`; `Ok(None)` when it is not registered.
    pub fn resolve(&self, id: u32) -> Result<Option<Drawable>> {
        match self.entries.get(&id) {
            Some(ResourceEntry::Drawable(drawable)) => Ok(Some(drawable.clone())),
            Some(ResourceEntry::Source(source)) => source.load().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageLoadError;

    const SQUARE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20">
        <rect width="40" height="20" fill="#00ff00"/>
    </svg>"##;

    #[test]
    fn test_source_from_str_detects_svg() {
        assert_eq!(
            ImageSource::from("./logo.SVG"),
            ImageSource::SvgPath(PathBuf::from("./logo.SVG"))
        );
        assert_eq!(
            ImageSource::from("./photo.jpg"),
            ImageSource::Path(PathBuf::from("./photo.jpg"))
        );
        assert!(ImageSource::from("a.svg").is_svg());
        assert!(!ImageSource::from("a.png").is_svg());
    }

    #[test]
    fn test_load_svg_bytes() {
        let source = ImageSource::SvgBytes(Arc::from(SQUARE_SVG));
        let drawable = source.load().expect("valid svg");
        assert!(matches!(drawable, Drawable::Procedural(_)));
        assert_eq!(drawable.intrinsic_size(), Some((40, 20)));
    }

    #[test]
    fn test_load_invalid_raster_bytes() {
        let source = ImageSource::Bytes(Arc::from(&b"not an image"[..]));
        assert!(matches!(source.load(), Err(ImageLoadError::Image(_))));
    }

    #[test]
    fn test_load_missing_svg_file() {
        let source = ImageSource::SvgPath(PathBuf::from("/definitely/missing.svg"));
        assert!(matches!(source.load(), Err(ImageLoadError::Io(_))));
    }

    #[test]
    fn test_load_png_bytes() {
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(3, 5, image::Rgba([1, 2, 3, 255]));
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encodes");

        let drawable = ImageSource::Bytes(Arc::from(png)).load().expect("decodes");
        match drawable {
            Drawable::Bitmap(bitmap) => {
                assert_eq!(bitmap.size(), (3, 5));
                assert!(!bitmap.is_mutable());
            }
            other => panic!("expected bitmap, got {other:?}"),
        }
    }

    #[test]
    fn test_drawable_equality_is_identity() {
        let custom = Drawable::procedural(CustomDrawable::new(None, |_| {}));
        assert_eq!(custom, custom.clone());
        assert_ne!(custom, Drawable::procedural(CustomDrawable::new(None, |_| {})));
        assert_eq!(Drawable::from(Color::WHITE), Drawable::SolidColor(Color::WHITE));
        assert_ne!(Drawable::from(Color::WHITE), Drawable::from(Color::BLACK));
    }

    #[test]
    fn test_resources_resolve() {
        let mut resources = Resources::new();
        resources.insert_drawable(1, Color::BLACK);
        resources.insert_source(2, ImageSource::SvgBytes(Arc::from(SQUARE_SVG)));

        assert_eq!(
            resources.resolve(1).expect("registered"),
            Some(Drawable::SolidColor(Color::BLACK))
        );
        assert!(matches!(
            resources.resolve(2).expect("valid svg"),
            Some(Drawable::Procedural(_))
        ));
        assert!(resources.resolve(3).expect("lookup succeeds").is_none());
    }
}
