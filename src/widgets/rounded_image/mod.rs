//! Image view that masks its content to a rounded rectangle or circle.
//!
//! The view owns all derived state (geometry, flattened bitmap, shader) and
//! rebuilds it lazily: mutators only record what changed in [`DirtyFlags`],
//! and [`RoundedImageView::paint`] does the expensive work at most once per
//! change.
//!
//! # Example
//!
//! ```ignore
//! let mut view = RoundedImageView::with_attributes(
//!     Attributes::new().border_width(4).border_color(Color::WHITE),
//! );
//! view.set_redraw_callback(|| host.schedule_frame());
//! view.on_size_changed(96, 96);
//! view.set_image_uri("avatar.png");
//!
//! let mut canvas = PixmapCanvas::new(96, 96).unwrap();
//! view.paint(&mut canvas);
//! ```

mod attributes;

pub use attributes::{
    Attributes, DEFAULT_BORDER_COLOR, DEFAULT_BORDER_OVERLAY, DEFAULT_BORDER_WIDTH,
    DEFAULT_CIRCLE_BACKGROUND_COLOR, DEFAULT_CORNER_RADIUS, DEFAULT_IMAGE_ALPHA,
};

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use crate::invalidation::{DirtyFlags, Invalidator, RedrawCallback};
use crate::layout::{BorderSpec, Geometry, ViewBounds};
use crate::render_stats::{RenderStats, StatsSnapshot};
use crate::renderer::flatten::redraw;
use crate::renderer::{center_crop, flatten, Bitmap, BitmapShader, Canvas, ColorFilter, PaintStyle};
use crate::transform::ShaderTransform;
use crate::widgets::image::{Drawable, ImageSource, Resources};
use crate::widgets::{Color, IntRect, Padding, TouchEvent};

/// What [`RoundedImageView::paint`] did with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Background, image and border were issued to the canvas.
    Drawn,
    /// Nothing to draw: the view has no area after padding and border.
    Skipped,
    /// Masking is disabled; the host draws the plain image itself.
    Delegated,
}

/// Clip hint for hosts that can clip or cast shadows along the view shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    RoundRect { bounds: IntRect, radius: f32 },
    /// Use the host's default outline for the view background.
    Background,
}

/// Where the current image came from, for skipping repeated loads.
#[derive(Debug, Clone, PartialEq)]
enum ImageOrigin {
    Source(ImageSource),
    Resource(u32),
}

pub struct RoundedImageView {
    bounds: ViewBounds,
    border: BorderSpec,
    background_color: Color,
    requested_corner_radius: f32,
    image_alpha: u8,
    color_filter: Option<ColorFilter>,
    disable_circular_transformation: bool,
    clip_hint_supported: bool,

    source: Option<Drawable>,
    origin: Option<ImageOrigin>,
    bitmap: Option<Bitmap>,
    shader: Option<BitmapShader>,
    geometry: Geometry,
    dirty: DirtyFlags,

    /// Set by the attached procedural source between paints.
    content_pending: Rc<Cell<bool>>,
    on_redraw: Option<RedrawCallback>,
    stats: RenderStats,
}

impl RoundedImageView {
    pub fn new() -> Self {
        Self::with_attributes(Attributes::default())
    }

    pub fn with_attributes(attrs: Attributes) -> Self {
        let bounds = ViewBounds::default();
        let border =
            BorderSpec::new(attrs.border_width, attrs.border_color).overlay(attrs.border_overlay);
        let requested_corner_radius = attrs.corner_radius.max(0.0);

        Self {
            bounds,
            border,
            background_color: attrs.circle_background_color,
            requested_corner_radius,
            image_alpha: attrs.image_alpha,
            color_filter: None,
            disable_circular_transformation: attrs.disable_circular_transformation,
            clip_hint_supported: attrs.clip_hint_supported,
            source: None,
            origin: None,
            bitmap: None,
            shader: None,
            geometry: Geometry::compute(&bounds, &border, requested_corner_radius),
            dirty: DirtyFlags::GEOMETRY,
            content_pending: Rc::new(Cell::new(false)),
            on_redraw: None,
            stats: RenderStats::default(),
        }
    }

    /// Apply a parsed attribute set through the regular setters.
    pub fn apply_attributes(&mut self, attrs: &Attributes) {
        self.set_border_width(attrs.border_width);
        self.set_border_color(attrs.border_color);
        self.set_border_overlay(attrs.border_overlay);
        self.set_circle_background_color(attrs.circle_background_color);
        self.set_corner_radius(attrs.corner_radius);
        self.set_image_alpha(attrs.image_alpha as i32);
        self.set_disable_circular_transformation(attrs.disable_circular_transformation);

        if attrs.clip_hint_supported != self.clip_hint_supported {
            self.clip_hint_supported = attrs.clip_hint_supported;
            self.dirty.insert(DirtyFlags::GEOMETRY);
        }
    }

    /// Register the callback the view uses to ask the host for a repaint.
    pub fn set_redraw_callback(&mut self, callback: impl Fn() + 'static) {
        self.on_redraw = Some(Rc::new(callback));
        self.attach_source();
    }

    pub fn clear_redraw_callback(&mut self) {
        self.on_redraw = None;
        self.attach_source();
    }

    // ---- Layout ----

    pub fn on_size_changed(&mut self, width: i32, height: i32) {
        if width == self.bounds.width && height == self.bounds.height {
            return;
        }
        self.bounds.width = width;
        self.bounds.height = height;
        self.update_geometry();
        self.request_redraw();
    }

    /// Accepts anything convertible to [`Padding`], e.g. `[left, top, right, bottom]`.
    pub fn set_padding(&mut self, padding: impl Into<Padding>) {
        let padding = padding.into();
        if padding == self.bounds.padding {
            return;
        }
        self.bounds.padding = padding;
        self.update_geometry();
        self.request_redraw();
    }

    pub fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    // ---- Image ----

    pub fn set_image_bitmap(&mut self, bitmap: Option<Bitmap>) {
        self.set_image_drawable(bitmap.map(Drawable::Bitmap));
    }

    pub fn set_image_drawable(&mut self, drawable: Option<Drawable>) {
        self.origin = None;
        self.replace_source(drawable);
    }

    /// Resolve `id` in `resources`. Unknown ids and undecodable resources
    /// clear the image.
    pub fn set_image_resource(&mut self, resources: &Resources, id: u32) {
        if matches!(self.origin, Some(ImageOrigin::Resource(current)) if current == id) {
            return;
        }

        let drawable = match resources.resolve(id) {
            Ok(Some(drawable)) => Some(drawable),
            Ok(None) => {
                log::warn!("Unknown image resource {id}");
                None
            }
            Err(err) => {
                log::warn!("Failed to load image resource {id}: {err}");
                None
            }
        };
        // Failed loads keep no origin so the same id can be retried.
        let origin = drawable.as_ref().map(|_| ImageOrigin::Resource(id));
        self.replace_source(drawable);
        self.origin = origin;
    }

    pub fn set_image_uri(&mut self, path: impl AsRef<Path>) {
        self.set_image_source(ImageSource::from(path.as_ref()));
    }

    /// Decode `source` and display it. A source that fails to load clears
    /// the image.
    pub fn set_image_source(&mut self, source: impl Into<ImageSource>) {
        let source = source.into();
        if matches!(&self.origin, Some(ImageOrigin::Source(current)) if *current == source) {
            return;
        }

        let drawable = match source.load() {
            Ok(drawable) => Some(drawable),
            Err(err) => {
                log::warn!("Failed to load image {source:?}: {err}");
                None
            }
        };
        let origin = drawable.as_ref().map(|_| ImageOrigin::Source(source));
        self.replace_source(drawable);
        self.origin = origin;
    }

    pub fn drawable(&self) -> Option<&Drawable> {
        self.source.as_ref()
    }

    /// The flattened pixels the shader samples, while masking is enabled.
    pub fn source_pixels(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// The shader built by the last paint.
    pub fn shader(&self) -> Option<&BitmapShader> {
        self.shader.as_ref()
    }

    /// Center-crop transform for the current bitmap and drawable rect.
    pub fn shader_transform(&self) -> ShaderTransform {
        center_crop(
            self.bitmap.as_ref().map(Bitmap::size),
            &self.geometry.drawable_rect,
        )
    }

    /// Procedural content changed: redraw it into the backing buffer on the
    /// next paint. Identity and size are unchanged, so the shader is kept.
    pub fn invalidate_drawable(&mut self) {
        self.mark_content_dirty();
        self.request_redraw();
    }

    // ---- Appearance ----

    pub fn border_color(&self) -> Color {
        self.border.color
    }

    pub fn set_border_color(&mut self, color: Color) {
        if color == self.border.color {
            return;
        }
        self.border.color = color;
        self.request_redraw();
    }

    pub fn circle_background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_circle_background_color(&mut self, color: Color) {
        if color == self.background_color {
            return;
        }
        self.background_color = color;
        self.request_redraw();
    }

    pub fn border_width(&self) -> i32 {
        self.border.width
    }

    /// Negative widths are treated as zero.
    pub fn set_border_width(&mut self, width: i32) {
        let width = width.max(0);
        if width == self.border.width {
            return;
        }
        self.border.width = width;
        self.update_geometry();
        self.request_redraw();
    }

    pub fn is_border_overlay(&self) -> bool {
        self.border.overlay
    }

    pub fn set_border_overlay(&mut self, overlay: bool) {
        if overlay == self.border.overlay {
            return;
        }
        self.border.overlay = overlay;
        self.update_geometry();
        self.request_redraw();
    }

    /// The requested radius. The radius actually drawn is
    /// `geometry().corner_radius`.
    pub fn corner_radius(&self) -> f32 {
        self.requested_corner_radius
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        let radius = radius.max(0.0);
        if radius == self.requested_corner_radius {
            return;
        }
        self.requested_corner_radius = radius;
        self.update_geometry();
        self.request_redraw();
    }

    pub fn image_alpha(&self) -> u8 {
        self.image_alpha
    }

    /// Only the low 8 bits of `alpha` are used.
    pub fn set_image_alpha(&mut self, alpha: i32) {
        let alpha = (alpha & 0xFF) as u8;
        if alpha == self.image_alpha {
            return;
        }
        self.image_alpha = alpha;
        self.request_redraw();
    }

    pub fn color_filter(&self) -> Option<ColorFilter> {
        self.color_filter
    }

    pub fn set_color_filter(&mut self, color_filter: Option<ColorFilter>) {
        if color_filter == self.color_filter {
            return;
        }
        self.color_filter = color_filter;
        self.request_redraw();
    }

    pub fn is_disable_circular_transformation(&self) -> bool {
        self.disable_circular_transformation
    }

    /// Disabling releases the bitmap and shader and hands painting back to
    /// the host; enabling rebuilds them from the current source.
    pub fn set_disable_circular_transformation(&mut self, disable: bool) {
        if disable == self.disable_circular_transformation {
            return;
        }
        self.disable_circular_transformation = disable;

        if disable {
            self.detach_source();
            self.bitmap = None;
            self.shader = None;
            self.content_pending.set(false);
            self.dirty
                .remove(DirtyFlags::SHADER | DirtyFlags::SOURCE_CONTENT);
        } else {
            self.initialize_bitmap();
        }

        // The outline switches between the shape and the background.
        self.dirty.insert(DirtyFlags::GEOMETRY);
        self.request_redraw();
    }

    // ---- Painting ----

    pub fn paint(&mut self, canvas: &mut dyn Canvas) -> PaintOutcome {
        if self.disable_circular_transformation {
            self.stats.record_frame_delegated();
            return PaintOutcome::Delegated;
        }
        if self.geometry.is_degenerate() {
            log::trace!(
                "Skipping paint, no drawable area in {:?}",
                self.geometry.border_rect
            );
            self.stats.record_frame_skipped();
            return PaintOutcome::Skipped;
        }

        if self.content_pending.replace(false) {
            self.mark_content_dirty();
        }

        if self.dirty.contains(DirtyFlags::SOURCE_CONTENT) {
            self.dirty.remove(DirtyFlags::SOURCE_CONTENT);
            if let (Some(source), Some(bitmap)) = (&self.source, &self.bitmap) {
                match redraw(source, bitmap) {
                    Ok(()) => self.stats.record_content_redraw(),
                    Err(err) => log::warn!("Failed to redraw {source:?}: {err}"),
                }
            }
        }

        if self.dirty.contains(DirtyFlags::SHADER) {
            self.dirty.remove(DirtyFlags::SHADER);
            let drawable_rect = self.geometry.drawable_rect;
            self.shader = self
                .bitmap
                .as_ref()
                .map(|bitmap| BitmapShader::center_crop(bitmap.clone(), &drawable_rect));
            if let Some(shader) = &self.shader {
                log::debug!(
                    "Rebuilt shader for {:?}: {:?}",
                    shader.bitmap.size(),
                    shader.transform
                );
                self.stats.record_shader_rebuild();
            }
        }

        let Geometry {
            border_rect,
            drawable_rect,
            corner_radius,
            ..
        } = self.geometry;

        if !self.background_color.is_transparent() {
            canvas.draw_round_rect(
                drawable_rect,
                corner_radius,
                &PaintStyle::fill(self.background_color),
            );
        }

        if let Some(shader) = &self.shader {
            let style = PaintStyle::shader(shader)
                .alpha(self.image_alpha)
                .color_filter(self.color_filter);
            canvas.draw_round_rect(drawable_rect, corner_radius, &style);
        }

        if self.border.width > 0 {
            canvas.draw_round_rect(
                border_rect,
                corner_radius,
                &PaintStyle::stroke(self.border.color, self.border.width as f32),
            );
        }

        self.stats.record_frame_painted();
        PaintOutcome::Drawn
    }

    // ---- Input and clip hint ----

    /// Whether `(x, y)` lies in the touchable area: the circle inscribed in
    /// the border rect, whatever the corner radius.
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        if self.disable_circular_transformation {
            return true;
        }
        let rect = self.geometry.border_rect;
        if rect.is_empty() {
            return true;
        }

        let dx = x - rect.center_x();
        let dy = y - rect.center_y();
        let radius = self.geometry.border_stroke_radius;
        dx * dx + dy * dy <= radius * radius
    }

    /// Forward `event` to `handler` only if it lands inside the view shape.
    pub fn on_touch_event(
        &self,
        event: &TouchEvent,
        handler: impl FnOnce(&TouchEvent) -> bool,
    ) -> bool {
        if self.disable_circular_transformation {
            return handler(event);
        }
        self.hit_test(event.x, event.y) && handler(event)
    }

    /// Current clip hint, or `None` when the host cannot use one.
    pub fn outline(&self) -> Option<Outline> {
        if !self.clip_hint_supported {
            return None;
        }
        if self.disable_circular_transformation {
            return Some(Outline::Background);
        }
        Some(Outline::RoundRect {
            bounds: self.geometry.border_rect.round_out(),
            radius: self.geometry.corner_radius,
        })
    }

    /// The clip hint if it changed since the last call.
    pub fn take_outline_update(&mut self) -> Option<Outline> {
        if !self.dirty.contains(DirtyFlags::GEOMETRY) {
            return None;
        }
        self.dirty.remove(DirtyFlags::GEOMETRY);
        self.outline()
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // ---- Internals ----

    fn request_redraw(&mut self) {
        self.stats.record_redraw_request();
        if let Some(redraw) = &self.on_redraw {
            redraw();
        }
    }

    fn update_geometry(&mut self) {
        self.geometry = Geometry::compute(&self.bounds, &self.border, self.requested_corner_radius);
        self.stats.record_geometry_update();
        self.dirty.insert(DirtyFlags::GEOMETRY | DirtyFlags::SHADER);

        if self.needs_reflatten() {
            self.initialize_bitmap();
        }
    }

    fn replace_source(&mut self, drawable: Option<Drawable>) {
        if drawable == self.source {
            return;
        }
        self.detach_source();
        self.source = drawable;
        self.content_pending.set(false);
        self.initialize_bitmap();
        self.request_redraw();
    }

    fn initialize_bitmap(&mut self) {
        self.bitmap = None;
        self.shader = None;
        self.dirty
            .remove(DirtyFlags::SHADER | DirtyFlags::SOURCE_CONTENT);

        if self.disable_circular_transformation {
            return;
        }
        self.attach_source();

        let fallback_size = self.fallback_size();
        let Some(source) = self.source.as_ref() else {
            return;
        };
        if sized_by_view(source) && (fallback_size.0 == 0 || fallback_size.1 == 0) {
            log::trace!("Deferring flatten of {source:?} until the view has an area");
            return;
        }

        self.stats.record_flatten();
        self.bitmap = flatten(Some(source), fallback_size);
        if let Some(bitmap) = &self.bitmap {
            log::debug!(
                "Flattened {source:?} into {:?} (mutable: {})",
                bitmap.size(),
                bitmap.is_mutable()
            );
            self.dirty.insert(DirtyFlags::SHADER);
        }
    }

    /// Procedural sources without a size of their own are flattened at the
    /// drawable rect size, so they follow it when it changes.
    fn needs_reflatten(&self) -> bool {
        if self.disable_circular_transformation {
            return false;
        }
        match &self.source {
            Some(source) if sized_by_view(source) => {
                self.bitmap.as_ref().map(Bitmap::size) != Some(self.fallback_size())
            }
            _ => false,
        }
    }

    fn fallback_size(&self) -> (u32, u32) {
        let rect = self.geometry.drawable_rect;
        (rect.width.round() as u32, rect.height.round() as u32)
    }

    fn mark_content_dirty(&mut self) {
        if self.bitmap.as_ref().is_some_and(Bitmap::is_mutable) {
            self.dirty.insert(DirtyFlags::SOURCE_CONTENT);
        }
    }

    fn invalidator(&self) -> Invalidator {
        Invalidator::new(self.content_pending.clone(), self.on_redraw.clone())
    }

    fn attach_source(&self) {
        if self.disable_circular_transformation {
            return;
        }
        if let Some(Drawable::Procedural(drawable)) = &self.source {
            drawable.set_invalidator(Some(self.invalidator()));
        }
    }

    fn detach_source(&self) {
        if let Some(Drawable::Procedural(drawable)) = &self.source {
            drawable.set_invalidator(None);
        }
    }
}

fn sized_by_view(source: &Drawable) -> bool {
    match source {
        Drawable::Procedural(drawable) => drawable
            .intrinsic_size()
            .filter(|&(w, h)| w > 0 && h > 0)
            .is_none(),
        _ => false,
    }
}

impl Default for RoundedImageView {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RoundedImageView {
    fn drop(&mut self) {
        self.detach_source();
    }
}

impl std::fmt::Debug for RoundedImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundedImageView")
            .field("bounds", &self.bounds)
            .field("border", &self.border)
            .field("geometry", &self.geometry)
            .field("source", &self.source)
            .field("bitmap", &self.bitmap)
            .field("dirty", &self.dirty)
            .field("disable_circular_transformation", &self.disable_circular_transformation)
            .finish()
    }
}
