//! Rounded and circular image view core.
//!
//! [`RoundedImageView`](widgets::RoundedImageView) masks an image to a
//! rounded rectangle or circle with center-crop scaling, an optional border
//! and background, and shape-aware hit-testing. Hosts feed it bounds, images
//! and touch events, and paint it through the [`Canvas`](renderer::Canvas)
//! trait; [`PixmapCanvas`](renderer::PixmapCanvas) renders on the CPU.

pub mod error;
pub mod invalidation;
pub mod layout;
pub mod render_stats;
pub mod renderer;
pub mod transform;
pub mod widgets;

pub use error::{FlattenError, ImageLoadError, Result};

pub mod prelude {
    pub use crate::error::{FlattenError, ImageLoadError};
    pub use crate::invalidation::{DirtyFlags, Invalidator, InvalidatorSlot};
    pub use crate::layout::{BorderSpec, Geometry, ViewBounds};
    pub use crate::render_stats::StatsSnapshot;
    pub use crate::renderer::{
        Bitmap, BitmapShader, Canvas, ColorFilter, DrawCommand, PaintMode, PaintStyle,
        PixmapCanvas, RecordedFill, RecordingCanvas, WeakBitmap,
    };
    pub use crate::transform::ShaderTransform;
    pub use crate::widgets::{
        Attributes, Color, CustomDrawable, Drawable, ImageSource, IntRect, Outline, Padding,
        PaintOutcome, ProceduralDrawable, Rect, Resources, RoundedImageView, TouchEvent,
        TouchPhase,
    };
}
