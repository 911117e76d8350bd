pub mod image;
pub mod rounded_image;
pub mod widget;

pub use image::{CustomDrawable, Drawable, ImageSource, ProceduralDrawable, Resources, SvgDrawable};
pub use rounded_image::{Attributes, Outline, PaintOutcome, RoundedImageView};
pub use widget::{Color, IntRect, Padding, Rect, TouchEvent, TouchPhase};
