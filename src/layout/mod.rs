pub mod geometry;

pub use geometry::{BorderSpec, Geometry};

use crate::widgets::{Padding, Rect};

/// View size and padding as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewBounds {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
}

impl ViewBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// The area left after padding, positioned at the top-left padding.
    ///
    /// Negative padding counts as zero. Padding that exceeds the bounds
    /// yields an empty rect rather than a negative size.
    pub fn content_rect(&self) -> Rect {
        let left = self.padding.left.max(0);
        let top = self.padding.top.max(0);
        let right = self.padding.right.max(0);
        let bottom = self.padding.bottom.max(0);
        let available_width = (self.width - left - right).max(0);
        let available_height = (self.height - top - bottom).max(0);

        Rect::new(
            left as f32,
            top as f32,
            available_width as f32,
            available_height as f32,
        )
    }
}
