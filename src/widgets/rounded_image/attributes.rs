use crate::widgets::Color;

pub const DEFAULT_BORDER_WIDTH: i32 = 0;
pub const DEFAULT_BORDER_COLOR: Color = Color::BLACK;
pub const DEFAULT_CIRCLE_BACKGROUND_COLOR: Color = Color::TRANSPARENT;
pub const DEFAULT_IMAGE_ALPHA: u8 = 255;
pub const DEFAULT_BORDER_OVERLAY: bool = false;
pub const DEFAULT_CORNER_RADIUS: f32 = 0.0;

/// Parsed view attributes, as read from a host layout or style.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub border_width: i32,
    pub border_color: Color,
    pub border_overlay: bool,
    pub circle_background_color: Color,
    /// Requested radius; the view clamps it to the drawable rect.
    pub corner_radius: f32,
    pub image_alpha: u8,
    pub disable_circular_transformation: bool,
    /// Whether the host can use [`Outline`](super::Outline) clip hints.
    pub clip_hint_supported: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            border_color: DEFAULT_BORDER_COLOR,
            border_overlay: DEFAULT_BORDER_OVERLAY,
            circle_background_color: DEFAULT_CIRCLE_BACKGROUND_COLOR,
            corner_radius: DEFAULT_CORNER_RADIUS,
            image_alpha: DEFAULT_IMAGE_ALPHA,
            disable_circular_transformation: false,
            clip_hint_supported: true,
        }
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn border_width(mut self, width: i32) -> Self {
        self.border_width = width.max(0);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn border_overlay(mut self, overlay: bool) -> Self {
        self.border_overlay = overlay;
        self
    }

    pub fn circle_background_color(mut self, color: Color) -> Self {
        self.circle_background_color = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Only the low 8 bits are kept.
    pub fn image_alpha(mut self, alpha: i32) -> Self {
        self.image_alpha = (alpha & 0xFF) as u8;
        self
    }

    pub fn disable_circular_transformation(mut self, disable: bool) -> Self {
        self.disable_circular_transformation = disable;
        self
    }

    pub fn clip_hint_supported(mut self, supported: bool) -> Self {
        self.clip_hint_supported = supported;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let attrs = Attributes::default();
        assert_eq!(attrs.border_width, 0);
        assert_eq!(attrs.border_color, Color::BLACK);
        assert!(attrs.circle_background_color.is_transparent());
        assert_eq!(attrs.image_alpha, 255);
        assert!(!attrs.border_overlay);
        assert!(!attrs.disable_circular_transformation);
        assert!(attrs.clip_hint_supported);
    }

    #[test]
    fn test_builders_sanitize() {
        let attrs = Attributes::new()
            .border_width(-3)
            .corner_radius(-1.0)
            .image_alpha(0x1_80);
        assert_eq!(attrs.border_width, 0);
        assert_eq!(attrs.corner_radius, 0.0);
        assert_eq!(attrs.image_alpha, 0x80);
    }
}
