#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Channels quantized to `[r, g, b, a]` bytes (straight alpha).
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub(crate) fn to_skia(self) -> resvg::tiny_skia::Color {
        let [r, g, b, a] = self.to_rgba8();
        resvg::tiny_skia::Color::from_rgba8(r, g, b, a)
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Float rectangle in view coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edge coordinates, clamping inverted edges to an empty rect.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: (right - left).max(0.0),
            height: (bottom - top).max(0.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True when the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink by `amount` on every side. An inset larger than half a
    /// dimension collapses that axis onto its center line.
    pub fn inset(&self, amount: f32) -> Self {
        let dx = amount.min(self.width / 2.0);
        let dy = amount.min(self.height / 2.0);
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: (self.width - dx * 2.0).max(0.0),
            height: (self.height - dy * 2.0).max(0.0),
        }
    }

    /// Whether `other` lies entirely inside this rect (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Smallest integer rect containing this one.
    pub fn round_out(&self) -> IntRect {
        IntRect {
            left: self.left().floor() as i32,
            top: self.top().floor() as i32,
            right: self.right().ceil() as i32,
            bottom: self.bottom().ceil() as i32,
        }
    }

    pub(crate) fn to_skia(self) -> Option<resvg::tiny_skia::Rect> {
        resvg::tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Integer rectangle by edges, as handed to host clip APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// View padding in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl From<i32> for Padding {
    fn from(v: i32) -> Self {
        Padding::all(v)
    }
}

/// `[left, top, right, bottom]`
impl From<[i32; 4]> for Padding {
    fn from(v: [i32; 4]) -> Self {
        Padding::new(v[0], v[1], v[2], v[3])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event in view coordinates, delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub phase: TouchPhase,
}

impl TouchEvent {
    pub fn new(x: f32, y: f32, phase: TouchPhase) -> Self {
        Self { x, y, phase }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0xFF0000);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_color_from_argb() {
        let color = Color::from_argb(0x80FF0000);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.to_rgba8(), [255, 0, 0, 128]);
        assert_eq!(Color::from_argb(0x00000000), Color::TRANSPARENT);
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::TRANSPARENT);
        assert!(Color::default().is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center_x(), 60.0);
        assert_eq!(rect.center_y(), 45.0);
    }

    #[test]
    fn test_rect_from_ltrb_clamps() {
        let rect = Rect::from_ltrb(9.0, 9.0, 91.0, 91.0);
        assert_eq!(rect, Rect::new(9.0, 9.0, 82.0, 82.0));

        let inverted = Rect::from_ltrb(50.0, 50.0, 10.0, 10.0);
        assert!(inverted.is_empty());
        assert_eq!(inverted.width, 0.0);
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inset_rect = rect.inset(10.0);
        assert_eq!(inset_rect, Rect::new(10.0, 10.0, 80.0, 80.0));

        // Test that inset doesn't go negative
        let over_inset = Rect::new(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(over_inset.width, 0.0);
        assert_eq!(over_inset.height, 0.0);
        assert_eq!(over_inset.x, 5.0);
        assert_eq!(over_inset.y, 5.0);
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(9.0, 9.0, 82.0, 82.0)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&Rect::new(50.0, 50.0, 60.0, 10.0)));
    }

    #[test]
    fn test_rect_round_out() {
        let rect = Rect::new(0.5, 1.2, 10.0, 10.0);
        assert_eq!(
            rect.round_out(),
            IntRect {
                left: 0,
                top: 1,
                right: 11,
                bottom: 12,
            }
        );
    }

    #[test]
    fn test_padding_helpers() {
        let padding = Padding::new(15, 10, 15, 10);
        assert_eq!(padding.horizontal(), 30);
        assert_eq!(padding.vertical(), 20);
        assert_eq!(Padding::from(4), Padding::all(4));
        assert_eq!(Padding::from([1, 2, 3, 4]), Padding::new(1, 2, 3, 4));
        assert_eq!(Padding::default(), Padding::all(0));
    }
}
