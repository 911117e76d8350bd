//! Recorded draw commands, for hosts that replay paints on their own
//! rasterizer and for asserting what a view drew.

use crate::transform::ShaderTransform;
use crate::widgets::{Color, Rect};

use super::{Bitmap, Canvas, ColorFilter, Fill, PaintMode, PaintStyle};

/// What a recorded shape was filled with.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedFill {
    Solid(Color),
    /// Bitmap sampled through a shader transform. Holds a reference to the
    /// bitmap for as long as the command is kept.
    Bitmap {
        bitmap: Bitmap,
        transform: ShaderTransform,
    },
}

/// A single draw operation in view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Anti-aliased rounded rectangle, filled or stroked.
    RoundRect {
        rect: Rect,
        /// Corner radius in pixels
        radius: f32,
        fill: RecordedFill,
        mode: PaintMode,
        /// Layer opacity, 255 is opaque
        alpha: u8,
        color_filter: Option<ColorFilter>,
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::RoundRect { rect, .. } => *rect,
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(
            self,
            DrawCommand::RoundRect {
                fill: RecordedFill::Bitmap { .. },
                ..
            }
        )
    }
}

/// Canvas that records every paint instead of rasterizing it.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the canvas empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &PaintStyle<'_>) {
        let fill = match paint.fill {
            Fill::Solid(color) => RecordedFill::Solid(color),
            Fill::Shader(shader) => RecordedFill::Bitmap {
                bitmap: shader.bitmap.clone(),
                transform: shader.transform,
            },
        };
        self.commands.push(DrawCommand::RoundRect {
            rect,
            radius,
            fill,
            mode: paint.mode,
            alpha: paint.alpha,
            color_filter: paint.color_filter,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::BitmapShader;

    #[test]
    fn test_records_solid_and_shader_paints() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let bitmap = Bitmap::new(2, 2).expect("allocates");
        let shader = BitmapShader::center_crop(bitmap.clone(), &rect);

        let mut canvas = RecordingCanvas::new();
        canvas.draw_round_rect(rect, 5.0, &PaintStyle::fill(Color::WHITE));
        canvas.draw_round_rect(rect, 5.0, &PaintStyle::shader(&shader).alpha(7));
        canvas.draw_round_rect(rect, 4.5, &PaintStyle::stroke(Color::BLACK, 1.0));

        assert_eq!(canvas.len(), 3);
        assert!(!canvas.commands()[0].is_bitmap());
        match &canvas.commands()[1] {
            DrawCommand::RoundRect {
                fill: RecordedFill::Bitmap { bitmap: recorded, transform },
                alpha,
                ..
            } => {
                assert!(recorded.ptr_eq(&bitmap));
                assert_eq!(*transform, shader.transform);
                assert_eq!(*alpha, 7);
            }
            other => panic!("expected bitmap fill, got {other:?}"),
        }
        assert!(matches!(
            canvas.commands()[2],
            DrawCommand::RoundRect {
                mode: PaintMode::Stroke { width },
                ..
            } if width == 1.0
        ));
    }

    #[test]
    fn test_take_empties_canvas() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_round_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, &PaintStyle::fill(Color::WHITE));
        let taken = canvas.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].rect(), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(canvas.is_empty());
    }
}
