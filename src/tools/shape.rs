use egui::{PointerButton, Pos2};
use image::RgbImage;

use super::{MAX_TOOL_WIDTH, Tool, ToolContext, pixel_at};
use crate::raster::{self, Nib};

/// Outline drawn between the press point and the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line,
    Rect,
    Ellipse,
    Triangle,
}

/// State of a drag in progress
#[derive(Debug, Clone)]
struct ShapeDrag {
    start: (i32, i32),
    /// Image as it was at the press, restored before each preview
    base: RgbImage,
}

/// Line and outline shapes, previewed live while dragging
#[derive(Debug, Clone)]
pub struct ShapeTool {
    shape: Shape,
    width: u32,
    drag: Option<ShapeDrag>,
}

impl ShapeTool {
    pub fn new(shape: Shape, width: u32) -> Self {
        Self {
            shape,
            width: width.clamp(1, MAX_TOOL_WIDTH),
            drag: None,
        }
    }

    fn redraw(&self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(drag) = &self.drag else {
            return;
        };
        ctx.image.clone_from(&drag.base);

        let end = pixel_at(pos);
        let color = ctx.palette.primary;
        match self.shape {
            Shape::Line => raster::draw_line(ctx.image, drag.start, end, self.width, Nib::Round, color),
            Shape::Rect => raster::draw_rect(ctx.image, drag.start, end, self.width, color),
            Shape::Ellipse => raster::draw_ellipse(ctx.image, drag.start, end, self.width, color),
            Shape::Triangle => raster::draw_triangle(ctx.image, drag.start, end, self.width, color),
        }
    }
}

impl Tool for ShapeTool {
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        if button != PointerButton::Primary {
            return;
        }
        self.drag = Some(ShapeDrag {
            start: pixel_at(pos),
            base: ctx.image.clone(),
        });
        self.redraw(pos, ctx);
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.redraw(pos, ctx);
    }

    fn on_pointer_up(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        if button != PointerButton::Primary {
            return;
        }
        self.redraw(pos, ctx);
        self.drag = None;
    }

    fn width(&self) -> Option<u32> {
        Some(self.width)
    }

    fn set_width(&mut self, width: u32) {
        self.width = width.clamp(1, MAX_TOOL_WIDTH);
    }

    fn is_stroking(&self) -> bool {
        self.drag.is_some()
    }

    fn reset(&mut self) {
        self.drag = None;
    }
}
