use egui::{PointerButton, Pos2};

use super::{Tool, ToolContext, pixel_at};
use crate::raster;

/// Flood fill with the primary color
#[derive(Debug, Clone, Default)]
pub struct BucketTool;

impl BucketTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for BucketTool {
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        if button != PointerButton::Primary {
            return;
        }
        let (x, y) = pixel_at(pos);
        let filled = raster::flood_fill(ctx.image, x, y, ctx.palette.primary);
        log::debug!("bucket filled {filled} pixels from ({x}, {y})");
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) {}

    fn on_pointer_up(&mut self, _pos: Pos2, _button: PointerButton, _ctx: &mut ToolContext<'_>) {}
}
