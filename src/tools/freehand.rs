use egui::{PointerButton, Pos2};
use image::Rgb;

use super::{MAX_TOOL_WIDTH, Palette, Tool, ToolContext, pixel_at};
use crate::raster::{self, Nib};

/// Which palette entry a freehand tool paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkSlot {
    Primary,
    Secondary,
}

impl InkSlot {
    fn color(self, palette: &Palette) -> Rgb<u8> {
        match self {
            InkSlot::Primary => palette.primary,
            InkSlot::Secondary => palette.secondary,
        }
    }
}

/// Freehand drawing: pencil, brush and eraser differ only in nib and ink
#[derive(Debug, Clone)]
pub struct FreehandTool {
    nib: Nib,
    ink: InkSlot,
    width: u32,
    /// Last pixel painted in the current stroke
    last: Option<(i32, i32)>,
}

impl FreehandTool {
    /// Hard square nib in the primary color
    pub fn pencil(width: u32) -> Self {
        Self::new(Nib::Square, InkSlot::Primary, width)
    }

    /// Round nib in the primary color
    pub fn brush(width: u32) -> Self {
        Self::new(Nib::Round, InkSlot::Primary, width)
    }

    /// Square nib painting the secondary (background) color
    pub fn eraser(width: u32) -> Self {
        Self::new(Nib::Square, InkSlot::Secondary, width)
    }

    fn new(nib: Nib, ink: InkSlot, width: u32) -> Self {
        Self {
            nib,
            ink,
            width: width.clamp(1, MAX_TOOL_WIDTH),
            last: None,
        }
    }

    fn extend_to(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(last) = self.last else {
            return;
        };
        let current = pixel_at(pos);
        if current != last {
            let color = self.ink.color(ctx.palette);
            raster::draw_line(ctx.image, last, current, self.width, self.nib, color);
            self.last = Some(current);
        }
    }
}

impl Tool for FreehandTool {
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        if button != PointerButton::Primary {
            return;
        }
        let (x, y) = pixel_at(pos);
        raster::stamp(ctx.image, x, y, self.width, self.nib, self.ink.color(ctx.palette));
        self.last = Some((x, y));
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.extend_to(pos, ctx);
    }

    fn on_pointer_up(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        if button != PointerButton::Primary {
            return;
        }
        self.extend_to(pos, ctx);
        self.last = None;
    }

    fn width(&self) -> Option<u32> {
        Some(self.width)
    }

    fn set_width(&mut self, width: u32) {
        self.width = width.clamp(1, MAX_TOOL_WIDTH);
    }

    fn is_stroking(&self) -> bool {
        self.last.is_some()
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use image::RgbImage;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn drag(tool: &mut FreehandTool, image: &mut RgbImage, palette: &mut Palette, from: Pos2, to: Pos2) {
        let mut ctx = ToolContext { image, palette };
        tool.on_pointer_down(from, PointerButton::Primary, &mut ctx);
        tool.on_pointer_move(to, &mut ctx);
        tool.on_pointer_up(to, PointerButton::Primary, &mut ctx);
    }

    #[test]
    fn test_pencil_draws_continuous_line() {
        let mut image = RgbImage::from_pixel(20, 5, WHITE);
        let mut palette = Palette::default();
        let mut pencil = FreehandTool::pencil(1);

        drag(&mut pencil, &mut image, &mut palette, pos2(1.5, 2.5), pos2(18.5, 2.5));

        for x in 1..=18 {
            assert_eq!(*image.get_pixel(x, 2), BLACK, "gap at x={x}");
        }
        assert!(!pencil.is_stroking());
    }

    #[test]
    fn test_eraser_paints_secondary_color() {
        let mut image = RgbImage::from_pixel(20, 20, BLACK);
        let mut palette = Palette::default();
        let mut eraser = FreehandTool::eraser(6);

        drag(&mut eraser, &mut image, &mut palette, pos2(10.0, 10.0), pos2(10.0, 10.0));

        assert_eq!(*image.get_pixel(10, 10), WHITE);
        assert_eq!(*image.get_pixel(7, 7), WHITE);
        assert_eq!(*image.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn test_moves_without_press_do_nothing() {
        let mut image = RgbImage::from_pixel(10, 10, WHITE);
        let mut palette = Palette::default();
        let mut brush = FreehandTool::brush(3);
        let mut ctx = ToolContext {
            image: &mut image,
            palette: &mut palette,
        };

        brush.on_pointer_move(pos2(5.0, 5.0), &mut ctx);
        brush.on_pointer_down(pos2(5.0, 5.0), PointerButton::Secondary, &mut ctx);
        brush.on_pointer_move(pos2(8.0, 8.0), &mut ctx);

        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_width_is_clamped() {
        let mut brush = FreehandTool::brush(0);
        assert_eq!(brush.width(), Some(1));
        brush.set_width(500);
        assert_eq!(brush.width(), Some(MAX_TOOL_WIDTH));
    }
}
