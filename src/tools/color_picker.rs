use egui::{PointerButton, Pos2};

use super::{Tool, ToolContext, pixel_at};
use crate::raster;

/// Samples the canvas into the palette.
///
/// The primary button picks the primary color and the secondary button
/// picks the secondary color. The image is never modified.
#[derive(Debug, Clone, Default)]
pub struct ColorPickerTool;

impl ColorPickerTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for ColorPickerTool {
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        let (x, y) = pixel_at(pos);
        let Some(color) = raster::sample(ctx.image, x, y) else {
            return;
        };
        match button {
            PointerButton::Primary => ctx.palette.primary = color,
            PointerButton::Secondary => ctx.palette.secondary = color,
            _ => {}
        }
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) {}

    fn on_pointer_up(&mut self, _pos: Pos2, _button: PointerButton, _ctx: &mut ToolContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Palette;
    use egui::pos2;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_picks_into_matching_slot() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        image.put_pixel(3, 3, Rgb([200, 100, 50]));
        let before = image.clone();
        let mut palette = Palette::default();
        let mut picker = ColorPickerTool::new();
        let mut ctx = ToolContext {
            image: &mut image,
            palette: &mut palette,
        };

        picker.on_pointer_down(pos2(0.5, 0.5), PointerButton::Primary, &mut ctx);
        picker.on_pointer_down(pos2(3.5, 3.5), PointerButton::Secondary, &mut ctx);
        picker.on_pointer_down(pos2(40.0, 40.0), PointerButton::Primary, &mut ctx);

        assert_eq!(palette.primary, Rgb([10, 20, 30]));
        assert_eq!(palette.secondary, Rgb([200, 100, 50]));
        assert_eq!(image, before);
    }
}
