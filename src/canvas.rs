//! The editable bitmap and everything that mutates it.
//!
//! [`Canvas`] owns the image, routes pointer events to the active tool,
//! and records a full snapshot before every mutation so it can be undone.
//! In crop mode the pointer selects a rectangle instead of drawing.

use std::path::Path;

use egui::{PointerButton, Pos2};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};

use crate::config::PaintConfig;
use crate::error::{PaintError, Result};
use crate::history::History;
use crate::raster;
use crate::tools::{Palette, Tool, ToolBox, ToolContext, ToolKind, pixel_at};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 8.0;
const ZOOM_IN_STEP: f32 = 1.25;
const ZOOM_OUT_STEP: f32 = 0.8;

/// Pixel rectangle selected for cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Rectangle spanning the pixels under `a` and `b`, both corners included.
    ///
    /// Returns `None` when both points land on the same pixel.
    pub fn from_points(a: Pos2, b: Pos2) -> Option<Self> {
        let a = pixel_at(a);
        let b = pixel_at(b);
        if a == b {
            return None;
        }
        let (x0, y0, x1, y1) = raster::span(a, b);
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0 + 1) as u32,
            height: (y1 - y0 + 1) as u32,
        })
    }

    /// Intersect with an image of the given size
    fn clamped(self, width: u32, height: u32) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }
        Some(Self {
            width: self.width.min(width - self.x),
            height: self.height.min(height - self.y),
            ..self
        })
    }
}

/// Pointer positions recorded while in crop mode
#[derive(Debug, Clone, Copy, Default)]
struct CropState {
    active: bool,
    start: Option<Pos2>,
    current: Option<Pos2>,
}

pub struct Canvas {
    image: RgbImage,
    history: History,
    tools: ToolBox,
    palette: Palette,
    config: PaintConfig,
    crop: CropState,
    zoom: f32,
    modified: bool,
    /// Bumped on every change to the pixels
    revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(PaintConfig::default())
    }
}

impl Canvas {
    /// A blank sheet of the configured size with the pencil selected
    pub fn new(config: PaintConfig) -> Self {
        let width = config.canvas_width.max(1);
        let height = config.canvas_height.max(1);
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(config.background)),
            history: History::new(config.max_undo_steps),
            tools: ToolBox::new(&config),
            palette: Palette::from_config(&config),
            config,
            crop: CropState::default(),
            zoom: 1.0,
            modified: false,
            revision: 0,
        }
    }

    /// Start over with a blank sheet, default colors, widths and tool
    pub fn new_sheet(&mut self) {
        let revision = self.revision;
        *self = Self::new(self.config.clone());
        self.revision = revision + 1;
        log::info!(
            "New {}x{} sheet",
            self.image.width(),
            self.image.height()
        );
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn background(&self) -> Rgb<u8> {
        Rgb(self.config.background)
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Was the image changed since it was last loaded or saved?
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
    }

    fn snapshot(&mut self) {
        self.history.record(self.image.clone());
    }

    // ---- tools -------------------------------------------------------------

    pub fn active_tool(&self) -> ToolKind {
        self.tools.active_kind()
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        if kind != self.tools.active_kind() {
            log::info!("Tool changed: {} -> {}", self.tools.active_kind(), kind);
        }
        self.tools.select(kind);
    }

    /// Select a tool by its lookup name, e.g. `"bucket"`
    pub fn set_tool_by_name(&mut self, name: &str) -> Result<()> {
        let kind = name.parse::<ToolKind>()?;
        self.set_tool(kind);
        Ok(())
    }

    /// Set the color the active tool paints with.
    ///
    /// The eraser paints with the secondary color, every other tool with the primary.
    pub fn set_tool_color(&mut self, color: Rgb<u8>) {
        if self.tools.active_kind() == ToolKind::Eraser {
            self.palette.secondary = color;
        } else {
            self.palette.primary = color;
        }
    }

    pub fn tool_width(&self) -> Option<u32> {
        self.tools.active().width()
    }

    /// Set the active tool's width, clamped to the supported range
    pub fn set_tool_width(&mut self, width: u32) {
        self.tools.active_mut().set_width(width);
    }

    // ---- pointer input -----------------------------------------------------

    /// Pointer pressed at `pos` (canvas pixel coordinates)
    pub fn pointer_down(&mut self, pos: Pos2, button: PointerButton) {
        if self.crop.active {
            if button == PointerButton::Primary {
                self.crop.start = Some(pos);
                self.crop.current = Some(pos);
            }
            return;
        }

        let kind = self.tools.active_kind();
        if kind != ToolKind::ColorPicker && button == PointerButton::Primary {
            self.snapshot();
            self.modified = true;
        }

        let mut ctx = ToolContext {
            image: &mut self.image,
            palette: &mut self.palette,
        };
        self.tools.active_mut().on_pointer_down(pos, button, &mut ctx);
        self.mark_changed();
    }

    /// Pointer moved to `pos`
    pub fn pointer_move(&mut self, pos: Pos2) {
        if self.crop.active {
            if self.crop.start.is_some() {
                self.crop.current = Some(pos);
            }
            return;
        }

        if !self.tools.active().is_stroking() {
            return;
        }
        let mut ctx = ToolContext {
            image: &mut self.image,
            palette: &mut self.palette,
        };
        self.tools.active_mut().on_pointer_move(pos, &mut ctx);
        self.mark_changed();
    }

    /// Pointer released at `pos`. Finishes a stroke, or applies a crop in crop mode.
    pub fn pointer_up(&mut self, pos: Pos2, button: PointerButton) {
        if self.crop.active {
            if button != PointerButton::Primary {
                return;
            }
            let Some(start) = self.crop.start else {
                return;
            };
            self.crop = CropState::default();
            match CropRect::from_points(start, pos) {
                Some(rect) => {
                    self.crop(rect);
                }
                None => log::debug!("Ignoring empty crop selection"),
            }
            return;
        }

        let mut ctx = ToolContext {
            image: &mut self.image,
            palette: &mut self.palette,
        };
        self.tools.active_mut().on_pointer_up(pos, button, &mut ctx);
        self.mark_changed();
    }

    // ---- history -----------------------------------------------------------

    /// Restore the previous snapshot. Does nothing when there is none.
    pub fn undo(&mut self) -> bool {
        self.tools.active_mut().reset();
        let changed = self.history.undo(&mut self.image);
        if changed {
            self.modified = true;
            self.mark_changed();
        }
        changed
    }

    /// Re-apply the last undone snapshot. Does nothing when there is none.
    pub fn redo(&mut self) -> bool {
        self.tools.active_mut().reset();
        let changed = self.history.redo(&mut self.image);
        if changed {
            self.modified = true;
            self.mark_changed();
        }
        changed
    }

    // ---- whole-image edits -------------------------------------------------

    /// Fill the whole canvas with the background color
    pub fn clear(&mut self) {
        self.tools.active_mut().reset();
        self.snapshot();
        let background = self.background();
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
        self.modified = true;
        self.mark_changed();
    }

    /// Enter crop mode: the next primary drag selects the area to keep
    pub fn begin_crop(&mut self) {
        self.tools.active_mut().reset();
        self.crop = CropState {
            active: true,
            ..CropState::default()
        };
    }

    pub fn cancel_crop(&mut self) {
        self.crop = CropState::default();
    }

    pub fn is_cropping(&self) -> bool {
        self.crop.active
    }

    /// The rectangle currently being dragged out in crop mode
    pub fn crop_selection(&self) -> Option<CropRect> {
        if !self.crop.active {
            return None;
        }
        CropRect::from_points(self.crop.start?, self.crop.current?)
    }

    /// Keep only the pixels under `rect`. Returns false if `rect` misses the image.
    pub fn crop(&mut self, rect: CropRect) -> bool {
        self.tools.active_mut().reset();
        self.crop = CropState::default();
        let (width, height) = self.size();
        let Some(rect) = rect.clamped(width, height) else {
            log::warn!("Crop rectangle {:?} lies outside the {}x{} image", rect, width, height);
            return false;
        };

        self.snapshot();
        self.image = imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height).to_image();
        self.modified = true;
        self.mark_changed();
        log::info!("Cropped to {}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y);
        true
    }

    /// Scale the image to a new size
    pub fn resize_image(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidSize { width, height });
        }
        self.tools.active_mut().reset();
        self.snapshot();
        self.image = imageops::resize(&self.image, width, height, FilterType::Nearest);
        self.modified = true;
        self.mark_changed();
        Ok(())
    }

    /// Change the canvas size, keeping the content anchored at the top-left
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidSize { width, height });
        }
        self.tools.active_mut().reset();
        self.snapshot();
        let mut resized = RgbImage::from_pixel(width, height, self.background());
        imageops::replace(&mut resized, &self.image, 0, 0);
        self.image = resized;
        self.modified = true;
        self.mark_changed();
        Ok(())
    }

    // ---- view --------------------------------------------------------------

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    // ---- files -------------------------------------------------------------

    /// Replace the canvas with an image file. The previous image stays on the undo stack.
    pub fn open_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .map_err(|_| PaintError::UnsupportedFormat(path.to_path_buf()))?;
        if !format.reading_enabled() {
            return Err(PaintError::UnsupportedFormat(path.to_path_buf()));
        }

        let decoded = image::open(path)?;
        let loaded = raster::flatten_onto(&decoded, self.background());

        self.tools.active_mut().reset();
        self.crop = CropState::default();
        self.snapshot();
        self.image = loaded;
        self.modified = false;
        self.mark_changed();
        log::info!(
            "Opened {} ({}x{})",
            path.display(),
            self.image.width(),
            self.image.height()
        );
        Ok(())
    }

    /// Write the canvas to a file, format chosen by extension
    pub fn save_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .map_err(|_| PaintError::UnsupportedFormat(path.to_path_buf()))?;
        if !format.writing_enabled() {
            return Err(PaintError::UnsupportedFormat(path.to_path_buf()));
        }

        self.image.save_with_format(path, format)?;
        self.modified = false;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn small_canvas() -> Canvas {
        Canvas::new(PaintConfig {
            canvas_width: 40,
            canvas_height: 30,
            ..PaintConfig::default()
        })
    }

    #[test]
    fn test_crop_rect_includes_both_corners() {
        let rect = CropRect::from_points(pos2(9.0, 3.0), pos2(2.0, 7.0)).unwrap();
        assert_eq!(
            rect,
            CropRect {
                x: 2,
                y: 3,
                width: 8,
                height: 5
            }
        );
        assert!(CropRect::from_points(pos2(4.2, 4.2), pos2(4.8, 4.9)).is_none());
    }

    #[test]
    fn test_crop_rect_clamps_to_image() {
        let rect = CropRect::from_points(pos2(-5.0, -5.0), pos2(100.0, 10.0)).unwrap();
        assert_eq!((rect.x, rect.y), (0, 0));
        let clamped = rect.clamped(40, 30).unwrap();
        assert_eq!((clamped.width, clamped.height), (40, 11));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut canvas = small_canvas();
        for _ in 0..50 {
            canvas.zoom_in();
        }
        assert_eq!(canvas.zoom(), MAX_ZOOM);
        for _ in 0..100 {
            canvas.zoom_out();
        }
        assert_eq!(canvas.zoom(), MIN_ZOOM);
        canvas.reset_zoom();
        assert_eq!(canvas.zoom(), 1.0);
    }

    #[test]
    fn test_moves_in_crop_mode_do_not_draw() {
        let mut canvas = small_canvas();
        let blank = canvas.image().clone();
        canvas.begin_crop();

        canvas.pointer_move(pos2(5.0, 5.0));
        canvas.pointer_down(pos2(5.0, 5.0), PointerButton::Primary);
        canvas.pointer_move(pos2(10.0, 10.0));

        assert_eq!(canvas.image(), &blank);
        assert!(!canvas.can_undo());
        assert_eq!(canvas.crop_selection().map(|r| (r.width, r.height)), Some((6, 6)));
    }

    #[test]
    fn test_revision_tracks_pixel_changes() {
        let mut canvas = small_canvas();
        let start = canvas.revision();
        canvas.pointer_move(pos2(1.0, 1.0));
        assert_eq!(canvas.revision(), start);

        canvas.clear();
        assert!(canvas.revision() > start);
    }

    #[test]
    fn test_tool_color_goes_to_eraser_slot() {
        let mut canvas = small_canvas();
        canvas.set_tool_color(Rgb([1, 2, 3]));
        assert_eq!(canvas.palette().primary, Rgb([1, 2, 3]));

        canvas.set_tool(ToolKind::Eraser);
        canvas.set_tool_color(Rgb([4, 5, 6]));
        assert_eq!(canvas.palette().secondary, Rgb([4, 5, 6]));
        assert_eq!(canvas.palette().primary, Rgb([1, 2, 3]));
    }

    #[test]
    fn test_invalid_sizes_are_rejected() {
        let mut canvas = small_canvas();
        assert!(matches!(
            canvas.resize_image(0, 10),
            Err(PaintError::InvalidSize { width: 0, height: 10 })
        ));
        assert!(canvas.resize_canvas(10, 0).is_err());
        assert!(!canvas.can_undo());
    }
}
