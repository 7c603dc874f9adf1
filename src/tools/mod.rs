use std::fmt;
use std::str::FromStr;

use egui::{PointerButton, Pos2};
use image::{Rgb, RgbImage};

use crate::config::PaintConfig;
use crate::error::PaintError;

mod bucket;
mod color_picker;
mod freehand;
mod shape;

pub use bucket::BucketTool;
pub use color_picker::ColorPickerTool;
pub use freehand::{FreehandTool, InkSlot};
pub use shape::{Shape, ShapeTool};

/// Widest stroke the width controls accept
pub const MAX_TOOL_WIDTH: u32 = 50;

/// Colors shared by every tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb<u8>,
    pub secondary: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb([0, 0, 0]),
            secondary: Rgb([255, 255, 255]),
        }
    }
}

impl Palette {
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            primary: Rgb(config.primary),
            secondary: Rgb(config.secondary),
        }
    }
}

/// Everything a tool may read or mutate while handling a pointer event
pub struct ToolContext<'a> {
    pub image: &'a mut RgbImage,
    pub palette: &'a mut Palette,
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>);

    /// Handle pointer movement, whether or not a button is held
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>);

    /// Handle pointer release on the canvas
    fn on_pointer_up(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>);

    /// Stroke width, `None` for tools without one
    fn width(&self) -> Option<u32> {
        None
    }

    fn set_width(&mut self, _width: u32) {}

    /// True while a press has started a stroke that has not been released
    fn is_stroking(&self) -> bool {
        false
    }

    /// Forget any in-progress stroke without touching the image
    fn reset(&mut self) {}
}

/// The fixed set of tools, selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pencil,
    Eraser,
    ColorPicker,
    Brush,
    Line,
    Bucket,
    Ellipse,
    Rect,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Pencil,
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Ellipse,
        ToolKind::Triangle,
        ToolKind::Bucket,
        ToolKind::ColorPicker,
    ];

    /// Lookup name, as accepted by [`ToolKind::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
            ToolKind::ColorPicker => "colorpicker",
            ToolKind::Brush => "brush",
            ToolKind::Line => "line",
            ToolKind::Bucket => "bucket",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Rect => "rect",
            ToolKind::Triangle => "triangle",
        }
    }

    /// Human readable label for the tool panel
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "✏ Pencil",
            ToolKind::Eraser => "⌫ Eraser",
            ToolKind::ColorPicker => "💧 Color picker",
            ToolKind::Brush => "🖌 Brush",
            ToolKind::Line => "╱ Line",
            ToolKind::Bucket => "🪣 Bucket",
            ToolKind::Ellipse => "⭕ Ellipse",
            ToolKind::Rect => "◻ Rectangle",
            ToolKind::Triangle => "△ Triangle",
        }
    }

    fn index(self) -> usize {
        match self {
            ToolKind::Pencil => 0,
            ToolKind::Eraser => 1,
            ToolKind::ColorPicker => 2,
            ToolKind::Brush => 3,
            ToolKind::Line => 4,
            ToolKind::Bucket => 5,
            ToolKind::Ellipse => 6,
            ToolKind::Rect => 7,
            ToolKind::Triangle => 8,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = PaintError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| PaintError::UnknownTool(name.to_owned()))
    }
}

/// Enum representing all available tool types.
/// This avoids `Box<dyn Tool>` while keeping a single dispatch point.
#[derive(Debug, Clone)]
pub enum ToolType {
    Pencil(FreehandTool),
    Eraser(FreehandTool),
    Brush(FreehandTool),
    ColorPicker(ColorPickerTool),
    Bucket(BucketTool),
    Line(ShapeTool),
    Ellipse(ShapeTool),
    Rect(ShapeTool),
    Triangle(ShapeTool),
}

impl ToolType {
    /// Build a fresh tool of the given kind with widths from the config
    pub fn new(kind: ToolKind, config: &PaintConfig) -> Self {
        match kind {
            ToolKind::Pencil => Self::Pencil(FreehandTool::pencil(config.pencil_width)),
            ToolKind::Eraser => Self::Eraser(FreehandTool::eraser(config.eraser_width)),
            ToolKind::Brush => Self::Brush(FreehandTool::brush(config.stroke_width)),
            ToolKind::ColorPicker => Self::ColorPicker(ColorPickerTool::new()),
            ToolKind::Bucket => Self::Bucket(BucketTool::new()),
            ToolKind::Line => Self::Line(ShapeTool::new(Shape::Line, config.stroke_width)),
            ToolKind::Ellipse => Self::Ellipse(ShapeTool::new(Shape::Ellipse, config.stroke_width)),
            ToolKind::Rect => Self::Rect(ShapeTool::new(Shape::Rect, config.stroke_width)),
            ToolKind::Triangle => {
                Self::Triangle(ShapeTool::new(Shape::Triangle, config.stroke_width))
            }
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Pencil(_) => ToolKind::Pencil,
            Self::Eraser(_) => ToolKind::Eraser,
            Self::Brush(_) => ToolKind::Brush,
            Self::ColorPicker(_) => ToolKind::ColorPicker,
            Self::Bucket(_) => ToolKind::Bucket,
            Self::Line(_) => ToolKind::Line,
            Self::Ellipse(_) => ToolKind::Ellipse,
            Self::Rect(_) => ToolKind::Rect,
            Self::Triangle(_) => ToolKind::Triangle,
        }
    }

    fn as_tool(&self) -> &dyn Tool {
        match self {
            Self::Pencil(tool) | Self::Eraser(tool) | Self::Brush(tool) => tool,
            Self::ColorPicker(tool) => tool,
            Self::Bucket(tool) => tool,
            Self::Line(tool) | Self::Ellipse(tool) | Self::Rect(tool) | Self::Triangle(tool) => tool,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::Pencil(tool) | Self::Eraser(tool) | Self::Brush(tool) => tool,
            Self::ColorPicker(tool) => tool,
            Self::Bucket(tool) => tool,
            Self::Line(tool) | Self::Ellipse(tool) | Self::Rect(tool) | Self::Triangle(tool) => tool,
        }
    }
}

impl Tool for ToolType {
    fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        self.as_tool_mut().on_pointer_down(pos, button, ctx);
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.as_tool_mut().on_pointer_move(pos, ctx);
    }

    fn on_pointer_up(&mut self, pos: Pos2, button: PointerButton, ctx: &mut ToolContext<'_>) {
        self.as_tool_mut().on_pointer_up(pos, button, ctx);
    }

    fn width(&self) -> Option<u32> {
        self.as_tool().width()
    }

    fn set_width(&mut self, width: u32) {
        self.as_tool_mut().set_width(width);
    }

    fn is_stroking(&self) -> bool {
        self.as_tool().is_stroking()
    }

    fn reset(&mut self) {
        self.as_tool_mut().reset();
    }
}

/// One instance of every tool, so per-tool widths survive switching tools
#[derive(Debug, Clone)]
pub struct ToolBox {
    tools: Vec<ToolType>,
    active: ToolKind,
}

impl ToolBox {
    pub fn new(config: &PaintConfig) -> Self {
        let mut tools: Vec<ToolType> = ToolKind::ALL
            .into_iter()
            .map(|kind| ToolType::new(kind, config))
            .collect();
        tools.sort_by_key(|tool| tool.kind().index());

        Self {
            tools,
            active: ToolKind::Pencil,
        }
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    pub fn active(&self) -> &ToolType {
        &self.tools[self.active.index()]
    }

    pub fn active_mut(&mut self) -> &mut ToolType {
        &mut self.tools[self.active.index()]
    }

    #[cfg(test)]
    fn get(&self, kind: ToolKind) -> &ToolType {
        &self.tools[kind.index()]
    }

    /// Switch tools, abandoning any stroke the previous tool had in progress
    pub fn select(&mut self, kind: ToolKind) {
        if kind != self.active {
            self.active_mut().reset();
            self.active = kind;
        }
    }
}

/// Map a canvas-space position to the pixel under it
#[inline]
pub(crate) fn pixel_at(pos: Pos2) -> (i32, i32) {
    (pos.x.floor() as i32, pos.y.floor() as i32)
}
