#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod file_dialog;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, CropRect};
pub use config::PaintConfig;
pub use error::{PaintError, Result};
pub use history::History;
pub use input::{InputEvent, InputHandler};
pub use tools::{Palette, Tool, ToolKind, ToolType};
