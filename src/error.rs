use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while editing, loading or saving a canvas
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for canvas operations
pub type Result<T> = std::result::Result<T, PaintError>;
