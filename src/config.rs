use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "SIMPLE_PAINT_CONFIG";

/// Startup settings for the canvas and its tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct PaintConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: [u8; 3],
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub pencil_width: u32,
    pub eraser_width: u32,
    /// Width of the brush, line and shape tools
    pub stroke_width: u32,
    pub max_undo_steps: usize,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1240,
            canvas_height: 680,
            background: [255, 255, 255],
            primary: [0, 0, 0],
            secondary: [255, 255, 255],
            pencil_width: 2,
            eraser_width: 6,
            stroke_width: 2,
            max_undo_steps: 50,
        }
    }
}

impl PaintConfig {
    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a config file from disk
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load the file named by `SIMPLE_PAINT_CONFIG`, or the defaults.
    ///
    /// A broken config file is logged and ignored so the app still starts.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!(
                    "Ignoring config {}: {}",
                    Path::new(&path).display(),
                    err
                );
                Self::default()
            }
        }
    }
}
