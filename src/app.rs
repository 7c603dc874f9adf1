use std::path::{Path, PathBuf};

use egui::{Key, KeyboardShortcut, Modifiers};
use image::Rgb;

use crate::canvas::Canvas;
use crate::config::PaintConfig;
use crate::file_dialog;
use crate::input::InputHandler;
use crate::panels;
use crate::texture_manager::CanvasTexture;
use crate::tools::Palette;

/// Settings restored when restarting the app.
/// We derive Deserialize/Serialize so eframe can persist them on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
}

impl Default for Preferences {
    fn default() -> Self {
        let palette = Palette::default();
        Self::from_palette(palette)
    }
}

impl Preferences {
    pub fn from_palette(palette: Palette) -> Self {
        Self {
            primary: palette.primary.0,
            secondary: palette.secondary.0,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            primary: Rgb(self.primary),
            secondary: Rgb(self.secondary),
        }
    }
}

/// Modal prompts shown over the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ResizeImage { width: u32, height: u32 },
    CanvasSize { width: u32, height: u32 },
}

pub struct PaintApp {
    pub(crate) canvas: Canvas,
    pub(crate) input: InputHandler,
    pub(crate) texture: CanvasTexture,
    pub(crate) dialog: Option<Dialog>,
    /// Last file opened or saved
    pub(crate) current_path: Option<PathBuf>,
    /// One-line message for the status bar
    pub(crate) status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(PaintConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: PaintConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let mut app = Self::with_config(config);

        if let Some(storage) = cc.storage {
            if let Some(preferences) = eframe::get_value::<Preferences>(storage, eframe::APP_KEY) {
                app.canvas.set_palette(preferences.palette());
            }
        }

        if let Some(path) = initial_file {
            app.open(&path);
        }

        app
    }

    pub fn with_config(config: PaintConfig) -> Self {
        Self {
            canvas: Canvas::new(config),
            input: InputHandler::new(),
            texture: CanvasTexture::new(),
            dialog: None,
            current_path: None,
            status: None,
        }
    }

    pub fn new_sheet(&mut self) {
        self.canvas.new_sheet();
        self.current_path = None;
        self.status = Some("New sheet".to_owned());
    }

    pub fn open(&mut self, path: &Path) {
        match self.canvas.open_image(path) {
            Ok(()) => {
                self.current_path = Some(path.to_path_buf());
                self.status = Some(format!("Opened {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to open {}: {}", path.display(), err);
                self.status = Some(format!("Could not open {}: {}", path.display(), err));
            }
        }
    }

    pub fn save_as(&mut self, path: &Path) {
        match self.canvas.save_image(path) {
            Ok(()) => {
                self.current_path = Some(path.to_path_buf());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to save {}: {}", path.display(), err);
                self.status = Some(format!("Could not save {}: {}", path.display(), err));
            }
        }
    }

    /// Save to the current file, or ask for a path
    pub fn save_file(&mut self) {
        match self.current_path.clone() {
            Some(path) => self.save_as(&path),
            None => self.prompt_save_as(),
        }
    }

    /// Pick an image with the native file dialog and open it
    pub fn prompt_open(&mut self) {
        if let Some(path) = file_dialog::pick_open_path(self.current_path.as_deref()) {
            self.open(&path);
        }
    }

    /// Pick a destination with the native file dialog and save there
    pub fn prompt_save_as(&mut self) {
        if let Some(path) = file_dialog::pick_save_path(self.current_path.as_deref()) {
            self.save_as(&path);
        }
    }

    pub fn prompt_resize_image(&mut self) {
        let (width, height) = self.canvas.size();
        self.dialog = Some(Dialog::ResizeImage { width, height });
    }

    pub fn prompt_canvas_size(&mut self) {
        let (width, height) = self.canvas.size();
        self.dialog = Some(Dialog::CanvasSize { width, height });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let redo_shift = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let save = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
        let open = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
        let new = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
        let zoom_in = KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus);
        let zoom_out = KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus);

        // Order matters: the shifted shortcut must be consumed before plain Cmd+Z
        if ctx.input_mut(|i| i.consume_shortcut(&redo_shift) || i.consume_shortcut(&redo)) {
            self.canvas.redo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&undo)) {
            self.canvas.undo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save)) {
            self.save_file();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&open)) {
            self.prompt_open();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&new)) {
            self.new_sheet();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&zoom_in)) {
            self.canvas.zoom_in();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&zoom_out)) {
            self.canvas.zoom_out();
        }
        if self.canvas.is_cropping() && ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.canvas.cancel_crop();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(
            storage,
            eframe::APP_KEY,
            &Preferences::from_palette(self.canvas.palette()),
        );
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.dialog.is_none() {
            self.handle_shortcuts(ctx);
        }

        panels::menu_bar(self, ctx);
        panels::status_bar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::dialog_window(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_round_trip_palette() {
        let palette = Palette {
            primary: Rgb([1, 2, 3]),
            secondary: Rgb([4, 5, 6]),
        };
        assert_eq!(Preferences::from_palette(palette).palette(), palette);
    }

    #[test]
    fn test_preferences_deserialize_with_missing_fields() {
        let preferences: Preferences = serde_json::from_str(r#"{ "primary": [9, 9, 9] }"#).unwrap();
        assert_eq!(preferences.primary, [9, 9, 9]);
        assert_eq!(preferences.secondary, [255, 255, 255]);
    }

    #[test]
    fn test_failed_open_reports_status() {
        let mut app = PaintApp::default();
        app.open(Path::new("does-not-exist.png"));
        assert!(app.current_path.is_none());
        assert!(app.status.as_deref().unwrap_or_default().starts_with("Could not open"));
    }

    #[test]
    fn test_save_remembers_path_for_next_save() {
        let path = std::env::temp_dir().join(format!("simple_paint_app_{}.png", std::process::id()));
        let mut app = PaintApp::with_config(PaintConfig {
            canvas_width: 8,
            canvas_height: 8,
            ..PaintConfig::default()
        });

        app.save_as(&path);
        assert_eq!(app.current_path.as_deref(), Some(path.as_path()));

        app.canvas.clear();
        assert!(app.canvas.is_modified());
        app.save_file();
        assert!(!app.canvas.is_modified());
        assert!(app.dialog.is_none());

        let _ = std::fs::remove_file(&path);
    }
}
