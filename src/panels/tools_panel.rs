use egui::color_picker;
use image::Rgb;

use crate::PaintApp;
use crate::tools::{MAX_TOOL_WIDTH, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.canvas.active_tool();
            for kind in ToolKind::ALL {
                if ui.selectable_label(active == kind, kind.label()).clicked() {
                    log::info!("Tool selected from UI: {}", kind);
                    app.canvas.set_tool(kind);
                }
            }
            ui.separator();

            // Colors
            let mut palette = app.canvas.palette();
            ui.horizontal(|ui| {
                ui.label("Primary:");
                color_picker::color_edit_button_srgb(ui, &mut palette.primary.0);
            });
            ui.horizontal(|ui| {
                ui.label("Secondary:");
                color_picker::color_edit_button_srgb(ui, &mut palette.secondary.0);
            });
            if ui.button("⇄ Swap colors").clicked() {
                std::mem::swap(&mut palette.primary, &mut palette.secondary);
            }
            if palette != app.canvas.palette() {
                app.canvas.set_palette(palette);
            }

            // Width of the active tool, if it has one
            if let Some(mut width) = app.canvas.tool_width() {
                ui.horizontal(|ui| {
                    ui.label("Width:");
                    if ui
                        .add(egui::Slider::new(&mut width, 1..=MAX_TOOL_WIDTH))
                        .changed()
                    {
                        app.canvas.set_tool_width(width);
                    }
                });
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.canvas.can_undo();
                let can_redo = app.canvas.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.canvas.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.canvas.redo();
                }
            });

            let history = app.canvas.history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo: {}", history.undo_len()));
                ui.label(format!("Redo: {}", history.redo_len()));
            });

            if app.canvas.is_cropping() {
                ui.separator();
                ui.label("Drag a rectangle on the canvas to crop.");
                if ui.button("Cancel crop").clicked() {
                    app.canvas.cancel_crop();
                }
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                app.canvas.clear();
            }
            if ui.button("Reset colors").clicked() {
                app.canvas.set_palette(crate::tools::Palette {
                    primary: Rgb(app.canvas.config().primary),
                    secondary: Rgb(app.canvas.config().secondary),
                });
            }
        });
}
