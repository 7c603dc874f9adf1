use egui::{Color32, Rect, Sense, Stroke, pos2, vec2};

use crate::PaintApp;
use crate::input::canvas_to_screen;

const CROP_OUTLINE: Color32 = Color32::from_rgb(0, 120, 215);

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::from_gray(60)))
        .show(ctx, |ui| {
            egui::ScrollArea::both()
                .drag_to_scroll(false)
                .show(ui, |ui| {
                    let zoom = app.canvas.zoom();
                    let (width, height) = app.canvas.size();
                    let size = vec2(width as f32, height as f32) * zoom;

                    let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

                    // Render the canvas
                    let texture_id = app.texture.texture_id(ctx, &app.canvas);
                    ui.painter().image(
                        texture_id,
                        rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );

                    if let Some(selection) = app.canvas.crop_selection() {
                        let min = canvas_to_screen(
                            pos2(selection.x as f32, selection.y as f32),
                            rect.min,
                            zoom,
                        );
                        let max = canvas_to_screen(
                            pos2(
                                (selection.x + selection.width) as f32,
                                (selection.y + selection.height) as f32,
                            ),
                            rect.min,
                            zoom,
                        );
                        ui.painter().rect_stroke(
                            Rect::from_min_max(min, max),
                            0.0,
                            Stroke::new(1.0, CROP_OUTLINE),
                        );
                    }

                    if app.canvas.is_cropping() && response.hovered() {
                        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                    }

                    // Handle input
                    let accept_press = app.dialog.is_none() && response.hovered();
                    let events = app.input.process_input(ctx, rect, zoom, accept_press);
                    if !events.is_empty() {
                        for event in events {
                            event.apply(&mut app.canvas);
                        }
                        ctx.request_repaint();
                    }
                });
        });
}
