use crate::PaintApp;

pub fn menu_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    app.new_sheet();
                    ui.close_menu();
                }
                if ui.button("Open…").clicked() {
                    app.prompt_open();
                    ui.close_menu();
                }
                if ui.button("Save").clicked() {
                    app.save_file();
                    ui.close_menu();
                }
                if ui.button("Save as…").clicked() {
                    app.prompt_save_as();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(app.canvas.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    app.canvas.undo();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(app.canvas.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    app.canvas.redo();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Crop").clicked() {
                    app.canvas.begin_crop();
                    ui.close_menu();
                }
                if ui.button("Resize image…").clicked() {
                    app.prompt_resize_image();
                    ui.close_menu();
                }
                if ui.button("Canvas size…").clicked() {
                    app.prompt_canvas_size();
                    ui.close_menu();
                }
                if ui.button("Clear").clicked() {
                    app.canvas.clear();
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Zoom in").clicked() {
                    app.canvas.zoom_in();
                }
                if ui.button("Zoom out").clicked() {
                    app.canvas.zoom_out();
                }
                if ui.button("Actual size").clicked() {
                    app.canvas.reset_zoom();
                    ui.close_menu();
                }
            });
        });
    });
}

pub fn status_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let (width, height) = app.canvas.size();
            ui.label(format!("{width} × {height}"));
            ui.separator();
            ui.label(format!("{:.0}%", app.canvas.zoom() * 100.0));
            ui.separator();
            ui.label(app.canvas.active_tool().name());
            if app.canvas.is_modified() {
                ui.separator();
                ui.label("modified");
            }
            if let Some(status) = &app.status {
                ui.separator();
                ui.label(status);
            }
        });
    });
}
