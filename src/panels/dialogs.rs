use crate::PaintApp;
use crate::app::Dialog;

/// What the user chose in the dialog this frame
enum Outcome {
    Pending,
    Cancel,
    Confirm,
}

fn buttons(ui: &mut egui::Ui, confirm: &str) -> Outcome {
    let mut outcome = Outcome::Pending;
    ui.horizontal(|ui| {
        if ui.button(confirm).clicked() {
            outcome = Outcome::Confirm;
        }
        if ui.button("Cancel").clicked() {
            outcome = Outcome::Cancel;
        }
    });
    outcome
}

pub fn dialog_window(app: &mut PaintApp, ctx: &egui::Context) {
    let Some(mut dialog) = app.dialog.take() else {
        return;
    };

    let title = match &dialog {
        Dialog::ResizeImage { .. } => "Resize image",
        Dialog::CanvasSize { .. } => "Canvas size",
    };

    let mut outcome = Outcome::Pending;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let (Dialog::ResizeImage { width, height } | Dialog::CanvasSize { width, height }) =
                &mut dialog;
            egui::Grid::new("size_grid").num_columns(2).show(ui, |ui| {
                ui.label("Width:");
                ui.add(egui::DragValue::new(width).range(1..=20_000));
                ui.end_row();
                ui.label("Height:");
                ui.add(egui::DragValue::new(height).range(1..=20_000));
                ui.end_row();
            });
            outcome = buttons(ui, "Apply");
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = Outcome::Cancel;
    }

    match outcome {
        Outcome::Pending => app.dialog = Some(dialog),
        Outcome::Cancel => {}
        Outcome::Confirm => apply(app, dialog),
    }
}

fn apply(app: &mut PaintApp, dialog: Dialog) {
    let result = match dialog {
        Dialog::ResizeImage { width, height } => app.canvas.resize_image(width, height),
        Dialog::CanvasSize { width, height } => app.canvas.resize_canvas(width, height),
    };

    if let Err(err) = result {
        log::warn!("{err}");
        app.status = Some(err.to_string());
    }
}
