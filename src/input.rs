use egui::{Context, PointerButton, Pos2, Rect};

use crate::canvas::Canvas;

/// Pointer input already mapped into canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed over the canvas
    PointerDown { pos: Pos2, button: PointerButton },
    /// Mouse moved
    PointerMove { pos: Pos2 },
    /// Mouse button was released (anywhere, if the press started on the canvas)
    PointerUp { pos: Pos2, button: PointerButton },
}

impl InputEvent {
    /// Deliver this event to the canvas
    pub fn apply(self, canvas: &mut Canvas) {
        match self {
            InputEvent::PointerDown { pos, button } => canvas.pointer_down(pos, button),
            InputEvent::PointerMove { pos } => canvas.pointer_move(pos),
            InputEvent::PointerUp { pos, button } => canvas.pointer_up(pos, button),
        }
    }
}

/// Map a screen position into canvas pixel space
pub fn screen_to_canvas(screen: Pos2, canvas_origin: Pos2, zoom: f32) -> Pos2 {
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };
    ((screen - canvas_origin) / zoom).to_pos2()
}

/// Map a canvas pixel position back to the screen
pub fn canvas_to_screen(pos: Pos2, canvas_origin: Pos2, zoom: f32) -> Pos2 {
    canvas_origin + pos.to_vec2() * zoom
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Buttons whose press landed on the canvas and have not been released yet
    held: Vec<PointerButton>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        !self.held.is_empty()
    }

    /// Collect this frame's pointer events.
    ///
    /// `canvas_rect` is where the image is painted on screen; presses are
    /// only accepted inside it and only when `accept_press` is set (the
    /// canvas is not covered by a popup).
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        zoom: f32,
        accept_press: bool,
    ) -> Vec<InputEvent> {
        let raw: Vec<egui::Event> = ctx.input(|input| input.events.clone());
        self.translate(&raw, canvas_rect, zoom, accept_press)
    }

    /// Turn raw egui events into canvas events
    pub fn translate(
        &mut self,
        raw: &[egui::Event],
        canvas_rect: Rect,
        zoom: f32,
        accept_press: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_canvas = |pos: Pos2| screen_to_canvas(pos, canvas_rect.min, zoom);

        for event in raw {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if self.is_dragging() || canvas_rect.contains(*pos) {
                        events.push(InputEvent::PointerMove { pos: to_canvas(*pos) });
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } => {
                    if !is_canvas_button(*button) || !accept_press || !canvas_rect.contains(*pos) {
                        continue;
                    }
                    if !self.held.contains(button) {
                        self.held.push(*button);
                    }
                    events.push(InputEvent::PointerDown {
                        pos: to_canvas(*pos),
                        button: *button,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: false,
                    ..
                } => {
                    if let Some(index) = self.held.iter().position(|held| held == button) {
                        self.held.remove(index);
                        events.push(InputEvent::PointerUp {
                            pos: to_canvas(*pos),
                            button: *button,
                        });
                    }
                }
                _ => {}
            }
        }

        events
    }
}

fn is_canvas_button(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary | PointerButton::Secondary)
}
