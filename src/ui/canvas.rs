// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the reference frame and annotation overlay.
//!
//! The frame is shown at its native pixel size inside a scroll area,
//! so pointer positions map to image coordinates by subtracting the
//! canvas origin with no scaling. Raw egui interactions are translated
//! into [`PointerEvent`]s for the input controller; painting goes
//! through the egui-backed [`DrawSurface`] implementation.

use crate::controller::PointerEvent;
use crate::models::annotation::{AnnotationState, Point, Roi};
use crate::render::{self, DrawSurface};

/// Display the canvas and collect this frame's pointer events.
pub fn show(
    ui: &mut egui::Ui,
    frame_texture: Option<&egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
    state: &AnnotationState,
    loading_message: Option<&str>,
    load_error: Option<&str>,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let (Some(texture), Some((width, height))) = (frame_texture, frame_size) {
            egui::ScrollArea::both().show(ui, |ui| {
                let size = egui::vec2(width as f32, height as f32);
                let (rect, response) =
                    ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                events = collect_events(ui, &response, rect);

                let mut surface = EguiSurface {
                    painter: ui.painter(),
                    rect,
                    texture: texture.id(),
                };
                render::render(&mut surface, state);
            });
        } else if let Some(error) = load_error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(error)
                        .color(egui::Color32::LIGHT_RED),
                );
            });
        } else {
            let message = loading_message.unwrap_or("Loading reference frame...");
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.spinner();
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(message)
                            .size(16.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                });
            });
        }
    });

    events
}

/// Map this frame's interactions on the canvas rect to pointer events
/// in image coordinates.
fn collect_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
) -> Vec<PointerEvent> {
    let to_image =
        |pos: egui::Pos2| Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y));
    let mut events = Vec::new();

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Click(to_image(pos)));
        }
    }

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Press(to_image(pos)));
        }
    } else if response.dragged() {
        if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            if rect.contains(pos) {
                events.push(PointerEvent::Move(to_image(pos)));
            } else {
                // Dragging off the canvas ends the gesture, same as
                // the pointer leaving the surface.
                events.push(PointerEvent::Leave);
            }
        }
    }

    if response.drag_stopped() {
        events.push(PointerEvent::Release);
    }

    events
}

/// [`DrawSurface`] backed by an egui painter over the canvas rect.
struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    texture: egui::TextureId,
}

impl EguiSurface<'_> {
    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x as f32, p.y as f32)
    }

    fn stroke(width: f32, (r, g, b): (u8, u8, u8)) -> egui::Stroke {
        egui::Stroke::new(width, egui::Color32::from_rgb(r, g, b))
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.rect, 0.0, egui::Color32::from_gray(40));
    }

    fn draw_image(&mut self) {
        self.painter.image(
            self.texture,
            self.rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    fn draw_circle(&mut self, center: Point, radius: f32, (r, g, b): (u8, u8, u8)) {
        self.painter
            .circle_filled(self.to_screen(center), radius, egui::Color32::from_rgb(r, g, b));
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: (u8, u8, u8)) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], Self::stroke(width, color));
    }

    fn draw_rect(&mut self, rect: Roi, width: f32, color: (u8, u8, u8)) {
        let outline = egui::Rect::from_min_size(
            self.to_screen(Point::new(rect.x, rect.y)),
            egui::vec2(rect.w as f32, rect.h as f32),
        );
        self.painter
            .rect_stroke(outline, 0.0, Self::stroke(width, color));
    }
}
