// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas rendering of the annotation overlay.
//!
//! [`render`] is a pure function of the current [`AnnotationState`]: it
//! clears the surface, redraws the reference frame, then paints the
//! scale markers, their connecting line, and the ROI outline. Drawing
//! goes through the [`DrawSurface`] capability trait so the logic can
//! be exercised without a real graphical surface; the egui-backed
//! implementation lives in `ui::canvas`.

use crate::models::annotation::{AnnotationState, Point, Roi};

/// Stroke and marker styling shared by every surface implementation.
pub const SCALE_MARKER_RADIUS: f32 = 4.0;
pub const OVERLAY_STROKE_WIDTH: f32 = 2.0;

/// Overlay colors, RGB. Red scale markers, deep-sky-blue ROI outline.
pub const SCALE_COLOR: (u8, u8, u8) = (255, 0, 0);
pub const ROI_COLOR: (u8, u8, u8) = (0, 191, 255);

/// Minimal drawing capability the renderer needs from a canvas.
pub trait DrawSurface {
    /// Clear the whole surface.
    fn clear(&mut self);
    /// Draw the reference frame at native size, top-left at the origin.
    fn draw_image(&mut self);
    /// Filled circle of `radius` px centered on `center`.
    fn draw_circle(&mut self, center: Point, radius: f32, color: (u8, u8, u8));
    /// Straight line segment between two points.
    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: (u8, u8, u8));
    /// Unfilled rectangle outline.
    fn draw_rect(&mut self, rect: Roi, width: f32, color: (u8, u8, u8));
}

/// Redraw the full scene for the given state. Safe in every state,
/// including a completely empty one.
pub fn render(surface: &mut impl DrawSurface, state: &AnnotationState) {
    surface.clear();
    surface.draw_image();

    for &p in state.scale_points() {
        surface.draw_circle(p, SCALE_MARKER_RADIUS, SCALE_COLOR);
    }
    if let [p1, p2] = state.scale_points() {
        surface.draw_line(*p1, *p2, OVERLAY_STROKE_WIDTH, SCALE_COLOR);
    }

    if let Some(roi) = state.roi() {
        surface.draw_rect(roi, OVERLAY_STROKE_WIDTH, ROI_COLOR);
    }
}
