// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Input controller: pointer events to annotation-state mutations.
//!
//! Two independent interactions share the canvas. Clicks mark scale
//! calibration points until the pair is full; press/move/release drags
//! sweep out the ROI rectangle. The drag logic is an explicit
//! `Idle -> Dragging -> Idle` state machine over plain event values so
//! it can be driven by tests without simulating real pointer input.

use crate::models::annotation::{AnnotationState, Point, Roi};

/// A pointer event already translated into image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A completed click (press + release without meaningful movement).
    Click(Point),
    /// Primary button pressed.
    Press(Point),
    /// Pointer moved to a new position.
    Move(Point),
    /// Primary button released.
    Release,
    /// Pointer left the canvas.
    Leave,
}

/// ROI drag machine: either idle, or dragging from a recorded anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum RoiDrag {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
}

/// Translates pointer events into mutations of [`AnnotationState`].
#[derive(Debug, Default)]
pub struct InputController {
    drag: RoiDrag,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event. Returns true when the annotation state
    /// changed and the canvas should redraw.
    pub fn handle(&mut self, event: PointerEvent, state: &mut AnnotationState) -> bool {
        match event {
            PointerEvent::Click(p) => {
                if state.scale_points().len() < 2 {
                    state.add_scale_point(p);
                    log::info!(
                        "Marked scale point {} at ({:.1}, {:.1})",
                        state.scale_points().len(),
                        p.x,
                        p.y
                    );
                    true
                } else {
                    false
                }
            }
            PointerEvent::Press(p) => {
                self.drag = RoiDrag::Dragging { anchor: p };
                false
            }
            PointerEvent::Move(p) => match self.drag {
                RoiDrag::Dragging { anchor } => {
                    state.set_roi(Some(Roi::from_corners(anchor, p)));
                    true
                }
                RoiDrag::Idle => false,
            },
            // Release and leave both end the drag; the last computed
            // rectangle stays in place.
            PointerEvent::Release | PointerEvent::Leave => {
                self.drag = RoiDrag::Idle;
                false
            }
        }
    }

    /// Reset action: clears the annotation state and abandons any
    /// in-progress drag.
    pub fn reset(&mut self, state: &mut AnnotationState) {
        self.drag = RoiDrag::Idle;
        state.reset();
        log::info!("Annotation state reset");
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, RoiDrag::Dragging { .. })
    }
}
