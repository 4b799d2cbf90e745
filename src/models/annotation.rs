// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the session's annotation state: the two-point
//! scale calibration pair and the region-of-interest rectangle, both
//! expressed in the reference frame's native pixel coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Region of interest, normalized so `(x, y)` is the top-left corner
/// and `w`, `h` are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Roi {
    /// Build the axis-aligned rectangle spanning two arbitrary corners,
    /// regardless of which direction the drag went.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }
}

/// Aggregate annotation state for one session: the scale pair plus the
/// optional ROI. Single source of truth for the renderer and validator.
///
/// Created empty once the reference frame has loaded, mutated by the
/// input controller, cleared by the Reset action. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationState {
    scale_points: Vec<Point>,
    roi: Option<Roi>,
}

impl AnnotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scale calibration point. No-op once two points exist;
    /// the pair only reopens via [`reset`](Self::reset).
    pub fn add_scale_point(&mut self, p: Point) {
        if self.scale_points.len() < 2 {
            self.scale_points.push(p);
        }
    }

    /// Replace the ROI wholesale. The caller supplies an
    /// already-normalized rectangle (or `None` to clear it).
    pub fn set_roi(&mut self, roi: Option<Roi>) {
        self.roi = roi;
    }

    /// Clear the scale pair and the ROI. Total over all states.
    pub fn reset(&mut self) {
        self.scale_points.clear();
        self.roi = None;
    }

    /// Scale points in insertion order (0, 1, or 2 entries).
    pub fn scale_points(&self) -> &[Point] {
        &self.scale_points
    }

    pub fn roi(&self) -> Option<Roi> {
        self.roi
    }
}
