// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Submission-readiness checks for the annotation state.
//!
//! Validation is advisory: it gates the submit action and surfaces a
//! blocking message in the UI, but never mutates the state.

use thiserror::Error;

use crate::models::annotation::{AnnotationState, Point, Roi};

/// Rectangles thinner than this are treated as accidental clicks
/// rather than a usable region.
const MIN_ROI_EXTENT: f64 = 2.0;

/// Why the current annotation state cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mark two scale calibration points on the image first")]
    IncompleteScale,
    #[error("Drag out a region of interest on the image first")]
    IncompleteRoi,
}

/// Annotation data that passed validation, ready for payload assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedAnnotation {
    pub p1: Point,
    pub p2: Point,
    pub roi: Roi,
}

/// Check that both scale points are marked and the ROI is a usable
/// (at least 2x2 px) rectangle.
pub fn validate(state: &AnnotationState) -> Result<ValidatedAnnotation, ValidationError> {
    let [p1, p2] = state.scale_points() else {
        return Err(ValidationError::IncompleteScale);
    };

    let roi = state.roi().ok_or(ValidationError::IncompleteRoi)?;
    if roi.w < MIN_ROI_EXTENT || roi.h < MIN_ROI_EXTENT {
        return Err(ValidationError::IncompleteRoi);
    }

    Ok(ValidatedAnnotation { p1: *p1, p2: *p2, roi })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roi(w: f64, h: f64) -> Roi {
        Roi { x: 10.0, y: 10.0, w, h }
    }

    fn state_with(points: usize, roi: Option<Roi>) -> AnnotationState {
        let mut state = AnnotationState::new();
        for i in 0..points {
            state.add_scale_point(Point::new(i as f64 * 10.0, 5.0));
        }
        state.set_roi(roi);
        state
    }

    #[test]
    fn test_zero_or_one_scale_points_is_incomplete_scale() {
        assert_eq!(
            validate(&state_with(0, Some(roi(100.0, 80.0)))),
            Err(ValidationError::IncompleteScale)
        );
        assert_eq!(
            validate(&state_with(1, Some(roi(100.0, 80.0)))),
            Err(ValidationError::IncompleteScale)
        );
    }

    #[test]
    fn test_missing_roi_is_incomplete_roi() {
        assert_eq!(
            validate(&state_with(2, None)),
            Err(ValidationError::IncompleteRoi)
        );
    }

    #[test]
    fn test_degenerate_roi_is_incomplete_roi() {
        assert_eq!(
            validate(&state_with(2, Some(roi(1.9, 80.0)))),
            Err(ValidationError::IncompleteRoi)
        );
        assert_eq!(
            validate(&state_with(2, Some(roi(100.0, 0.0)))),
            Err(ValidationError::IncompleteRoi)
        );
    }

    #[test]
    fn test_complete_state_yields_validated_annotation() {
        let state = state_with(2, Some(roi(2.0, 2.0)));
        let validated = validate(&state).unwrap();

        assert_eq!(validated.p1, Point::new(0.0, 5.0));
        assert_eq!(validated.p2, Point::new(10.0, 5.0));
        assert_eq!(validated.roi, roi(2.0, 2.0));
    }

    #[test]
    fn test_validate_does_not_mutate_state() {
        let state = state_with(1, None);
        let before = state.clone();
        let _ = validate(&state);
        assert_eq!(state, before);
    }
}
