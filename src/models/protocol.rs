// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wire types for the processing backend's `/process` endpoint.
//!
//! The request body carries the job identifier, the physical scale
//! length, the calibration pair, and the ROI bounding box. The response
//! is a flat JSON object discriminated by its `ok` flag.

use serde::{Deserialize, Serialize};

use super::annotation::{Point, Roi};

/// JSON body of `POST /process`. Constructed only at submission time,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub job_id: String,
    pub scale_cm: f64,
    pub p1: Point,
    pub p2: Point,
    pub bbox: Roi,
}

/// JSON body of the `/process` response.
///
/// On success `ok` is true and both URLs are present; on failure `ok`
/// is false and `error` optionally names the reason.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    pub ok: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub csv_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Download references returned by a successful processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub video_url: String,
    pub csv_url: String,
}
