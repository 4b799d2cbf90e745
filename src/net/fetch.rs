// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reference frame download and decoding.
//!
//! The backend hosts the first frame of the uploaded video as an image;
//! this module fetches it and converts it to RGBA pixels suitable for
//! an egui texture. Runs on a background thread, never on the UI loop.

use anyhow::{Context, Result};

/// A decoded reference frame at native resolution.
pub struct LoadedFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// Download the reference frame from `url` and decode it.
pub fn fetch_frame(url: &str) -> Result<LoadedFrame> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch reference frame from {url}"))?
        .error_for_status()
        .context("Reference frame request was rejected")?;
    let bytes = response
        .bytes()
        .context("Failed to read reference frame body")?;
    decode_frame(&bytes)
}

/// Decode encoded image bytes into RGBA pixels.
pub fn decode_frame(bytes: &[u8]) -> Result<LoadedFrame> {
    let decoded = image::load_from_memory(bytes).context("Failed to decode reference frame")?;
    let rgba = decoded.to_rgba8();
    Ok(LoadedFrame {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
