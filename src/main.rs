// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! kinemark - scale calibration and ROI selection front end.
//!
//! Loads a job's reference frame, lets the user mark a two-point
//! physical scale and drag out a region of interest, then submits the
//! annotation to the video-measurement backend.

mod app;
mod controller;
mod models;
mod net;
mod render;
mod ui;
mod validate;

use anyhow::Result;
use app::{AnnotatorApp, SessionConfig};
use clap::Parser;

/// Annotate a job's reference frame and submit it for processing.
#[derive(Parser, Debug)]
#[command(name = "kinemark", version, about)]
struct Args {
    /// URL of the reference frame image to annotate
    #[arg(long)]
    image_url: String,

    /// Job identifier issued by the processing backend
    #[arg(long)]
    job_id: String,

    /// Base URL of the processing backend
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    backend_url: String,

    /// Initial scale length in centimeters
    #[arg(long, default_value_t = 10.0)]
    scale_cm: f64,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = SessionConfig {
        image_url: args.image_url,
        job_id: args.job_id,
        backend_url: args.backend_url,
        scale_cm: args.scale_cm,
    };

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("kinemark - Scale Calibration & ROI Selection"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "kinemark",
        options,
        Box::new(move |_cc| Ok(Box::new(AnnotatorApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
