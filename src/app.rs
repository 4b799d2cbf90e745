// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns one annotation session: the fetched reference
//! frame, the annotation state and input controller, and the lifecycle
//! of the background fetch and submission threads. Blocking work runs
//! on spawned threads that report back over mpsc channels polled each
//! frame.

use std::sync::mpsc::{channel, Receiver};

use crate::controller::InputController;
use crate::models::annotation::AnnotationState;
use crate::models::protocol::JobResult;
use crate::net::fetch::{self, LoadedFrame};
use crate::net::submit::{self, SubmissionClient, SubmitError};
use crate::ui::{canvas, panel};
use crate::validate;

/// Externally supplied session values from the bootstrap.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// URL of the reference frame to annotate.
    pub image_url: String,
    /// Opaque token correlating this session with a backend job.
    pub job_id: String,
    /// Base URL of the processing backend.
    pub backend_url: String,
    /// Initial scale length in centimeters, editable in the panel.
    pub scale_cm: f64,
}

/// State machine of the result area.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Hidden,
    Processing,
    Success(JobResult),
    Failure(String),
}

/// Main application state.
pub struct AnnotatorApp {
    config: SessionConfig,
    client: SubmissionClient,

    /// Annotation state; created empty, lives until the app exits.
    state: AnnotationState,
    controller: InputController,

    /// Scale length in cm entered by the user.
    scale_cm: f64,
    /// Blocking validation message shown next to the submit button.
    notice: Option<String>,
    result: ResultView,

    /// Reference frame texture and its native dimensions.
    frame_texture: Option<egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
    /// Receiver for the background frame fetch.
    frame_loader: Option<Receiver<Result<LoadedFrame, String>>>,
    load_error: Option<String>,

    /// Receiver for the latest submission attempt. Replaced on
    /// resubmission, so a superseded response is dropped instead of
    /// overwriting a newer one.
    submission: Option<Receiver<Result<JobResult, SubmitError>>>,
}

impl AnnotatorApp {
    /// Create the app and start fetching the reference frame.
    pub fn new(config: SessionConfig) -> Self {
        let (sender, receiver) = channel();
        let url = config.image_url.clone();
        std::thread::spawn(move || {
            let result = fetch::fetch_frame(&url).map_err(|e| format!("{e:#}"));
            let _ = sender.send(result);
        });

        let client = SubmissionClient::new(&config.backend_url);
        let scale_cm = config.scale_cm;
        Self {
            config,
            client,
            state: AnnotationState::new(),
            controller: InputController::new(),
            scale_cm,
            notice: None,
            result: ResultView::Hidden,
            frame_texture: None,
            frame_size: None,
            frame_loader: Some(receiver),
            load_error: None,
            submission: None,
        }
    }

    /// Validate, then hand the request to a background thread. On
    /// validation failure the message blocks submission and no network
    /// call is made.
    fn handle_submit(&mut self) {
        let validated = match validate::validate(&self.state) {
            Ok(validated) => validated,
            Err(e) => {
                log::warn!("Submission blocked: {e}");
                self.notice = Some(e.to_string());
                return;
            }
        };

        self.notice = None;
        self.result = ResultView::Processing;

        let request = submit::build_request(&self.config.job_id, self.scale_cm, &validated);
        let client = self.client.clone();
        let (sender, receiver) = channel();
        self.submission = Some(receiver);
        std::thread::spawn(move || {
            let _ = sender.send(client.submit(&request));
        });
    }

    /// Adopt a finished frame fetch, sizing the canvas to the image's
    /// native dimensions.
    fn poll_frame_loader(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.frame_loader {
            if let Ok(result) = receiver.try_recv() {
                self.frame_loader = None;
                match result {
                    Ok(frame) => {
                        let size = [frame.width as usize, frame.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
                        let texture = ctx.load_texture(
                            "reference_frame",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.frame_texture = Some(texture);
                        self.frame_size = Some((frame.width, frame.height));
                        self.state = AnnotationState::new();
                        log::info!(
                            "Reference frame loaded ({}x{})",
                            frame.width,
                            frame.height
                        );
                    }
                    Err(e) => {
                        log::error!("Failed to load reference frame: {e}");
                        self.load_error = Some(e);
                    }
                }
            }
        }
    }

    fn poll_submission(&mut self) {
        if let Some(ref receiver) = self.submission {
            if let Ok(outcome) = receiver.try_recv() {
                self.submission = None;
                match outcome {
                    Ok(job) => {
                        log::info!("Job {} finished: {}", self.config.job_id, job.video_url);
                        self.result = ResultView::Success(job);
                    }
                    Err(e) => {
                        log::error!("Job {} failed: {e}", self.config.job_id);
                        self.result = ResultView::Failure(e.to_string());
                    }
                }
            }
        }
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_frame_loader(ctx);
        self.poll_submission();

        // Keep the spinner moving while background work is pending
        if self.frame_loader.is_some() || self.submission.is_some() {
            ctx.request_repaint();
        }

        let panel_action = egui::SidePanel::right("controls")
            .default_width(260.0)
            .show(ctx, |ui| {
                panel::show(
                    ui,
                    &self.config.job_id,
                    &self.config.backend_url,
                    &mut self.scale_cm,
                    self.notice.as_deref(),
                    &self.result,
                )
            })
            .inner;

        match panel_action {
            panel::PanelAction::Reset => {
                self.controller.reset(&mut self.state);
                self.notice = None;
            }
            panel::PanelAction::Submit => self.handle_submit(),
            panel::PanelAction::None => {}
        }

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    self.frame_texture.as_ref(),
                    self.frame_size,
                    &self.state,
                    Some("Loading reference frame..."),
                    self.load_error.as_deref(),
                )
            })
            .inner;

        for event in events {
            self.controller.handle(event, &mut self.state);
        }
    }
}
