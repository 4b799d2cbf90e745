// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session control panel: scale length input, reset/submit actions,
//! and the submission result area.

use crate::app::ResultView;

/// Action requested from the control panel this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Reset,
    Submit,
}

/// Display the control panel and report the requested action.
pub fn show(
    ui: &mut egui::Ui,
    job_id: &str,
    backend_url: &str,
    scale_cm: &mut f64,
    notice: Option<&str>,
    result: &ResultView,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.heading("Calibration");
    ui.add_space(4.0);
    ui.label(format!("Job: {job_id}"));
    ui.separator();

    ui.label("1. Click two points a known distance apart");
    ui.label("2. Drag a box around the object to track");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Scale length:");
        ui.add(
            egui::DragValue::new(scale_cm)
                .speed(0.1)
                .range(0.0..=10_000.0)
                .suffix(" cm"),
        );
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            action = PanelAction::Reset;
        }
        let can_submit = *scale_cm > 0.0;
        if ui
            .add_enabled(can_submit, egui::Button::new("Process"))
            .clicked()
        {
            action = PanelAction::Submit;
        }
    });

    if let Some(notice) = notice {
        ui.add_space(4.0);
        ui.colored_label(egui::Color32::from_rgb(255, 180, 0), notice);
    }

    ui.separator();
    show_result(ui, backend_url, result);

    action
}

/// Result area: hidden, processing, success links, or failure text.
fn show_result(ui: &mut egui::Ui, backend_url: &str, result: &ResultView) {
    match result {
        ResultView::Hidden => {}
        ResultView::Processing => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing...");
            });
            ui.label(
                egui::RichText::new("This can take a little while; keep the app open.")
                    .weak(),
            );
        }
        ResultView::Success(job) => {
            ui.label(egui::RichText::new("Done!").color(egui::Color32::LIGHT_GREEN));
            ui.hyperlink_to(
                "Download processed video",
                resolve_url(backend_url, &job.video_url),
            );
            ui.hyperlink_to(
                "Download measurements CSV",
                resolve_url(backend_url, &job.csv_url),
            );
        }
        ResultView::Failure(message) => {
            ui.colored_label(
                egui::Color32::LIGHT_RED,
                format!("Processing failed: {message}"),
            );
        }
    }
}

/// The backend hands back URLs relative to its own origin; absolute
/// URLs pass through untouched.
fn resolve_url(backend_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            backend_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_joins_relative_paths() {
        assert_eq!(
            resolve_url("http://localhost:5000", "/results/j1/out.mp4"),
            "http://localhost:5000/results/j1/out.mp4"
        );
        assert_eq!(
            resolve_url("http://localhost:5000/", "results/j1/out.csv"),
            "http://localhost:5000/results/j1/out.csv"
        );
    }

    #[test]
    fn test_resolve_url_passes_absolute_urls_through() {
        assert_eq!(
            resolve_url("http://localhost:5000", "https://cdn.example.com/v.mp4"),
            "https://cdn.example.com/v.mp4"
        );
    }
}
