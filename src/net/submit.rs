// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Submission client for `POST /process`.
//!
//! Builds the job request payload from the validated annotation and
//! performs the single blocking call to the backend. The response body
//! is decoded regardless of HTTP status: the backend reports errors as
//! `{ok: false, error}` with a 4xx status, and that message should
//! reach the user rather than a bare status line. No timeout and no
//! retry; the call runs until a response or a network-level failure.

use thiserror::Error;

use crate::models::protocol::{JobResult, ProcessRequest, ProcessResponse};
use crate::validate::ValidatedAnnotation;

/// Why a submission attempt failed. Terminal for the attempt; the
/// annotation state stays intact and editable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Network error, rejected request, or an unparsable response.
    #[error("Processing request failed: {0}")]
    Transport(String),
    /// The backend answered `ok: false`, optionally naming a reason.
    #[error("{}", .0.as_deref().unwrap_or("The backend could not process this job"))]
    Backend(Option<String>),
}

/// Assemble the request payload. Pure function of its inputs.
pub fn build_request(
    job_id: &str,
    scale_cm: f64,
    annotation: &ValidatedAnnotation,
) -> ProcessRequest {
    ProcessRequest {
        job_id: job_id.to_string(),
        scale_cm,
        p1: annotation.p1,
        p2: annotation.p2,
        bbox: annotation.roi,
    }
}

/// Client for the processing backend.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl SubmissionClient {
    /// Create a client for a backend base URL such as
    /// `http://127.0.0.1:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/process", base_url.trim_end_matches('/')),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Send the job request and decode the outcome. Blocks the calling
    /// thread until the backend answers or the connection fails.
    pub fn submit(&self, request: &ProcessRequest) -> Result<JobResult, SubmitError> {
        log::info!("Submitting job {} to {}", request.job_id, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let body: ProcessResponse = response
            .json()
            .map_err(|e| SubmitError::Transport(format!("Unreadable response: {e}")))?;

        if !body.ok {
            return Err(SubmitError::Backend(body.error));
        }

        match (body.video_url, body.csv_url) {
            (Some(video_url), Some(csv_url)) => Ok(JobResult { video_url, csv_url }),
            _ => Err(SubmitError::Transport(
                "Response reported success but omitted download URLs".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Point, Roi};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn example_annotation() -> ValidatedAnnotation {
        ValidatedAnnotation {
            p1: Point::new(5.0, 5.0),
            p2: Point::new(50.0, 5.0),
            roi: Roi { x: 10.0, y: 10.0, w: 100.0, h: 80.0 },
        }
    }

    /// One-shot HTTP stub: accepts a single request, hands its body to
    /// the test, and answers with the canned status line and JSON.
    fn spawn_stub(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut data = Vec::new();
            let mut buf = [0u8; 1024];
            let request_body = loop {
                let n = stream.read(&mut buf).unwrap();
                data.extend_from_slice(&buf[..n]);
                if let Some(split) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&data[..split]).to_ascii_lowercase();
                    let length: usize = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse().ok())
                        .unwrap_or(0);
                    let start = split + 4;
                    if data.len() >= start + length {
                        break String::from_utf8(data[start..start + length].to_vec()).unwrap();
                    }
                }
                if n == 0 {
                    break String::new();
                }
            };
            tx.send(request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    #[test]
    fn test_build_request_is_pure_over_its_inputs() {
        let request = build_request("J1", 10.0, &example_annotation());
        assert_eq!(request, build_request("J1", 10.0, &example_annotation()));
        assert_eq!(request.job_id, "J1");
        assert_eq!(request.scale_cm, 10.0);
        assert_eq!(request.bbox, Roi { x: 10.0, y: 10.0, w: 100.0, h: 80.0 });
    }

    #[test]
    fn test_submit_posts_exact_payload_and_reads_success() {
        let (base, rx) = spawn_stub(
            "200 OK",
            r#"{"ok":true,"video_url":"/v.mp4","csv_url":"/r.csv"}"#,
        );
        let client = SubmissionClient::new(&base);

        let result = client
            .submit(&build_request("J1", 10.0, &example_annotation()))
            .unwrap();
        assert_eq!(result.video_url, "/v.mp4");
        assert_eq!(result.csv_url, "/r.csv");

        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        let expected: serde_json::Value = serde_json::from_str(
            r#"{"job_id":"J1","scale_cm":10,"p1":{"x":5,"y":5},"p2":{"x":50,"y":5},"bbox":{"x":10,"y":10,"w":100,"h":80}}"#,
        )
        .unwrap();
        assert_eq!(sent, expected);
    }

    #[test]
    fn test_backend_error_is_surfaced_verbatim() {
        let (base, _rx) = spawn_stub("400 Bad Request", r#"{"ok":false,"error":"bad roi"}"#);
        let client = SubmissionClient::new(&base);

        let err = client
            .submit(&build_request("J1", 10.0, &example_annotation()))
            .unwrap_err();
        assert_eq!(err, SubmitError::Backend(Some("bad roi".to_string())));
        assert_eq!(err.to_string(), "bad roi");
    }

    #[test]
    fn test_backend_failure_without_reason_gets_generic_message() {
        let (base, _rx) = spawn_stub("400 Bad Request", r#"{"ok":false}"#);
        let client = SubmissionClient::new(&base);

        let err = client
            .submit(&build_request("J1", 10.0, &example_annotation()))
            .unwrap_err();
        assert_eq!(err, SubmitError::Backend(None));
        assert_eq!(err.to_string(), "The backend could not process this job");
    }

    #[test]
    fn test_malformed_response_is_a_transport_failure() {
        let (base, _rx) = spawn_stub("200 OK", "<html>proxy error</html>");
        let client = SubmissionClient::new(&base);

        let err = client
            .submit(&build_request("J1", 10.0, &example_annotation()))
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[test]
    fn test_unreachable_backend_is_a_transport_failure() {
        // Grab a free port, then close the listener so nothing answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SubmissionClient::new(&format!("http://{addr}"));
        let err = client
            .submit(&build_request("J1", 10.0, &example_annotation()))
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
