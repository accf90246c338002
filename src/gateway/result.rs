//! Subprocess results and gateway errors.

use std::path::PathBuf;

use serde_json::{Map, Value};

/// Error type for notifier subprocess runs.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// The executable was not found.
    #[error("Notifier binary not found: {}", .path.display())]
    NotFound { path: PathBuf },
    /// Permission denied when spawning.
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },
    /// Other I/O error while spawning or waiting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The process exited unsuccessfully.
    #[error("Notifier exited with {}: {stderr}", exit_label(.code))]
    Exit { code: Option<i32>, stderr: String },
    /// Stdout was not valid JSON.
    #[error("Failed to parse notifier output: {0}")]
    Decode(#[from] serde_json::Error),
    /// The process succeeded but wrote diagnostics to stderr.
    #[error("Notifier stderr: {0}")]
    Stderr(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "signal".to_string(),
    }
}

impl GatewayError {
    /// Create a `GatewayError` from a spawn failure, classifying common cases.
    pub(crate) fn from_io(err: std::io::Error, path: PathBuf) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io(err),
        }
    }

    /// Returns true if the process could not be launched or failed to run.
    #[must_use]
    pub fn is_launch(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::PermissionDenied { .. } | Self::Io(_) | Self::Exit { .. }
        )
    }

    /// Returns true if stdout could not be decoded.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// What the notifier printed.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded JSON.
    Json(Value),
    /// Undecoded stdout text.
    Raw(String),
}

impl Payload {
    /// The empty structured result reported for silent runs.
    #[must_use]
    pub fn empty() -> Self {
        Self::Json(Value::Object(Map::new()))
    }
}

/// Outcome of one notifier run.
#[derive(Debug)]
pub struct SubprocessResult {
    pub error: Option<GatewayError>,
    pub payload: Payload,
}

impl SubprocessResult {
    /// A clean run.
    #[must_use]
    pub fn ok(payload: Payload) -> Self {
        Self {
            error: None,
            payload,
        }
    }

    /// A failed run, still carrying whatever stdout was captured.
    #[must_use]
    pub fn failed(error: GatewayError, payload: Payload) -> Self {
        Self {
            error: Some(error),
            payload,
        }
    }

    /// Build a result from captured process output.
    ///
    /// Empty stdout yields an empty object. Unparseable stdout yields a
    /// `Decode` error along with the raw text.
    #[must_use]
    pub fn from_output(success: bool, code: Option<i32>, stdout: &[u8], stderr: &[u8]) -> Self {
        let stdout = String::from_utf8_lossy(stdout).into_owned();
        let stderr = String::from_utf8_lossy(stderr).trim().to_string();

        if !success {
            return Self::failed(GatewayError::Exit { code, stderr }, Payload::Raw(stdout));
        }

        if stdout.trim().is_empty() {
            return Self::ok(Payload::empty());
        }

        match serde_json::from_str::<Value>(&stdout) {
            Ok(value) => {
                let error = (!stderr.is_empty()).then_some(GatewayError::Stderr(stderr));
                Self {
                    error,
                    payload: Payload::Json(value),
                }
            }
            Err(e) => Self::failed(GatewayError::Decode(e), Payload::Raw(stdout)),
        }
    }
}
