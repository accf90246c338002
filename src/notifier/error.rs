//! Notification errors.

use crate::gateway::GatewayError;
use crate::options::InvalidRequestError;

/// Errors reported to a notification's completion callback.
#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    /// Nothing to notify; no process was spawned.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),
    /// The notifier could not be launched or exited unsuccessfully.
    #[error("Failed to run notifier: {0}")]
    Launch(GatewayError),
    /// The notifier printed output that is not JSON.
    #[error("Failed to decode notifier output: {0}")]
    Decode(serde_json::Error),
    /// The notifier succeeded but wrote to stderr.
    #[error("Notifier reported: {0}")]
    Stderr(String),
    /// The dispatch task ended before reporting a result.
    #[error("Dispatch ended without a result")]
    Aborted,
}

impl From<GatewayError> for NotifyError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Decode(e) => Self::Decode(e),
            GatewayError::Stderr(text) => Self::Stderr(text),
            other => Self::Launch(other),
        }
    }
}
