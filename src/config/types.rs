//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gateway::DEFAULT_NOTIFIER;

/// Title used when a bare message is notified.
pub const DEFAULT_TITLE: &str = env!("CARGO_PKG_NAME");

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_BUFFER: usize = 16;

/// Configuration for a notifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotifierConfig {
    /// Path to the notifier executable. Defaults to `terminal-notifier` on `PATH`.
    pub custom_path: Option<PathBuf>,
    /// Title for bare-message notifications.
    pub default_title: String,
    /// Log the executable and arguments before every run.
    pub debug: bool,
    /// Capacity of the event broadcast channel.
    pub event_buffer: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            custom_path: None,
            default_title: DEFAULT_TITLE.to_string(),
            debug: false,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl NotifierConfig {
    /// The executable to run.
    #[must_use]
    pub fn program(&self) -> PathBuf {
        self.custom_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTIFIER))
    }
}
