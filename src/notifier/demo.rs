//! The self-test notification.
//!
//! Only sent when explicitly asked for (the `demo` subcommand); building a
//! [`Notifier`](super::Notifier) never sends anything.

use std::path::Path;

use crate::config::DEFAULT_TITLE;
use crate::options::{NotificationRequest, Sound};

/// Message of the self-test notification.
pub const DEMO_MESSAGE: &str = "Task Succeed!";

/// Icon shipped with the crate for the self-test notification.
pub const DEMO_ICON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/checked.png");

/// Read `[package].name` from the `Cargo.toml` in `dir`.
#[must_use]
pub fn host_package_name(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join("Cargo.toml")).ok()?;
    let manifest: toml::Table = match toml::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable host manifest");
            return None;
        }
    };
    manifest
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

/// Build the self-test request, titled with the host package's name.
#[must_use]
pub fn demo_request(dir: &Path) -> NotificationRequest {
    let title = host_package_name(dir).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    NotificationRequest::new(DEMO_MESSAGE)
        .title(title)
        .icon(DEMO_ICON)
        .sound(Sound::Toggle(false))
        .wait(false)
        .timeout(1.5)
        .extra("type", "info")
}
