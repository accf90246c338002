//! terminal-notify - Desktop notifications through an external notifier.
//!
//! Requests are normalized into the notifier's vocabulary, compiled into an
//! argument vector, and run as a subprocess. The notifier's JSON output is
//! correlated back to the request and surfaced as typed events.

pub mod args;
pub mod config;
pub mod correlator;
pub mod display;
pub mod gateway;
pub mod notifier;
pub mod options;
