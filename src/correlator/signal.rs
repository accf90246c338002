//! Raw notifier signals and the events they map to.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gateway::Payload;

/// Field of the notifier's JSON output naming the interaction.
pub const ACTIVATION_FIELD: &str = "activationType";

/// Normalized signal for any click.
pub const ACTIVATE: &str = "activate";

// `contentsClicked` and `actionClicked` count as clicks too.
static CLICK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^activate|clicked$").expect("Invalid click pattern"));

/// User interaction reported by the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Timeout,
    Replied,
}

impl EventKind {
    /// Map a normalized signal to an event.
    #[must_use]
    pub fn from_signal(signal: &str) -> Option<Self> {
        match signal {
            ACTIVATE => Some(Self::Click),
            "timeout" => Some(Self::Timeout),
            "replied" => Some(Self::Replied),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Timeout => "timeout",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and trim a raw signal, collapsing click variants to `activate`.
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_signal(raw: &str) -> Option<String> {
    let signal = raw.trim().to_lowercase();
    if signal.is_empty() {
        return None;
    }
    if CLICK_PATTERN.is_match(&signal) {
        Some(ACTIVATE.to_string())
    } else {
        Some(signal)
    }
}

/// Split a payload into its raw signal and metadata.
///
/// A JSON object contributes its `activationType` as the signal and itself as
/// metadata. Anything else is the signal, with empty metadata.
#[must_use]
pub fn extract_signal(payload: &Payload) -> (Option<String>, Value) {
    let empty = || Value::Object(Map::new());
    match payload {
        Payload::Json(value @ (Value::Object(_) | Value::Array(_))) => {
            let signal = value
                .get(ACTIVATION_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string);
            (signal, value.clone())
        }
        Payload::Json(Value::String(s)) | Payload::Raw(s) => (Some(s.clone()), empty()),
        Payload::Json(Value::Null | Value::Bool(false)) => (None, empty()),
        Payload::Json(other) => (Some(other.to_string()), empty()),
    }
}
