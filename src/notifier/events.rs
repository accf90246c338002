//! Completion and interaction event types.

use std::sync::Arc;

use serde_json::Value;

use crate::correlator::{DispatchToken, EventKind};
use crate::options::NotificationRequest;

use super::NotifyError;

/// What a dispatch's callback receives once the notifier exits.
#[derive(Debug)]
pub struct Completion {
    pub error: Option<NotifyError>,
    /// Normalized signal (`activate`, `timeout`, `replied`, or anything else
    /// the notifier reported).
    pub signal: Option<String>,
    /// Full JSON object reported by the notifier, or `{}`.
    pub metadata: Value,
}

impl Completion {
    /// A completion carrying only an error.
    #[must_use]
    pub fn from_error(error: NotifyError) -> Self {
        Self {
            error: Some(error),
            signal: None,
            metadata: Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The event this completion's signal maps to, if any.
    #[must_use]
    pub fn event_kind(&self) -> Option<EventKind> {
        self.signal.as_deref().and_then(EventKind::from_signal)
    }
}

/// Context shared by every interaction event.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Dispatch the interaction belongs to.
    pub dispatch: DispatchToken,
    /// The request as the caller supplied it.
    pub options: Arc<NotificationRequest>,
    /// Notifier output for the interaction.
    pub metadata: Value,
}

/// User interaction with a delivered notification.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    Click(Interaction),
    Timeout(Interaction),
    Replied(Interaction),
}

impl NotificationEvent {
    #[must_use]
    pub fn new(kind: EventKind, interaction: Interaction) -> Self {
        match kind {
            EventKind::Click => Self::Click(interaction),
            EventKind::Timeout => Self::Timeout(interaction),
            EventKind::Replied => Self::Replied(interaction),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::Timeout(_) => EventKind::Timeout,
            Self::Replied(_) => EventKind::Replied,
        }
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        match self {
            Self::Click(i) | Self::Timeout(i) | Self::Replied(i) => i,
        }
    }

    /// Reply text, for `Replied` events that carry one.
    #[must_use]
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            Self::Replied(i) => i.metadata.get("activationValue").and_then(Value::as_str),
            _ => None,
        }
    }
}
