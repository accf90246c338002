//! Per-dispatch result handler.
//!
//! A [`Correlator`] is built once per `notify` call. When the notifier
//! process exits it hands the user callback a [`Completion`] and, if the
//! dispatch is still the active one, broadcasts the matching
//! [`NotificationEvent`].

use std::sync::Arc;

use tokio::sync::broadcast::Sender;

use crate::gateway::SubprocessResult;
use crate::notifier::{Completion, Interaction, NotificationEvent, NotifyError};
use crate::options::NotificationRequest;

use super::{extract_signal, normalize_signal, ActiveDispatch, DispatchToken, EventKind};

/// User completion callback.
pub type CompletionCallback = Box<dyn FnOnce(Completion) + Send + 'static>;

/// Binds one dispatch's result back to the request that started it.
pub struct Correlator {
    token: DispatchToken,
    active: ActiveDispatch,
    request: Arc<NotificationRequest>,
    events: Sender<NotificationEvent>,
    callback: CompletionCallback,
}

impl Correlator {
    #[must_use]
    pub fn new(
        token: DispatchToken,
        active: ActiveDispatch,
        request: Arc<NotificationRequest>,
        events: Sender<NotificationEvent>,
        callback: CompletionCallback,
    ) -> Self {
        Self {
            token,
            active,
            request,
            events,
            callback,
        }
    }

    #[must_use]
    pub fn token(&self) -> DispatchToken {
        self.token
    }

    /// Handle the notifier's result.
    ///
    /// Always invokes the callback. Returns the event kind if one was
    /// broadcast.
    pub fn on_result(self, result: SubprocessResult) -> Option<EventKind> {
        let (raw, metadata) = extract_signal(&result.payload);
        let signal = raw.as_deref().and_then(normalize_signal);

        (self.callback)(Completion {
            error: result.error.map(NotifyError::from),
            signal: signal.clone(),
            metadata: metadata.clone(),
        });

        let kind = EventKind::from_signal(&signal?)?;

        if !self.active.is_active(self.token) {
            tracing::debug!(
                dispatch = %self.token,
                event = %kind,
                "Dropping event for superseded dispatch"
            );
            return None;
        }

        tracing::debug!(dispatch = %self.token, event = %kind, "Emitting notification event");
        let interaction = Interaction {
            dispatch: self.token,
            options: self.request,
            metadata,
        };
        // No subscribers is fine; the event is simply unobserved.
        let _ = self.events.send(NotificationEvent::new(kind, interaction));
        Some(kind)
    }
}

impl std::fmt::Debug for Correlator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correlator")
            .field("token", &self.token)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
