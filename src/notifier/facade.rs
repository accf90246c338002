//! The notifier facade.
//!
//! [`Notifier`] normalizes a request, compiles it into arguments, runs the
//! notifier executable in the background and correlates the result back to
//! the request. Interaction events are broadcast to subscribers, but only
//! for the most recent dispatch: starting a new one mutes every older
//! in-flight dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;

use crate::args::{compile, CompileSpec};
use crate::config::NotifierConfig;
use crate::correlator::{ActiveDispatch, Correlator, DispatchToken, EventKind};
use crate::gateway::{Launcher, ProcessLauncher};
use crate::options::{map_to_mac, validate, NotificationRequest};

use super::{Completion, NotificationEvent, NotifyError};

/// Input accepted by [`Notifier::notify`]: a bare message or a full request.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyInput {
    Message(String),
    Request(NotificationRequest),
}

impl NotifyInput {
    /// Resolve to a request, titling bare messages with `default_title`.
    #[must_use]
    pub fn into_request(self, default_title: &str) -> NotificationRequest {
        match self {
            Self::Message(message) => NotificationRequest::new(message).title(default_title),
            Self::Request(request) => request,
        }
    }
}

impl From<&str> for NotifyInput {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for NotifyInput {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<NotificationRequest> for NotifyInput {
    fn from(request: NotificationRequest) -> Self {
        Self::Request(request)
    }
}

/// Handle to one dispatch.
#[derive(Debug)]
pub struct DispatchHandle {
    token: DispatchToken,
    task: Option<JoinHandle<Option<EventKind>>>,
}

impl DispatchHandle {
    #[must_use]
    pub fn token(&self) -> DispatchToken {
        self.token
    }

    /// Returns false if the request was rejected before spawning.
    #[must_use]
    pub fn is_spawned(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the notifier to exit. Returns the event broadcast, if any.
    pub async fn wait(self) -> Option<EventKind> {
        match self.task {
            Some(task) => task.await.unwrap_or_else(|e| {
                tracing::warn!(dispatch = %self.token, error = %e, "Dispatch task failed");
                None
            }),
            None => None,
        }
    }
}

/// Desktop notifier backed by an external executable.
pub struct Notifier<L: Launcher + 'static = ProcessLauncher> {
    config: NotifierConfig,
    launcher: Arc<L>,
    active: ActiveDispatch,
    events: broadcast::Sender<NotificationEvent>,
}

impl Notifier<ProcessLauncher> {
    /// Create a notifier that runs the configured executable.
    ///
    /// Diagnostics are enabled by `config.debug` or a `DEBUG` variable
    /// containing `notifier`.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        let launcher = if config.debug {
            ProcessLauncher::new(true)
        } else {
            ProcessLauncher::from_env()
        };
        Self::with_launcher(config, launcher)
    }
}

impl Default for Notifier<ProcessLauncher> {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}

impl<L: Launcher + 'static> Notifier<L> {
    /// Create a notifier with a custom launcher.
    #[must_use]
    pub fn with_launcher(config: NotifierConfig, launcher: L) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            config,
            launcher: Arc::new(launcher),
            active: ActiveDispatch::new(),
            events,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    #[must_use]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// The active dispatch, if any.
    #[must_use]
    pub fn active_dispatch(&self) -> Option<DispatchToken> {
        self.active.current()
    }

    /// Subscribe to interaction events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Interaction events as a stream.
    #[must_use]
    pub fn events(&self) -> BroadcastStream<NotificationEvent> {
        BroadcastStream::new(self.events.subscribe())
    }

    /// Send a notification without a completion callback.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn notify(&self, input: impl Into<NotifyInput>) -> &Self {
        self.dispatch(input, |_| {});
        self
    }

    /// Send a notification and invoke `callback` once the notifier exits.
    ///
    /// A rejected request invokes the callback before this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn notify_with<F>(&self, input: impl Into<NotifyInput>, callback: F) -> &Self
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        self.dispatch(input, callback);
        self
    }

    /// Send a notification and wait for its completion.
    pub async fn send(&self, input: impl Into<NotifyInput>) -> Completion {
        let (tx, rx) = oneshot::channel();
        let handle = self.dispatch(input, move |completion| {
            let _ = tx.send(completion);
        });
        handle.wait().await;
        rx.await
            .unwrap_or_else(|_| Completion::from_error(NotifyError::Aborted))
    }

    /// Start a dispatch and return a handle to it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch<F>(&self, input: impl Into<NotifyInput>, callback: F) -> DispatchHandle
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let token = self.active.begin();
        let request = input.into().into_request(&self.config.default_title);
        tracing::debug!(dispatch = %token, "Dispatch created");

        let options = map_to_mac(&request);
        if let Err(e) = validate(&options) {
            tracing::warn!(dispatch = %token, error = %e, "Rejected notification request");
            callback(Completion::from_error(e.into()));
            return DispatchHandle { token, task: None };
        }

        let args = compile(&options, &CompileSpec::default());
        let program = self.program();
        let correlator = Correlator::new(
            token,
            self.active.clone(),
            Arc::new(request),
            self.events.clone(),
            Box::new(callback),
        );
        let launcher = Arc::clone(&self.launcher);

        tracing::debug!(dispatch = %token, args = args.len(), "Dispatching notification");
        let task = tokio::spawn(async move {
            let result = launcher.run(&program, &args).await;
            correlator.on_result(result)
        });

        DispatchHandle {
            token,
            task: Some(task),
        }
    }

    fn program(&self) -> PathBuf {
        self.config.program()
    }
}

impl<L: Launcher + 'static> std::fmt::Debug for Notifier<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
