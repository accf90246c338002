//! Tests for dispatch, completion callbacks and event correlation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{broadcast, oneshot};
use tokio_stream::StreamExt;

use terminal_notify::config::NotifierConfig;
use terminal_notify::correlator::EventKind;
use terminal_notify::gateway::{GatewayError, Launcher, Payload, SubprocessResult};
use terminal_notify::notifier::{Completion, NotificationEvent, Notifier, NotifyError};
use terminal_notify::options::NotificationRequest;

/// Launcher that records calls and replies with a fixed payload.
#[derive(Default)]
struct RecordingLauncher {
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    reply: Mutex<Option<Payload>>,
}

impl RecordingLauncher {
    fn replying(payload: Payload) -> Self {
        Self {
            calls: Mutex::default(),
            reply: Mutex::new(Some(payload)),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn run(&self, program: &Path, args: &[String]) -> SubprocessResult {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        let payload = self.reply.lock().unwrap().clone().unwrap_or_else(Payload::empty);
        SubprocessResult::ok(payload)
    }
}

/// Launcher whose runs finish only when the test releases them.
///
/// Runs are keyed by the compiled `-message` value so the test controls
/// which dispatch completes first.
#[derive(Default)]
struct GatedLauncher {
    gates: Mutex<HashMap<String, oneshot::Receiver<SubprocessResult>>>,
}

impl GatedLauncher {
    fn gate(&self, message: &str) -> oneshot::Sender<SubprocessResult> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(format!("\"{message}\""), rx);
        tx
    }
}

#[async_trait]
impl Launcher for GatedLauncher {
    async fn run(&self, _program: &Path, args: &[String]) -> SubprocessResult {
        let key = args
            .iter()
            .position(|a| a == "-message")
            .and_then(|i| args.get(i + 1))
            .cloned()
            .unwrap_or_default();
        let gate = self.gates.lock().unwrap().remove(&key);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| SubprocessResult::ok(Payload::empty())),
            None => SubprocessResult::ok(Payload::empty()),
        }
    }
}

fn collect() -> (Arc<Mutex<Vec<Completion>>>, impl FnOnce(Completion) + Send + 'static) {
    let seen: Arc<Mutex<Vec<Completion>>> = Arc::default();
    let sink = Arc::clone(&seen);
    (seen, move |completion| sink.lock().unwrap().push(completion))
}

fn activation(kind: &str) -> SubprocessResult {
    SubprocessResult::ok(Payload::Json(json!({ "activationType": kind })))
}

#[tokio::test]
async fn invalid_request_fails_before_spawning() {
    let notifier = Notifier::with_launcher(NotifierConfig::default(), RecordingLauncher::default());
    let (seen, callback) = collect();

    let handle = notifier.dispatch(NotificationRequest::default().title("no body"), callback);

    // The callback already ran, synchronously.
    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0].error, Some(NotifyError::InvalidRequest(_))));
    }
    assert!(!handle.is_spawned());
    assert_eq!(handle.wait().await, None);
    assert_eq!(notifier.launcher().call_count(), 0);
}

#[tokio::test]
async fn bare_message_uses_default_title() {
    let config = NotifierConfig {
        default_title: "builds".to_string(),
        custom_path: Some(PathBuf::from("/opt/bin/terminal-notifier")),
        ..Default::default()
    };
    let notifier = Notifier::with_launcher(config, RecordingLauncher::default());

    notifier.dispatch("done", |_| {}).wait().await;

    let calls = notifier.launcher().calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PathBuf::from("/opt/bin/terminal-notifier"));
    assert_eq!(
        calls[0].1,
        vec!["-title", "\"builds\"", "-message", "\"done\"", "-json", "\"true\""]
    );
}

#[tokio::test]
async fn notify_is_chainable() {
    let notifier = Notifier::with_launcher(NotifierConfig::default(), RecordingLauncher::default());

    let first = notifier.active_dispatch();
    notifier.notify("one").notify("two");

    assert_eq!(first, None);
    assert_eq!(notifier.active_dispatch().map(|t| t.get()), Some(2));
}

#[tokio::test]
async fn empty_stdout_completes_without_error() {
    let notifier = Notifier::with_launcher(NotifierConfig::default(), RecordingLauncher::default());

    let completion = notifier.send("quiet").await;

    assert!(completion.is_ok());
    assert_eq!(completion.signal, None);
    assert_eq!(completion.metadata, json!({}));
}

#[tokio::test]
async fn click_is_emitted_with_original_options() {
    let launcher =
        RecordingLauncher::replying(Payload::Json(json!({"activationType": " Clicked "})));
    let notifier = Notifier::with_launcher(NotifierConfig::default(), launcher);
    let mut events = notifier.subscribe();
    let request = NotificationRequest::new("hello").text("aliased");

    let completion = notifier.send(request.clone()).await;

    assert_eq!(completion.signal.as_deref(), Some("activate"));
    assert_eq!(completion.event_kind(), Some(EventKind::Click));
    let event = events.try_recv().unwrap();
    assert_eq!(event.kind(), EventKind::Click);
    assert_eq!(*event.interaction().options, request);
    assert_eq!(event.interaction().metadata["activationType"], " Clicked ");
}

#[tokio::test]
async fn signals_map_to_events() {
    for (raw, expected) in [
        ("timeout", Some(EventKind::Timeout)),
        ("replied", Some(EventKind::Replied)),
        ("contentsClicked", Some(EventKind::Click)),
        ("dismissed", None),
    ] {
        let launcher = RecordingLauncher::replying(Payload::Json(json!({"activationType": raw})));
        let notifier = Notifier::with_launcher(NotifierConfig::default(), launcher);
        let mut events = notifier.subscribe();

        let emitted = notifier.dispatch("m", |_| {}).wait().await;

        assert_eq!(emitted, expected, "signal {raw}");
        assert_eq!(events.try_recv().ok().map(|e| e.kind()), expected);
    }
}

#[tokio::test]
async fn unmapped_signal_still_reaches_callback() {
    let launcher = RecordingLauncher::replying(Payload::Raw("Dismissed".to_string()));
    let notifier = Notifier::with_launcher(NotifierConfig::default(), launcher);

    let completion = notifier.send("m").await;

    assert_eq!(completion.signal.as_deref(), Some("dismissed"));
    assert_eq!(completion.event_kind(), None);
}

#[tokio::test]
async fn superseded_dispatch_does_not_emit() {
    let notifier = Notifier::with_launcher(NotifierConfig::default(), GatedLauncher::default());
    let mut events = notifier.subscribe();
    let release_a = notifier.launcher().gate("A");
    let release_b = notifier.launcher().gate("B");
    let (seen_a, callback_a) = collect();

    let handle_a = notifier.dispatch("A", callback_a);
    let handle_b = notifier.dispatch("B", |_| {});

    // A reports a click after B has started.
    release_a.send(activation("activate")).unwrap();
    assert_eq!(handle_a.wait().await, None);
    assert!(matches!(events.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
    assert_eq!(seen_a.lock().unwrap()[0].signal.as_deref(), Some("activate"));

    // B is still active, so its click is delivered.
    release_b.send(activation("activate")).unwrap();
    assert_eq!(handle_b.wait().await, Some(EventKind::Click));
    match events.try_recv().unwrap() {
        NotificationEvent::Click(interaction) => {
            assert_eq!(interaction.options.message.as_deref(), Some("B"));
        }
        other => panic!("Expected Click, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_request_still_supersedes() {
    let notifier = Notifier::with_launcher(NotifierConfig::default(), GatedLauncher::default());
    let mut events = notifier.subscribe();
    let release = notifier.launcher().gate("pending");

    let handle = notifier.dispatch("pending", |_| {});
    notifier.notify(NotificationRequest::default());

    release.send(activation("timeout")).unwrap();
    assert_eq!(handle.wait().await, None);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn launch_errors_reach_callback() {
    struct FailingLauncher;

    #[async_trait]
    impl Launcher for FailingLauncher {
        async fn run(&self, program: &Path, _args: &[String]) -> SubprocessResult {
            SubprocessResult::failed(
                GatewayError::NotFound {
                    path: program.to_path_buf(),
                },
                Payload::Raw(String::new()),
            )
        }
    }

    let notifier = Notifier::with_launcher(NotifierConfig::default(), FailingLauncher);
    let completion = notifier.send("m").await;

    match completion.error {
        Some(NotifyError::Launch(err)) => assert!(err.is_launch()),
        other => panic!("Expected Launch error, got {other:?}"),
    }
    assert_eq!(completion.signal, None);
}

#[tokio::test]
async fn events_stream_yields_replies() {
    let launcher = RecordingLauncher::replying(Payload::Json(
        json!({"activationType": "replied", "activationValue": "on my way"}),
    ));
    let notifier = Notifier::with_launcher(NotifierConfig::default(), launcher);
    let mut stream = notifier.events();

    notifier
        .dispatch(NotificationRequest::new("m").reply("Reply?"), |_| {})
        .wait()
        .await;

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.kind(), EventKind::Replied);
    assert_eq!(event.reply_text(), Some("on my way"));
}
