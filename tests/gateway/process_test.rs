//! Tests for running real notifier processes.
//!
//! `/bin/sh -c` scripts stand in for terminal-notifier.

use std::path::{Path, PathBuf};

use tokio_test::{assert_err, assert_ok};

use terminal_notify::gateway::{GatewayError, Launcher, Payload, ProcessLauncher};

#[cfg(unix)]
async fn run_sh(body: &str, args: &[&str]) -> terminal_notify::gateway::SubprocessResult {
    let mut argv = vec!["-c".to_string(), body.to_string(), "notifier".to_string()];
    argv.extend(args.iter().map(|a| (*a).to_string()));
    ProcessLauncher::default().run(Path::new("/bin/sh"), &argv).await
}

#[cfg(unix)]
#[tokio::test]
async fn silent_notifier_yields_empty_object() {
    let result = run_sh("exit 0", &[]).await;

    assert!(result.error.is_none());
    assert_eq!(result.payload, Payload::empty());
}

#[cfg(unix)]
#[tokio::test]
async fn json_output_is_decoded() {
    let result = run_sh(
        r#"echo '{"activationType":"contentsClicked","deliveredAt":"2024-01-01 10:00:00 +0000"}'"#,
        &[],
    )
    .await;

    assert!(result.error.is_none());
    match result.payload {
        Payload::Json(value) => assert_eq!(value["activationType"], "contentsClicked"),
        other @ Payload::Raw(_) => panic!("Expected Json, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn arguments_are_passed_verbatim() {
    let result = run_sh(r#"printf '%s|' "$@""#, &["-message", "\"a \\$b\""]).await;

    // Not JSON: reported as a decode error with the raw text kept.
    assert!(result.error.as_ref().is_some_and(GatewayError::is_decode));
    assert_eq!(result.payload, Payload::Raw("-message|\"a \\$b\"|".to_string()));
}

#[cfg(unix)]
#[tokio::test]
async fn stderr_with_json_is_reported() {
    let result = run_sh("echo 'deprecated flag' >&2; echo '{}'", &[]).await;

    match result.error {
        Some(GatewayError::Stderr(text)) => assert_eq!(text, "deprecated flag"),
        other => panic!("Expected Stderr, got {other:?}"),
    }
    assert_eq!(result.payload, Payload::Json(serde_json::json!({})));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_notifier_is_a_launch_error() {
    let result = run_sh("echo partial; echo 'bad option' >&2; exit 2", &[]).await;

    let err = result.error.unwrap();
    assert!(err.is_launch());
    assert!(matches!(err, GatewayError::Exit { code: Some(2), .. }));
    assert_eq!(result.payload, Payload::Raw("partial\n".to_string()));
}

#[tokio::test]
async fn missing_binary_is_not_found() {
    let program = PathBuf::from("/nonexistent/terminal-notifier");

    let result = ProcessLauncher::new(true).run(&program, &[]).await;

    assert!(matches!(result.error, Some(GatewayError::NotFound { .. })));
    assert_eq!(result.payload, Payload::Raw(String::new()));
}

#[test]
fn config_file_round_trips_through_loader() {
    use std::io::Write;

    use terminal_notify::config::ConfigLoader;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "custom_path = \"/usr/local/bin/terminal-notifier\"").unwrap();
    let config = assert_ok!(ConfigLoader::with_path(file.path().to_path_buf()).load());
    assert_eq!(
        config.program(),
        PathBuf::from("/usr/local/bin/terminal-notifier")
    );

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "event_buffer = -1").unwrap();
    assert_err!(ConfigLoader::with_path(bad.path().to_path_buf()).load());
}
