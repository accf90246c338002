//! Notifier process spawning.
//!
//! The [`Launcher`] trait is the seam between dispatch logic and the OS.
//! [`ProcessLauncher`] runs the real executable with `tokio::process`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{GatewayError, Payload, SubprocessResult};

/// Default notifier executable, resolved through `PATH`.
pub const DEFAULT_NOTIFIER: &str = "terminal-notifier";

/// Environment variable holding debug scopes.
pub const DEBUG_ENV: &str = "DEBUG";

/// Debug scope enabling pre-spawn diagnostics.
pub const DEBUG_SCOPE: &str = "notifier";

/// Returns true if a `DEBUG` value enables notifier diagnostics.
///
/// Matches by substring, so `notifier`, `http,notifier` and `node-notifier`
/// all enable it.
#[must_use]
pub fn debug_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.contains(DEBUG_SCOPE))
}

/// Runs a notifier executable.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Failures are reported inside the result, never as a panic or `Err`.
    async fn run(&self, program: &Path, args: &[String]) -> SubprocessResult;
}

/// Launcher backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    debug: bool,
}

impl ProcessLauncher {
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Create a launcher with diagnostics controlled by the `DEBUG` variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(debug_enabled(std::env::var(DEBUG_ENV).ok().as_deref()))
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }
}

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn run(&self, program: &Path, args: &[String]) -> SubprocessResult {
        if self.debug {
            tracing::info!(
                notifier = %program.display(),
                args = %args.join(" "),
                "Notifier debug info"
            );
        }

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) => SubprocessResult::from_output(
                output.status.success(),
                output.status.code(),
                &output.stdout,
                &output.stderr,
            ),
            Err(e) => {
                tracing::warn!(
                    notifier = %program.display(),
                    error = %e,
                    "Failed to launch notifier"
                );
                SubprocessResult::failed(
                    GatewayError::from_io(e, PathBuf::from(program)),
                    Payload::Raw(String::new()),
                )
            }
        }
    }
}
