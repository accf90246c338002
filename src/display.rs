//! Colored CLI display utilities for notification output.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::notifier::{Completion, NotificationEvent};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Maximum length for truncated display strings.
const DEFAULT_MAX_LEN: usize = 80;

/// Truncate a string to a maximum length, adding ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Format notifier metadata as `key=value` pairs.
#[must_use]
pub fn format_metadata(metadata: &serde_json::Value) -> String {
    match metadata {
        serde_json::Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let value_str = match v {
                        serde_json::Value::String(s) => truncate(s, 50),
                        other => truncate(&other.to_string(), 50),
                    };
                    format!("{k}={value_str}")
                })
                .collect();
            pairs.join(", ")
        }
        other => truncate(&other.to_string(), DEFAULT_MAX_LEN),
    }
}

/// Print the argument vector about to be sent.
pub fn print_dispatch(program: &str, args: &[String]) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        "[NOTIFY]".blue().bold(),
        program.cyan(),
        args.join(" ").dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print the completion of a dispatch.
pub fn print_completion(completion: &Completion) {
    let ts = timestamp();
    if let Some(err) = &completion.error {
        println!(
            "{} {} {}",
            ts.dimmed(),
            "[ERROR]".red().bold(),
            truncate(&err.to_string(), 200).red()
        );
    }
    match &completion.signal {
        Some(signal) => println!(
            "{} {} {} {}",
            ts.dimmed(),
            "[DONE]".green().bold(),
            signal.bold(),
            format_metadata(&completion.metadata).dimmed()
        ),
        None if completion.is_ok() => {
            println!("{} {} delivered", ts.dimmed(), "[DONE]".green().bold());
        }
        None => {}
    }
    let _ = io::stdout().flush();
}

/// Print a correlated interaction event.
pub fn print_event(event: &NotificationEvent) {
    let label = format!("[{}]", event.kind().as_str().to_uppercase());
    let interaction = event.interaction();
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        label.magenta().bold(),
        interaction.dispatch,
        format_metadata(&interaction.metadata).dimmed()
    );
    if let Some(reply) = event.reply_text() {
        println!("  {} {}", "reply:".yellow(), reply);
    }
    let _ = io::stdout().flush();
}
