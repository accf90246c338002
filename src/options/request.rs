//! Notification request type.

use serde::{Deserialize, Serialize};

use crate::args::{OptionMap, OptionValue};

/// Sound setting: a toggle or a named system sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sound {
    Toggle(bool),
    Named(String),
}

/// A notification request.
///
/// Every option the notifier understands has a field; anything else goes in
/// `extra` and is passed through unchanged. A recognized key set through
/// `extra` is treated as if its field had been set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub message: Option<String>,
    /// Alias for `message`.
    pub text: Option<String>,
    pub icon: Option<String>,
    /// Shorthand for `icon`.
    pub i: Option<String>,
    pub app_icon: Option<String>,
    pub sound: Option<Sound>,
    /// Wait for user interaction (implies a 5 second timeout).
    pub wait: Option<bool>,
    /// Seconds before the notifier dismisses the notification.
    pub timeout: Option<f64>,
    pub group: Option<String>,
    pub list: Option<String>,
    pub remove: Option<String>,
    pub open: Option<String>,
    pub execute: Option<String>,
    pub activate: Option<String>,
    pub sender: Option<String>,
    pub content_image: Option<String>,
    pub actions: Option<Vec<String>>,
    pub close_label: Option<String>,
    pub dropdown_label: Option<String>,
    pub reply: Option<OptionValue>,
    /// Executable-specific passthrough fields, in order. Unknown keys land
    /// here when deserializing.
    #[serde(flatten)]
    pub extra: OptionMap,
}

impl NotificationRequest {
    /// Create a request with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn sound(mut self, sound: Sound) -> Self {
        self.sound = Some(sound);
        self
    }

    #[must_use]
    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = Some(wait);
        self
    }

    #[must_use]
    pub fn timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn list(mut self, group: impl Into<String>) -> Self {
        self.list = Some(group.into());
        self
    }

    #[must_use]
    pub fn remove(mut self, group: impl Into<String>) -> Self {
        self.remove = Some(group.into());
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: &[&str]) -> Self {
        self.actions = Some(actions.iter().map(|s| (*s).to_string()).collect());
        self
    }

    #[must_use]
    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn reply(mut self, reply: impl Into<OptionValue>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Add a passthrough option.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.extra.insert(key, value);
        self
    }
}
