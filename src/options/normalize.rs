//! Request normalization into the notifier's option vocabulary.

use crate::args::{OptionMap, OptionValue};

use super::{NotificationRequest, Sound};

/// Sound used for `sound: true` and legacy `Notification.*` names.
pub const DEFAULT_SOUND: &str = "Bottle";

/// Timeout applied when `wait` is requested without one.
pub const DEFAULT_WAIT_TIMEOUT: f64 = 5.0;

const LEGACY_SOUND_PREFIX: &str = "Notification.";

/// Keys of which at least one must be set for a request to be dispatched.
pub const REQUIRED_ANY_OF: [&str; 4] = ["message", "group", "list", "remove"];

/// The request has nothing for the notifier to do.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Message, group, remove or list property is required.")]
pub struct InvalidRequestError;

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|s| !s.is_empty())
}

/// Move recognized keys out of `extra` into their typed fields.
///
/// Later values win, so an extra overrides the field it names. Only unknown
/// keys (and timeouts that are not numbers) stay in `extra`.
#[must_use]
pub fn fold_extras(request: &NotificationRequest) -> NotificationRequest {
    let mut folded = NotificationRequest {
        extra: OptionMap::new(),
        ..request.clone()
    };

    for (key, value) in request.extra.iter() {
        let text = Some(value.to_string());
        match key {
            "title" => folded.title = text,
            "subtitle" => folded.subtitle = text,
            "message" => folded.message = text,
            "text" => folded.text = text,
            "icon" => folded.icon = text,
            "i" => folded.i = text,
            "appIcon" => folded.app_icon = text,
            "group" => folded.group = text,
            "list" => folded.list = text,
            "remove" => folded.remove = text,
            "open" => folded.open = text,
            "execute" => folded.execute = text,
            "activate" => folded.activate = text,
            "sender" => folded.sender = text,
            "contentImage" => folded.content_image = text,
            "closeLabel" => folded.close_label = text,
            "dropdownLabel" => folded.dropdown_label = text,
            "reply" => folded.reply = Some(value.clone()),
            "sound" => {
                folded.sound = Some(match value {
                    OptionValue::Bool(b) => Sound::Toggle(*b),
                    other => Sound::Named(other.to_string()),
                });
            }
            "wait" => folded.wait = Some(matches!(value, OptionValue::Bool(true))),
            "actions" => {
                folded.actions = Some(match value {
                    OptionValue::List(items) => items.clone(),
                    other => other.to_string().split(',').map(str::to_string).collect(),
                });
            }
            "timeout" => match value {
                OptionValue::Number(n) => folded.timeout = Some(*n),
                OptionValue::Str(s) => match s.trim().parse::<f64>() {
                    Ok(n) => folded.timeout = Some(n),
                    Err(_) => folded.extra.insert(key, value.clone()),
                },
                other => folded.extra.insert(key, other.clone()),
            },
            _ => folded.extra.insert(key, value.clone()),
        }
    }

    folded
}

fn map_sound(sound: &Sound) -> Option<String> {
    match sound {
        Sound::Toggle(true) => Some(DEFAULT_SOUND.to_string()),
        Sound::Toggle(false) => None,
        Sound::Named(name) if name.starts_with(LEGACY_SOUND_PREFIX) => {
            Some(DEFAULT_SOUND.to_string())
        }
        Sound::Named(name) => Some(name.clone()),
    }
}

/// Map a request onto the notifier's option names.
///
/// Resolves the `text`, `i` and `icon` aliases, translates `sound`, turns
/// `wait` into a timeout and always requests JSON output. Recognized keys in
/// `extra` go through the same rules (see [`fold_extras`]).
#[must_use]
pub fn map_to_mac(request: &NotificationRequest) -> OptionMap {
    let request = &fold_extras(request);
    let mut options = OptionMap::new();

    let message = non_empty(request.text.as_ref()).or(request.message.as_ref());
    let app_icon = non_empty(request.i.as_ref())
        .or(non_empty(request.icon.as_ref()))
        .or(request.app_icon.as_ref());

    let mut timeout = request.timeout;
    // A zero timeout counts as unset here, but is still forwarded otherwise.
    if request.wait == Some(true) && !timeout.is_some_and(|t| t != 0.0) {
        timeout = Some(DEFAULT_WAIT_TIMEOUT);
    }

    let strings = [
        ("title", request.title.as_ref()),
        ("subtitle", request.subtitle.as_ref()),
        ("message", message),
    ];
    for (key, value) in strings {
        if let Some(value) = value {
            options.insert(key, value.as_str());
        }
    }

    if let Some(sound) = request.sound.as_ref().and_then(map_sound) {
        options.insert("sound", sound);
    }
    if let Some(icon) = app_icon {
        options.insert("appIcon", icon.as_str());
    }
    if let Some(seconds) = timeout {
        options.insert("timeout", seconds);
    }

    let passthrough = [
        ("group", request.group.as_ref()),
        ("list", request.list.as_ref()),
        ("remove", request.remove.as_ref()),
        ("open", request.open.as_ref()),
        ("execute", request.execute.as_ref()),
        ("activate", request.activate.as_ref()),
        ("sender", request.sender.as_ref()),
        ("contentImage", request.content_image.as_ref()),
    ];
    for (key, value) in passthrough {
        if let Some(value) = value {
            options.insert(key, value.as_str());
        }
    }

    if let Some(actions) = &request.actions {
        options.insert("actions", actions.clone());
    }
    if let Some(label) = &request.close_label {
        options.insert("closeLabel", label.as_str());
    }
    if let Some(label) = &request.dropdown_label {
        options.insert("dropdownLabel", label.as_str());
    }
    if let Some(reply) = &request.reply {
        options.insert("reply", reply.clone());
    }

    for (key, value) in request.extra.iter() {
        options.insert(key, value.clone());
    }

    options.insert("json", OptionValue::Bool(true));
    options
}

/// Check that a normalized request has something to do.
///
/// # Errors
///
/// Returns `InvalidRequestError` unless one of `message`, `group`, `list` or
/// `remove` is set.
pub fn validate(options: &OptionMap) -> Result<(), InvalidRequestError> {
    if REQUIRED_ANY_OF.iter().any(|key| options.is_present(key)) {
        Ok(())
    } else {
        Err(InvalidRequestError)
    }
}
