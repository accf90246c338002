//! Option-to-argument compilation.
//!
//! Turns an [`OptionMap`] into the ordered token list the notifier executable
//! parses. Each key becomes a `-key` flag followed by its rendered value.
//! String values are backslash-escaped, have their line breaks rewritten to a
//! literal escape sequence, and are wrapped in quote characters.

use super::{OptionMap, OptionValue};

/// Literal line-break escape embedded into tokens.
#[cfg(windows)]
pub const ESCAPED_NEWLINE: &str = "\\r\\n";
/// Literal line-break escape embedded into tokens.
#[cfg(not(windows))]
pub const ESCAPED_NEWLINE: &str = "\\n";

/// Characters that get a leading backslash inside string values.
const ESCAPED_CHARS: [char; 4] = ['"', '$', '`', '\\'];

/// Compilation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileSpec {
    initial: Vec<OptionValue>,
    key_prefix: String,
    allowed_arguments: Option<Vec<String>>,
    no_escape: bool,
    explicit_true: bool,
    keep_newlines: bool,
    wrapper: String,
}

impl Default for CompileSpec {
    fn default() -> Self {
        Self {
            initial: Vec::new(),
            key_prefix: String::new(),
            allowed_arguments: None,
            no_escape: false,
            explicit_true: false,
            keep_newlines: false,
            wrapper: "\"".to_string(),
        }
    }
}

impl CompileSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional values emitted before any flag.
    #[must_use]
    pub fn initial(mut self, values: Vec<OptionValue>) -> Self {
        self.initial = values;
        self
    }

    /// Text inserted between the dash and the key, e.g. `-` for `--key`.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Only emit these keys.
    #[must_use]
    pub fn allowed_arguments(mut self, keys: &[&str]) -> Self {
        self.allowed_arguments = Some(keys.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Skip backslash escaping.
    #[must_use]
    pub fn no_escape(mut self) -> Self {
        self.no_escape = true;
        self
    }

    /// Render `true` as a bare flag and drop `false` keys.
    #[must_use]
    pub fn explicit_true(mut self) -> Self {
        self.explicit_true = true;
        self
    }

    /// Leave line breaks in string values untouched.
    #[must_use]
    pub fn keep_newlines(mut self) -> Self {
        self.keep_newlines = true;
        self
    }

    /// Characters placed on both sides of scalar values.
    #[must_use]
    pub fn wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = wrapper.into();
        self
    }

    fn allows(&self, key: &str) -> bool {
        self.allowed_arguments
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|k| k == key))
    }

    fn render(&self, value: &OptionValue) -> String {
        match value {
            OptionValue::List(items) => escape_newlines(&items.join(",")),
            OptionValue::Str(s) => {
                let mut text = if self.no_escape {
                    s.clone()
                } else {
                    escape_shell_chars(s)
                };
                if !self.keep_newlines {
                    text = escape_newlines(&text);
                }
                format!("{}{text}{}", self.wrapper, self.wrapper)
            }
            other => format!("{}{other}{}", self.wrapper, self.wrapper),
        }
    }
}

/// Backslash-escape `"`, `$`, `` ` `` and `\` in a single pass.
#[must_use]
pub fn escape_shell_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if ESCAPED_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Rewrite `\n` and `\r\n` line breaks to [`ESCAPED_NEWLINE`].
#[must_use]
pub fn escape_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\n', ESCAPED_NEWLINE)
}

/// Compile options into the notifier's argument vector.
#[must_use]
pub fn compile(options: &OptionMap, spec: &CompileSpec) -> Vec<String> {
    let mut args: Vec<String> = spec.initial.iter().map(|v| spec.render(v)).collect();

    for (key, value) in options.iter() {
        if !spec.allows(key) {
            continue;
        }
        let flag = format!("-{}{key}", spec.key_prefix);
        match value {
            OptionValue::Bool(true) if spec.explicit_true => args.push(flag),
            OptionValue::Bool(false) if spec.explicit_true => {}
            _ => {
                args.push(flag);
                args.push(spec.render(value));
            }
        }
    }

    args
}
