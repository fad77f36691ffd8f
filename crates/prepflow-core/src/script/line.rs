use std::fmt;

use super::workdir::WorkDir;

/// One line of a generated script.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptLine {
    /// `# <text>` section marker, never sent to the interpreter.
    Comment(String),
    /// Separator between sections.
    Blank,
    /// An interpreter command and the directory it runs in.
    Command { text: String, cwd: WorkDir },
}

impl ScriptLine {
    pub fn command_text(&self) -> Option<&str> {
        match self {
            Self::Command { text, .. } => Some(text),
            Self::Comment(_) | Self::Blank => None,
        }
    }
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "# {text}"),
            Self::Blank => Ok(()),
            Self::Command { text, .. } => write!(f, "{text}"),
        }
    }
}

/// Builder for a single command line: `name [arg]...`.
///
/// Empty arguments are dropped so optional values never leave stray
/// whitespace behind.
#[derive(Debug)]
pub(crate) struct Command {
    text: String,
}

impl Command {
    pub(crate) fn new(name: &str) -> Self {
        Self { text: name.to_string() }
    }

    pub(crate) fn arg(mut self, arg: impl fmt::Display) -> Self {
        let arg = arg.to_string();
        if !arg.is_empty() {
            self.text.push(' ');
            self.text.push_str(&arg);
        }
        self
    }

    pub(crate) fn arg_if(self, cond: bool, arg: impl fmt::Display) -> Self {
        if cond {
            self.arg(arg)
        } else {
            self
        }
    }

    /// `-key=value`, skipped when `value` renders empty.
    pub(crate) fn opt(self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        if value.is_empty() {
            self
        } else {
            self.arg(format_args!("-{key}={value}"))
        }
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

/// Format a float the way the interpreter reads decimals: integral values
/// keep one fractional digit (`3.0`), others print their shortest exact form.
pub fn decimal(value: f64) -> String {
    format!("{value:?}")
}
