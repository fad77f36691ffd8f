mod compiler;
mod line;
mod workdir;

use std::fmt;

pub use compiler::{compile, generate};
pub use line::{decimal, ScriptLine};
pub use workdir::WorkDir;

/// An ordered, compiled script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    /// Command lines only, in emission order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(ScriptLine::command_text)
    }

    /// Commands paired with the directory each one runs in.
    pub fn commands_with_cwd(&self) -> impl Iterator<Item = (&str, &WorkDir)> {
        self.lines.iter().filter_map(|line| match line {
            ScriptLine::Command { text, cwd } => Some((text.as_str(), cwd)),
            ScriptLine::Comment(_) | ScriptLine::Blank => None,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.commands().count()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Lines of arbitrary script text that should reach the interpreter:
/// trimmed, with blank and `#` comment lines removed.
pub fn executable_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
