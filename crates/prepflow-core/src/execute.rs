//! Forwarding compiled commands to a live interpreter.

use std::convert::Infallible;
use std::fmt;

use tracing::{debug, info};

use crate::error::{PrepflowError, Result};
use crate::script::{executable_lines, Script};

/// Something that runs one command line at a time.
pub trait Interpreter {
    type Error: fmt::Display;

    fn execute(&mut self, command: &str) -> std::result::Result<(), Self::Error>;
}

/// Records commands instead of running them.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pub commands: Vec<String>,
}

impl Interpreter for Transcript {
    type Error = Infallible;

    fn execute(&mut self, command: &str) -> std::result::Result<(), Infallible> {
        self.commands.push(command.to_string());
        Ok(())
    }
}

/// Send `commands` in order, stopping at the first failure.
///
/// `on_progress` is called after each successful command with the number
/// done so far. Commands already run are not undone on failure. Returns the
/// number of commands executed.
pub fn forward<'c, I, F>(
    commands: I,
    interpreter: &mut impl Interpreter,
    mut on_progress: F,
) -> Result<usize>
where
    I: IntoIterator<Item = &'c str>,
    F: FnMut(usize, &str),
{
    let mut done = 0;
    for command in commands {
        debug!(command, "Forwarding");
        interpreter
            .execute(command)
            .map_err(|e| PrepflowError::Execution {
                line: command.to_string(),
                message: e.to_string(),
            })?;
        done += 1;
        on_progress(done, command);
    }
    info!(commands = done, "Script forwarded");
    Ok(done)
}

/// Forward the commands of a compiled script.
pub fn forward_script<F>(
    script: &Script,
    interpreter: &mut impl Interpreter,
    on_progress: F,
) -> Result<usize>
where
    F: FnMut(usize, &str),
{
    forward(script.commands(), interpreter, on_progress)
}

/// Forward script text, skipping blank and comment lines.
pub fn forward_text<F>(
    text: &str,
    interpreter: &mut impl Interpreter,
    on_progress: F,
) -> Result<usize>
where
    F: FnMut(usize, &str),
{
    forward(executable_lines(text), interpreter, on_progress)
}
