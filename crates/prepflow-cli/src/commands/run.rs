use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use prepflow_core::execute::{forward, Interpreter, Transcript};
use prepflow_core::script::{executable_lines, generate};
use tracing::debug;

/// Pipe Siril reads commands from.
const COMMAND_PIPE: &str = "siril_command.in";
/// Pipe Siril reports status on.
const REPLY_PIPE: &str = "siril_command.out";

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    #[arg(long, conflicts_with = "script")]
    pub config: Option<PathBuf>,

    /// Forward an existing script file instead of compiling one
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Directory holding Siril's command pipes
    #[arg(long, default_value = "/tmp")]
    pub pipe_dir: PathBuf,

    /// Print the commands instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &RunArgs, settings: Option<&Path>) -> Result<()> {
    let text = match args.script {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let raw = super::load_config(args.config.as_deref(), settings)?;
            generate(&raw).to_string()
        }
    };
    let commands: Vec<&str> = executable_lines(&text).collect();

    if args.dry_run {
        let mut transcript = Transcript::default();
        forward(commands.iter().copied(), &mut transcript, |_, _| {})?;
        for command in &transcript.commands {
            println!("{command}");
        }
        return Ok(());
    }

    let mut siril = SirilPipe::open(&args.pipe_dir)?;

    let pb = ProgressBar::new(commands.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:40!} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let result = forward(commands.iter().copied(), &mut siril, |done, command| {
        pb.set_message(command.to_string());
        pb.set_position(done as u64);
    });
    match result {
        Ok(done) => {
            pb.finish_with_message("Done");
            println!("\n{done} commands executed");
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            Err(e.into())
        }
    }
}

/// A running Siril reached through its named pipes.
struct SirilPipe {
    commands: File,
    replies: BufReader<File>,
}

impl SirilPipe {
    fn open(dir: &Path) -> Result<Self> {
        let command_pipe = dir.join(COMMAND_PIPE);
        let reply_pipe = dir.join(REPLY_PIPE);
        let commands = OpenOptions::new()
            .write(true)
            .open(&command_pipe)
            .with_context(|| {
                format!(
                    "Cannot open {}; is Siril running with pipes enabled?",
                    command_pipe.display()
                )
            })?;
        let replies = File::open(&reply_pipe)
            .with_context(|| format!("Cannot open {}", reply_pipe.display()))?;
        debug!(dir = %dir.display(), "Connected to Siril");
        Ok(Self {
            commands,
            replies: BufReader::new(replies),
        })
    }
}

impl Interpreter for SirilPipe {
    type Error = anyhow::Error;

    /// Send one command and wait for its `status:` reply.
    fn execute(&mut self, command: &str) -> Result<()> {
        writeln!(self.commands, "{command}")?;
        self.commands.flush()?;

        let mut last_log = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.replies.read_line(&mut line)? == 0 {
                bail!("Siril closed the reply pipe");
            }
            let reply = line.trim_end();
            debug!(reply, "Siril");
            if let Some(log) = reply.strip_prefix("log: ") {
                last_log = log.to_string();
                continue;
            }
            let Some(status) = reply.strip_prefix("status: ") else {
                continue;
            };
            if status.starts_with("success") {
                return Ok(());
            }
            if status.starts_with("error") {
                let reason = if last_log.is_empty() {
                    status.to_string()
                } else {
                    last_log
                };
                return Err(anyhow!(reason));
            }
            if status.starts_with("exit") {
                bail!("Siril exited");
            }
        }
    }
}
