use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use prepflow_core::resolve::resolve;
use prepflow_core::script::compile;

use crate::summary::print_pipeline_summary;

#[derive(Args)]
pub struct GenerateArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a pipeline summary to stderr
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: &GenerateArgs, settings: Option<&Path>) -> Result<()> {
    let raw = super::load_config(args.config.as_deref(), settings)?;
    let effective = resolve(&raw);
    if args.summary {
        print_pipeline_summary(&effective)?;
    }

    let script = compile(&effective);
    match args.output {
        Some(ref path) => {
            std::fs::write(path, script.to_string())
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            eprintln!(
                "Script with {} commands saved to {}",
                script.command_count(),
                path.display()
            );
        }
        None => print!("{script}"),
    }
    Ok(())
}
