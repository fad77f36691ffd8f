mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prepflow", about = "Siril preprocessing script generator")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Remembered-settings file (defaults to settings.json next to the executable)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a pipeline into a Siril script
    Generate(commands::generate::GenerateArgs),
    /// Compile a pipeline and send it to a running Siril
    Run(commands::run::RunArgs),
    /// Print or save the default pipeline config
    Config(commands::config::ConfigArgs),
    /// Save or show remembered settings
    Settings(commands::settings::SettingsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings.as_deref();
    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args, settings),
        Commands::Run(args) => commands::run::run(args, settings),
        Commands::Config(args) => commands::config::run(args),
        Commands::Settings(args) => commands::settings::run(args, settings),
    }
}
