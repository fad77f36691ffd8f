use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use prepflow_core::config::PipelineConfig;

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Remember a pipeline config for later runs
    Save {
        /// Pipeline config file (TOML)
        #[arg(long, required_unless_present = "forget")]
        config: Option<PathBuf>,

        /// Clear remembered settings instead of storing the config
        #[arg(long)]
        forget: bool,
    },
    /// Print the remembered pipeline config as TOML
    Show,
}

pub fn run(args: &SettingsArgs, settings: Option<&Path>) -> Result<()> {
    let store = super::settings_store(settings)?;
    match &args.action {
        SettingsAction::Save { config, forget } => {
            let cfg = match config {
                Some(path) if !forget => super::read_config_file(path)?,
                _ => PipelineConfig::default(),
            };
            store
                .save(&cfg, !forget)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            if *forget {
                println!("Remembered settings cleared in {}", store.path().display());
            } else {
                println!("Settings saved to {}", store.path().display());
            }
        }
        SettingsAction::Show => match store.load() {
            Some(cfg) => print!("{}", cfg.to_toml_string()?),
            None => println!("No remembered settings in {}", store.path().display()),
        },
    }
    Ok(())
}
