pub mod config;
pub mod generate;
pub mod run;
pub mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use prepflow_core::config::PipelineConfig;
use prepflow_core::settings::SettingsStore;
use tracing::info;

/// The explicit settings file, or the one next to the executable.
pub fn settings_store(path: Option<&Path>) -> Result<SettingsStore> {
    match path {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::beside_executable().context("Cannot locate settings file"),
    }
}

pub fn read_config_file(path: &Path) -> Result<PipelineConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    PipelineConfig::from_toml_str(&contents)
        .with_context(|| format!("Invalid pipeline config {}", path.display()))
}

/// Raw configuration: the `--config` file if given, else remembered
/// settings, else defaults.
pub fn load_config(config: Option<&Path>, settings: Option<&Path>) -> Result<PipelineConfig> {
    if let Some(path) = config {
        return read_config_file(path);
    }
    let store = settings_store(settings)?;
    match store.load() {
        Some(cfg) => {
            info!(path = %store.path().display(), "Using remembered settings");
            Ok(cfg)
        }
        None => Ok(PipelineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_wins_over_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        let mut remembered = PipelineConfig::default();
        remembered.stacking.output = "remembered".into();
        SettingsStore::new(&settings).save(&remembered, true).unwrap();

        let toml_path = dir.path().join("pipeline.toml");
        std::fs::write(&toml_path, "[stacking]\noutput = \"from_file\"\n").unwrap();

        let cfg = load_config(Some(toml_path.as_path()), Some(settings.as_path())).unwrap();
        assert_eq!(cfg.stacking.output, "from_file");
        let cfg = load_config(None, Some(settings.as_path())).unwrap();
        assert_eq!(cfg.stacking.output, "remembered");
    }

    #[test]
    fn test_forgotten_settings_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        SettingsStore::new(&settings)
            .save(&PipelineConfig::default(), false)
            .unwrap();
        let cfg = load_config(None, Some(settings.as_path())).unwrap();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_bad_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(&path, "[stacking\n").unwrap();
        assert!(load_config(Some(path.as_path()), None).is_err());
        assert!(read_config_file(&dir.path().join("missing.toml")).is_err());
    }
}
