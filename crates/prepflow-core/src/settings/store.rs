use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::consts::SETTINGS_FILE_NAME;
use crate::error::Result;

use super::{decode, encode};

/// A settings document at a fixed path.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `settings.json` next to the running executable.
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(dir.join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw document. Any read or parse failure yields `None`.
    pub fn load_document(&self) -> Option<Value> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read settings, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed settings, using defaults");
                None
            }
        }
    }

    /// The remembered configuration, or `None` when nothing usable was
    /// remembered.
    pub fn load(&self) -> Option<PipelineConfig> {
        let cfg = decode(&self.load_document()?);
        if cfg.is_some() {
            debug!(path = %self.path.display(), "Settings restored");
        }
        cfg
    }

    /// Persist `cfg`. With `remember` false only the opt-in flag is written.
    pub fn save(&self, cfg: &PipelineConfig, remember: bool) -> Result<()> {
        let doc = encode(cfg, remember);
        fs::write(&self.path, serde_json::to_string_pretty(&doc)?)?;
        debug!(path = %self.path.display(), remember, "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_garbage_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(SettingsStore::new(path).load().is_none());
    }

    #[test]
    fn test_save_into_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("a/b/settings.json"));
        assert!(store.save(&PipelineConfig::default(), true).is_err());
    }
}
