//! Loading and saving the configuration file

use std::path::{Path, PathBuf};

use scfg_fs::StructuredFile;

use super::Configuration;
use crate::error::{Error, Result};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "SCFG_CONFIG";

const APP_DIR: &str = "system-configurator";
const CONFIG_FILE: &str = "config.json";

/// `<config dir>/system-configurator/config.json`, falling back to
/// `$HOME/.config` when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR).join(CONFIG_FILE)
}

/// The configuration file on disk. Its format follows the file extension.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    file: StructuredFile,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            file: StructuredFile::new(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the configuration. A missing file is an empty configuration.
    pub fn load(&self) -> Result<Configuration> {
        let config: Configuration = self
            .file
            .load_or_default()
            .map_err(|source| Error::LoadConfiguration { source })?;
        tracing::debug!(path = %self.path().display(), packages = config.len(), "loaded configuration");
        Ok(config)
    }

    /// Atomically replace the file with `config`.
    pub fn save(&self, config: &Configuration) -> Result<()> {
        self.file
            .save(config)
            .map_err(|source| Error::WriteConfiguration { source })?;
        tracing::debug!(path = %self.path().display(), packages = config.len(), "saved configuration");
        Ok(())
    }
}
