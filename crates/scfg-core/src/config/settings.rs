//! Persisted settings and mode resolution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scfg_fs::StructuredFile;
use scfg_model::Mode;

use crate::error::Result;

/// Environment variable that selects the mode.
pub const MODE_ENV: &str = "SCFG_MODE";

const SETTINGS_FILE: &str = "settings.toml";

/// Tool settings stored in `settings.toml` beside the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Raw mode string; validated when resolved so a bad value only warns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Settings {
    /// Settings path for the configuration at `config_path`.
    pub fn path_for(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(|dir| dir.join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Load settings, treating a missing file as defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(StructuredFile::new(path)?.load_or_default()?)
    }

    /// Load settings, treating an unreadable or malformed file as defaults.
    ///
    /// The second value describes the failure so callers can surface it.
    pub fn load_or_warn(path: &Path) -> (Self, Option<String>) {
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable settings");
                (
                    Self::default(),
                    Some(format!("Ignoring unreadable settings: {}", e)),
                )
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        StructuredFile::new(path)?.save(self)?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode.to_string());
    }
}

/// Where a resolved mode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// `--mode` flag or the mode environment variable
    Explicit,
    /// `settings.toml`
    Settings,
    Default,
}

/// Outcome of [`resolve_mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeResolution {
    pub mode: Mode,
    pub source: ModeSource,
    /// Set when a configured value was invalid and the default was used instead.
    pub warning: Option<String>,
}

/// Pick the mode: explicit value, then persisted setting, then the default.
///
/// The first value present wins. If it does not parse, the default is used
/// and a warning is returned instead of an error.
pub fn resolve_mode(explicit: Option<&str>, settings: &Settings) -> ModeResolution {
    let candidate = explicit
        .filter(|s| !s.is_empty())
        .map(|s| (s, ModeSource::Explicit))
        .or_else(|| {
            settings
                .mode
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| (s, ModeSource::Settings))
        });

    let Some((raw, source)) = candidate else {
        return ModeResolution {
            mode: Mode::default(),
            source: ModeSource::Default,
            warning: None,
        };
    };

    match raw.parse::<Mode>() {
        Ok(mode) => ModeResolution {
            mode,
            source,
            warning: None,
        },
        Err(_) => {
            tracing::debug!(mode = raw, ?source, "invalid mode, using default");
            ModeResolution {
                mode: Mode::default(),
                source: ModeSource::Default,
                warning: Some(format!(
                    "Current mode `{}` is invalid, using default of `{}`",
                    raw,
                    Mode::default()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn settings(mode: Option<&str>) -> Settings {
        Settings {
            mode: mode.map(String::from),
        }
    }

    #[rstest]
    #[case(None, None, Mode::Configuration, ModeSource::Default)]
    #[case(Some("sys"), None, Mode::System, ModeSource::Explicit)]
    #[case(Some("hybrid"), Some("system"), Mode::Hybrid, ModeSource::Explicit)]
    #[case(None, Some("hyb"), Mode::Hybrid, ModeSource::Settings)]
    #[case(Some(""), Some("system"), Mode::System, ModeSource::Settings)]
    fn test_resolution_order(
        #[case] explicit: Option<&str>,
        #[case] persisted: Option<&str>,
        #[case] mode: Mode,
        #[case] source: ModeSource,
    ) {
        let resolved = resolve_mode(explicit, &settings(persisted));
        assert_eq!(resolved.mode, mode);
        assert_eq!(resolved.source, source);
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn test_invalid_mode_warns_and_defaults() {
        let resolved = resolve_mode(Some("both"), &settings(Some("system")));

        assert_eq!(resolved.mode, Mode::Configuration);
        assert_eq!(
            resolved.warning.as_deref(),
            Some("Current mode `both` is invalid, using default of `configuration`")
        );
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "mode = 3\n").unwrap();

        assert!(Settings::load(&path).is_err());

        let (loaded, warning) = Settings::load_or_warn(&path);
        assert_eq!(loaded, Settings::default());
        let warning = warning.unwrap();
        assert!(warning.starts_with("Ignoring unreadable settings: "), "got: {}", warning);
        assert!(warning.contains("settings.toml"), "got: {}", warning);

        let resolved = resolve_mode(None, &loaded);
        assert_eq!(resolved.mode, Mode::Configuration);
        assert_eq!(resolved.source, ModeSource::Default);
    }

    #[test]
    fn test_readable_settings_have_no_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "mode = \"sys\"\n").unwrap();

        let (loaded, warning) = Settings::load_or_warn(&path);
        assert_eq!(loaded.mode.as_deref(), Some("sys"));
        assert!(warning.is_none());
    }

    #[test]
    fn test_settings_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = Settings::path_for(&temp.path().join("config.json"));
        assert!(path.ends_with("settings.toml"));

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());

        let mut saved = Settings::default();
        saved.set_mode(Mode::Hybrid);
        saved.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap().mode.as_deref(), Some("hybrid"));
    }
}
