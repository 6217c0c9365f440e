//! Command implementations for scfg-cli

pub mod completions;
pub mod mode;
pub mod package;

use std::path::{Path, PathBuf};

use colored::Colorize;
use scfg_core::{Report, Settings, default_config_path, resolve_mode};
use scfg_model::Mode;

pub use completions::run_completions;
pub use mode::{run_mode_peak, run_mode_set};
pub use package::{
    run_alt_add, run_package_add, run_package_list, run_package_managers, run_package_remove,
    run_package_sync,
};

/// Paths and mode shared by every command that touches the configuration.
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: PathBuf,
    pub settings_path: PathBuf,
    pub mode: Mode,
}

impl Context {
    /// Resolve the configuration path and the effective mode.
    ///
    /// Settings are only read when no explicit mode is given. An unreadable
    /// settings file or an unusable mode falls back to the default after
    /// printing a warning.
    pub fn resolve(config: Option<PathBuf>, mode: Option<&str>) -> Self {
        let config_path = config.unwrap_or_else(default_config_path);
        let settings_path = Settings::path_for(&config_path);

        let explicit = mode.filter(|m| !m.is_empty());
        let settings = if explicit.is_some() {
            Settings::default()
        } else {
            load_settings(&settings_path)
        };

        let resolution = resolve_mode(explicit, &settings);
        if let Some(warning) = &resolution.warning {
            print_warning(warning);
        }
        tracing::debug!(
            mode = %resolution.mode,
            source = ?resolution.source,
            config = %config_path.display(),
            "resolved context"
        );

        Self {
            config_path,
            settings_path,
            mode: resolution.mode,
        }
    }
}

/// Read settings, printing a warning instead of failing on a bad file.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let (settings, warning) = Settings::load_or_warn(path);
    if let Some(warning) = &warning {
        print_warning(warning);
    }
    settings
}

pub(crate) fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Actions go to stdout, warnings to stderr.
pub(crate) fn print_report(report: &Report) {
    for warning in &report.warnings {
        print_warning(warning);
    }
    for action in &report.actions {
        println!("{}", action);
    }
}
