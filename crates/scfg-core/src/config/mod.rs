//! Configuration file, persisted settings and mode resolution
//!
//! Resolution order for the configuration path is `--config`, then
//! [`CONFIG_ENV`], then [`default_config_path`]. The mode comes from `--mode`
//! or [`MODE_ENV`], then `settings.toml` beside the configuration, then the
//! default.

mod configuration;
mod settings;
mod store;

pub use configuration::Configuration;
pub use settings::{MODE_ENV, ModeResolution, ModeSource, Settings, resolve_mode};
pub use store::{CONFIG_ENV, ConfigStore, default_config_path};
