//! Core orchestration layer for system-configurator
//!
//! - **Configuration**: the declared, name-ordered package set and its store
//! - **Mode resolution**: flag/env, persisted setting, default
//! - **Reconciliation**: ordered merge-diff and the mode-gated [`SyncEngine`]
//! - **Package flows**: add, remove, list, sync and alternates via [`PackageService`]
//!
//! ```text
//!                 scfg-cli
//!                     |
//!                 scfg-core
//!                     |
//!        +------------+-----------+
//!        |            |           |
//!    scfg-fs   scfg-managers  scfg-model
//!                     |
//!                 scfg-run
//! ```

pub mod config;
pub mod error;
pub mod packages;
pub mod sync;

pub use config::{
    CONFIG_ENV, ConfigStore, Configuration, MODE_ENV, ModeResolution, ModeSource, Settings,
    default_config_path, resolve_mode,
};
pub use error::{Error, Result};
pub use packages::PackageService;
pub use sync::{DiffEntry, DiffKind, Listing, Report, SyncEngine, merge_diff};
