//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// System Configurator - Keep a declared package list and the host in step
#[derive(Parser, Debug)]
#[command(name = "scfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operating mode: conf[iguration], sys[tem] or hyb[rid]
    #[arg(short, long, global = true, env = "SCFG_MODE")]
    pub mode: Option<String>,

    /// Path to the package configuration file
    #[arg(long, global = true, env = "SCFG_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage packages in the configuration and on the system
    #[command(visible_alias = "pkg")]
    Package {
        #[command(subcommand)]
        action: PackageAction,
    },

    /// Inspect or change the operating mode
    ///
    /// configuration: operations only apply to the configuration file.
    /// system: operations only apply to the host package manager.
    /// hybrid: operations apply to both.
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   scfg completions bash > ~/.local/share/bash-completion/completions/scfg
    ///   scfg completions zsh > ~/.zfunc/_scfg
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Package subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PackageAction {
    /// Add packages
    ///
    /// Examples:
    ///   scfg pkg add ripgrep
    ///   scfg pkg add curl@8.5.0 jq
    #[command(visible_alias = "a")]
    Add {
        /// Packages as `name` or `name@version`
        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Remove packages by name
    #[command(visible_alias = "rm")]
    Remove {
        /// Package names
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// List packages
    ///
    /// In hybrid mode each line is prefixed with a marker:
    /// ` ` in both, `+` only in the configuration, `-` only on the system.
    #[command(visible_alias = "ls")]
    List,

    /// Reconcile the configuration and the system
    Sync,

    /// List supported package managers
    Managers,

    /// Manage per-manager alternate packages
    #[command(visible_alias = "alternate")]
    Alt {
        #[command(subcommand)]
        action: AltAction,
    },
}

/// Alternate subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AltAction {
    /// Add an alternate package used in place of a base package on one manager
    ///
    /// Examples:
    ///   scfg pkg alt add fd fd-find apt
    #[command(visible_alias = "a")]
    Add {
        /// Name of the declared base package
        base: String,

        /// Alternate package as `name` or `name@version`
        alternate: String,

        /// Manager the alternate applies to
        manager: String,
    },
}

/// Mode subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ModeAction {
    /// Print the current mode
    Peak,

    /// Persist a new mode
    Set {
        /// conf[iguration], sys[tem] or hyb[rid]
        mode: String,
    },
}
