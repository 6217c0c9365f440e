//! System Configurator CLI
//!
//! Keeps a declared package list and the host's package manager in step.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{AltAction, Cli, Commands, ModeAction, PackageAction};
use commands::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli {
        verbose,
        mode,
        config,
        command,
    } = Cli::parse();

    init_tracing(verbose);

    let Some(command) = command else {
        println!("{} System Configurator CLI", "scfg".green().bold());
        println!();
        println!("Run {} for available commands.", "scfg --help".cyan());
        return Ok(());
    };

    match command {
        Commands::Completions { shell } => commands::run_completions(shell),
        Commands::Package {
            action: PackageAction::Managers,
        } => commands::run_package_managers(),
        Commands::Package { action } => {
            let ctx = Context::resolve(config, mode.as_deref());
            cmd_package(&ctx, action)
        }
        Commands::Mode { action } => {
            let ctx = Context::resolve(config, mode.as_deref());
            match action {
                ModeAction::Peak => commands::run_mode_peak(&ctx),
                ModeAction::Set { mode } => commands::run_mode_set(&ctx, &mode),
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    } else if let Err(e) = scfg_managers::logging::init() {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
}

fn cmd_package(ctx: &Context, action: PackageAction) -> Result<()> {
    match action {
        PackageAction::Add { packages } => commands::run_package_add(ctx, &packages),
        PackageAction::Remove { names } => commands::run_package_remove(ctx, &names),
        PackageAction::List => commands::run_package_list(ctx),
        PackageAction::Sync => commands::run_package_sync(ctx),
        PackageAction::Managers => commands::run_package_managers(),
        PackageAction::Alt {
            action:
                AltAction::Add {
                    base,
                    alternate,
                    manager,
                },
        } => commands::run_alt_add(ctx, &base, &alternate, &manager),
    }
}
