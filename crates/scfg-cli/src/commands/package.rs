//! Package command implementations

use colored::Colorize;
use scfg_core::{ConfigStore, PackageService};
use scfg_managers::ManagerResolver;
use scfg_run::{CommandRunner, SystemRunner};

use super::{Context, print_report, print_warning};
use crate::error::Result;

fn with_service<T>(ctx: &Context, f: impl FnOnce(&PackageService<'_>) -> Result<T>) -> Result<T> {
    let resolver = ManagerResolver::detect();
    let runner = SystemRunner::new();
    let service = PackageService::new(
        ctx.mode,
        ConfigStore::new(&ctx.config_path)?,
        &resolver,
        &runner,
    );
    f(&service)
}

/// Run the `pkg add` command
pub fn run_package_add(ctx: &Context, packages: &[String]) -> Result<()> {
    with_service(ctx, |service| {
        print_report(&service.add(packages)?);
        Ok(())
    })
}

/// Run the `pkg remove` command
pub fn run_package_remove(ctx: &Context, names: &[String]) -> Result<()> {
    with_service(ctx, |service| {
        print_report(&service.remove(names)?);
        Ok(())
    })
}

/// Run the `pkg list` command
pub fn run_package_list(ctx: &Context) -> Result<()> {
    with_service(ctx, |service| {
        let listing = service.list()?;
        for warning in &listing.warnings {
            print_warning(warning);
        }
        for line in listing.lines() {
            println!("{}", line);
        }
        Ok(())
    })
}

/// Run the `pkg sync` command
pub fn run_package_sync(ctx: &Context) -> Result<()> {
    with_service(ctx, |service| {
        print_report(&service.sync()?);
        Ok(())
    })
}

/// Run the `pkg alt add` command
pub fn run_alt_add(ctx: &Context, base: &str, alternate: &str, manager: &str) -> Result<()> {
    with_service(ctx, |service| {
        print_report(&service.add_alternate(base, alternate, manager)?);
        Ok(())
    })
}

/// Run the `pkg managers` command
pub fn run_package_managers() -> Result<()> {
    let resolver = ManagerResolver::detect();
    let runner = SystemRunner::new();
    print!("{}", render_managers(&resolver, &runner));
    Ok(())
}

fn render_managers(resolver: &ManagerResolver, runner: &dyn CommandRunner) -> String {
    let active = resolver
        .find_package_manager(runner)
        .ok()
        .map(|descriptor| descriptor.id.clone());

    let mut out = String::new();
    for id in resolver.registry().list() {
        if active.as_deref() == Some(id) {
            out.push_str(&format!("{} {}\n", "*".green().bold(), id.green()));
        } else {
            out.push_str(&format!("  {}\n", id));
        }
    }
    out
}
