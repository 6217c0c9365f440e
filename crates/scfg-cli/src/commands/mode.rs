//! Mode command implementations

use scfg_model::Mode;

use super::{Context, load_settings};
use crate::error::{CliError, Result};

/// Run the `mode peak` command
pub fn run_mode_peak(ctx: &Context) -> Result<()> {
    println!("{}", ctx.mode);
    Ok(())
}

/// Run the `mode set` command
pub fn run_mode_set(ctx: &Context, raw: &str) -> Result<()> {
    let mode: Mode = raw
        .parse()
        .map_err(|_| CliError::user(format!("Invalid mode `{}`", raw)))?;

    let mut settings = load_settings(&ctx.settings_path);
    settings.set_mode(mode);
    settings.save(&ctx.settings_path)?;

    tracing::debug!(%mode, path = %ctx.settings_path.display(), "mode persisted");
    Ok(())
}
