//! The command runner seam and its process-backed implementation

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{CommandError, Error, ExitFailure, Result};

/// Executes external programs on behalf of the package manager layer.
///
/// Every call blocks until the child exits. There is no timeout and no retry.
pub trait CommandRunner {
    /// Run `program` with `args`. Stdout goes to the terminal, stderr is captured
    /// for the error on failure.
    fn run(&self, program: &str, args: &[String]) -> Result<()>;

    /// Run `program` with `args` and return everything it wrote to stdout.
    fn output(&self, program: &str, args: &[String]) -> Result<String>;

    /// Locate an executable on the search path.
    fn find(&self, name: &str) -> Result<PathBuf>;
}

/// Runs real subprocesses via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn argv(program: &str, args: &[String]) -> Vec<String> {
    std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect()
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        tracing::debug!(program, ?args, "running command");

        let result = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output();

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                return Err(CommandError::new(argv(program, args), ExitFailure::Spawn(e), "").into());
            }
        };

        if !output.status.success() {
            return Err(CommandError::new(
                argv(program, args),
                ExitFailure::Status(output.status.code()),
                String::from_utf8_lossy(&output.stderr),
            )
            .into());
        }

        Ok(())
    }

    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        tracing::debug!(program, ?args, "capturing command output");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CommandError::new(argv(program, args), ExitFailure::Spawn(e), ""))?;

        if !output.status.success() {
            return Err(CommandError::new(
                argv(program, args),
                ExitFailure::Status(output.status.code()),
                String::from_utf8_lossy(&output.stderr),
            )
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn find(&self, name: &str) -> Result<PathBuf> {
        which::which(name).map_err(|_| Error::NotFound {
            name: name.to_string(),
        })
    }
}
