//! Error types for scfg-run

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("executable not found: {name}")]
    NotFound { name: String },
}

/// Why a subprocess did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ExitFailure {
    /// The process could not be started at all.
    #[error("{0}")]
    Spawn(#[source] std::io::Error),

    /// The process ran and exited unsuccessfully. `None` means it was killed by a signal.
    #[error("{}", describe_status(.0))]
    Status(Option<i32>),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// A failed subprocess invocation with the full argv and whatever it wrote to stderr.
///
/// Rendered as `<stderr, newline-terminated><argv[0]>: <failure>`.
#[derive(Debug)]
pub struct CommandError {
    pub args: Vec<String>,
    pub failure: ExitFailure,
    pub stderr: String,
}

impl CommandError {
    pub fn new(args: Vec<String>, failure: ExitFailure, stderr: impl Into<String>) -> Self {
        Self {
            args,
            failure,
            stderr: stderr.into(),
        }
    }

    pub fn program(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// Exit code of the process, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self.failure {
            ExitFailure::Status(code) => code,
            ExitFailure::Spawn(_) => None,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.stderr.is_empty() {
            f.write_str(&self.stderr)?;
            if !self.stderr.ends_with('\n') {
                f.write_str("\n")?;
            }
        }
        write!(f, "{}: {}", self.program(), self.failure)
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}
