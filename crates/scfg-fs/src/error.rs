//! Error types for scfg-fs

use std::path::PathBuf;

/// Result type for scfg-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scfg-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} file at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Failed to serialize {format} file at {path}: {message}")]
    Serialize {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Unsupported file format `{extension}` for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
