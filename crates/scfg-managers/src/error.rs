//! Error types for scfg-managers

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to find a supported package manager on host system")]
    NoManagerFound,

    #[error("Invalid manager `{id}`, valid managers are:\n{}", .valid.join("\n"))]
    UnknownManager { id: String, valid: Vec<String> },

    #[error(transparent)]
    Run(#[from] scfg_run::Error),

    #[error("invalid version template `{template}`: {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("invalid list pattern for `{id}`: {message}")]
    InvalidPattern { id: String, message: String },
}
