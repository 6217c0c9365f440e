//! Error types for scfg-model

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("failed to parse package string: {input}")]
    InvalidPackage { input: String },

    #[error("alternate already exists for `{manager}`")]
    AlternateExists { manager: String },

    #[error("invalid mode: {mode}")]
    InvalidMode { mode: String },
}
