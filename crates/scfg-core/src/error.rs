//! Error types for scfg-core

/// Result type for scfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scfg-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Inserting a package whose name is already declared
    #[error("package already exists in configuration")]
    PackageExists { name: String },

    /// Removing or looking up a package that is not declared
    #[error("package does not exist in configuration")]
    PackageMissing { name: String },

    /// Base package for an alternate is not declared
    #[error("Unable to find base package `{name}`")]
    BasePackageMissing { name: String },

    /// The base package refused the alternate
    #[error("Failed to add alternate `{alternate}`: {source}")]
    AlternateRejected {
        alternate: String,
        #[source]
        source: scfg_model::Error,
    },

    #[error("unable to load configuration: {source}")]
    LoadConfiguration {
        #[source]
        source: scfg_fs::Error,
    },

    #[error("unable to write configuration: {source}")]
    WriteConfiguration {
        #[source]
        source: scfg_fs::Error,
    },

    /// The host manager could not report its installed packages
    #[error("Unable to read system packages: {source}")]
    ListPackages {
        #[source]
        source: scfg_managers::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from scfg-fs
    #[error(transparent)]
    Fs(#[from] scfg_fs::Error),

    /// Package or mode error from scfg-model
    #[error(transparent)]
    Model(#[from] scfg_model::Error),

    /// Resolution or registry error from scfg-managers
    #[error(transparent)]
    Managers(#[from] scfg_managers::Error),
}
