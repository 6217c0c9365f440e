//! Filesystem layer for system-configurator
//!
//! Provides locked atomic writes and format-agnostic loading/saving of the
//! structured files the tool persists (package configuration, settings).

pub mod error;
pub mod format;
pub mod io;
pub mod store;

pub use error::{Error, Result};
pub use format::FileFormat;
pub use store::StructuredFile;
