//! Value types shared across system-configurator
//!
//! - [`Package`]: a declared or installed package, with per-manager alternates
//! - [`Mode`]: which side(s) (configuration, system) a command touches

pub mod error;
pub mod mode;
pub mod package;

pub use error::{Error, Result};
pub use mode::Mode;
pub use package::Package;
