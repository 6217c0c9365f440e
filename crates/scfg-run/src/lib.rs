//! Subprocess boundary for system-configurator
//!
//! Everything that touches an external program goes through [`CommandRunner`],
//! so package manager logic can be driven by a stub in tests.

pub mod error;
pub mod runner;

pub use error::{CommandError, Error, ExitFailure, Result};
pub use runner::{CommandRunner, SystemRunner};
