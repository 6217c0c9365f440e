//! Shared test utilities for the system-configurator workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`runner`]: [`StubRunner`], a scripted command runner
//! - [`home`]: [`TestHome`], a temporary configuration directory

pub mod home;
pub mod runner;

pub use home::TestHome;
pub use runner::StubRunner;
