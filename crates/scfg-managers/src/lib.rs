//! Package manager backends for system-configurator
//!
//! Native package managers (apk, apt, brew, dnf, pacman, snap) are described
//! as rows in a [`ManagerRegistry`]. A [`ManagerResolver`] picks the one that
//! fits the host, and a [`PackageManager`] runs its add/remove/list commands
//! through a [`scfg_run::CommandRunner`].

pub mod error;
pub mod host;
pub mod logging;
pub mod manager;
pub mod registry;
pub mod resolver;
pub mod template;

pub use error::{Error, Result};
pub use host::Host;
pub use manager::PackageManager;
pub use registry::{BUILTIN_COUNT, ManagerDescriptor, ManagerRegistry, builtin_descriptors};
pub use resolver::ManagerResolver;
pub use template::VersionTemplate;
