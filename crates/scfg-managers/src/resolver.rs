//! Manager resolution
//!
//! Probes the host's candidate managers in preference order and remembers the
//! first one found for the rest of the run.

use std::cell::OnceCell;

use scfg_run::CommandRunner;

use crate::error::{Error, Result};
use crate::host::Host;
use crate::manager::PackageManager;
use crate::registry::{ManagerDescriptor, ManagerRegistry};

#[derive(Debug)]
pub struct ManagerResolver {
    registry: ManagerRegistry,
    host: Host,
    resolved: OnceCell<String>,
}

impl ManagerResolver {
    pub fn new(registry: ManagerRegistry, host: Host) -> Self {
        Self {
            registry,
            host,
            resolved: OnceCell::new(),
        }
    }

    /// Built-in managers on the detected host.
    pub fn detect() -> Self {
        Self::new(ManagerRegistry::with_builtins(), Host::detect())
    }

    pub fn registry(&self) -> &ManagerRegistry {
        &self.registry
    }

    /// The manager found by an earlier successful resolution, without probing.
    pub fn cached(&self) -> Option<&ManagerDescriptor> {
        self.resolved.get().and_then(|id| self.registry.get(id))
    }

    /// Find the host's package manager.
    ///
    /// The first candidate whose executable is on the search path and that the
    /// registry knows wins. Only a success is cached.
    pub fn find_package_manager(&self, runner: &dyn CommandRunner) -> Result<&ManagerDescriptor> {
        if let Some(descriptor) = self.cached() {
            return Ok(descriptor);
        }

        for &id in self.host.candidate_managers() {
            let Some(descriptor) = self.registry.get(id) else {
                continue;
            };

            match runner.find(descriptor.command()) {
                Ok(path) => {
                    tracing::debug!(manager = id, path = %path.display(), "resolved package manager");
                    let _ = self.resolved.set(descriptor.id.clone());
                    return Ok(descriptor);
                }
                Err(e) => tracing::debug!(manager = id, error = %e, "manager not present"),
            }
        }

        Err(Error::NoManagerFound)
    }

    /// Resolve and bind the manager to `runner` in one step.
    pub fn resolve<'a>(&'a self, runner: &'a dyn CommandRunner) -> Result<PackageManager<'a>> {
        let descriptor = self.find_package_manager(runner)?;
        Ok(PackageManager::new(descriptor, runner))
    }

    /// Forget the cached manager so the next call probes again.
    pub fn reset(&mut self) {
        self.resolved.take();
    }
}
