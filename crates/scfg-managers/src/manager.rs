//! Generic package manager executor

use scfg_model::Package;
use scfg_run::CommandRunner;

use crate::error::Result;
use crate::registry::ManagerDescriptor;

/// Drives one manager descriptor through a [`CommandRunner`].
#[derive(Clone, Copy)]
pub struct PackageManager<'a> {
    descriptor: &'a ManagerDescriptor,
    runner: &'a dyn CommandRunner,
}

impl<'a> PackageManager<'a> {
    pub fn new(descriptor: &'a ManagerDescriptor, runner: &'a dyn CommandRunner) -> Self {
        Self { descriptor, runner }
    }

    pub fn id(&self) -> &'a str {
        &self.descriptor.id
    }

    pub fn format_package(&self, pkg: &Package) -> String {
        self.descriptor.format_package(pkg)
    }

    /// Install `pkg`. The runner's failure is returned unmodified.
    pub fn add_package(&self, pkg: &Package) -> Result<()> {
        let args = self.descriptor.add_command(pkg);
        self.runner.run(self.descriptor.command(), &args)?;
        Ok(())
    }

    /// Remove the package called `name`.
    pub fn remove_package(&self, name: &str) -> Result<()> {
        let args = self.descriptor.remove_command(name);
        self.runner.run(self.descriptor.command(), &args)?;
        Ok(())
    }

    /// Installed packages in the order the manager printed them.
    ///
    /// A manager without a list pattern reports nothing and is not invoked.
    pub fn list_packages(&self) -> Result<Vec<Package>> {
        if !self.descriptor.supports_listing() {
            tracing::warn!(
                manager = %self.descriptor.id,
                "listing installed packages is not supported for this manager"
            );
            return Ok(Vec::new());
        }

        let output = self
            .runner
            .output(self.descriptor.command(), &self.descriptor.list_args)?;
        let packages = self.descriptor.parse_list(&output);
        tracing::debug!(manager = %self.descriptor.id, count = packages.len(), "listed installed packages");
        Ok(packages)
    }
}

impl std::fmt::Debug for PackageManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageManager")
            .field("id", &self.descriptor.id)
            .finish()
    }
}
