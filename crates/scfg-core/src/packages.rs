//! Package command flows
//!
//! Each flow asks the [`Mode`] which sides it touches before loading the
//! configuration or resolving a manager. Parse errors, configuration I/O and
//! manager resolution abort a flow; a failure on one package is recorded in
//! the report and the batch continues.

use scfg_managers::{ManagerResolver, PackageManager};
use scfg_model::{Mode, Package};
use scfg_run::CommandRunner;

use crate::config::{ConfigStore, Configuration};
use crate::error::{Error, Result};
use crate::sync::{Listing, Report, SyncEngine, merge_diff};

const UNRESOLVED_WARNING: &str =
    "Unable to resolve packages for host manager, showing base configuration";

/// Runs package commands against one configuration file and one host.
pub struct PackageService<'a> {
    mode: Mode,
    store: ConfigStore,
    resolver: &'a ManagerResolver,
    runner: &'a dyn CommandRunner,
}

impl<'a> PackageService<'a> {
    pub fn new(
        mode: Mode,
        store: ConfigStore,
        resolver: &'a ManagerResolver,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            mode,
            store,
            resolver,
            runner,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn load_if_managed(&self) -> Result<Option<Configuration>> {
        if self.mode.manages_configuration() {
            Ok(Some(self.store.load()?))
        } else {
            Ok(None)
        }
    }

    fn manager_if_managed(&self) -> Result<Option<PackageManager<'a>>> {
        if self.mode.manages_system() {
            Ok(Some(self.resolver.resolve(self.runner)?))
        } else {
            Ok(None)
        }
    }

    /// Add every package in `specs` (`name` or `name@version`).
    ///
    /// All specs are parsed before anything is touched. Per package, the
    /// system install runs first and a failure there skips the configuration.
    pub fn add(&self, specs: &[String]) -> Result<Report> {
        let packages = specs
            .iter()
            .map(|spec| Package::parse(spec))
            .collect::<scfg_model::Result<Vec<_>>>()?;

        let mut config = self.load_if_managed()?;
        let manager = self.manager_if_managed()?;

        let mut report = Report::new();
        let mut added = 0;

        for pkg in packages {
            if let Some(manager) = &manager
                && let Err(e) = manager.add_package(&pkg)
            {
                report.warn(format!("Failed to add package `{}`: {}", pkg, e));
                continue;
            }

            if let Some(config) = config.as_mut()
                && let Err(e) = config.insert(pkg.clone())
            {
                report.warn(format!("Failed to add package `{}`: {}", pkg, e));
                continue;
            }

            added += 1;
        }

        if let Some(config) = &config {
            self.store.save(config)?;
        }

        report.action(format!("Successfully added {} packages", added));
        Ok(report)
    }

    /// Remove every package called by one of `names`.
    pub fn remove(&self, names: &[String]) -> Result<Report> {
        let mut config = self.load_if_managed()?;
        let manager = self.manager_if_managed()?;

        let mut report = Report::new();
        let mut removed = 0;

        for name in names {
            if let Some(manager) = &manager
                && let Err(e) = manager.remove_package(name)
            {
                report.warn(format!("Failed to remove package `{}`: {}", name, e));
                continue;
            }

            if let Some(config) = config.as_mut()
                && let Err(e) = config.remove(name)
            {
                report.warn(format!("Failed to remove package `{}`: {}", name, e));
                continue;
            }

            removed += 1;
        }

        if let Some(config) = &config {
            self.store.save(config)?;
        }

        report.action(format!("Successfully removed {} packages", removed));
        Ok(report)
    }

    /// Merge the declared and installed sets for display.
    ///
    /// The declared side is resolved against the host manager's alternates.
    /// When only the configuration is managed and no manager can be found,
    /// the raw configuration is shown with a warning.
    pub fn list(&self) -> Result<Listing> {
        let config = self.load_if_managed()?;
        let manager = self.manager_if_managed()?;
        let mut warnings = Vec::new();

        let declared = match config {
            Some(config) => {
                let host_id = match &manager {
                    Some(manager) => Some(manager.id()),
                    None => self
                        .resolver
                        .find_package_manager(self.runner)
                        .ok()
                        .map(|descriptor| descriptor.id.as_str()),
                };

                match host_id {
                    Some(id) => config.resolved_for(id),
                    None => {
                        tracing::debug!("no host manager, listing base configuration");
                        warnings.push(UNRESOLVED_WARNING.to_string());
                        config.packages().to_vec()
                    }
                }
            }
            None => Vec::new(),
        };

        let installed = match &manager {
            Some(manager) => manager
                .list_packages()
                .map_err(|source| Error::ListPackages { source })?,
            None => Vec::new(),
        };

        Ok(Listing {
            mode: self.mode,
            entries: merge_diff(&declared, &installed),
            warnings,
        })
    }

    /// Reconcile both sides. The configuration is loaded and a manager is
    /// resolved regardless of mode; the configuration is saved only when the
    /// mode manages it.
    pub fn sync(&self) -> Result<Report> {
        let mut config = self.store.load()?;
        let manager = self.resolver.resolve(self.runner)?;

        let report = SyncEngine::new(self.mode, manager).sync(&mut config)?;

        if self.mode.manages_configuration() {
            self.store.save(&config)?;
        }

        Ok(report)
    }

    /// Attach `alternate` to the declared package `base` for `manager_id`.
    ///
    /// Only the configuration is touched, whatever the mode.
    pub fn add_alternate(&self, base: &str, alternate: &str, manager_id: &str) -> Result<Report> {
        let alternate_pkg = Package::parse(alternate)?;
        self.resolver.registry().require(manager_id)?;

        let mut config = self.store.load()?;
        let base_pkg = config
            .find_mut(base)
            .ok_or_else(|| Error::BasePackageMissing {
                name: base.to_string(),
            })?;

        base_pkg
            .add_alternate(manager_id, alternate_pkg)
            .map_err(|source| Error::AlternateRejected {
                alternate: alternate.to_string(),
                source,
            })?;

        self.store.save(&config)?;

        let mut report = Report::new();
        report.action(format!(
            "Successfully added alternate `{}` to `{}`",
            alternate, base
        ));
        Ok(report)
    }
}
