//! SyncEngine implementation
//!
//! Reconciles the declared configuration with the host's installed packages.
//! Sync only fills gaps: nothing present on either side is removed or replaced.

use scfg_managers::PackageManager;
use scfg_model::Mode;

use super::diff::{DiffKind, merge_diff};
use super::report::Report;
use crate::config::Configuration;
use crate::error::{Error, Result};

pub struct SyncEngine<'a> {
    mode: Mode,
    manager: PackageManager<'a>,
}

impl<'a> SyncEngine<'a> {
    pub fn new(mode: Mode, manager: PackageManager<'a>) -> Self {
        Self { mode, manager }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply the mode-gated sync actions to `config` and the host.
    ///
    /// - Configuration mode adds installed-only packages to `config`.
    /// - System mode installs declared-only packages.
    /// - Hybrid mode does both.
    ///
    /// Listing the installed packages is the only fatal step; each failed
    /// addition becomes a warning in the report.
    pub fn sync(&self, config: &mut Configuration) -> Result<Report> {
        let declared = config.resolved_for(self.manager.id());
        let installed = self
            .manager
            .list_packages()
            .map_err(|source| Error::ListPackages { source })?;
        let diff = merge_diff(&declared, &installed);

        let mut report = Report::new();

        if self.mode.manages_configuration() {
            for entry in diff.iter().filter(|e| e.kind == DiffKind::InstalledOnly) {
                report.action(format!("[Configuration] Adding package `{}`", entry.package));
                if let Err(e) = config.insert(entry.package.clone()) {
                    report.warn(format!(
                        "[Configuration] Failed to add package `{}`: {}",
                        entry.package, e
                    ));
                }
            }
        }

        if self.mode.manages_system() {
            for entry in diff.iter().filter(|e| e.kind == DiffKind::DeclaredOnly) {
                let identifier = self.manager.format_package(&entry.package);
                report.action(format!("[System] Adding package `{}`", identifier));
                if let Err(e) = self.manager.add_package(&entry.package) {
                    report.warn(format!(
                        "[System] Failed to add package `{}`: {}",
                        identifier, e
                    ));
                }
            }
        }

        Ok(report)
    }
}
