//! The declared package set

use serde::{Deserialize, Serialize};

use scfg_model::Package;

use crate::error::{Error, Result};

/// Packages declared in the configuration file.
///
/// Names are unique and `packages` stays sorted by name: insertion places each
/// package at its ordered position instead of appending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigurationFile")]
pub struct Configuration {
    packages: Vec<Package>,
}

/// On-disk shape, which may be unsorted or hold duplicate names.
#[derive(Deserialize)]
struct ConfigurationFile {
    #[serde(default)]
    packages: Vec<Package>,
}

impl From<ConfigurationFile> for Configuration {
    fn from(file: ConfigurationFile) -> Self {
        let mut config = Configuration::new();
        for pkg in file.packages {
            let name = pkg.name().to_string();
            if config.insert(pkg).is_err() {
                tracing::warn!(package = %name, "ignoring duplicate package in configuration");
            }
        }
        config
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn position(&self, name: &str) -> std::result::Result<usize, usize> {
        self.packages
            .binary_search_by(|pkg| pkg.name().cmp(name))
    }

    pub fn find(&self, name: &str) -> Option<&Package> {
        self.position(name).ok().map(|i| &self.packages[i])
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Package> {
        self.position(name).ok().map(|i| &mut self.packages[i])
    }

    /// Insert `pkg` at its sorted position. Fails without changes if the name is taken.
    pub fn insert(&mut self, pkg: Package) -> Result<()> {
        match self.position(pkg.name()) {
            Ok(_) => Err(Error::PackageExists {
                name: pkg.name().to_string(),
            }),
            Err(index) => {
                self.packages.insert(index, pkg);
                Ok(())
            }
        }
    }

    /// Remove and return the package called `name`.
    pub fn remove(&mut self, name: &str) -> Result<Package> {
        match self.position(name) {
            Ok(index) => Ok(self.packages.remove(index)),
            Err(_) => Err(Error::PackageMissing {
                name: name.to_string(),
            }),
        }
    }

    /// Declared packages as `manager_id` should see them: each replaced by its
    /// alternate for that manager when one exists.
    pub fn resolved_for(&self, manager_id: &str) -> Vec<Package> {
        self.packages
            .iter()
            .map(|pkg| pkg.resolve_for(manager_id).clone())
            .collect()
    }
}
