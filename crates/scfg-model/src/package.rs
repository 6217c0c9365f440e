//! The package entity
//!
//! A package has a name, an optional version and a map of per-manager
//! alternates. Its canonical text form is `name` or `name@version`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

static PACKAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^@\s]+)(?:$|@(\S+$))$").unwrap());

/// A package as declared in the configuration or reported by a manager.
#[derive(Debug, Clone, Default)]
pub struct Package {
    name: String,
    version: Option<String>,
    alternates: BTreeMap<String, Package>,
    /// Whether the package was read from the object form on disk.
    from_record: bool,
}

impl Package {
    /// Build a package from already-split parts. An empty version means none.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            name: name.into(),
            version: (!version.is_empty()).then_some(version),
            alternates: BTreeMap::new(),
            from_record: false,
        }
    }

    /// Parse `name` or `name@version`.
    ///
    /// Rejects empty input, whitespace anywhere and an empty version after `@`.
    /// No trimming or case normalization is applied.
    pub fn parse(input: &str) -> Result<Self> {
        let captures = PACKAGE_PATTERN
            .captures(input)
            .ok_or_else(|| Error::InvalidPackage {
                input: input.to_string(),
            })?;

        Ok(Self::new(
            &captures[1],
            captures.get(2).map(|m| m.as_str()).unwrap_or_default(),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn alternates(&self) -> &BTreeMap<String, Package> {
        &self.alternates
    }

    /// The alternate registered for `manager_id`, or `self` when there is none.
    pub fn resolve_for(&self, manager_id: &str) -> &Package {
        self.alternates.get(manager_id).unwrap_or(self)
    }

    /// Register an alternate for `manager_id`. Existing alternates are never replaced.
    pub fn add_alternate(&mut self, manager_id: impl Into<String>, pkg: Package) -> Result<()> {
        let manager_id = manager_id.into();
        if self.alternates.contains_key(&manager_id) {
            return Err(Error::AlternateExists {
                manager: manager_id,
            });
        }

        self.alternates.insert(manager_id, pkg);
        Ok(())
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version && self.alternates == other.alternates
    }
}

impl Eq for Package {}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// On-disk object form of a package.
#[derive(Serialize, Deserialize)]
struct PackageRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    alternates: BTreeMap<String, Package>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPackage {
    Spec(String),
    Record(PackageRecord),
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawPackage::deserialize(deserializer)? {
            RawPackage::Spec(spec) => Package::parse(&spec).map_err(serde::de::Error::custom),
            RawPackage::Record(record) => {
                let mut pkg = Package::parse(&record.name).map_err(serde::de::Error::custom)?;
                if pkg.version.is_some() {
                    return Err(serde::de::Error::custom(format!(
                        "package name `{}` must not carry a version",
                        record.name
                    )));
                }
                let version = record.version.filter(|v| !v.is_empty());
                if let Some(version) = &version
                    && version.contains(|c: char| c.is_whitespace() || c == '@')
                {
                    return Err(serde::de::Error::custom(format!(
                        "package version `{}` must not contain whitespace or `@`",
                        version
                    )));
                }
                pkg.from_record = true;
                pkg.version = version;
                pkg.alternates = record.alternates;
                Ok(pkg)
            }
        }
    }
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.from_record && self.alternates.is_empty() {
            return serializer.collect_str(self);
        }

        PackageRecord {
            name: self.name.clone(),
            version: self.version.clone(),
            alternates: self.alternates.clone(),
        }
        .serialize(serializer)
    }
}
