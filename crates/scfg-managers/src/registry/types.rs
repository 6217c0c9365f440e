//! Manager descriptor: one row of the backend table

use regex::Regex;
use scfg_model::Package;

use crate::error::{Error, Result};
use crate::template::VersionTemplate;

/// Everything the generic executor needs to drive one package manager.
#[derive(Debug, Clone)]
pub struct ManagerDescriptor {
    /// Manager id, also the executable name (e.g. "apt", "pacman")
    pub id: String,
    /// Arguments placed before the package identifier when installing
    pub add_args: Vec<String>,
    /// Arguments placed before the package name when removing
    pub remove_args: Vec<String>,
    /// Arguments that make the manager print its installed packages
    pub list_args: Vec<String>,
    /// Line pattern with two capture groups (name, version). `None` when the
    /// manager's list output has no known shape.
    pub list_pattern: Option<Regex>,
    /// Turns a versioned package into the manager's identifier
    pub version_template: VersionTemplate,
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

impl ManagerDescriptor {
    /// Build a descriptor. An empty `list_pattern` means listing is unsupported.
    pub fn new(
        id: impl Into<String>,
        add_args: &[&str],
        remove_args: &[&str],
        list_args: &[&str],
        list_pattern: &str,
        version_template: &str,
    ) -> Result<Self> {
        let id = id.into();

        let list_pattern = if list_pattern.is_empty() {
            None
        } else {
            let re = Regex::new(list_pattern).map_err(|e| Error::InvalidPattern {
                id: id.clone(),
                message: e.to_string(),
            })?;
            if re.captures_len() != 3 {
                return Err(Error::InvalidPattern {
                    id,
                    message: format!(
                        "expected 2 capture groups, found {}",
                        re.captures_len() - 1
                    ),
                });
            }
            Some(re)
        };

        Ok(Self {
            add_args: owned(add_args),
            remove_args: owned(remove_args),
            list_args: owned(list_args),
            list_pattern,
            version_template: VersionTemplate::parse(version_template)?,
            id,
        })
    }

    /// The executable to invoke.
    pub fn command(&self) -> &str {
        &self.id
    }

    pub fn supports_listing(&self) -> bool {
        self.list_pattern.is_some()
    }

    /// Manager-specific identifier for `pkg`.
    ///
    /// Versionless packages, and templates that fail to render, yield the bare name.
    pub fn format_package(&self, pkg: &Package) -> String {
        if pkg.version().is_none() {
            return pkg.name().to_string();
        }

        match self.version_template.render(pkg) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::debug!(manager = %self.id, error = %e, "falling back to bare package name");
                pkg.name().to_string()
            }
        }
    }

    /// Full argument list for installing `pkg`. The formatted identifier is
    /// split on whitespace so templates may carry extra flags.
    pub fn add_command(&self, pkg: &Package) -> Vec<String> {
        let mut args = self.add_args.clone();
        args.extend(
            self.format_package(pkg)
                .split_whitespace()
                .map(str::to_string),
        );
        args
    }

    /// Full argument list for removing the package called `name`.
    pub fn remove_command(&self, name: &str) -> Vec<String> {
        let mut args = self.remove_args.clone();
        args.push(name.to_string());
        args
    }

    /// Extract a package from one line of list output. Non-matching lines yield `None`.
    pub fn parse_line(&self, line: &str) -> Option<Package> {
        let captures = self.list_pattern.as_ref()?.captures(line)?;
        let name = captures.get(1)?.as_str();
        let version = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        Some(Package::new(name, version))
    }

    /// Extract every package from list output, in output order.
    pub fn parse_list(&self, output: &str) -> Vec<Package> {
        output
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let pkg = self.parse_line(line);
                if pkg.is_none() {
                    tracing::trace!(manager = %self.id, line, "skipping unparsed line");
                }
                pkg
            })
            .collect()
    }
}
