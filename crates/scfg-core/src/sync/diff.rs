//! Ordered difference between declared and installed packages
//!
//! Both sides are sorted by canonical form (`name` or `name@version`) and
//! walked with one cursor each. An exhausted side compares greater than
//! anything, so the sweep ends exactly when both cursors are done.

use std::cmp::Ordering;

use scfg_model::Package;

/// Which side(s) a package was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// Declared and installed
    Unchanged,
    /// Declared only: a candidate for adding to the system
    DeclaredOnly,
    /// Installed only: a candidate for adding to the configuration
    InstalledOnly,
}

impl DiffKind {
    /// Marker shown in hybrid listings.
    pub fn marker(&self) -> &'static str {
        match self {
            DiffKind::Unchanged => " ",
            DiffKind::DeclaredOnly => "+",
            DiffKind::InstalledOnly => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub package: Package,
}

/// Sort by canonical form and collapse repeats, e.g. one package listed once
/// per architecture.
fn sorted(packages: &[Package]) -> Vec<(String, &Package)> {
    let mut keyed: Vec<_> = packages.iter().map(|p| (p.to_string(), p)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    keyed
}

/// Compare two cursors. `None` is exhaustion and sorts after everything.
fn compare(declared: Option<&str>, installed: Option<&str>) -> Ordering {
    match (declared, installed) {
        (Some(d), Some(i)) => d.cmp(i),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merge both sides into one stream in canonical order.
pub fn merge_diff(declared: &[Package], installed: &[Package]) -> Vec<DiffEntry> {
    let declared = sorted(declared);
    let installed = sorted(installed);

    let mut entries = Vec::with_capacity(declared.len().max(installed.len()));
    let (mut d, mut i) = (0, 0);

    while d < declared.len() || i < installed.len() {
        let order = compare(
            declared.get(d).map(|(key, _)| key.as_str()),
            installed.get(i).map(|(key, _)| key.as_str()),
        );

        let (kind, package) = match order {
            Ordering::Equal => {
                let pkg = declared[d].1;
                d += 1;
                i += 1;
                (DiffKind::Unchanged, pkg)
            }
            Ordering::Less => {
                let pkg = declared[d].1;
                d += 1;
                (DiffKind::DeclaredOnly, pkg)
            }
            Ordering::Greater => {
                let pkg = installed[i].1;
                i += 1;
                (DiffKind::InstalledOnly, pkg)
            }
        };

        entries.push(DiffEntry {
            kind,
            package: package.clone(),
        });
    }

    entries
}
