//! Built-in manager descriptors
//!
//! Every supported backend is one row here. Adding a manager means adding a
//! row; nothing else in the crate branches on manager ids.

use super::ManagerDescriptor;

/// Number of built-in managers.
pub const BUILTIN_COUNT: usize = 6;

fn row(
    id: &str,
    add: &[&str],
    remove: &[&str],
    list: &[&str],
    pattern: &str,
    template: &str,
) -> ManagerDescriptor {
    ManagerDescriptor::new(id, add, remove, list, pattern, template)
        .expect("built-in manager descriptor is valid")
}

/// Returns all built-in manager descriptors.
pub fn builtin_descriptors() -> Vec<ManagerDescriptor> {
    vec![
        row(
            "apk",
            &["add"],
            &["del"],
            &["list", "--installed"],
            r"^([\w-]+)-(\S+-\S+)",
            "{name}={version}",
        ),
        row(
            "apt",
            &["install", "-y"],
            &["remove"],
            &["list", "--installed"],
            r"^([\w-]+)/.*?\s(\S+)",
            "{name}={version}",
        ),
        row(
            "brew",
            &["install"],
            &["remove"],
            &["list", "--versions"],
            r"^([\w-]+)\s(\S+)",
            "{name}",
        ),
        row(
            "dnf",
            &["install", "-y"],
            &["erase"],
            &["list", "--installed"],
            r"^(\S+)\.\w+\s+(\S+?)-",
            "{name}-{version}",
        ),
        // snap's list output has no known line shape yet
        row(
            "snap",
            &["install", "--classic"],
            &["remove"],
            &["list"],
            "",
            "{name} --channel={version}",
        ),
        row(
            "pacman",
            &["-S", "--noconfirm"],
            &["-Rscn", "--noconfirm"],
            &["-Q"],
            r"^([\w.-]+)\s(\S+)",
            "{name}={version}",
        ),
    ]
}
