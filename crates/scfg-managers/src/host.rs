//! Host detection
//!
//! Maps the running operating system (and on Linux, the distribution) to an
//! ordered list of plausible package managers. Order expresses preference.

use std::fs;
use std::path::PathBuf;

/// Default location of the distribution identification file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Vendor reported when the distribution is unknown or unreadable.
pub const OTHER_VENDOR: &str = "other";

const VENDOR_MANAGERS: &[(&str, &[&str])] = &[
    ("alpine", &["apk"]),
    ("arch", &["pacman"]),
    ("debian", &["apt", "snap"]),
    ("fedora", &["dnf"]),
    ("ubuntu", &["apt", "snap"]),
    (OTHER_VENDOR, &["apk", "apt", "dnf", "snap", "pacman", "brew"]),
];

/// Candidate manager ids for a Linux vendor. Unknown vendors get the full list.
pub fn managers_for_vendor(vendor: &str) -> &'static [&'static str] {
    VENDOR_MANAGERS
        .iter()
        .find(|(v, _)| *v == vendor)
        .or_else(|| VENDOR_MANAGERS.iter().find(|(v, _)| *v == OTHER_VENDOR))
        .map(|(_, managers)| *managers)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostKind {
    Linux { os_release: PathBuf },
    MacOs,
    Other,
}

/// The operating system the tool runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    kind: HostKind,
}

impl Host {
    /// Describe the host this binary was built for.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::macos()
        } else if cfg!(target_os = "linux") {
            Self::linux(OS_RELEASE_PATH)
        } else {
            Self {
                kind: HostKind::Other,
            }
        }
    }

    /// A Linux host whose distribution is read from `os_release`.
    pub fn linux(os_release: impl Into<PathBuf>) -> Self {
        Self {
            kind: HostKind::Linux {
                os_release: os_release.into(),
            },
        }
    }

    pub fn macos() -> Self {
        Self {
            kind: HostKind::MacOs,
        }
    }

    /// Distribution vendor (`ID=` in os-release), or [`OTHER_VENDOR`].
    pub fn vendor(&self) -> String {
        match &self.kind {
            HostKind::Linux { os_release } => match fs::read_to_string(os_release) {
                Ok(content) => parse_vendor(&content),
                Err(e) => {
                    tracing::warn!(
                        path = %os_release.display(),
                        error = %e,
                        "unable to read os-release, trying every manager"
                    );
                    OTHER_VENDOR.to_string()
                }
            },
            HostKind::MacOs => "macos".to_string(),
            HostKind::Other => OTHER_VENDOR.to_string(),
        }
    }

    /// Ordered manager ids worth probing on this host.
    pub fn candidate_managers(&self) -> &'static [&'static str] {
        match &self.kind {
            HostKind::MacOs => &["brew"],
            _ => managers_for_vendor(&self.vendor()),
        }
    }
}

fn parse_vendor(content: &str) -> String {
    let vendor = content
        .lines()
        .filter_map(|line| line.strip_prefix("ID="))
        .last()
        .map(|value| value.trim().trim_matches(|c| c == '"' || c == '\''))
        .unwrap_or(OTHER_VENDOR);

    if VENDOR_MANAGERS.iter().any(|(v, _)| *v == vendor) {
        vendor.to_string()
    } else {
        tracing::debug!(vendor, "unrecognized distribution");
        OTHER_VENDOR.to_string()
    }
}
