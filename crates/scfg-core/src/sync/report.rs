//! Command reports and listings

use scfg_model::Mode;

use super::diff::DiffEntry;

/// What a package command did and what it had to skip.
///
/// Per-item failures never abort a batch; they end up in `warnings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Actions taken, in order
    pub actions: Vec<String>,
    /// Non-fatal problems, in order
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.actions.push(message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(warning = true, "{}", message);
        self.warnings.push(message);
    }

    /// True when nothing had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The merged declared/installed view produced by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub mode: Mode,
    pub entries: Vec<DiffEntry>,
    pub warnings: Vec<String>,
}

impl Listing {
    /// Display lines. Hybrid mode prefixes each with its difference marker.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match self.mode {
                Mode::Hybrid => format!("{} {}", entry.kind.marker(), entry.package),
                _ => entry.package.to_string(),
            })
            .collect()
    }
}
