//! Operating mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which side(s) a package command reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only the configuration file is read and written.
    #[default]
    Configuration,

    /// Only the host package manager is queried and driven.
    System,

    /// Both sides. Sync fills gaps in either direction and never removes.
    Hybrid,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Configuration, Mode::System, Mode::Hybrid];

    /// True for `Configuration` and `Hybrid`.
    pub fn manages_configuration(&self) -> bool {
        matches!(self, Mode::Configuration | Mode::Hybrid)
    }

    /// True for `System` and `Hybrid`.
    pub fn manages_system(&self) -> bool {
        matches!(self, Mode::System | Mode::Hybrid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Configuration => "configuration",
            Mode::System => "system",
            Mode::Hybrid => "hybrid",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conf" | "configuration" => Ok(Mode::Configuration),
            "sys" | "system" => Ok(Mode::System),
            "hyb" | "hybrid" => Ok(Mode::Hybrid),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
