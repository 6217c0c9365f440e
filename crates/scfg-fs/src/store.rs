//! Format-agnostic structured file loading and saving

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::{FileFormat, Result, io};

/// A structured file on disk whose format is fixed by its extension.
///
/// Loading treats a missing file as "no content yet" when asked to, and
/// saving always goes through [`io::write_atomic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFile {
    path: PathBuf,
    format: FileFormat,
}

impl StructuredFile {
    /// Create a handle for `path`, detecting its format.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and deserialize the file. A missing file is an error.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let content = io::read_text(&self.path)?;
        self.format.parse(&self.path, &content)
    }

    /// Load and deserialize the file, or return `T::default()` when the
    /// file does not exist or is blank.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        match io::read_text_if_exists(&self.path)? {
            Some(content) if !content.trim().is_empty() => self.format.parse(&self.path, &content),
            _ => {
                tracing::debug!(path = %self.path.display(), "no content on disk, using defaults");
                Ok(T::default())
            }
        }
    }

    /// Serialize and atomically write `value`.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let content = self.format.render(&self.path, value)?;
        io::write_atomic(&self.path, content.as_bytes())
    }
}
