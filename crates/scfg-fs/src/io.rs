//! Locked, atomic replacement of files on disk

use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self as stdio, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Exclusive advisory lock on `<name>.lock` beside a target file.
///
/// Every writer of the same target opens the same lock file, so holders are
/// serialized across processes. Released on drop.
struct TargetLock {
    file: File,
    path: PathBuf,
}

impl TargetLock {
    fn acquire(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        FileExt::lock_exclusive(&file).map_err(|_| Error::LockFailed { path: path.clone() })?;
        tracing::trace!(lock = %path.display(), "acquired write lock");

        Ok(Self { file, path })
    }
}

impl Drop for TargetLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::debug!(lock = %self.path.display(), error = %e, "failed to release write lock");
        }
    }
}

/// `.<name>.<suffix>` in the same directory as the target.
fn sibling(dir: &Path, name: &OsStr, suffix: &str) -> PathBuf {
    dir.join(format!(".{}.{}", name.to_string_lossy(), suffix))
}

/// Replace `path` with `content`.
///
/// Holding the target's lock, the bytes are staged in a sibling file, synced
/// and renamed over `path`. Readers see the old or the new content, and two
/// saves of the same target never interleave. Missing parent directories are
/// created.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let name = path.file_name().ok_or_else(|| {
        Error::io(
            path,
            stdio::Error::new(ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let _lock = TargetLock::acquire(sibling(dir, name, "lock"))?;

    let staged = sibling(dir, name, "tmp");
    let written = File::create(&staged)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .map_err(|e| Error::io(&staged, e))
        .and_then(|()| fs::rename(&staged, path).map_err(|e| Error::io(path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&staged);
    }
    written?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "replaced file");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file, returning `None` when it does not exist.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
