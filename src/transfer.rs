//! Device-aware moves and link-preserving copies.
//!
//! A move checks device ids first: on the same device it is a single
//! `rename`, otherwise the entry is copied in full and only then is the
//! source removed. Symlinks are always carried as links, never as the
//! content they point to.

use crate::errors::TrashError;
use crate::fs::FileSystem;
use crate::helpers::sanitize_user_path;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// How a transfer was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Atomic rename within one filesystem device.
    Rename,
    /// Full copy followed by removal of the source.
    CopyThenRemove,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => f.write_str("rename"),
            Self::CopyThenRemove => f.write_str("copy+remove"),
        }
    }
}

/// Moves `source` to `destination`, choosing the strategy from device ids.
///
/// A failed copy leaves a partial destination behind and the source intact.
pub fn transfer(fs: &dyn FileSystem, source: &Path, destination: &Path) -> crate::Result<Strategy> {
    let destination_dir = destination.parent().ok_or_else(|| {
        TrashError::invalid_argument(format!(
            "{} has no parent directory",
            sanitize_user_path(destination)
        ))
    })?;

    let strategy = if fs.same_device(source, destination_dir)? {
        Strategy::Rename
    } else {
        Strategy::CopyThenRemove
    };
    debug!(
        from = %source.display(),
        to = %destination.display(),
        %strategy,
        "transferring"
    );

    make_room(fs, source, destination, strategy)?;
    match strategy {
        Strategy::Rename => fs.rename(source, destination)?,
        Strategy::CopyThenRemove => {
            copy_entry(fs, source, destination)?;
            remove_entry(fs, source)?;
        }
    }
    Ok(strategy)
}

/// Removes an existing `destination` only when `strategy` cannot replace it
/// in place. A rename replaces any non-directory over a non-directory, and a
/// copy truncates a regular file over a regular file. Returns whether
/// something was removed.
pub fn make_room(
    fs: &dyn FileSystem,
    source: &Path,
    destination: &Path,
    strategy: Strategy,
) -> crate::Result<bool> {
    let Ok(existing) = fs.symlink_metadata(destination) else {
        return Ok(false);
    };
    let source_type = fs.symlink_metadata(source)?.file_type();
    let replaced_in_place = match strategy {
        Strategy::Rename => !existing.is_dir() && !source_type.is_dir(),
        Strategy::CopyThenRemove => existing.is_file() && source_type.is_file(),
    };
    if replaced_in_place {
        return Ok(false);
    }
    debug!(path = %destination.display(), "removing existing destination");
    remove_entry(fs, destination)?;
    Ok(true)
}

/// Copies a file, symlink or directory tree from `source` to `destination`.
pub fn copy_entry(fs: &dyn FileSystem, source: &Path, destination: &Path) -> crate::Result<()> {
    let file_type = fs.symlink_metadata(source)?.file_type();

    if file_type.is_symlink() {
        let target = fs.read_link(source)?;
        fs.symlink(&target, destination)
    } else if file_type.is_dir() {
        fs.create_dir_all(destination)?;
        for child in fs.list_dir(source)? {
            let Some(name) = child.file_name() else {
                continue;
            };
            copy_entry(fs, &child, &destination.join(name))?;
        }
        Ok(())
    } else if file_type.is_file() {
        fs.copy_file(source, destination).map(|_| ())
    } else {
        Err(TrashError::io(
            source,
            io::Error::new(
                io::ErrorKind::Unsupported,
                "cannot copy special file (fifo, socket or device)",
            ),
        ))
    }
}

/// Removes a file, symlink or directory tree. Symlinks are unlinked, not followed.
pub fn remove_entry(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    if fs.symlink_metadata(path)?.is_dir() {
        fs.remove_dir_all(path)
    } else {
        fs.remove_file(path)
    }
}
