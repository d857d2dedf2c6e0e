//! Trash root resolution.
//!
//! The root lives at `$HOME/.local/share/Trash`. When that path is itself a
//! symbolic link the link is followed exactly once; a link that points at
//! another link is refused.

use crate::errors::TrashError;
use crate::fs::FileSystem;
use crate::helpers::sanitize_user_path;
use crate::models::TrashDirectory;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the Trash relative to the home directory.
pub const HOME_TRASH_RELATIVE: &str = ".local/share/Trash";

/// The well-known, unresolved Trash location for `home`.
pub fn home_trash_path(home: &Path) -> PathBuf {
    home.join(HOME_TRASH_RELATIVE)
}

/// Resolves the Trash root for `home`.
///
/// A missing Trash directory resolves to the well-known path; creating it is
/// left to the operation that needs it.
pub fn resolve_trash_root(fs: &dyn FileSystem, home: &Path) -> crate::Result<PathBuf> {
    if home.as_os_str().is_empty() {
        return Err(TrashError::path_resolution("home directory is not set"));
    }

    let well_known = home_trash_path(home);
    let metadata = match fs.symlink_metadata(&well_known) {
        Ok(metadata) => metadata,
        Err(TrashError::Io(_, err)) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(well_known);
        }
        Err(err) => {
            return Err(TrashError::path_resolution(format!(
                "cannot inspect {}: {err}",
                sanitize_user_path(&well_known)
            )));
        }
    };

    if !metadata.file_type().is_symlink() {
        return Ok(well_known);
    }

    let target = fs.read_link(&well_known).map_err(|err| {
        TrashError::path_resolution(format!(
            "cannot read link {}: {err}",
            sanitize_user_path(&well_known)
        ))
    })?;
    let target = match well_known.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target,
    };

    if let Ok(next) = fs.symlink_metadata(&target) {
        if next.file_type().is_symlink() {
            return Err(TrashError::path_resolution(format!(
                "{} links to another symlink {}",
                sanitize_user_path(&well_known),
                sanitize_user_path(&target)
            )));
        }
    }

    debug!(link = %well_known.display(), target = %target.display(), "trash directory is a symlink");
    Ok(target)
}

/// Resolves the Trash root and derives its `files/` and `info/` directories.
pub fn resolve_trash_directory(fs: &dyn FileSystem, home: &Path) -> crate::Result<TrashDirectory> {
    let trash = TrashDirectory::new(resolve_trash_root(fs, home)?);
    debug!(
        files = %trash.files_dir.display(),
        info = %trash.info_dir.display(),
        "found trash directories"
    );
    Ok(trash)
}
