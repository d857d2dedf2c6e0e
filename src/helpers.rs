//! Small shared helpers: timestamp layout, name handling and path rendering.

use crate::errors::TrashError;
use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// File extension used by trash info files.
pub const TRASHINFO_EXTENSION: &str = ".trashinfo";

/// Deletion date format used by Trash info metadata.
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used when listing deletion dates to a user.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a deletion date in the fixed `YYYY-MM-DDTHH:MM:SS` layout.
///
/// Fractional seconds, zone offsets and any other layout are rejected.
pub fn parse_trash_datetime(value: &str) -> crate::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TRASHINFO_TIME_FORMAT)
        .map_err(|_| TrashError::InvalidTimestamp(value.to_string()))
}

/// Serializes a datetime into the trash format, dropping sub-second precision.
pub fn format_trash_datetime(time: &NaiveDateTime) -> String {
    time.format(TRASHINFO_TIME_FORMAT).to_string()
}

/// Converts a wall-clock reading to local time truncated to whole seconds.
pub fn local_naive_time(time: SystemTime) -> NaiveDateTime {
    let local = DateTime::<Local>::from(time).naive_local();
    local.with_nanosecond(0).unwrap_or(local)
}

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Returns the final component of `path` as UTF-8.
pub fn base_name(path: &Path) -> crate::Result<&str> {
    path.file_name()
        .ok_or_else(|| {
            TrashError::invalid_argument(format!("{} has no file name", sanitize_user_path(path)))
        })?
        .to_str()
        .ok_or_else(|| {
            TrashError::invalid_argument(format!(
                "{} is not valid UTF-8",
                sanitize_user_path(path)
            ))
        })
}

/// Makes `path` absolute against the current directory without touching symlinks.
pub fn absolute_path(path: &Path) -> crate::Result<PathBuf> {
    std::path::absolute(path).map_err(|err| TrashError::io(path, err))
}

/// Rejects arguments whose last component is `.` or `..`, as `rm` does.
pub fn reject_dot_path(path: &Path) -> crate::Result<()> {
    let raw = path.to_string_lossy();
    let last = raw.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    if last == "." || last == ".." {
        return Err(TrashError::invalid_argument(format!(
            "refusing to operate on '.' or '..': {}",
            sanitize_user_path(path)
        )));
    }
    Ok(())
}

/// Drops `.` components and folds `..` into its parent without touching the
/// filesystem. Only meant for containment checks.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
