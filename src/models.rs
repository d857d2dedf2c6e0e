use crate::helpers::TRASHINFO_EXTENSION;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// A resolved Trash root with its `files/` and `info/` halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashDirectory {
    pub path: PathBuf,
    pub files_dir: PathBuf,
    pub info_dir: PathBuf,
}

impl TrashDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self {
            files_dir: path.join("files"),
            info_dir: path.join("info"),
            path,
        }
    }

    /// `files/<name>`
    pub fn stored_path(&self, name: &str) -> PathBuf {
        self.files_dir.join(name)
    }

    /// `info/<name>.trashinfo`
    pub fn metadata_path(&self, name: &str) -> PathBuf {
        self.info_dir.join(format!("{name}{TRASHINFO_EXTENSION}"))
    }
}

/// A file, symlink or directory currently held in the Trash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashedItem {
    pub name: String,
    pub stored_path: PathBuf,
    pub metadata_path: PathBuf,
    pub original_path: PathBuf,
    pub deleted_at: NaiveDateTime,
}

impl TrashedItem {
    pub fn new(
        trash: &TrashDirectory,
        name: impl Into<String>,
        original_path: PathBuf,
        deleted_at: NaiveDateTime,
    ) -> Self {
        let name = name.into();
        Self {
            stored_path: trash.stored_path(&name),
            metadata_path: trash.metadata_path(&name),
            name,
            original_path,
            deleted_at,
        }
    }

    pub fn original_path(&self) -> &Path {
        &self.original_path
    }
}

/// Result of emptying the Trash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptySummary {
    pub files_removed: usize,
    pub records_removed: usize,
}
