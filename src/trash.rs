//! The four Trash verbs: `put`, `restore`, `list` and `empty`.
//!
//! Each call resolves the Trash root again from the home directory, so a
//! `Trash` value holds no state beyond its inputs.

use crate::errors::TrashError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::helpers::{
    absolute_path, base_name, lexical_normalize, local_naive_time, reject_dot_path,
    sanitize_user_path, TRASHINFO_EXTENSION,
};
use crate::models::{EmptySummary, TrashDirectory, TrashedItem};
use crate::paths::{home_trash_path, resolve_trash_directory};
use crate::transfer::{copy_entry, make_room, remove_entry, transfer, Strategy};
use crate::trashinfo;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the home directory.
pub const HOME_ENV: &str = "HOME";

#[derive(Debug, Clone)]
pub struct Trash<F = RealFileSystem> {
    home: PathBuf,
    fs: F,
}

impl Trash<RealFileSystem> {
    /// Builds a Trash for the current user from `$HOME`.
    pub fn from_env() -> crate::Result<Self> {
        let home = env::var_os(HOME_ENV)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| TrashError::path_resolution(format!("{HOME_ENV} is not set")))?;
        Ok(Self::new(PathBuf::from(home), RealFileSystem))
    }
}

impl<F: FileSystem> Trash<F> {
    pub fn new(home: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            home: home.into(),
            fs,
        }
    }

    /// Resolves the Trash root and its two halves.
    pub fn directory(&self) -> crate::Result<TrashDirectory> {
        resolve_trash_directory(&self.fs, &self.home)
    }

    /// Moves `item_path` into the Trash and records where it came from.
    ///
    /// The record is written only after the item is in `files/`. If writing it
    /// fails the stored item stays behind without metadata.
    pub fn put(&self, item_path: &Path) -> crate::Result<TrashedItem> {
        if item_path.as_os_str().is_empty() {
            return Err(TrashError::invalid_argument("file path is required"));
        }
        reject_dot_path(item_path)?;
        let source = absolute_path(item_path)?;
        let name = base_name(&source)?.to_string();
        let original = source
            .to_str()
            .ok_or_else(|| {
                TrashError::invalid_argument(format!(
                    "{} is not valid UTF-8",
                    sanitize_user_path(&source)
                ))
            })?
            .to_string();
        trashinfo::validate_path(&original)?;
        if !self.fs.exists(&source) {
            return Err(TrashError::not_found(format!(
                "{} does not exist",
                sanitize_user_path(&source)
            )));
        }

        let trash = self.directory()?;
        self.ensure_outside_trash(&trash, &source)?;
        self.fs.create_dir_all(&trash.files_dir)?;
        self.fs.create_dir_all(&trash.info_dir)?;

        let destination = trash.stored_path(&name);
        if self.fs.exists(&destination) {
            warn!(name = %name, "replacing an item with the same name already in the trash");
        }

        let strategy = transfer(&self.fs, &source, &destination)?;

        let deleted_at = local_naive_time(self.fs.now());
        let item = TrashedItem::new(&trash, name, source, deleted_at);
        debug!(record = %item.metadata_path.display(), "writing trash info");
        self.fs
            .write_to_string(&item.metadata_path, &trashinfo::encode(&original, &deleted_at))?;

        info!(path = %original, %strategy, "moved to trash");
        Ok(item)
    }

    /// Restores the trashed item whose name matches `item_path` to `item_path`.
    ///
    /// The recorded original path only has to agree on the base name; the
    /// caller's path is always the destination. An existing destination is
    /// overwritten.
    pub fn restore(&self, item_path: &Path) -> crate::Result<PathBuf> {
        if item_path.as_os_str().is_empty() {
            return Err(TrashError::invalid_argument("file path is required"));
        }
        reject_dot_path(item_path)?;
        let destination = absolute_path(item_path)?;
        let name = base_name(&destination)?;
        debug!(path = %destination.display(), "restoring");

        let trash = self.directory()?;
        self.ensure_outside_trash(&trash, &destination)?;
        let metadata_path = trash.metadata_path(name);
        if !self.fs.exists(&metadata_path) {
            return Err(TrashError::not_found("file not found in Trash"));
        }

        let record = trashinfo::decode(&self.fs.read_to_string(&metadata_path)?)?;
        debug!(original = %record.path, deleted = %record.deletion_date, "read trash info");

        let recorded_name = Path::new(&record.path)
            .file_name()
            .and_then(|n| n.to_str());
        if recorded_name != Some(name) {
            return Err(TrashError::Mismatch(format!(
                "file path does not match the original: {} was trashed from {}",
                name, record.path
            )));
        }

        let stored = self
            .entries(&trash.files_dir)?
            .into_iter()
            .find(|entry| entry.file_name().and_then(|n| n.to_str()) == Some(name))
            .ok_or_else(|| {
                TrashError::not_found(format!("{name} has a trash info record but no stored file"))
            })?;

        if self.fs.exists(&destination) {
            warn!(path = %destination.display(), "overwriting existing file");
            make_room(&self.fs, &stored, &destination, Strategy::CopyThenRemove)?;
        }

        copy_entry(&self.fs, &stored, &destination)?;
        self.fs.remove_file(&metadata_path)?;
        remove_entry(&self.fs, &stored)?;

        info!(path = %destination.display(), "restored from trash");
        Ok(destination)
    }

    /// Lists every trashed item in directory order.
    ///
    /// Fails on the first item missing either half, or whose record does not
    /// parse.
    pub fn list(&self) -> crate::Result<Vec<TrashedItem>> {
        let trash = self.directory()?;
        let mut items = Vec::new();

        for stored in self.entries(&trash.files_dir)? {
            let name = stored
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let metadata_path = trash.metadata_path(&name);
            if !self.fs.exists(&metadata_path) {
                return Err(TrashError::not_found(format!(
                    "{name} has no trash info record"
                )));
            }

            let record = trashinfo::decode(&self.fs.read_to_string(&metadata_path)?)?;
            let deleted_at = record.deletion_time()?;
            items.push(TrashedItem::new(
                &trash,
                name,
                PathBuf::from(record.path),
                deleted_at,
            ));
        }

        for record in self.entries(&trash.info_dir)? {
            let Some(name) = record
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(TRASHINFO_EXTENSION))
            else {
                continue;
            };
            if !self.fs.exists(&trash.stored_path(name)) {
                return Err(TrashError::not_found(format!(
                    "trash info record for {name} has no stored file"
                )));
            }
        }

        Ok(items)
    }

    /// Deletes everything under `files/` and then `info/`, keeping both
    /// directories.
    pub fn empty(&self) -> crate::Result<EmptySummary> {
        let trash = self.directory()?;
        self.fs.create_dir_all(&trash.files_dir)?;
        self.fs.create_dir_all(&trash.info_dir)?;

        let summary = EmptySummary {
            files_removed: self.remove_contents(&trash.files_dir)?,
            records_removed: self.remove_contents(&trash.info_dir)?,
        };
        info!(
            files = summary.files_removed,
            records = summary.records_removed,
            "emptied trash"
        );
        Ok(summary)
    }

    // Covers both the resolved root and the well-known path, and both
    // directions: inside `files/`/`info/`, or an ancestor of them.
    fn ensure_outside_trash(&self, trash: &TrashDirectory, path: &Path) -> crate::Result<()> {
        let path = lexical_normalize(path);
        let well_known = TrashDirectory::new(home_trash_path(&self.home));
        let reserved = [
            &trash.files_dir,
            &trash.info_dir,
            &well_known.files_dir,
            &well_known.info_dir,
        ];
        for dir in reserved {
            let dir = lexical_normalize(dir);
            if path.starts_with(&dir) || dir.starts_with(&path) {
                return Err(TrashError::invalid_argument(format!(
                    "{} overlaps the Trash directory {}",
                    sanitize_user_path(&path),
                    sanitize_user_path(&dir)
                )));
            }
        }
        Ok(())
    }

    // A missing half-directory reads as empty.
    fn entries(&self, dir: &Path) -> crate::Result<Vec<PathBuf>> {
        if !self.fs.exists(dir) {
            return Ok(Vec::new());
        }
        self.fs.list_dir(dir)
    }

    fn remove_contents(&self, dir: &Path) -> crate::Result<usize> {
        let entries = self.fs.list_dir(dir)?;
        for entry in &entries {
            debug!(path = %entry.display(), "removing");
            remove_entry(&self.fs, entry)?;
        }
        Ok(entries.len())
    }
}
