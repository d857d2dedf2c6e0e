//! Freedesktop-style Trash for the current user.
//!
//! Items are moved into `~/.local/share/Trash/files` with a paired
//! `info/<name>.trashinfo` record holding the original path and the deletion
//! date. [`Trash`] exposes the four operations: put, restore, list and empty.

pub mod errors;
pub mod fs;
pub mod helpers;
pub mod models;
pub mod paths;
pub mod transfer;
pub mod trash;
pub mod trashinfo;

#[cfg(test)]
mod testing;

pub use errors::{Result, TrashError};
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{
    parse_trash_datetime,
    sanitize_user_path,
    DISPLAY_TIME_FORMAT,
    TRASHINFO_EXTENSION,
    TRASHINFO_TIME_FORMAT,
};
pub use models::{EmptySummary, TrashDirectory, TrashedItem};
pub use paths::{resolve_trash_directory, resolve_trash_root};
pub use transfer::Strategy;
pub use trash::Trash;
pub use trashinfo::TrashInfo;
