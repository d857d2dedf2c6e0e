//! Test double over the real filesystem.

use crate::fs::{FileSystem, RealFileSystem};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

/// Mutating calls seen by [`RecordingFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Rename,
    CopyFile,
    Symlink,
    /// Carries the watched path's content at the moment of removal.
    RemoveFile { watched_content: Option<Vec<u8>> },
    RemoveDirAll,
}

/// Delegates to [`RealFileSystem`] but answers `same_device` with a fixed
/// value, can pin the clock, and records every mutating call in order.
pub struct RecordingFileSystem {
    same_device: bool,
    clock: Option<SystemTime>,
    watched: Option<PathBuf>,
    ops: Mutex<Vec<Op>>,
}

impl RecordingFileSystem {
    pub fn same_device(same_device: bool) -> Self {
        Self {
            same_device,
            clock: None,
            watched: None,
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn with_clock(mut self, now: SystemTime) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn watching(mut self, path: &Path) -> Self {
        self.watched = Some(path.to_path_buf());
        self
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

impl FileSystem for RecordingFileSystem {
    fn now(&self) -> SystemTime {
        self.clock.unwrap_or_else(SystemTime::now)
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        RealFileSystem.symlink_metadata(path)
    }

    fn read_link(&self, path: &Path) -> crate::Result<PathBuf> {
        RealFileSystem.read_link(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> crate::Result<()> {
        self.record(Op::Symlink);
        RealFileSystem.symlink(target, link)
    }

    fn create_dir_all(&self, path: &Path) -> crate::Result<()> {
        RealFileSystem.create_dir_all(path)
    }

    fn write_to_string(&self, path: &Path, content: &str) -> crate::Result<()> {
        RealFileSystem.write_to_string(path, content)
    }

    fn read_to_string(&self, path: &Path) -> crate::Result<String> {
        RealFileSystem.read_to_string(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> crate::Result<u64> {
        self.record(Op::CopyFile);
        RealFileSystem.copy_file(from, to)
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        let watched_content = self
            .watched
            .as_deref()
            .and_then(|watched| std::fs::read(watched).ok());
        self.record(Op::RemoveFile { watched_content });
        RealFileSystem.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> crate::Result<()> {
        self.record(Op::RemoveDirAll);
        RealFileSystem.remove_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()> {
        self.record(Op::Rename);
        RealFileSystem.rename(from, to)
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        RealFileSystem.list_dir(path)
    }

    fn same_device(&self, _a: &Path, _b: &Path) -> crate::Result<bool> {
        Ok(self.same_device)
    }
}
