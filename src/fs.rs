use crate::errors::TrashError;
use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, OpenOptionsExt};

/// Filesystem abstraction boundary for the Trash operations.
///
/// Every call the operations make goes through this trait, so tests can pin
/// the clock or force the cross-device branch without a second mount.
pub trait FileSystem: Send + Sync {
    /// Returns the current time in wall-clock format.
    fn now(&self) -> SystemTime;

    /// Returns true when path exists, without following a final symlink.
    fn exists(&self, path: &Path) -> bool {
        self.symlink_metadata(path).is_ok()
    }

    /// Reads symlink metadata.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Reads the target of a symbolic link.
    fn read_link(&self, path: &Path) -> crate::Result<PathBuf>;

    /// Creates a symbolic link at `link` pointing to `target`.
    fn symlink(&self, target: &Path, link: &Path) -> crate::Result<()>;

    /// Creates a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Writes UTF-8 text, truncating any previous content.
    fn write_to_string(&self, path: &Path, content: &str) -> crate::Result<()>;

    /// Reads UTF-8 text.
    fn read_to_string(&self, path: &Path) -> crate::Result<String>;

    /// Copies the bytes of a regular file, creating `to` with mode 0644.
    fn copy_file(&self, from: &Path, to: &Path) -> crate::Result<u64>;

    /// Removes a file or symlink.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Removes a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Renames/moves a path.
    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()>;

    /// Lists directory children as concrete paths, in traversal order.
    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>>;

    /// Reports whether `a` and `b` live on the same filesystem device.
    fn same_device(&self, a: &Path, b: &Path) -> crate::Result<bool>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| TrashError::io(path, err))
    }

    fn read_link(&self, path: &Path) -> crate::Result<PathBuf> {
        fs::read_link(path).map_err(|err| TrashError::io(path, err))
    }

    #[cfg(unix)]
    fn symlink(&self, target: &Path, link: &Path) -> crate::Result<()> {
        std::os::unix::fs::symlink(target, link).map_err(|err| TrashError::io(link, err))
    }

    #[cfg(not(unix))]
    fn symlink(&self, _target: &Path, link: &Path) -> crate::Result<()> {
        Err(TrashError::io(
            link,
            io::Error::new(io::ErrorKind::Unsupported, "symbolic links are not supported"),
        ))
    }

    fn create_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::create_dir_all(path).map_err(|err| TrashError::io(path, err))
    }

    fn write_to_string(&self, path: &Path, content: &str) -> crate::Result<()> {
        fs::write(path, content).map_err(|err| TrashError::io(path, err))
    }

    fn read_to_string(&self, path: &Path) -> crate::Result<String> {
        fs::read_to_string(path).map_err(|err| TrashError::io(path, err))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> crate::Result<u64> {
        let mut source = fs::File::open(from).map_err(|err| TrashError::io(from, err))?;
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);
        let mut destination = options.open(to).map_err(|err| TrashError::io(to, err))?;
        io::copy(&mut source, &mut destination).map_err(|err| TrashError::io(to, err))
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| TrashError::io(path, err))
    }

    fn remove_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::remove_dir_all(path).map_err(|err| TrashError::io(path, err))
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()> {
        fs::rename(from, to).map_err(|err| TrashError::io(from, err))
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .map_err(|err| TrashError::io(path, err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| TrashError::io(path, err))
    }

    #[cfg(unix)]
    fn same_device(&self, a: &Path, b: &Path) -> crate::Result<bool> {
        let a_dev = self.symlink_metadata(a)?.dev();
        let b_dev = fs::metadata(b).map_err(|err| TrashError::io(b, err))?.dev();
        Ok(a_dev == b_dev)
    }

    // Without a device id the safe answer is "different", which forces a copy.
    #[cfg(not(unix))]
    fn same_device(&self, _a: &Path, _b: &Path) -> crate::Result<bool> {
        Ok(false)
    }
}
