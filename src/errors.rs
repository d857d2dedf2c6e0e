use std::{io, path::PathBuf};

/// Error type returned by every Trash operation.
#[derive(thiserror::Error, Debug)]
pub enum TrashError {
    /// File system I/O failure.
    #[error("I/O error while accessing {}: {1}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    /// A required path argument is missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The Trash root cannot be determined.
    #[error("cannot resolve Trash directory: {0}")]
    PathResolution(String),

    /// The requested item, or one half of it, is absent from the Trash.
    #[error("{0}")]
    NotFound(String),

    /// The restore target does not match the recorded original.
    #[error("{0}")]
    Mismatch(String),

    /// A `.trashinfo` record does not follow the expected grammar.
    #[error("malformed trash info record: {0}")]
    MalformedRecord(String),

    /// A deletion date does not match `YYYY-MM-DDTHH:MM:SS`.
    #[error("invalid deletion date: {0:?}")]
    InvalidTimestamp(String),
}

impl TrashError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn path_resolution(message: impl Into<String>) -> Self {
        Self::PathResolution(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io(path.into(), error)
    }
}

/// Shared result alias for the core crate.
pub type Result<T> = std::result::Result<T, TrashError>;
