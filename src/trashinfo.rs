//! The `.trashinfo` sidecar record.
//!
//! ```text
//! [Trash Info]
//! Path=<absolute original path>
//! DeletionDate=<YYYY-MM-DDTHH:MM:SS>
//! ```
//!
//! Decoding is strict: the header, then `Path`, then `DeletionDate`, each
//! split on its first `=`. Extra, missing or reordered lines are rejected.

use crate::errors::TrashError;
use crate::helpers::{format_trash_datetime, parse_trash_datetime};
use chrono::NaiveDateTime;

pub const HEADER: &str = "[Trash Info]";
pub const PATH_KEY: &str = "Path";
pub const DELETION_DATE_KEY: &str = "DeletionDate";

/// A decoded record. The deletion date is kept as written; use
/// [`TrashInfo::deletion_time`] to parse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashInfo {
    pub path: String,
    pub deletion_date: String,
}

impl TrashInfo {
    pub fn deletion_time(&self) -> crate::Result<NaiveDateTime> {
        parse_trash_datetime(&self.deletion_date)
    }
}

/// Checks that `original_path` fits on the `Path=` line.
///
/// `\n` would split the record and `\r` is stripped by line splitting, so
/// either one breaks the round trip.
pub fn validate_path(original_path: &str) -> crate::Result<()> {
    if original_path.contains(['\n', '\r']) {
        return Err(TrashError::invalid_argument(format!(
            "{original_path:?} contains a line break"
        )));
    }
    Ok(())
}

/// Renders the three-line, newline-terminated record.
///
/// `original_path` must pass [`validate_path`].
pub fn encode(original_path: &str, deleted_at: &NaiveDateTime) -> String {
    format!(
        "{HEADER}\n{PATH_KEY}={original_path}\n{DELETION_DATE_KEY}={}\n",
        format_trash_datetime(deleted_at)
    )
}

/// Parses a record without validating the path or the date.
pub fn decode(text: &str) -> crate::Result<TrashInfo> {
    // `lines` absorbs the final newline; any further line is rejected below.
    let mut lines = text.lines();
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| TrashError::malformed(format!("missing {what} line")))
    };

    let header = next_line("header")?;
    if header != HEADER {
        return Err(TrashError::malformed(format!("unexpected header {header:?}")));
    }
    let path = field(next_line(PATH_KEY)?, PATH_KEY)?;
    let deletion_date = field(next_line(DELETION_DATE_KEY)?, DELETION_DATE_KEY)?;

    if let Some(extra) = lines.next() {
        return Err(TrashError::malformed(format!("unexpected trailing line {extra:?}")));
    }

    Ok(TrashInfo {
        path: path.to_string(),
        deletion_date: deletion_date.to_string(),
    })
}

fn field<'a>(line: &'a str, expected_key: &str) -> crate::Result<&'a str> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| TrashError::malformed(format!("line {line:?} has no '='")))?;
    if key != expected_key {
        return Err(TrashError::malformed(format!(
            "expected key {expected_key:?}, found {key:?}"
        )));
    }
    Ok(value)
}
