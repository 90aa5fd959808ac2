//! Segment file placement: presence check, address resolution, staged write.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::EntryErrorCause;
use crate::playlist::local_filename;

/// Suffix of the staging files a segment is written to before it is moved into place.
pub(super) const TEMP_SUFFIX: &str = ".part";

/// What a staged write ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Placement {
    /// The payload now lives at the final path.
    Written,
    /// Another entry with the same local filename got there first; its file is kept.
    AlreadyPresent,
}

/// Where the segment for `target` lives inside `dir`.
pub(super) fn segment_path(dir: &Path, target: &str) -> Result<PathBuf, EntryErrorCause> {
    match local_filename(target) {
        "" | "." | ".." => Err(EntryErrorCause::InvalidFilename),
        name => Ok(dir.join(name)),
    }
}

/// Address to fetch for `target`.
///
/// Absolute URLs and jobs without a playlist URL use the target verbatim;
/// relative references are joined onto `base`.
pub(super) fn fetch_address(base: Option<&str>, target: &str) -> Result<String, EntryErrorCause> {
    match (url::Url::parse(target), base) {
        (Ok(_), _) | (Err(_), None) => Ok(target.to_string()),
        (Err(_), Some(base)) => Ok(url::Url::parse(base)?.join(target)?.to_string()),
    }
}

/// Writes `bytes` to a uniquely named `.part` file next to `path`, then moves
/// it into place without replacing an existing file, so `path` only ever
/// exists with a complete payload.
pub(super) fn write_segment(path: &Path, bytes: &[u8]) -> io::Result<Placement> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let prefix = match path.file_name() {
        Some(name) => format!(".{}.", name.to_string_lossy()),
        None => ".".to_string(),
    };
    let mut staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    match staged.persist_noclobber(path) {
        Ok(_) => Ok(Placement::Written),
        // Dropping the returned handle removes the staging file.
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(Placement::AlreadyPresent),
        Err(e) => Err(e.error),
    }
}
