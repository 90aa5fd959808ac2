//! Job discovery and resumable state on disk.
//!
//! Layout under the root directory: one subdirectory per job key holding
//! `info.json` (playlist URL), `index.m3u8.back` (saved playlist body),
//! `placeholder.txt` (completion marker) and the downloaded segment files.

mod info;
mod listing;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use info::{read_playlist_url, PlaylistInfo};
pub use listing::{scan, JobListing, SourceKind};

/// Empty file marking a job whose segments are all present.
pub const COMPLETION_MARKER: &str = "placeholder.txt";
/// Previously saved playlist body; preferred over `info.json`.
pub const PLAYLIST_BACKUP: &str = "index.m3u8.back";
/// Metadata holding the canonical playlist URL.
pub const INFO_FILE: &str = "info.json";

/// Where a job's playlist body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    /// Fetch the playlist from this URL.
    Url(String),
    /// Playlist text read from the backup file.
    Saved(String),
}

/// One playlist-download unit: a job directory and its playlist source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub key: String,
    pub dir: PathBuf,
    pub source: JobSource,
}

impl Job {
    /// URL relative segment references are resolved against, if any.
    pub fn base_url(&self) -> Option<&str> {
        match &self.source {
            JobSource::Url(url) => Some(url),
            JobSource::Saved(_) => None,
        }
    }

    pub fn marker_path(&self) -> PathBuf {
        self.dir.join(COMPLETION_MARKER)
    }
}

/// Persisted state of a job directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Complete,
}

/// Reads the job status from marker presence.
pub fn status(dir: &Path) -> JobStatus {
    if dir.join(COMPLETION_MARKER).exists() {
        JobStatus::Complete
    } else {
        JobStatus::Pending
    }
}

/// Discovers pending jobs under `root`, sorted by key.
///
/// A marker skips the key; otherwise the backup body wins over `info.json`.
/// Keys with neither (or with unreadable metadata) produce no job.
pub fn discover(root: &Path) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for (key, dir) in job_dirs(root)? {
        if status(&dir) == JobStatus::Complete {
            tracing::debug!(key = %key, "already complete, skipping");
            continue;
        }
        match source_for(&key, &dir) {
            Some(source) => jobs.push(Job { key, dir, source }),
            None => tracing::debug!(key = %key, "no playlist source, skipping"),
        }
    }
    tracing::info!(root = %root.display(), count = jobs.len(), "discovered pending jobs");
    Ok(jobs)
}

/// Creates the completion marker. Creating it again is not an error.
pub fn mark_complete(job: &Job) -> Result<()> {
    let path = job.marker_path();
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .with_context(|| format!("failed to create marker {}", path.display()))?;
    tracing::info!(key = %job.key, "job marked complete");
    Ok(())
}

/// Immediate subdirectories of `root` as (key, path), sorted by key.
fn job_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to list {}", root.display()))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(key) => dirs.push((key, path)),
            Err(name) => tracing::warn!(?name, "skipping non-UTF-8 job directory"),
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// Resolves the playlist source for a job directory, ignoring the marker.
fn source_for(key: &str, dir: &Path) -> Option<JobSource> {
    let backup = dir.join(PLAYLIST_BACKUP);
    if backup.exists() {
        return match fs::read(&backup) {
            Ok(bytes) => Some(JobSource::Saved(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) => {
                tracing::warn!(key, path = %backup.display(), "cannot read playlist backup: {}", e);
                None
            }
        };
    }

    let info = dir.join(INFO_FILE);
    if info.exists() {
        return match read_playlist_url(&info) {
            Ok(url) => Some(JobSource::Url(url)),
            Err(e) => {
                tracing::warn!(key, "ignoring {}: {:#}", info.display(), e);
                None
            }
        };
    }

    None
}
