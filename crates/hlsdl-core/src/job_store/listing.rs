//! Status listing of every job directory (pending, complete, or unusable).

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{job_dirs, source_for, status, JobSource, JobStatus};

/// Which playlist source a directory would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Saved,
    Url,
}

#[derive(Debug, Clone)]
pub struct JobListing {
    pub key: String,
    pub dir: PathBuf,
    pub status: JobStatus,
    /// None when the directory has neither a backup nor usable metadata.
    pub source: Option<SourceKind>,
}

/// Lists every subdirectory of `root`, sorted by key, including complete ones.
pub fn scan(root: &Path) -> Result<Vec<JobListing>> {
    Ok(job_dirs(root)?
        .into_iter()
        .map(|(key, dir)| {
            let source = source_for(&key, &dir).map(|s| match s {
                JobSource::Saved(_) => SourceKind::Saved,
                JobSource::Url(_) => SourceKind::Url,
            });
            JobListing {
                status: status(&dir),
                key,
                dir,
                source,
            }
        })
        .collect())
}
