//! One download pass over a job's playlist.
//!
//! Parses the playlist, drops its self-reference, and satisfies every
//! remaining entry on a bounded worker pool: an existing file counts as done,
//! anything else gets exactly one fetch and a write. Failures are collected
//! per entry; the pass always drains the whole list.

mod error;
mod pool;
mod progress;
mod store;

use crate::fetch::Fetch;
use crate::job_store::Job;
use crate::playlist;
use tokio::sync::mpsc::error::TrySendError;

pub use error::{EntryError, EntryErrorCause};
pub use progress::ProgressTick;

use pool::EntryOutcome;

/// Outcome of one pass over a job.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Entries processed (self-reference excluded).
    pub total: usize,
    /// Entries fetched and written in this pass.
    pub fetched_count: usize,
    /// Entries whose file already existed, or was written by an earlier
    /// entry with the same local filename during this pass.
    pub skipped_count: usize,
    /// Failed entries, in playlist order.
    pub errors: Vec<EntryError>,
}

impl FetchReport {
    /// True when every entry is satisfied.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs download passes with a fixed concurrency ceiling.
pub struct SegmentFetcher<F> {
    fetch: F,
    concurrency: usize,
}

impl<F: Fetch> SegmentFetcher<F> {
    pub fn new(fetch: F, concurrency: usize) -> Self {
        Self {
            fetch,
            concurrency: concurrency.max(1),
        }
    }

    /// Downloads every entry of `playlist_body` into `job.dir`.
    ///
    /// Blocks until all entries have been attempted. If `progress_tx` is
    /// `Some`, one tick is offered per processed entry. Ticks are dropped while
    /// the channel is full, except the last one, which waits for room.
    /// Must not be called from inside an async task.
    pub fn run(
        &self,
        job: &Job,
        playlist_body: &str,
        progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressTick>>,
    ) -> FetchReport {
        let mut entries = playlist::parse(playlist_body);
        if !entries.is_empty() {
            // The first reference is the playlist's own header, not a segment.
            entries.remove(0);
        }

        let total = entries.len();
        let mut report = FetchReport {
            total,
            ..FetchReport::default()
        };
        let mut failed: Vec<(usize, EntryErrorCause)> = Vec::new();
        let mut processed = 0usize;

        tracing::info!(key = %job.key, total, concurrency = self.concurrency, "fetch pass started");

        pool::run_pool(
            &job.dir,
            job.base_url(),
            &entries,
            &self.fetch,
            self.concurrency,
            |index, res| {
                processed += 1;
                match res {
                    Ok(EntryOutcome::Fetched) => report.fetched_count += 1,
                    Ok(EntryOutcome::Present | EntryOutcome::Duplicate) => report.skipped_count += 1,
                    Err(cause) => {
                        tracing::warn!(key = %job.key, reference = %entries[index].target, "entry failed: {}", cause);
                        failed.push((index, cause));
                    }
                }
                if let Some(tx) = progress_tx {
                    let tick = ProgressTick {
                        key: job.key.clone(),
                        current: processed,
                        total,
                    };
                    // Intermediate ticks may be dropped; the final one always arrives.
                    if let Err(TrySendError::Full(tick)) = tx.try_send(tick) {
                        if processed == total {
                            let _ = tx.blocking_send(tick);
                        }
                    }
                }
            },
        );

        failed.sort_by_key(|(index, _)| *index);
        report.errors = failed
            .into_iter()
            .map(|(index, cause)| EntryError {
                target: entries[index].target.clone(),
                cause,
            })
            .collect();

        tracing::info!(
            key = %job.key,
            fetched = report.fetched_count,
            skipped = report.skipped_count,
            failed = report.errors.len(),
            "fetch pass finished"
        );
        report
    }
}
